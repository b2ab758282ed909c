use crate::{error, Unit};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    FailedAddCalendar { unit: Unit },
    FailedAddTime { unit: Unit },
    FailedStartOfDay,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Zoned(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            FailedAddCalendar { unit } => write!(
                f,
                "failed to add {unit} to the local datetime of \
                 zoned datetime",
                unit = unit.plural(),
            ),
            FailedAddTime { unit } => write!(
                f,
                "failed to add {unit} to the instant of zoned datetime",
                unit = unit.plural(),
            ),
            FailedStartOfDay => {
                f.write_str("failed to find start of day in time zone")
            }
        }
    }
}
