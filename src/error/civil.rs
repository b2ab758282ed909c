use crate::{error, Field, Unit};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    FailedAdd { unit: Unit, what: &'static str },
    FailedConvertToInstant,
    UnsupportedField { field: Field, what: &'static str },
    UnsupportedUnit { unit: Unit, what: &'static str },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Civil(err).into()
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
            FailedAdd { unit, what } => write!(
                f,
                "failed to add {unit} to {what}",
                unit = unit.plural(),
            ),
            FailedConvertToInstant => f.write_str(
                "converting civil datetime to instant overflowed \
                 the supported range",
            ),
            UnsupportedField { field, what } => write!(
                f,
                "field `{field}` is not supported by {what}",
                field = field.name(),
            ),
            UnsupportedUnit { unit, what } => write!(
                f,
                "unit `{unit}` is not supported by {what}",
                unit = unit.plural(),
            ),
        }
    }
}
