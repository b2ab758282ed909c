use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    #[cfg(feature = "tzdb-zoneinfo")]
    ZoneInfoNotDirectory,
    UnknownZone { name: Box<str> },
}

impl Error {
    pub(crate) fn unknown_zone(name: &str) -> Error {
        Error::UnknownZone { name: name.into() }
    }
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::TzDb(err).into()
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
            #[cfg(feature = "tzdb-zoneinfo")]
            ZoneInfoNotDirectory => {
                f.write_str("zoneinfo database path is not a directory")
            }
            UnknownZone { ref name } => write!(
                f,
                "unknown time zone identifier `{name}` (expected `Z`, \
                 `+HH:MM`, `-HH:MM`, a `UTC`/`GMT`/`UT` prefixed offset \
                 or a region name known to the registry)",
            ),
        }
    }
}
