use crate::error;

/// An error that occurs when decoding TZif data.
#[derive(Clone, Debug)]
pub(crate) enum Error {
    Invalid { name: Box<str> },
    Message(Box<str>),
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Tzif(err).into()
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
            Invalid { ref name } => {
                write!(f, "invalid TZif data for time zone `{name}`")
            }
            Message(ref msg) => f.write_str(msg),
        }
    }
}
