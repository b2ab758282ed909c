use crate::error;

/// An error that occurs when parsing or interpreting a POSIX `TZ` rule
/// string.
#[derive(Clone, Debug)]
pub(crate) enum Error {
    DstOffset,
    Invalid { input: Box<str> },
    Message(Box<str>),
    StdOffset,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::TzPosix(err).into()
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
            DstOffset => f.write_str("invalid DST offset"),
            Invalid { ref input } => {
                write!(f, "invalid POSIX time zone string `{input}`")
            }
            Message(ref msg) => f.write_str(msg),
            StdOffset => f.write_str("invalid standard offset"),
        }
    }
}
