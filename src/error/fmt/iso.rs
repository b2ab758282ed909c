use crate::{error, tz::Offset, util::escape};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    Expected { what: &'static str, found: Option<u8> },
    Failed { what: &'static str, input: Box<str> },
    InconsistentOffset { offset: Offset, id: Box<str> },
    InvalidField { what: &'static str },
    MissingOffset,
    TooManyFractionDigits,
    Trailing { unparsed: Box<str> },
    UnclosedAnnotation,
}

impl Error {
    pub(crate) fn failed(what: &'static str, input: &[u8]) -> Error {
        Error::Failed {
            what,
            input: escape::Bytes(input).to_string().into_boxed_str(),
        }
    }

    pub(crate) fn trailing(unparsed: &[u8]) -> Error {
        Error::Trailing {
            unparsed: escape::Bytes(unparsed).to_string().into_boxed_str(),
        }
    }
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::FmtIso(err).into()
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
            Expected { what, found: Some(byte) } => write!(
                f,
                "expected {what}, but found `{byte}`",
                byte = escape::Byte(byte),
            ),
            Expected { what, found: None } => {
                write!(f, "expected {what}, but found end of input")
            }
            Failed { what, ref input } => {
                write!(f, "failed to parse `{input}` as {what}")
            }
            InconsistentOffset { offset, ref id } => write!(
                f,
                "offset {offset} is not valid for the parsed datetime \
                 in time zone {id}",
            ),
            InvalidField { what } => write!(f, "invalid {what}"),
            MissingOffset => f.write_str(
                "an instant requires a UTC offset or `Z` after the time, \
                 but none was found",
            ),
            TooManyFractionDigits => f.write_str(
                "fractional seconds support at most 9 digits",
            ),
            Trailing { ref unparsed } => write!(
                f,
                "parsed value successfully, but found unparsed \
                 trailing input `{unparsed}`",
            ),
            UnclosedAnnotation => f.write_str(
                "found opening `[` for time zone annotation, \
                 but no closing `]`",
            ),
        }
    }
}
