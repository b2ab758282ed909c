use crate::{error, util::escape};

/// Errors that occur while compiling a pattern.
#[derive(Clone, Debug)]
pub(crate) enum Error {
    Compile { pattern: Box<str> },
    UnclosedQuote { position: usize },
    UnknownLetter { letter: char, position: usize },
    UnsupportedWidth { letter: char, count: usize },
}

/// Errors that occur while formatting a value with a compiled pattern.
#[derive(Clone, Debug)]
pub(crate) enum FormatError {
    Failed { pattern: Box<str> },
    MissingField { field: &'static str },
}

/// Errors that occur while parsing text with a compiled pattern.
#[derive(Clone, Debug)]
pub(crate) enum ParseError {
    Conflict { what: &'static str },
    ExpectedAmPm { found: Option<u8> },
    ExpectedDigits { what: &'static str, found: Option<u8> },
    ExpectedLiteral { expected: Box<str>, found: Box<str> },
    Failed { input: Box<str>, pattern: Box<str> },
    InvalidField { what: &'static str },
    MissingAmPm,
    MissingHourForMinute,
    MissingMinuteForSecond,
    MissingSecondForFraction,
    Required { what: &'static str, value: &'static str },
    Trailing { unparsed: Box<str> },
}

impl ParseError {
    pub(crate) fn failed(input: &[u8], pattern: &str) -> ParseError {
        ParseError::Failed {
            input: escape::Bytes(input).to_string().into_boxed_str(),
            pattern: pattern.into(),
        }
    }

    pub(crate) fn expected_literal(
        expected: &str,
        found: &[u8],
    ) -> ParseError {
        let end = found.len().min(expected.len());
        ParseError::ExpectedLiteral {
            expected: expected.into(),
            found: escape::Bytes(&found[..end]).to_string().into_boxed_str(),
        }
    }

    pub(crate) fn trailing(unparsed: &[u8]) -> ParseError {
        ParseError::Trailing {
            unparsed: escape::Bytes(unparsed).to_string().into_boxed_str(),
        }
    }
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::FmtPattern(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl From<FormatError> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: FormatError) -> error::Error {
        error::ErrorKind::FmtPatternFormat(err).into()
    }
}

impl error::IntoError for FormatError {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl From<ParseError> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: ParseError) -> error::Error {
        error::ErrorKind::FmtPatternParse(err).into()
    }
}

impl error::IntoError for ParseError {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            Compile { ref pattern } => {
                write!(f, "failed to compile pattern `{pattern}`")
            }
            UnclosedQuote { position } => write!(
                f,
                "quoted literal starting at position {position} \
                 is missing its closing `'`",
            ),
            UnknownLetter { letter, position } => write!(
                f,
                "unrecognized pattern letter `{letter}` at \
                 position {position} (quote literal text with `'`)",
            ),
            UnsupportedWidth { letter, count } => write!(
                f,
                "pattern letter `{letter}` cannot be repeated {count} times",
            ),
        }
    }
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::FormatError::*;

        match *self {
            Failed { ref pattern } => {
                write!(f, "failed to format value with pattern `{pattern}`")
            }
            MissingField { field } => write!(
                f,
                "pattern requires {field}, but the value being \
                 formatted does not have one",
            ),
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ParseError::*;

        match *self {
            Conflict { what } => write!(
                f,
                "parsed {what} more than once with conflicting values",
            ),
            ExpectedAmPm { found: Some(byte) } => write!(
                f,
                "expected `AM` or `PM`, but found `{byte}`",
                byte = escape::Byte(byte),
            ),
            ExpectedAmPm { found: None } => {
                f.write_str("expected `AM` or `PM`, but found end of input")
            }
            ExpectedDigits { what, found: Some(byte) } => write!(
                f,
                "expected digits for {what}, but found `{byte}`",
                byte = escape::Byte(byte),
            ),
            ExpectedDigits { what, found: None } => write!(
                f,
                "expected digits for {what}, but found end of input",
            ),
            ExpectedLiteral { ref expected, ref found } => write!(
                f,
                "expected literal `{expected}`, but found `{found}`",
            ),
            Failed { ref input, ref pattern } => write!(
                f,
                "failed to parse `{input}` with pattern `{pattern}`",
            ),
            InvalidField { what } => write!(f, "parsed {what} is invalid"),
            MissingAmPm => f.write_str(
                "parsed a 12-hour clock hour, but no AM/PM marker \
                 to disambiguate it",
            ),
            MissingHourForMinute => f.write_str(
                "parsing format did not include hour directive, \
                 but did include minute directive (cannot have \
                 smaller time units with bigger time units missing)",
            ),
            MissingMinuteForSecond => f.write_str(
                "parsing format did not include minute directive, \
                 but did include second directive (cannot have \
                 smaller time units with bigger time units missing)",
            ),
            MissingSecondForFraction => f.write_str(
                "parsing format did not include second directive, \
                 but did include fractional second directive (cannot \
                 have smaller time units with bigger time units missing)",
            ),
            Required { what, value } => write!(
                f,
                "a {what} is required to build a {value}, \
                 but the pattern did not parse one",
            ),
            Trailing { ref unparsed } => write!(
                f,
                "pattern matched, but found unparsed trailing \
                 input `{unparsed}`",
            ),
        }
    }
}
