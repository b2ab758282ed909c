use std::sync::Arc;

pub(crate) mod civil;
pub(crate) mod fmt;
pub(crate) mod tz;
pub(crate) mod zoned;

/// An error that can occur in this crate.
///
/// Every fallible operation returns this one error type. The failures it
/// covers fall into a handful of categories, each of which has a predicate:
///
/// * [`Error::is_range`]: a field value was outside of its valid domain,
/// e.g., `2023-02-29` or an offset of `+19:00`.
/// * [`Error::is_parse`]: text didn't match the expected grammar, either
/// ISO 8601 or a compiled [`Pattern`](crate::fmt::pattern::Pattern).
/// * [`Error::is_pattern`]: a pattern could not be compiled.
/// * [`Error::is_unknown_zone`]: a time zone identifier couldn't be resolved
/// by a [`ZoneRegistry`](crate::tz::ZoneRegistry).
/// * [`Error::is_invalid_parameter`]: an operation was given a parameter it
/// doesn't support, such as adding months to an [`Instant`](crate::Instant).
///
/// Errors form a chain. The `Display` implementation prints the whole
/// chain, outermost context first, separated by `: `. The predicates
/// consider every error in the chain, so a parse failure caused by an
/// out-of-range month reports `true` for both `is_parse` and `is_range`.
///
/// # Example
///
/// ```
/// use civiltime::civil::Date;
///
/// let err = "2007-13-03".parse::<Date>().unwrap_err();
/// assert!(err.is_parse());
/// assert!(err.is_range());
/// ```
#[derive(Clone)]
pub struct Error {
    /// The internal representation of an error.
    ///
    /// This is in an `Arc` to make an `Error` cloneable even though it may
    /// embed a `std::io::Error`. It also keeps the size of an error equal to
    /// one word.
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Creates a new error value from `core::fmt::Arguments`.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::Error;
    ///
    /// let err = Error::from_args(format_args!("something failed"));
    /// assert_eq!(err.to_string(), "something failed");
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Returns true when this error, or any error that caused it, is the
    /// result of a value being outside of its allowed range.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::civil::Date;
    ///
    /// assert!(Date::new(2025, 2, 29).unwrap_err().is_range());
    /// ```
    pub fn is_range(&self) -> bool {
        use self::ErrorKind::*;
        self.chain().any(|err| matches!(*err.kind(), Range(_) | SlimRange(_)))
    }

    /// Returns true when this error is the result of text failing to match
    /// an expected grammar.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::Date, fmt::pattern::Pattern};
    ///
    /// let pattern = Pattern::compile("dd/MM/yyyy")?;
    /// assert!(Date::parse_with("03-12-2007", &pattern).unwrap_err().is_parse());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_parse(&self) -> bool {
        use self::ErrorKind::*;
        self.chain()
            .any(|err| matches!(*err.kind(), FmtIso(_) | FmtPatternParse(_)))
    }

    /// Returns true when this error is the result of a malformed pattern.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::fmt::pattern::Pattern;
    ///
    /// assert!(Pattern::compile("dd/MM/yyyy QQ").unwrap_err().is_pattern());
    /// ```
    pub fn is_pattern(&self) -> bool {
        self.chain().any(|err| matches!(*err.kind(), ErrorKind::FmtPattern(_)))
    }

    /// Returns true when this error is the result of a time zone identifier
    /// that could not be resolved.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::tz::{BuiltinRegistry, ZoneRegistry};
    ///
    /// let registry = BuiltinRegistry::new();
    /// assert!(registry.resolve("Mars/Olympus_Mons").unwrap_err().is_unknown_zone());
    /// assert!(registry.resolve("+19:00").unwrap_err().is_unknown_zone());
    /// ```
    pub fn is_unknown_zone(&self) -> bool {
        use self::tz::db::Error as DbError;
        self.chain().any(|err| {
            matches!(*err.kind(), ErrorKind::TzDb(DbError::UnknownZone { .. }))
        })
    }

    /// Returns true when this error originated as a result of a parameter
    /// that is not supported by the operation it was given to.
    ///
    /// This covers unsupported units and fields (like adding months to an
    /// instant, or asking a date for its hour) and ambiguous datetimes that
    /// were explicitly rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::date, Field};
    ///
    /// let err = date(2007, 12, 3).get(Field::HourOfDay).unwrap_err();
    /// assert!(err.is_invalid_parameter());
    /// ```
    pub fn is_invalid_parameter(&self) -> bool {
        use self::civil::Error as CivilError;
        use self::ErrorKind::*;

        self.chain().any(|err| {
            matches!(
                *err.kind(),
                Civil(
                    CivilError::UnsupportedField { .. }
                        | CivilError::UnsupportedUnit { .. }
                ) | TzAmbiguous(_)
            )
        })
    }

    /// Returns true when this error originated as a result of an operation
    /// failing because an appropriate crate feature was not enabled.
    pub fn is_crate_feature(&self) -> bool {
        self.chain()
            .any(|err| matches!(*err.kind(), ErrorKind::CrateFeature(_)))
    }
}

impl Error {
    /// Creates a new error indicating that a `given` value is out of the
    /// specified `min..=max` range. The given `what` label is used in the
    /// error message as a human readable description of what exactly is out
    /// of range. (e.g., "day")
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        Error::from(ErrorKind::Range(RangeError::new(what, given, min, max)))
    }

    /// Creates a new error indicating that a `given` value is out of the
    /// allowed range, without the value or its bounds.
    #[inline(never)]
    #[cold]
    pub(crate) fn slim_range(what: &'static str) -> Error {
        Error::from(ErrorKind::SlimRange(SlimRangeError::new(what)))
    }

    /// A convenience constructor for building an I/O error.
    ///
    /// Callers should generally attach some kind of context to this error
    /// (like a file path).
    #[cfg(feature = "tzdb-zoneinfo")]
    #[inline(never)]
    #[cold]
    pub(crate) fn io(err: std::io::Error) -> Error {
        Error::from(ErrorKind::IO(IOError { err }))
    }

    /// Contextualizes this error by associating the given file path with it.
    #[cfg(feature = "tzdb-zoneinfo")]
    #[inline(never)]
    #[cold]
    pub(crate) fn path(self, path: impl Into<std::path::PathBuf>) -> Error {
        let err = Error::from(ErrorKind::FilePath(FilePathError {
            path: path.into(),
        }));
        self.context(err)
    }

    pub(crate) fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let Some(inner) = err.inner.as_mut() else { return self };
        assert!(inner.cause.is_none(), "cause of consequence must be `None`");
        match Arc::get_mut(inner) {
            Some(inner) => inner.cause = Some(self),
            // A consequent that is shared elsewhere can't take a cause
            // without losing it, so the root cause wins.
            None => return self,
        }
        err
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain. That is,
    /// the highest level context. The last error in the chain is always the
    /// "root" cause.
    ///
    /// The iterator returned is guaranteed to yield at least one error.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    /// Returns the kind of this error.
    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f
                    .debug_struct("Error")
                    .field("kind", &"None")
                    .finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

/// The underlying kind of a [`Error`].
#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Civil(self::civil::Error),
    #[allow(dead_code)] // not used in some feature configs
    CrateFeature(CrateFeatureError),
    #[allow(dead_code)] // not used in some feature configs
    FilePath(FilePathError),
    Fmt(self::fmt::Error),
    FmtIso(self::fmt::iso::Error),
    FmtPattern(self::fmt::pattern::Error),
    FmtPatternFormat(self::fmt::pattern::FormatError),
    FmtPatternParse(self::fmt::pattern::ParseError),
    #[allow(dead_code)] // not used in some feature configs
    IO(IOError),
    Range(RangeError),
    SlimRange(SlimRangeError),
    TzAmbiguous(self::tz::ambiguous::Error),
    TzDb(self::tz::db::Error),
    TzPosix(self::tz::posix::Error),
    #[allow(dead_code)] // not used in some feature configs
    Tzif(self::tz::tzif::Error),
    Unknown,
    Zoned(self::zoned::Error),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Adhoc(ref msg) => msg.fmt(f),
            Civil(ref err) => err.fmt(f),
            CrateFeature(ref err) => err.fmt(f),
            FilePath(ref err) => err.fmt(f),
            Fmt(ref err) => err.fmt(f),
            FmtIso(ref err) => err.fmt(f),
            FmtPattern(ref err) => err.fmt(f),
            FmtPatternFormat(ref err) => err.fmt(f),
            FmtPatternParse(ref err) => err.fmt(f),
            IO(ref err) => err.fmt(f),
            Range(ref err) => err.fmt(f),
            SlimRange(ref err) => err.fmt(f),
            TzAmbiguous(ref err) => err.fmt(f),
            TzDb(ref err) => err.fmt(f),
            TzPosix(ref err) => err.fmt(f),
            Tzif(ref err) => err.fmt(f),
            Unknown => f.write_str("unknown civiltime error"),
            Zoned(ref err) => err.fmt(f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Some(Arc::new(ErrorInner { kind, cause: None })) }
    }
}

/// A generic error message.
///
/// This supports the `Error::from_args` public API, which permits users to
/// manifest their own `Error` values from an arbitrary message. (For
/// example, from inside a custom `ZoneRegistry`.)
struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        AdhocError { message: message.to_string().into_boxed_str() }
    }
}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// An error that occurs when an input value is out of bounds.
///
/// The error message produced by this type will include a name describing
/// which input was out of bounds, the value given and its minimum and maximum
/// allowed values.
#[derive(Debug)]
struct RangeError {
    what: &'static str,
    given: i128,
    min: i128,
    max: i128,
}

impl RangeError {
    fn new(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> RangeError {
        RangeError {
            what,
            given: given.into(),
            min: min.into(),
            max: max.into(),
        }
    }
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

/// A slim error that occurs when an input value is out of bounds.
///
/// Unlike `RangeError`, this only includes a static description of the
/// value that is out of bounds.
#[derive(Clone, Debug)]
struct SlimRangeError {
    what: &'static str,
}

impl SlimRangeError {
    fn new(what: &'static str) -> SlimRangeError {
        SlimRangeError { what }
    }
}

impl core::fmt::Display for SlimRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let SlimRangeError { what } = *self;
        write!(f, "parameter '{what}' is not in the required range")
    }
}

/// An error used whenever a failure is caused by a missing crate feature.
#[derive(Clone, Debug)]
pub(crate) enum CrateFeatureError {
    #[cfg(not(feature = "tzdb-zoneinfo"))]
    TzdbZoneInfo,
}

impl From<CrateFeatureError> for Error {
    #[cold]
    #[inline(never)]
    fn from(err: CrateFeatureError) -> Error {
        ErrorKind::CrateFeature(err).into()
    }
}

impl core::fmt::Display for CrateFeatureError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        #[allow(unused_imports)]
        use self::CrateFeatureError::*;

        f.write_str("operation failed because crate feature `")?;
        #[allow(unused_variables)]
        let name: &str = match *self {
            #[cfg(not(feature = "tzdb-zoneinfo"))]
            TzdbZoneInfo => "tzdb-zoneinfo",
        };
        #[allow(unreachable_code)]
        core::fmt::Display::fmt(name, f)?;
        f.write_str("` is not enabled")
    }
}

/// A `std::io::Error`, only ever constructed when reading a zoneinfo
/// database.
struct IOError {
    #[cfg(feature = "tzdb-zoneinfo")]
    err: std::io::Error,
}

impl core::fmt::Display for IOError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        #[cfg(feature = "tzdb-zoneinfo")]
        {
            write!(f, "{}", self.err)
        }
        #[cfg(not(feature = "tzdb-zoneinfo"))]
        {
            write!(f, "<BUG: SHOULD NOT EXIST>")
        }
    }
}

impl core::fmt::Debug for IOError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        #[cfg(feature = "tzdb-zoneinfo")]
        {
            f.debug_struct("IOError").field("err", &self.err).finish()
        }
        #[cfg(not(feature = "tzdb-zoneinfo"))]
        {
            write!(f, "<BUG: SHOULD NOT EXIST>")
        }
    }
}

struct FilePathError {
    #[cfg(feature = "tzdb-zoneinfo")]
    path: std::path::PathBuf,
}

impl core::fmt::Display for FilePathError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        #[cfg(feature = "tzdb-zoneinfo")]
        {
            write!(f, "{}", self.path.display())
        }
        #[cfg(not(feature = "tzdb-zoneinfo"))]
        {
            write!(f, "<BUG: SHOULD NOT EXIST>")
        }
    }
}

impl core::fmt::Debug for FilePathError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        #[cfg(feature = "tzdb-zoneinfo")]
        {
            f.debug_struct("FilePathError").field("path", &self.path).finish()
        }
        #[cfg(not(feature = "tzdb-zoneinfo"))]
        {
            write!(f, "<BUG: SHOULD NOT EXIST>")
        }
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This trait basically exists to make `Error::context` work without needing
/// to rely on public `From` impls.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize either `Error` or `Result<T, Error>`.
/// Specifically, in the latter case, it absolves one of the need to call
/// `map_err` everywhere one wants to add context to an error.
pub(crate) trait ErrorContext<T, E> {
    /// Contextualize the given consequent error with this (`self`) error as
    /// the cause.
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;

    /// Like `context`, but hides error construction within a closure.
    ///
    /// This is useful when the consequent error allocates, since the
    /// closure is only called on the error path.
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T, E> for Result<T, E>
where
    E: IntoError,
{
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent.into_error())
        })
    }

    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent().into_error())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // If the size of an error increases, we really want to make sure we
    // decide to do that intentionally.
    #[test]
    fn error_size() {
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn chain_display() {
        let err = Error::range("month", 13, 1, 12)
            .context(Error::from_args(format_args!("failed to build date")));
        insta::assert_snapshot!(
            err,
            @"failed to build date: parameter 'month' with value 13 is not in the required range of 1..=12",
        );
        assert!(err.is_range());
        assert!(!err.is_parse());
    }

    #[test]
    fn context_on_result() {
        let result: Result<(), Error> = Err(Error::slim_range("offset"));
        let err = result
            .with_context(|| Error::from_args(format_args!("outer")))
            .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"outer: parameter 'offset' is not in the required range",
        );
    }
}
