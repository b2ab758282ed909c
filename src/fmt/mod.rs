/*!
Routines for printing and parsing datetime values.

Every value type in this crate implements `Display` and `FromStr` using
ISO 8601 (see the [`iso`] module). For other layouts, compile a
[`Pattern`](pattern::Pattern) from a pattern string like `dd/MM/yyyy`:

```
use civiltime::{civil::{date, Date}, fmt::pattern::Pattern};

let pattern = Pattern::compile("dd/MM/yyyy")?;
let d = Date::parse_with("03/12/2007", &pattern)?;
assert_eq!(d, date(2007, 12, 3));
assert_eq!(pattern.format(d, None)?, "03/12/2007");

# Ok::<(), Box<dyn std::error::Error>>(())
```

Printing goes through the [`Write`] trait, which is implemented for
`String`, `Vec<u8>` and, via [`StdFmtWrite`], anything implementing
[`core::fmt::Write`].
*/

use crate::{
    error::{fmt::iso::Error as IsoError, fmt::Error as E, Error},
    util::escape,
};

use self::util::{Decimal, DecimalFormatter, FractionalFormatter};

pub mod iso;
pub mod pattern;
mod util;

/// The result of parsing a value out of a slice of bytes.
///
/// This contains both the parsed value and the remaining input. This makes
/// it possible to parse a value as a prefix of some larger string without
/// knowing ahead of time where it ends.
#[derive(Clone, Eq, Hash, PartialEq)]
pub(crate) struct Parsed<'i, V> {
    /// The value parsed.
    pub(crate) value: V,
    /// The remaining unparsed input.
    pub(crate) input: &'i [u8],
}

impl<'i, V> Parsed<'i, V> {
    /// Ensures that the parsed value represents the entire input. This occurs
    /// precisely when the `input` on this parsed value is empty.
    pub(crate) fn into_full(self) -> Result<V, Error> {
        if self.input.is_empty() {
            return Ok(self.value);
        }
        Err(Error::from(IsoError::trailing(self.input)))
    }
}

impl<'i, V: core::fmt::Debug> core::fmt::Debug for Parsed<'i, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Parsed")
            .field("value", &self.value)
            .field("input", &escape::Bytes(self.input))
            .finish()
    }
}

/// A trait for writing printed datetime values.
///
/// This is a small version of [`core::fmt::Write`] that returns this crate's
/// [`Error`] type.
pub trait Write {
    /// Write the given string to this writer.
    fn write_str(&mut self, string: &str) -> Result<(), Error>;

    /// Write the given character to this writer.
    #[inline]
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        self.write_str(char.encode_utf8(&mut [0; 4]))
    }
}

impl Write for String {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.push_str(string);
        Ok(())
    }
}

impl Write for Vec<u8> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.extend_from_slice(string.as_bytes());
        Ok(())
    }
}

impl<W: Write + ?Sized> Write for &mut W {
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        (**self).write_str(string)
    }

    #[inline]
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        (**self).write_char(char)
    }
}

/// An adapter for using [`core::fmt::Write`] implementations with [`Write`].
///
/// # Example
///
/// ```
/// use civiltime::{civil::date, fmt::{pattern::Pattern, StdFmtWrite}};
///
/// struct Wrapper(String);
///
/// impl core::fmt::Write for Wrapper {
///     fn write_str(&mut self, s: &str) -> core::fmt::Result {
///         self.0.push_str(s);
///         Ok(())
///     }
/// }
///
/// let pattern = Pattern::compile("yyyy/MM")?;
/// let mut out = Wrapper(String::new());
/// pattern.format_to(date(2024, 6, 1), None, StdFmtWrite(&mut out))?;
/// assert_eq!(out.0, "2024/06");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct StdFmtWrite<W>(pub W);

impl<W: core::fmt::Write> Write for StdFmtWrite<W> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.0
            .write_str(string)
            .map_err(|_| Error::from(E::StdFmtWriteAdapter))
    }
}

/// Convenience routines for writing numbers.
pub(crate) trait WriteExt: Write {
    /// Write the given number as a decimal using ASCII digits to this
    /// writer. The given formatter controls how the decimal is formatted.
    #[inline]
    fn write_int(
        &mut self,
        formatter: &DecimalFormatter,
        n: impl Into<i64>,
    ) -> Result<(), Error> {
        self.write_decimal(&Decimal::new(formatter, n.into()))
    }

    /// Write the given fractional number using ASCII digits to this
    /// writer. Nothing is written when the fraction is empty.
    #[inline]
    fn write_fraction(
        &mut self,
        formatter: &FractionalFormatter,
        nanoseconds: i32,
    ) -> Result<(), Error> {
        self.write_str(formatter.format(nanoseconds).as_str())
    }

    /// Write the given decimal number to this writer.
    #[inline]
    fn write_decimal(&mut self, decimal: &Decimal) -> Result<(), Error> {
        self.write_str(decimal.as_str())
    }
}

impl<W: Write + ?Sized> WriteExt for W {}
