use crate::{
    error::{fmt::iso::Error as E, Error},
    fmt::Parsed,
    util::parse,
};

/// A simple formatter for converting `i64` values to ASCII byte strings.
///
/// This avoids going through the formatting machinery, which is
/// substantially slower for the small fixed width numbers that make up a
/// datetime.
///
/// By default, this only includes the sign if it's negative. To always include
/// the sign, set `force_sign` to `true`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DecimalFormatter {
    force_sign: Option<bool>,
    minimum_digits: u8,
}

impl DecimalFormatter {
    /// Creates a new decimal formatter using the default configuration.
    pub(crate) const fn new() -> DecimalFormatter {
        DecimalFormatter { force_sign: None, minimum_digits: 0 }
    }

    /// Forces the sign to be rendered, even if it's positive.
    ///
    /// When `zero_is_positive` is true, then a zero value is formatted with a
    /// positive sign. Otherwise, it is formatted with a negative sign.
    #[cfg(test)]
    pub(crate) const fn force_sign(
        self,
        zero_is_positive: bool,
    ) -> DecimalFormatter {
        DecimalFormatter { force_sign: Some(zero_is_positive), ..self }
    }

    /// The minimum number of digits that this number should be formatted
    /// with. If the number would have fewer digits than this, then it is
    /// padded out with zeros until the minimum is reached.
    ///
    /// The minimum number of digits is capped at the maximum number of digits
    /// for an i64 value (which is 19).
    pub(crate) const fn padding(self, mut digits: u8) -> DecimalFormatter {
        if digits > Decimal::MAX_I64_DIGITS {
            digits = Decimal::MAX_I64_DIGITS;
        }
        DecimalFormatter { minimum_digits: digits, ..self }
    }
}

impl Default for DecimalFormatter {
    fn default() -> DecimalFormatter {
        DecimalFormatter::new()
    }
}

/// A formatted decimal number that can be converted to a sequence of bytes.
#[derive(Debug)]
pub(crate) struct Decimal {
    buf: [u8; Self::MAX_I64_LEN as usize],
    start: u8,
    end: u8,
}

impl Decimal {
    /// Discovered via `i64::MIN.to_string().len()`.
    const MAX_I64_LEN: u8 = 20;
    /// Discovered via `i64::MAX.to_string().len()`.
    const MAX_I64_DIGITS: u8 = 19;

    /// Using the given formatter, turn the value given into a decimal
    /// representation using ASCII bytes.
    pub(crate) const fn new(
        formatter: &DecimalFormatter,
        value: i64,
    ) -> Decimal {
        let sign = value.signum();
        let Some(mut value) = value.checked_abs() else {
            let buf = [
                b'-', b'9', b'2', b'2', b'3', b'3', b'7', b'2', b'0', b'3',
                b'6', b'8', b'5', b'4', b'7', b'7', b'5', b'8', b'0', b'8',
            ];
            return Decimal { buf, start: 0, end: Self::MAX_I64_LEN };
        };
        let mut decimal = Decimal {
            buf: [0; Self::MAX_I64_LEN as usize],
            start: Self::MAX_I64_LEN,
            end: Self::MAX_I64_LEN,
        };
        loop {
            decimal.start -= 1;

            let digit = (value % 10) as u8;
            value /= 10;
            decimal.buf[decimal.start as usize] = b'0' + digit;
            if value == 0 {
                break;
            }
        }
        while decimal.len() < formatter.minimum_digits {
            decimal.start -= 1;
            decimal.buf[decimal.start as usize] = b'0';
        }
        if sign < 0 {
            decimal.start -= 1;
            decimal.buf[decimal.start as usize] = b'-';
        } else if let Some(zero_is_positive) = formatter.force_sign {
            let ascii_sign =
                if sign > 0 || zero_is_positive { b'+' } else { b'-' };
            decimal.start -= 1;
            decimal.buf[decimal.start as usize] = ascii_sign;
        }
        decimal
    }

    /// Returns the total number of ASCII bytes (including the sign) that are
    /// used to represent this decimal number.
    const fn len(&self) -> u8 {
        self.end - self.start
    }

    /// Returns the ASCII representation of this decimal as a byte slice.
    ///
    /// The slice returned is guaranteed to be valid ASCII.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[usize::from(self.start)..usize::from(self.end)]
    }

    /// Returns the ASCII representation of this decimal as a string slice.
    pub(crate) fn as_str(&self) -> &str {
        // SAFETY: This is safe because all bytes written to `self.buf` are
        // guaranteed to be ASCII (including in its initial state), and thus,
        // any subsequence is guaranteed to be valid UTF-8.
        unsafe { core::str::from_utf8_unchecked(self.as_bytes()) }
    }
}

/// How a [`FractionalFormatter`] decides how many digits to print.
#[derive(Clone, Copy, Debug)]
enum Precision {
    /// Print every digit up to the last non-zero one.
    Auto,
    /// Print digits in groups of three (milliseconds, microseconds,
    /// nanoseconds), dropping trailing groups that are all zero.
    Grouped,
    /// Print exactly this many digits, truncating the rest.
    Exact(u8),
}

/// A simple formatter for converting fractional components to ASCII byte
/// strings.
///
/// We only support precision to 9 decimal places, which corresponds to
/// nanosecond precision as a fractional second component.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FractionalFormatter {
    precision: Precision,
}

impl FractionalFormatter {
    /// Creates a new fractional formatter that prints every significant
    /// digit.
    pub(crate) const fn new() -> FractionalFormatter {
        FractionalFormatter { precision: Precision::Auto }
    }

    /// Format the given value using this configuration as a decimal ASCII
    /// fractional number.
    pub(crate) const fn format(&self, value: i32) -> Fractional {
        Fractional::new(self, value)
    }

    /// Print digits in groups of three, so that `500_000_000` prints as
    /// `500` and `123_400_000` prints as `123400`.
    pub(crate) const fn grouped(self) -> FractionalFormatter {
        FractionalFormatter { precision: Precision::Grouped }
    }

    /// Print exactly the given number of digits.
    ///
    /// If the `precision` is greater than `9`, then it is clamped to `9`.
    pub(crate) const fn precision(self, precision: u8) -> FractionalFormatter {
        let precision = if precision > 9 { 9 } else { precision };
        FractionalFormatter { precision: Precision::Exact(precision) }
    }
}

/// A formatted fractional number that can be converted to a sequence of bytes.
#[derive(Debug)]
pub(crate) struct Fractional {
    buf: [u8; Self::MAX_LEN as usize],
    end: u8,
}

impl Fractional {
    /// Since we don't support precision bigger than this.
    const MAX_LEN: u8 = 9;

    /// Using the given formatter, turn the value given into a fractional
    /// decimal representation using ASCII bytes.
    ///
    /// The fractional number returned is empty when the value is zero and the
    /// precision isn't exact, or when the exact precision is zero.
    ///
    /// This panics if the value given isn't in the range `0..=999_999_999`.
    pub(crate) const fn new(
        formatter: &FractionalFormatter,
        mut value: i32,
    ) -> Fractional {
        assert!(0 <= value && value <= 999_999_999);
        let mut fractional = Fractional {
            buf: [b'0'; Self::MAX_LEN as usize],
            end: Self::MAX_LEN,
        };
        let mut i = 9;
        while value != 0 {
            i -= 1;

            let digit = (value % 10) as u8;
            value /= 10;
            fractional.buf[i] += digit;
        }
        match formatter.precision {
            Precision::Exact(precision) => {
                fractional.end = precision;
            }
            Precision::Auto => {
                while fractional.end > 0
                    && fractional.buf[fractional.end as usize - 1] == b'0'
                {
                    fractional.end -= 1;
                }
            }
            Precision::Grouped => {
                while fractional.end > 0
                    && fractional.buf[fractional.end as usize - 1] == b'0'
                    && fractional.buf[fractional.end as usize - 2] == b'0'
                    && fractional.buf[fractional.end as usize - 3] == b'0'
                {
                    fractional.end -= 3;
                }
            }
        }
        fractional
    }

    /// Returns the ASCII representation of this fractional number as a byte
    /// slice. The slice returned may be empty.
    ///
    /// The slice returned is guaranteed to be valid ASCII.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[..usize::from(self.end)]
    }

    /// Returns the ASCII representation of this fractional number as a string
    /// slice. The slice returned may be empty.
    pub(crate) fn as_str(&self) -> &str {
        // SAFETY: This is safe because all bytes written to `self.buf` are
        // guaranteed to be ASCII (including in its initial state), and thus,
        // any subsequence is guaranteed to be valid UTF-8.
        unsafe { core::str::from_utf8_unchecked(self.as_bytes()) }
    }
}

/// Parses an optional fractional second from the start of `input`.
///
/// If `input` does not begin with a `.` (or a `,`), then this returns `None`
/// and no input is consumed. Otherwise, between 1 and 9 ASCII digits must
/// follow the decimal separator.
pub(crate) fn parse_fraction<'i>(
    input: &'i [u8],
) -> Result<Parsed<'i, Option<i32>>, Error> {
    let Some((&b'.' | &b',', rest)) = input.split_first() else {
        return Ok(Parsed { value: None, input });
    };
    let (digits, rest) = parse::split_digits(rest, 10);
    if digits.is_empty() {
        return Err(Error::from(E::Expected {
            what: "digits after decimal separator",
            found: rest.first().copied(),
        }));
    }
    let Some(nanoseconds) = parse::fraction(digits) else {
        return Err(Error::from(E::TooManyFractionDigits));
    };
    Ok(Parsed { value: Some(nanoseconds), input: rest })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal() {
        let f = |fmt: DecimalFormatter, n| {
            Decimal::new(&fmt, n).as_str().to_string()
        };
        let plain = DecimalFormatter::new();

        assert_eq!(f(plain, i64::MIN), "-9223372036854775808");
        assert_eq!(f(plain, i64::MAX), "9223372036854775807");
        assert_eq!(f(plain.force_sign(true), 0), "+0");
        assert_eq!(f(plain.force_sign(false), 0), "-0");
        assert_eq!(f(plain.padding(4), 789), "0789");
        assert_eq!(f(plain.padding(4), -789), "-0789");
        assert_eq!(f(plain.force_sign(true).padding(2), 5), "+05");
    }

    #[test]
    fn fractional_auto() {
        let f = |n| FractionalFormatter::new().format(n).as_str().to_string();

        assert_eq!(f(0), "");
        assert_eq!(f(500_000_000), "5");
        assert_eq!(f(123_456_000), "123456");
        assert_eq!(f(789), "000000789");
    }

    #[test]
    fn fractional_grouped() {
        let f = |n| {
            FractionalFormatter::new().grouped().format(n).as_str().to_string()
        };

        assert_eq!(f(0), "");
        assert_eq!(f(500_000_000), "500");
        assert_eq!(f(123_400_000), "123400");
        assert_eq!(f(1), "000000001");
        assert_eq!(f(10_000), "000010");
    }

    #[test]
    fn fractional_precision() {
        let f = |precision, n| {
            FractionalFormatter::new()
                .precision(precision)
                .format(n)
                .as_str()
                .to_string()
        };

        assert_eq!(f(1, 0), "0");
        assert_eq!(f(9, 0), "000000000");
        assert_eq!(f(6, 123_000_000), "123000");
        assert_eq!(f(3, 123_456_789), "123");
        // We use truncation, no rounding.
        assert_eq!(f(2, 999_000_000), "99");
    }

    #[test]
    fn fraction() {
        let p = parse_fraction(b".5Z").unwrap();
        assert_eq!((p.value, p.input), (Some(500_000_000), &b"Z"[..]));
        let p = parse_fraction(b"Z").unwrap();
        assert_eq!((p.value, p.input), (None, &b"Z"[..]));
        assert!(parse_fraction(b".Z").unwrap_err().is_parse());
        assert!(parse_fraction(b".1234567890").unwrap_err().is_parse());
    }
}
