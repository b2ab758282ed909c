/*!
Printing and parsing of the ISO 8601 formats used by `Display` and `FromStr`.

The formats supported are:

* Dates like `2007-12-03` or `-0044-03-15`.
* Times like `10:15`, `10:15:30` or `10:15:30.123456789`.
* Datetimes like `2007-12-03T10:15:30`.
* Offsets like `Z`, `+05`, `+0530` or `+05:30`.
* Instants like `2007-12-03T10:15:30Z` or `2007-12-03T11:15:30+01:00`.
* Zoned datetimes like `2007-12-03T10:15:30+01:00[Europe/Paris]`.
* Durations like `PT1H30M` or `PT-0.5S`.

Most users won't need this module since every value type already
implements `Display` and `FromStr`. The [`Printer`] is useful for writing
into an existing buffer without allocating:

```
use civiltime::{civil::date, fmt::iso::Printer};

let mut buf = String::from("due: ");
Printer::new().print_date(&date(2024, 6, 1), &mut buf)?;
assert_eq!(buf, "due: 2024-06-01");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use crate::{
    civil::{Date, DateTime, Time},
    error::{fmt::iso::Error as E, Error, ErrorContext},
    fmt::{
        util::{parse_fraction, DecimalFormatter, FractionalFormatter},
        Parsed, Write, WriteExt,
    },
    tz::{Offset, TimeZone, ZoneRegistry},
    util::{calendar::NANOS_PER_SECOND, parse},
    Duration, Instant, Zoned,
};

/// The printer used by every `Display` implementation in this crate.
pub(crate) static DEFAULT_PRINTER: Printer = Printer::new();

/// The parser used by every `FromStr` implementation in this crate.
pub(crate) static DEFAULT_PARSER: Parser = Parser::new();

/// A printer for ISO 8601 values.
///
/// Printing only fails when the writer fails.
#[derive(Debug)]
pub struct Printer {
    _priv: (),
}

impl Printer {
    /// Creates a new ISO 8601 printer.
    pub const fn new() -> Printer {
        Printer { _priv: () }
    }

    /// Prints a civil date like `2007-12-03`.
    ///
    /// Negative years are printed with a leading `-` and four digits.
    pub fn print_date<W: Write>(
        &self,
        date: &Date,
        mut wtr: W,
    ) -> Result<(), Error> {
        static FMT_YEAR: DecimalFormatter = DecimalFormatter::new().padding(4);
        static FMT_TWO: DecimalFormatter = DecimalFormatter::new().padding(2);

        wtr.write_int(&FMT_YEAR, date.year())?;
        wtr.write_str("-")?;
        wtr.write_int(&FMT_TWO, date.month())?;
        wtr.write_str("-")?;
        wtr.write_int(&FMT_TWO, date.day())?;
        Ok(())
    }

    /// Prints a civil time like `04:15:30.123`.
    ///
    /// Seconds are always printed. The fractional second is printed in
    /// groups of three digits, and omitted entirely when it is zero.
    pub fn print_time<W: Write>(
        &self,
        time: &Time,
        mut wtr: W,
    ) -> Result<(), Error> {
        static FMT_TWO: DecimalFormatter = DecimalFormatter::new().padding(2);
        static FMT_FRACTION: FractionalFormatter =
            FractionalFormatter::new().grouped();

        wtr.write_int(&FMT_TWO, time.hour())?;
        wtr.write_str(":")?;
        wtr.write_int(&FMT_TWO, time.minute())?;
        wtr.write_str(":")?;
        wtr.write_int(&FMT_TWO, time.second())?;
        let subsec = time.subsec_nanosecond();
        if subsec != 0 {
            wtr.write_str(".")?;
            wtr.write_fraction(&FMT_FRACTION, subsec)?;
        }
        Ok(())
    }

    /// Prints a civil datetime like `2007-12-03T04:15:30`.
    pub fn print_datetime<W: Write>(
        &self,
        dt: &DateTime,
        mut wtr: W,
    ) -> Result<(), Error> {
        self.print_date(&dt.date(), &mut wtr)?;
        wtr.write_str("T")?;
        self.print_time(&dt.time(), &mut wtr)?;
        Ok(())
    }

    /// Prints an offset as `Z` when it is zero, and `±HH:MM` otherwise.
    pub fn print_offset<W: Write>(
        &self,
        offset: &Offset,
        mut wtr: W,
    ) -> Result<(), Error> {
        static FMT_TWO: DecimalFormatter = DecimalFormatter::new().padding(2);

        if *offset == Offset::UTC {
            return wtr.write_str("Z");
        }
        let minutes = offset.minutes().abs();
        wtr.write_str(if offset.is_negative() { "-" } else { "+" })?;
        wtr.write_int(&FMT_TWO, minutes / 60)?;
        wtr.write_str(":")?;
        wtr.write_int(&FMT_TWO, minutes % 60)?;
        Ok(())
    }

    /// Prints an instant in UTC, like `2007-12-03T04:15:30Z`.
    pub fn print_instant<W: Write>(
        &self,
        instant: &Instant,
        mut wtr: W,
    ) -> Result<(), Error> {
        self.print_datetime(&instant.to_datetime(Offset::UTC), &mut wtr)?;
        wtr.write_str("Z")?;
        Ok(())
    }

    /// Prints a zoned datetime like
    /// `2007-12-03T04:15:30-05:00[America/New_York]`.
    ///
    /// The bracketed time zone identifier is omitted when it is the same as
    /// the printed offset.
    pub fn print_zoned<W: Write>(
        &self,
        zdt: &Zoned,
        mut wtr: W,
    ) -> Result<(), Error> {
        self.print_datetime(&zdt.datetime(), &mut wtr)?;
        let mut offset = String::with_capacity(6);
        self.print_offset(&zdt.offset(), &mut offset)?;
        wtr.write_str(&offset)?;
        let id = zdt.time_zone().id();
        if id != offset {
            wtr.write_str("[")?;
            wtr.write_str(id)?;
            wtr.write_str("]")?;
        }
        Ok(())
    }

    /// Prints a duration using hours, minutes and seconds, like `PT1H30M`.
    ///
    /// For negative durations, each non-zero component carries a `-` sign,
    /// like `PT-1H-30M`.
    pub fn print_duration<W: Write>(
        &self,
        duration: &Duration,
        mut wtr: W,
    ) -> Result<(), Error> {
        static FMT_INT: DecimalFormatter = DecimalFormatter::new();
        static FMT_FRACTION: FractionalFormatter = FractionalFormatter::new();

        let nanos = duration.to_nanos();
        let sign = if nanos < 0 { "-" } else { "" };
        let nanos = nanos.unsigned_abs();
        let per = NANOS_PER_SECOND.unsigned_abs() as u128;
        // OK because the magnitude of the seconds of a duration is at most
        // 2^63, so the number of hours fits in an `i64`.
        let (seconds, subsec) = ((nanos / per) as u64, (nanos % per) as i32);
        let hours = (seconds / 3_600) as i64;
        let minutes = ((seconds / 60) % 60) as i64;
        let seconds = (seconds % 60) as i64;

        wtr.write_str("PT")?;
        if hours != 0 {
            wtr.write_str(sign)?;
            wtr.write_int(&FMT_INT, hours)?;
            wtr.write_str("H")?;
        }
        if minutes != 0 {
            wtr.write_str(sign)?;
            wtr.write_int(&FMT_INT, minutes)?;
            wtr.write_str("M")?;
        }
        if seconds == 0 && subsec == 0 && (hours != 0 || minutes != 0) {
            return Ok(());
        }
        wtr.write_str(sign)?;
        wtr.write_int(&FMT_INT, seconds)?;
        if subsec != 0 {
            wtr.write_str(".")?;
            wtr.write_fraction(&FMT_FRACTION, subsec)?;
        }
        wtr.write_str("S")?;
        Ok(())
    }
}

impl Default for Printer {
    fn default() -> Printer {
        Printer::new()
    }
}

/// A parser for ISO 8601 values.
///
/// Every method requires its value to span the entire input.
#[derive(Debug)]
pub struct Parser {
    _priv: (),
}

impl Parser {
    /// Creates a new ISO 8601 parser.
    pub const fn new() -> Parser {
        Parser { _priv: () }
    }

    /// Parses a civil date like `2007-12-03`.
    pub fn parse_date(&self, input: &[u8]) -> Result<Date, Error> {
        self.parse_date_prefix(input)
            .and_then(Parsed::into_full)
            .with_context(|| E::failed("civil date", input))
    }

    /// Parses a civil time like `10:15`, `10:15:30` or `10:15:30.5`.
    pub fn parse_time(&self, input: &[u8]) -> Result<Time, Error> {
        self.parse_time_prefix(input)
            .and_then(Parsed::into_full)
            .with_context(|| E::failed("civil time", input))
    }

    /// Parses a civil datetime like `2007-12-03T10:15:30`.
    ///
    /// The separator may be `T`, `t` or a single space.
    pub fn parse_datetime(&self, input: &[u8]) -> Result<DateTime, Error> {
        self.parse_datetime_prefix(input)
            .and_then(Parsed::into_full)
            .with_context(|| E::failed("civil datetime", input))
    }

    /// Parses an offset like `Z`, `+05`, `+0530` or `+05:30`.
    pub fn parse_offset(&self, input: &[u8]) -> Result<Offset, Error> {
        self.parse_offset_prefix(input).and_then(Parsed::into_full)
    }

    /// Parses an instant like `2007-12-03T10:15:30Z`.
    ///
    /// An offset is required. A bracketed time zone annotation after the
    /// offset is accepted and ignored.
    pub fn parse_instant(&self, input: &[u8]) -> Result<Instant, Error> {
        self.parse_instant_prefix(input)
            .and_then(Parsed::into_full)
            .with_context(|| E::failed("instant", input))
    }

    /// Parses a zoned datetime like `2007-12-03T10:15:30+01:00[Europe/Paris]`.
    ///
    /// The bracketed identifier is resolved with the given registry. When
    /// it is absent, the parsed offset becomes the time zone. When it is
    /// present, the offset must agree with the time zone at the parsed
    /// datetime.
    pub fn parse_zoned(
        &self,
        input: &[u8],
        registry: &dyn ZoneRegistry,
    ) -> Result<Zoned, Error> {
        self.parse_zoned_prefix(input, registry)
            .and_then(Parsed::into_full)
            .with_context(|| E::failed("zoned datetime", input))
    }

    /// Parses a duration like `PT1H30M`, `-PT0.5S` or `P2DT12H`.
    ///
    /// Days are always 24 hours. Each component may carry its own sign,
    /// and a sign before the `P` negates the whole duration.
    pub fn parse_duration(&self, input: &[u8]) -> Result<Duration, Error> {
        self.parse_duration_prefix(input)
            .and_then(Parsed::into_full)
            .with_context(|| E::failed("duration", input))
    }

    fn parse_date_prefix<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Date>, Error> {
        let Parsed { value: year, input } = parse_year(input)?;
        let input = expect(input, b'-', "`-` after year")?;
        let Parsed { value: month, input } = parse_two(input, "month")?;
        let input = expect(input, b'-', "`-` after month")?;
        let Parsed { value: day, input } = parse_two(input, "day")?;
        let value = Date::new(year, month, day)?;
        Ok(Parsed { value, input })
    }

    fn parse_time_prefix<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Time>, Error> {
        let Parsed { value: hour, input } = parse_two(input, "hour")?;
        let input = expect(input, b':', "`:` after hour")?;
        let Parsed { value: minute, mut input } = parse_two(input, "minute")?;
        let (mut second, mut subsec) = (0, 0);
        if let Some(rest) = input.strip_prefix(b":") {
            let parsed = parse_two(rest, "second")?;
            second = parsed.value;
            let parsed = parse_fraction(parsed.input)?;
            subsec = parsed.value.unwrap_or(0);
            input = parsed.input;
        }
        let value = Time::new(hour, minute, second, subsec)?;
        Ok(Parsed { value, input })
    }

    fn parse_datetime_prefix<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, DateTime>, Error> {
        let Parsed { value: date, input } = self.parse_date_prefix(input)?;
        let input = match input.split_first() {
            Some((b'T' | b't' | b' ', rest)) => rest,
            _ => {
                return Err(Error::from(E::Expected {
                    what: "`T` separator after date",
                    found: input.first().copied(),
                }))
            }
        };
        let Parsed { value: time, input } = self.parse_time_prefix(input)?;
        Ok(Parsed { value: DateTime::from_parts(date, time), input })
    }

    fn parse_offset_prefix<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Offset>, Error> {
        let (sign, input) = match input.split_first() {
            Some((b'Z' | b'z', rest)) => {
                return Ok(Parsed { value: Offset::UTC, input: rest });
            }
            Some((b'+', rest)) => (1, rest),
            Some((b'-', rest)) => (-1, rest),
            _ => {
                return Err(Error::from(E::Expected {
                    what: "`Z` or a sign for the offset",
                    found: input.first().copied(),
                }))
            }
        };
        let (digits, input) = parse::split_digits(input, 2);
        if digits.is_empty() {
            return Err(Error::from(E::Expected {
                what: "offset hours",
                found: input.first().copied(),
            }));
        }
        let hours = to_i8(digits, "offset hours")?;
        let mut rest = input;
        let mut minutes = 0;
        if digits.len() == 2 {
            let colon = input.strip_prefix(b":");
            let rest_minutes = colon.unwrap_or(input);
            if colon.is_some() || starts_digit(rest_minutes) {
                let parsed = parse_two(rest_minutes, "offset minutes")?;
                minutes = parsed.value;
                rest = parsed.input;
            }
        }
        let value = Offset::new(sign * hours, sign * minutes)?;
        Ok(Parsed { value, input: rest })
    }

    fn parse_instant_prefix<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Instant>, Error> {
        let Parsed { value: dt, input } = self.parse_datetime_prefix(input)?;
        if !starts_offset(input) {
            return Err(Error::from(E::MissingOffset));
        }
        let Parsed { value: offset, input } = self.parse_offset_prefix(input)?;
        let Parsed { input, .. } = parse_annotation(input)?;
        let value = offset.to_instant(dt)?;
        Ok(Parsed { value, input })
    }

    fn parse_zoned_prefix<'i>(
        &self,
        input: &'i [u8],
        registry: &dyn ZoneRegistry,
    ) -> Result<Parsed<'i, Zoned>, Error> {
        let Parsed { value: dt, input } = self.parse_datetime_prefix(input)?;
        if !starts_offset(input) {
            return Err(Error::from(E::MissingOffset));
        }
        let Parsed { value: offset, input } = self.parse_offset_prefix(input)?;
        let Parsed { value: id, input } = parse_annotation(input)?;
        let instant = offset.to_instant(dt)?;
        let Some(id) = id else {
            let value = Zoned::new(instant, TimeZone::fixed(offset));
            return Ok(Parsed { value, input });
        };
        let tz = registry.resolve(id)?;
        if tz.to_offset(instant) != offset {
            return Err(Error::from(E::InconsistentOffset {
                offset,
                id: id.into(),
            }));
        }
        Ok(Parsed { value: Zoned::new(instant, tz), input })
    }

    fn parse_duration_prefix<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Duration>, Error> {
        let (negate, input) = match input.split_first() {
            Some((b'-', rest)) => (true, rest),
            Some((b'+', rest)) => (false, rest),
            _ => (false, input),
        };
        let mut input = match input.split_first() {
            Some((b'P' | b'p', rest)) => rest,
            _ => {
                return Err(Error::from(E::Expected {
                    what: "`P` to start a duration",
                    found: input.first().copied(),
                }))
            }
        };

        let mut total: i128 = 0;
        let mut components = 0;
        // Designators in the order they must appear. `T` separates days
        // from the time components.
        let mut in_time = false;
        let mut last: Option<u8> = None;
        loop {
            if !in_time {
                if let Some((b'T' | b't', rest)) = input.split_first() {
                    in_time = true;
                    input = rest;
                    if !starts_component(input) {
                        return Err(Error::from(E::Expected {
                            what: "a time component after `T`",
                            found: input.first().copied(),
                        }));
                    }
                    continue;
                }
            }
            if !starts_component(input) {
                break;
            }
            let (sign, rest) = match input.split_first() {
                Some((b'-', rest)) => (-1, rest),
                Some((b'+', rest)) => (1, rest),
                _ => (1, input),
            };
            let (digits, rest) = parse::split_digits(rest, 19);
            let amount = parse::i64(digits).ok_or_else(|| E::Expected {
                what: "digits for duration component",
                found: rest.first().copied(),
            })?;
            let Parsed { value: fraction, input: rest } =
                parse_fraction(rest)?;
            let Some((&designator, rest)) = rest.split_first() else {
                return Err(Error::from(E::Expected {
                    what: "a duration unit designator",
                    found: None,
                }));
            };
            let designator = designator.to_ascii_uppercase();
            let (order, unit_nanos) = match (in_time, designator) {
                (false, b'D') => (0, 86_400 * NANOS_PER_SECOND),
                (true, b'H') => (1, 3_600 * NANOS_PER_SECOND),
                (true, b'M') => (2, 60 * NANOS_PER_SECOND),
                (true, b'S') => (3, NANOS_PER_SECOND),
                _ => {
                    return Err(Error::from(E::Expected {
                        what: "a duration unit designator",
                        found: Some(designator),
                    }))
                }
            };
            if last.map_or(false, |last| last >= order) {
                return Err(Error::from(E::InvalidField {
                    what: "duration unit order",
                }));
            }
            if fraction.is_some() && designator != b'S' {
                return Err(Error::from(E::InvalidField {
                    what: "fraction on a duration unit other than seconds",
                }));
            }
            let nanos = i128::from(amount) * i128::from(unit_nanos)
                + i128::from(fraction.unwrap_or(0));
            total += sign * nanos;
            last = Some(order);
            components += 1;
            input = rest;
        }
        if components == 0 {
            return Err(Error::from(E::Expected {
                what: "at least one duration component",
                found: input.first().copied(),
            }));
        }
        if negate {
            total = -total;
        }
        let value = Duration::try_from_nanos(total)
            .ok_or_else(|| Error::slim_range("duration"))?;
        Ok(Parsed { value, input })
    }
}

impl Default for Parser {
    fn default() -> Parser {
        Parser::new()
    }
}

/// Returns true when `input` starts with a (possibly signed) number.
fn starts_component(input: &[u8]) -> bool {
    let input = match input.first() {
        Some(b'-' | b'+') => &input[1..],
        _ => input,
    };
    starts_digit(input)
}

fn starts_digit(input: &[u8]) -> bool {
    input.first().map_or(false, u8::is_ascii_digit)
}

fn starts_offset(input: &[u8]) -> bool {
    matches!(input.first(), Some(b'Z' | b'z' | b'+' | b'-'))
}

/// Parses a four digit year with an optional sign.
fn parse_year(input: &[u8]) -> Result<Parsed<'_, i16>, Error> {
    let (sign, input) = match input.split_first() {
        Some((b'-', rest)) => (-1, rest),
        Some((b'+', rest)) => (1, rest),
        _ => (1, input),
    };
    let (digits, rest) = parse::split_digits(input, 4);
    if digits.len() != 4 {
        return Err(Error::from(E::Expected {
            what: "four digit year",
            found: rest.first().copied(),
        }));
    }
    let year = parse::i64(digits)
        .ok_or_else(|| E::InvalidField { what: "year" })?;
    if sign < 0 && year == 0 {
        return Err(Error::from(E::InvalidField { what: "negative zero year" }));
    }
    // OK because four digits always fit in an `i16`.
    Ok(Parsed { value: (sign * year) as i16, input: rest })
}

/// Parses exactly two ASCII digits.
fn parse_two<'i>(
    input: &'i [u8],
    what: &'static str,
) -> Result<Parsed<'i, i8>, Error> {
    let (digits, rest) = parse::split_digits(input, 2);
    if digits.len() != 2 {
        return Err(Error::from(E::Expected {
            what,
            found: rest.first().copied(),
        }));
    }
    Ok(Parsed { value: to_i8(digits, what)?, input: rest })
}

/// Converts one or two ASCII digits to an `i8`.
fn to_i8(digits: &[u8], what: &'static str) -> Result<i8, Error> {
    parse::i64(digits).and_then(|n| i8::try_from(n).ok()).ok_or_else(|| {
        Error::from(E::Expected { what, found: digits.first().copied() })
    })
}

/// Consumes the given byte from the start of `input`.
fn expect<'i>(
    input: &'i [u8],
    byte: u8,
    what: &'static str,
) -> Result<&'i [u8], Error> {
    match input.split_first() {
        Some((&b, rest)) if b == byte => Ok(rest),
        _ => Err(Error::from(E::Expected {
            what,
            found: input.first().copied(),
        })),
    }
}

/// Parses an optional bracketed time zone annotation like `[Europe/Paris]`.
fn parse_annotation(
    input: &[u8],
) -> Result<Parsed<'_, Option<&str>>, Error> {
    let Some(rest) = input.strip_prefix(b"[") else {
        return Ok(Parsed { value: None, input });
    };
    let Some(end) = rest.iter().position(|&b| b == b']') else {
        return Err(Error::from(E::UnclosedAnnotation));
    };
    let id = core::str::from_utf8(&rest[..end])
        .ok()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| E::InvalidField { what: "time zone annotation" })?;
    Ok(Parsed { value: Some(id), input: &rest[end + 1..] })
}

#[cfg(test)]
mod tests {
    use crate::{
        civil::{date, time},
        tz::BuiltinRegistry,
    };

    use super::*;

    fn print<F>(f: F) -> String
    where
        F: FnOnce(&mut String) -> Result<(), Error>,
    {
        let mut buf = String::new();
        f(&mut buf).unwrap();
        buf
    }

    #[test]
    fn print_civil() {
        let p = &DEFAULT_PRINTER;
        insta::assert_snapshot!(print(|w| p.print_date(&date(2007, 12, 3), w)), @"2007-12-03");
        insta::assert_snapshot!(print(|w| p.print_date(&date(-44, 3, 15), w)), @"-0044-03-15");
        insta::assert_snapshot!(print(|w| p.print_time(&time(4, 15, 0, 0), w)), @"04:15:00");
        insta::assert_snapshot!(
            print(|w| p.print_time(&time(4, 15, 30, 123_000_000), w)),
            @"04:15:30.123",
        );
        insta::assert_snapshot!(
            print(|w| p.print_time(&time(4, 15, 30, 100_000), w)),
            @"04:15:30.000100",
        );
        insta::assert_snapshot!(
            print(|w| p.print_datetime(&date(2007, 12, 3).at(4, 15, 30, 1), w)),
            @"2007-12-03T04:15:30.000000001",
        );
    }

    #[test]
    fn print_offsets_and_zones() {
        let p = &DEFAULT_PRINTER;
        insta::assert_snapshot!(print(|w| p.print_offset(&Offset::UTC, w)), @"Z");
        insta::assert_snapshot!(
            print(|w| p.print_offset(&Offset::new(-3, -30).unwrap(), w)),
            @"-03:30",
        );

        let tz = BuiltinRegistry::new().resolve("America/New_York").unwrap();
        let zdt = date(2007, 12, 3).at(4, 15, 30, 0).to_zoned(tz).unwrap();
        insta::assert_snapshot!(
            print(|w| p.print_zoned(&zdt, w)),
            @"2007-12-03T04:15:30-05:00[America/New_York]",
        );
        let zdt = zdt.with_time_zone_same_instant(TimeZone::UTC);
        insta::assert_snapshot!(print(|w| p.print_zoned(&zdt, w)), @"2007-12-03T09:15:30Z");
        insta::assert_snapshot!(
            print(|w| p.print_instant(&zdt.to_instant(), w)),
            @"2007-12-03T09:15:30Z",
        );
    }

    #[test]
    fn parse_civil() {
        let p = &DEFAULT_PARSER;
        assert_eq!(p.parse_date(b"-0044-03-15").unwrap(), date(-44, 3, 15));
        assert_eq!(p.parse_date(b"+2007-12-03").unwrap(), date(2007, 12, 3));
        assert_eq!(p.parse_time(b"10:15").unwrap(), time(10, 15, 0, 0));
        assert_eq!(p.parse_time(b"10:15:30,5").unwrap(), time(10, 15, 30, 500_000_000));
        assert_eq!(
            p.parse_datetime(b"2007-12-03 10:15:30").unwrap(),
            date(2007, 12, 3).at(10, 15, 30, 0),
        );
    }

    #[test]
    fn parse_errors() {
        let p = &DEFAULT_PARSER;
        insta::assert_snapshot!(
            p.parse_date(b"2007-13-03").unwrap_err(),
            @"failed to parse `2007-13-03` as civil date: parameter 'month' with value 13 is not in the required range of 1..=12",
        );
        insta::assert_snapshot!(
            p.parse_date(b"2007-2-03").unwrap_err(),
            @"failed to parse `2007-2-03` as civil date: expected month, but found `-`",
        );
        insta::assert_snapshot!(
            p.parse_time(b"10:15:30x").unwrap_err(),
            @"failed to parse `10:15:30x` as civil time: parsed value successfully, but found unparsed trailing input `x`",
        );
        insta::assert_snapshot!(
            p.parse_instant(b"2007-12-03T10:15:30").unwrap_err(),
            @"failed to parse `2007-12-03T10:15:30` as instant: an instant requires a UTC offset or `Z` after the time, but none was found",
        );
        insta::assert_snapshot!(
            p.parse_time(b"10:15:30.1234567891").unwrap_err(),
            @"failed to parse `10:15:30.1234567891` as civil time: fractional seconds support at most 9 digits",
        );
        let err = p.parse_date(b"-0000-01-01").unwrap_err();
        assert!(err.is_parse());
        assert!(p.parse_date(b"2023-02-29").unwrap_err().is_range());
    }

    #[test]
    fn parse_zoned() {
        let p = &DEFAULT_PARSER;
        let registry = BuiltinRegistry::new();

        let zdt = p
            .parse_zoned(b"2024-11-03T01:30:00-04:00[America/New_York]", &registry)
            .unwrap();
        assert_eq!(zdt.offset(), Offset::constant(-4));

        let zdt = p.parse_zoned(b"2024-11-03T01:30:00+09:00", &registry).unwrap();
        assert_eq!(zdt.time_zone().id(), "+09:00");

        let err = p
            .parse_zoned(b"2024-07-03T01:30:00-05:00[America/New_York]", &registry)
            .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"failed to parse `2024-07-03T01:30:00-05:00[America/New_York]` as zoned datetime: offset -05:00 is not valid for the parsed datetime in time zone America/New_York",
        );

        let err = p
            .parse_zoned(b"2024-07-03T01:30:00Z[Mars/Olympus_Mons]", &registry)
            .unwrap_err();
        assert!(err.is_unknown_zone());
        assert!(err.is_parse());

        let err = p
            .parse_zoned(b"2024-07-03T01:30:00Z[UTC", &registry)
            .unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn parse_durations() {
        let p = &DEFAULT_PARSER;
        assert_eq!(p.parse_duration(b"PT0S").unwrap(), Duration::ZERO);
        assert_eq!(p.parse_duration(b"PT-1H-30M").unwrap(), Duration::from_minutes(-90));
        assert_eq!(p.parse_duration(b"P1D").unwrap(), Duration::from_hours(24));
        assert_eq!(p.parse_duration(b"PT1.000000001S").unwrap(), Duration::new(1, 1));
        assert!(p.parse_duration(b"PT1M1H").is_err());
        assert!(p.parse_duration(b"PT1.5M").is_err());
        assert!(p.parse_duration(b"P1H").is_err());
        assert!(p.parse_duration(b"PT").is_err());
    }
}
