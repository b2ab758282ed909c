/*!
Support for formatting and parsing values with `dd/MM/yyyy`-style patterns.

A pattern is compiled once into a [`Pattern`], which can then be used any
number of times to format values or to parse text. Compiling checks that
every letter in the pattern is recognized, so formatting can only fail when
a value lacks a field the pattern asks for.

# Pattern letters

| Letters | Meaning | Example |
| ------- | ------- | ------- |
| `y` | Year, as many digits as needed. | `2007`, `-44` |
| `yy` | Year in the range `2000..=2099`, as two digits. | `07` |
| `yyyy` | Year, padded to four digits. | `2007`, `-0044` |
| `M`, `MM` | Month of the year. `MM` pads to two digits. | `7`, `07` |
| `d`, `dd` | Day of the month. | `3`, `03` |
| `H`, `HH` | Hour of the day, `0-23`. | `0`, `00` |
| `h`, `hh` | Hour of the 12-hour clock, `1-12`. | `12` |
| `a` | The AM/PM marker. | `PM` |
| `m`, `mm` | Minute of the hour. | `5`, `05` |
| `s`, `ss` | Second of the minute. | `9`, `09` |
| `S` to `SSSSSSSSS` | Fraction of the second, truncated to as many digits as letters. | `123` |

Any other ASCII letter is an error. Text between single quotes is copied
verbatim, and `''` is a literal single quote both inside and outside of a
quoted section. Every other character is a literal.

When parsing, single letters accept one or more digits (up to the largest
value the field allows), while repeated letters require exactly that many
digits. The AM/PM marker is matched without regard to case.

# Zones

Formatting takes an optional target time zone. Civil values
([`Date`], [`Time`] and [`DateTime`]) are always rendered from their own
fields, and the target zone is ignored. An [`Instant`] or a [`Zoned`] is
projected into the target zone before its fields are rendered. Without a
target zone, an `Instant` renders in UTC and a `Zoned` renders in its own
time zone.

```
use civiltime::{civil::date, fmt::pattern::Pattern, tz::TimeZone};

let pattern = Pattern::compile("yyyy-MM-dd HH:mm")?;
let zdt = date(2024, 7, 4).at(9, 30, 0, 0).to_zoned(TimeZone::UTC)?;
let tokyo = TimeZone::posix("JST-9")?;

assert_eq!(pattern.format(&zdt, None)?, "2024-07-04 09:30");
assert_eq!(pattern.format(&zdt, Some(&tokyo))?, "2024-07-04 18:30");
// Civil datetimes are never shifted.
assert_eq!(pattern.format(zdt.datetime(), Some(&tokyo))?, "2024-07-04 09:30");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use crate::{
    civil::{Date, DateTime, Time},
    error::{
        fmt::pattern::{Error as E, FormatError as FE, ParseError as PE},
        ErrorContext,
    },
    fmt::Write,
    tz::{Offset, TimeZone},
    Error, Instant, Zoned,
};

use self::{format::Formatter, parse::Parser};

mod format;
mod parse;

/// A compiled pattern for formatting and parsing datetime values.
///
/// See the [module documentation](self) for the supported letters.
///
/// # Example
///
/// ```
/// use civiltime::{civil::time, fmt::pattern::Pattern};
///
/// let pattern = Pattern::compile("hh:mm a")?;
/// assert_eq!(pattern.format(time(21, 5, 0, 0), None)?, "09:05 PM");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pattern {
    text: Box<str>,
    items: Vec<Item>,
}

impl Pattern {
    /// Compiles the given pattern text.
    ///
    /// # Errors
    ///
    /// This returns an error for which
    /// [`Error::is_pattern`](crate::Error::is_pattern) is true when the
    /// pattern contains an unrecognized letter, a recognized letter repeated
    /// an unsupported number of times or an unclosed quoted literal.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::fmt::pattern::Pattern;
    ///
    /// assert!(Pattern::compile("dd/MM/yyyy").is_ok());
    /// assert!(Pattern::compile("dd MMM yyyy").unwrap_err().is_pattern());
    /// assert!(Pattern::compile("yyyy-MM-ddThh").unwrap_err().is_pattern());
    /// assert!(Pattern::compile("yyyy-MM-dd'T'hh a").is_ok());
    /// ```
    pub fn compile(text: &str) -> Result<Pattern, Error> {
        let items = compile_items(text)
            .with_context(|| E::Compile { pattern: text.into() })?;
        trace!("compiled pattern `{text}` into {} items", items.len());
        Ok(Pattern { text: text.into(), items })
    }

    /// Returns the text this pattern was compiled from.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Formats the given value with this pattern.
    ///
    /// See the [module documentation](self#zones) for how the target zone
    /// is used.
    ///
    /// # Errors
    ///
    /// This returns an error when the pattern asks for a field the value
    /// doesn't have, like an hour when formatting a [`Date`].
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::date, fmt::pattern::Pattern};
    ///
    /// let pattern = Pattern::compile("d/M/yy")?;
    /// assert_eq!(pattern.format(date(2007, 12, 3), None)?, "3/12/07");
    ///
    /// let pattern = Pattern::compile("HH:mm")?;
    /// assert!(pattern.format(date(2007, 12, 3), None).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn format(
        &self,
        value: impl Into<BrokenDownTime>,
        zone: Option<&TimeZone>,
    ) -> Result<String, Error> {
        let mut buf = String::with_capacity(self.text.len() + 8);
        self.format_to(value, zone, &mut buf)?;
        Ok(buf)
    }

    /// Formats the given value with this pattern into the given writer.
    ///
    /// This is like [`Pattern::format`], except that it writes into an
    /// existing buffer.
    pub fn format_to<W: Write>(
        &self,
        value: impl Into<BrokenDownTime>,
        zone: Option<&TimeZone>,
        mut wtr: W,
    ) -> Result<(), Error> {
        let tm = value.into().project(zone);
        let mut f = Formatter { items: &self.items, tm: &tm, wtr: &mut wtr };
        f.format().with_context(|| FE::Failed { pattern: self.text.clone() })
    }

    /// Parses the given text with this pattern.
    ///
    /// The fields parsed are returned as a [`BrokenDownTime`], which can be
    /// converted into a value with one of its `to_*` methods. Every field
    /// is checked against its own range here. Whether the fields form a
    /// valid date is only checked upon conversion.
    ///
    /// # Errors
    ///
    /// This returns an error for which
    /// [`Error::is_parse`](crate::Error::is_parse) is true when the text
    /// doesn't match the pattern, a field is out of range, the same field is
    /// parsed twice with different values or text remains after the
    /// pattern is exhausted.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::date, fmt::pattern::Pattern};
    ///
    /// let pattern = Pattern::compile("dd/MM/yyyy")?;
    /// assert_eq!(pattern.parse("03/12/2007")?.to_date()?, date(2007, 12, 3));
    ///
    /// let err = pattern.parse("03/13/2007").unwrap_err();
    /// assert!(err.is_parse() && err.is_range());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse(&self, text: &str) -> Result<BrokenDownTime, Error> {
        let input = text.as_bytes();
        let mut tm = BrokenDownTime::default();
        let mut p = Parser { items: &self.items, inp: input, tm: &mut tm };
        p.parse().with_context(|| PE::failed(input, &self.text))?;
        Ok(tm)
    }
}

impl core::fmt::Display for Pattern {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.text)
    }
}

impl core::str::FromStr for Pattern {
    type Err = Error;

    fn from_str(text: &str) -> Result<Pattern, Error> {
        Pattern::compile(text)
    }
}

/// A single piece of a compiled pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Item {
    Literal(Box<str>),
    Field(Directive),
}

/// A field directive along with its repetition count.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Directive {
    Year { width: u8 },
    Month { width: u8 },
    Day { width: u8 },
    Hour { width: u8 },
    ClockHour { width: u8 },
    AmPm,
    Minute { width: u8 },
    Second { width: u8 },
    Fraction { digits: u8 },
}

impl Directive {
    /// Creates a directive from a run of `count` copies of `letter`.
    ///
    /// This returns `Ok(None)` when `letter` isn't a pattern letter.
    fn new(letter: char, count: usize) -> Result<Option<Directive>, E> {
        let unsupported = || E::UnsupportedWidth { letter, count };
        let width = u8::try_from(count).map_err(|_| unsupported())?;
        let two = |directive: fn(u8) -> Directive| {
            if (1..=2).contains(&width) {
                Ok(Some(directive(width)))
            } else {
                Err(unsupported())
            }
        };
        match letter {
            'y' if matches!(width, 1 | 2 | 4) => {
                Ok(Some(Directive::Year { width }))
            }
            'y' => Err(unsupported()),
            'M' => two(|width| Directive::Month { width }),
            'd' => two(|width| Directive::Day { width }),
            'H' => two(|width| Directive::Hour { width }),
            'h' => two(|width| Directive::ClockHour { width }),
            'm' => two(|width| Directive::Minute { width }),
            's' => two(|width| Directive::Second { width }),
            'a' if width == 1 => Ok(Some(Directive::AmPm)),
            'a' => Err(unsupported()),
            'S' if (1..=9).contains(&width) => {
                Ok(Some(Directive::Fraction { digits: width }))
            }
            'S' => Err(unsupported()),
            _ => Ok(None),
        }
    }
}

/// Splits pattern text into literals and directives.
fn compile_items(text: &str) -> Result<Vec<Item>, Error> {
    let chars: Vec<char> = text.chars().collect();
    let mut items = vec![];
    let mut literal = String::new();
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                literal.push('\'');
                i += 2;
                continue;
            }
            let start = i;
            i += 1;
            loop {
                match chars.get(i) {
                    None => {
                        return Err(Error::from(E::UnclosedQuote {
                            position: start,
                        }))
                    }
                    Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                        literal.push('\'');
                        i += 2;
                    }
                    Some('\'') => {
                        i += 1;
                        break;
                    }
                    Some(&ch) => {
                        literal.push(ch);
                        i += 1;
                    }
                }
            }
            continue;
        }
        if !ch.is_ascii_alphabetic() {
            literal.push(ch);
            i += 1;
            continue;
        }
        let count = chars[i..].iter().take_while(|&&c| c == ch).count();
        let Some(directive) = Directive::new(ch, count)? else {
            return Err(Error::from(E::UnknownLetter {
                letter: ch,
                position: i,
            }));
        };
        if !literal.is_empty() {
            items.push(Item::Literal(core::mem::take(&mut literal).into()));
        }
        items.push(Item::Field(directive));
        i += count;
    }
    if !literal.is_empty() {
        items.push(Item::Literal(literal.into()));
    }
    Ok(items)
}

/// The individual fields of a datetime, any of which may be absent.
///
/// This is the intermediate form used by a [`Pattern`]. Formatting converts
/// a value into a broken down time and renders its fields. Parsing fills in
/// the fields found in the text, which can then be assembled into a value
/// with [`BrokenDownTime::to_date`], [`BrokenDownTime::to_time`],
/// [`BrokenDownTime::to_datetime`] or [`BrokenDownTime::to_zoned`].
#[derive(Clone, Debug, Default)]
pub struct BrokenDownTime {
    year: Option<i16>,
    month: Option<i8>,
    day: Option<i8>,
    hour: Option<i8>,
    // Only set by parsing `h`. Combined with the meridiem to get an hour.
    clock_hour: Option<i8>,
    meridiem: Option<Meridiem>,
    minute: Option<i8>,
    second: Option<i8>,
    subsec: Option<i32>,
    // Set for values with a place on the timeline, so that formatting can
    // project them into a different time zone.
    instant: Option<Instant>,
}

impl BrokenDownTime {
    /// Returns the year, if one is present.
    pub fn year(&self) -> Option<i16> {
        self.year
    }

    /// Returns the month, if one is present.
    pub fn month(&self) -> Option<i8> {
        self.month
    }

    /// Returns the day of the month, if one is present.
    pub fn day(&self) -> Option<i8> {
        self.day
    }

    /// Returns the hour of the day (`0-23`), if one is present.
    ///
    /// A parsed 24-hour clock hour is returned as is. Otherwise, a parsed
    /// 12-hour clock hour only counts when an AM/PM marker was parsed along
    /// with it.
    pub fn hour(&self) -> Option<i8> {
        match (self.hour, self.clock_hour, self.meridiem) {
            (Some(hour), _, _) => Some(hour),
            (None, Some(hour), Some(meridiem)) => Some(meridiem.to_hour(hour)),
            _ => None,
        }
    }

    /// Returns the minute, if one is present.
    pub fn minute(&self) -> Option<i8> {
        self.minute
    }

    /// Returns the second, if one is present.
    pub fn second(&self) -> Option<i8> {
        self.second
    }

    /// Returns the fractional second in nanoseconds, if one is present.
    pub fn subsec_nanosecond(&self) -> Option<i32> {
        self.subsec
    }

    /// Builds a civil date from the year, month and day.
    ///
    /// # Errors
    ///
    /// This returns an error when any of the three fields is missing, or
    /// when they don't form a valid date (like `2023-02-29`).
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::fmt::pattern::Pattern;
    ///
    /// let pattern = Pattern::compile("dd/MM/yyyy")?;
    /// let err = pattern.parse("29/02/2023")?.to_date().unwrap_err();
    /// assert!(err.is_parse() && err.is_range());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_date(&self) -> Result<Date, Error> {
        let required = |what| PE::Required { what, value: "date" };
        let year = self.year.ok_or_else(|| required("year"))?;
        let month = self.month.ok_or_else(|| required("month"))?;
        let day = self.day.ok_or_else(|| required("day"))?;
        Date::new(year, month, day).context(PE::InvalidField { what: "date" })
    }

    /// Builds a civil time from the hour, minute, second and fraction.
    ///
    /// Missing minutes, seconds and fractions are zero, but a smaller unit
    /// can't be present when a bigger one is missing.
    ///
    /// # Errors
    ///
    /// This returns an error when no hour is present, when a 12-hour clock
    /// hour has no AM/PM marker, or when a 24-hour clock hour disagrees
    /// with a 12-hour clock hour or an AM/PM marker.
    pub fn to_time(&self) -> Result<Time, Error> {
        let hour = match (self.hour, self.clock_hour, self.meridiem) {
            (_, Some(_), None) => return Err(Error::from(PE::MissingAmPm)),
            (None, None, _) => {
                if self.minute.is_some() {
                    return Err(Error::from(PE::MissingHourForMinute));
                }
                return Err(Error::from(PE::Required {
                    what: "hour",
                    value: "time",
                }));
            }
            (Some(hour), Some(clock), Some(meridiem)) => {
                if hour != meridiem.to_hour(clock) {
                    return Err(Error::from(PE::Conflict { what: "hour" }));
                }
                hour
            }
            (None, Some(clock), Some(meridiem)) => meridiem.to_hour(clock),
            (Some(hour), None, Some(meridiem)) => {
                if Meridiem::from_hour(hour) != meridiem {
                    return Err(Error::from(PE::Conflict { what: "hour" }));
                }
                hour
            }
            (Some(hour), None, None) => hour,
        };
        if self.minute.is_none() && self.second.is_some() {
            return Err(Error::from(PE::MissingMinuteForSecond));
        }
        if self.second.is_none() && self.subsec.is_some() {
            return Err(Error::from(PE::MissingSecondForFraction));
        }
        Time::new(
            hour,
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            self.subsec.unwrap_or(0),
        )
        .context(PE::InvalidField { what: "time" })
    }

    /// Builds a civil datetime. Both a date and a time are required.
    pub fn to_datetime(&self) -> Result<DateTime, Error> {
        Ok(DateTime::from_parts(self.to_date()?, self.to_time()?))
    }

    /// Builds a zoned datetime by interpreting the parsed civil datetime in
    /// the given time zone.
    ///
    /// Gaps and folds are resolved in the same way as
    /// [`TimeZone::to_zoned`].
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{fmt::pattern::Pattern, tz::{Offset, TimeZone}};
    ///
    /// let pattern = Pattern::compile("yyyy-MM-dd HH:mm")?;
    /// let tz = TimeZone::fixed(Offset::constant(2));
    /// let zdt = pattern.parse("2024-07-04 09:30")?.to_zoned(tz)?;
    /// assert_eq!(zdt.to_string(), "2024-07-04T09:30:00+02:00");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_zoned(&self, time_zone: TimeZone) -> Result<Zoned, Error> {
        time_zone.to_zoned(self.to_datetime()?)
    }

    /// Replaces the fields of a value on the timeline with its fields in
    /// the given time zone. Civil values are returned unchanged.
    fn project(self, zone: Option<&TimeZone>) -> BrokenDownTime {
        match (self.instant, zone) {
            (Some(instant), Some(tz)) => {
                BrokenDownTime::from(instant.to_zoned(tz.clone()))
            }
            _ => self,
        }
    }
}

impl From<Date> for BrokenDownTime {
    fn from(d: Date) -> BrokenDownTime {
        BrokenDownTime {
            year: Some(d.year()),
            month: Some(d.month()),
            day: Some(d.day()),
            ..BrokenDownTime::default()
        }
    }
}

impl From<Time> for BrokenDownTime {
    fn from(t: Time) -> BrokenDownTime {
        BrokenDownTime {
            hour: Some(t.hour()),
            minute: Some(t.minute()),
            second: Some(t.second()),
            subsec: Some(t.subsec_nanosecond()),
            ..BrokenDownTime::default()
        }
    }
}

impl From<DateTime> for BrokenDownTime {
    fn from(dt: DateTime) -> BrokenDownTime {
        let (d, t) = (dt.date(), dt.time());
        BrokenDownTime {
            year: Some(d.year()),
            month: Some(d.month()),
            day: Some(d.day()),
            ..BrokenDownTime::from(t)
        }
    }
}

impl From<Instant> for BrokenDownTime {
    fn from(instant: Instant) -> BrokenDownTime {
        BrokenDownTime {
            instant: Some(instant),
            ..BrokenDownTime::from(instant.to_datetime(Offset::UTC))
        }
    }
}

impl<'a> From<&'a Zoned> for BrokenDownTime {
    fn from(zdt: &'a Zoned) -> BrokenDownTime {
        BrokenDownTime {
            instant: Some(zdt.to_instant()),
            ..BrokenDownTime::from(zdt.datetime())
        }
    }
}

impl From<Zoned> for BrokenDownTime {
    fn from(zdt: Zoned) -> BrokenDownTime {
        BrokenDownTime::from(&zdt)
    }
}

/// Whether a 12-hour clock hour is before or after noon.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Meridiem {
    AM,
    PM,
}

impl Meridiem {
    fn from_hour(hour: i8) -> Meridiem {
        if hour < 12 {
            Meridiem::AM
        } else {
            Meridiem::PM
        }
    }

    /// Converts a 12-hour clock hour (or a 24-hour clock hour) to an hour
    /// of the day.
    fn to_hour(self, hour: i8) -> i8 {
        match self {
            Meridiem::AM => hour % 12,
            Meridiem::PM => (hour % 12) + 12,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Meridiem::AM => "AM",
            Meridiem::PM => "PM",
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use crate::{
        civil::{date, time},
        tz::{BuiltinRegistry, ZoneRegistry},
    };

    use super::*;

    fn compile(text: &str) -> Pattern {
        Pattern::compile(text).unwrap()
    }

    #[test]
    fn compile_items() {
        let p = compile("dd/MM/yyyy 'at' HH''mm");
        assert_eq!(
            p.items,
            vec![
                Item::Field(Directive::Day { width: 2 }),
                Item::Literal("/".into()),
                Item::Field(Directive::Month { width: 2 }),
                Item::Literal("/".into()),
                Item::Field(Directive::Year { width: 4 }),
                Item::Literal(" at ".into()),
                Item::Field(Directive::Hour { width: 2 }),
                Item::Literal("'".into()),
                Item::Field(Directive::Minute { width: 2 }),
            ],
        );
        assert_eq!(compile("'it''s'").items, vec![Item::Literal("it's".into())]);
        assert_eq!(compile("").items, vec![]);
    }

    #[test]
    fn compile_errors() {
        insta::assert_snapshot!(
            Pattern::compile("dd MMM yyyy").unwrap_err(),
            @"failed to compile pattern `dd MMM yyyy`: pattern letter `M` cannot be repeated 3 times",
        );
        insta::assert_snapshot!(
            Pattern::compile("yyyy-MM-ddTHH").unwrap_err(),
            @"failed to compile pattern `yyyy-MM-ddTHH`: unrecognized pattern letter `T` at position 10 (quote literal text with `'`)",
        );
        insta::assert_snapshot!(
            Pattern::compile("HH 'o''clock").unwrap_err(),
            @"failed to compile pattern `HH 'o''clock`: quoted literal starting at position 3 is missing its closing `'`",
        );
        assert!(Pattern::compile("SSSSSSSSSS").unwrap_err().is_pattern());
        assert!(Pattern::compile("yyy").unwrap_err().is_pattern());
        assert!(Pattern::compile("aa").unwrap_err().is_pattern());
    }

    #[test]
    fn format_civil() {
        let d = date(2007, 12, 3);
        let dt = d.at(21, 5, 9, 123_456_789);
        insta::assert_snapshot!(compile("dd/MM/yyyy").format(d, None).unwrap(), @"03/12/2007");
        insta::assert_snapshot!(compile("d.M.y").format(d, None).unwrap(), @"3.12.2007");
        insta::assert_snapshot!(compile("yy").format(d, None).unwrap(), @"07");
        insta::assert_snapshot!(
            compile("yyyy-MM-dd'T'HH:mm:ss.SSS").format(dt, None).unwrap(),
            @"2007-12-03T21:05:09.123",
        );
        insta::assert_snapshot!(compile("h:mm a").format(dt, None).unwrap(), @"9:05 PM");
        insta::assert_snapshot!(
            compile("hh a").format(time(0, 30, 0, 0), None).unwrap(),
            @"12 AM",
        );
        insta::assert_snapshot!(compile("yyyy").format(date(-44, 3, 15), None).unwrap(), @"-0044");
    }

    #[test]
    fn format_missing_field() {
        insta::assert_snapshot!(
            compile("yyyy HH").format(date(2007, 12, 3), None).unwrap_err(),
            @"failed to format value with pattern `yyyy HH`: pattern requires an hour, but the value being formatted does not have one",
        );
        assert!(compile("dd").format(time(1, 2, 3, 0), None).is_err());
    }

    #[test]
    fn format_zones() {
        let p = compile("yyyy-MM-dd HH:mm");
        let ny = BuiltinRegistry::new().resolve("America/New_York").unwrap();
        let paris = BuiltinRegistry::new().resolve("Europe/Paris").unwrap();
        let instant: Instant = "2007-12-03T10:15:30Z".parse().unwrap();

        assert_eq!(p.format(instant, None).unwrap(), "2007-12-03 10:15");
        assert_eq!(p.format(instant, Some(&ny)).unwrap(), "2007-12-03 05:15");

        let zdt = instant.to_zoned(paris);
        assert_eq!(p.format(&zdt, None).unwrap(), "2007-12-03 11:15");
        assert_eq!(p.format(&zdt, Some(&ny)).unwrap(), "2007-12-03 05:15");

        let dt = zdt.datetime();
        assert_eq!(p.format(dt, Some(&ny)).unwrap(), "2007-12-03 11:15");
    }

    #[test]
    fn parse_values() {
        let tm = compile("dd/MM/yyyy").parse("03/12/2007").unwrap();
        assert_eq!(tm.to_date().unwrap(), date(2007, 12, 3));

        let tm = compile("d/M/y").parse("3/7/95").unwrap();
        assert_eq!(tm.to_date().unwrap(), date(95, 7, 3));

        let tm = compile("yyMMdd").parse("240229").unwrap();
        assert_eq!(tm.to_date().unwrap(), date(2024, 2, 29));

        let tm = compile("h:mm:ss.SSS a").parse("9:05:07.250 pm").unwrap();
        assert_eq!(tm.to_time().unwrap(), time(21, 5, 7, 250_000_000));

        let tm = compile("hh a").parse("12 AM").unwrap();
        assert_eq!(tm.to_time().unwrap(), time(0, 0, 0, 0));
        assert_eq!(tm.hour(), Some(0));

        let tm = compile("yyyy-MM-dd HH:mm").parse("2024-03-10 02:30").unwrap();
        let ny = BuiltinRegistry::new().resolve("America/New_York").unwrap();
        let zdt = tm.to_zoned(ny).unwrap();
        assert_eq!(zdt.to_string(), "2024-03-10T03:30:00-04:00[America/New_York]");
    }

    #[test]
    fn parse_errors() {
        let p = compile("dd/MM/yyyy");
        insta::assert_snapshot!(
            p.parse("03-12-2007").unwrap_err(),
            @"failed to parse `03-12-2007` with pattern `dd/MM/yyyy`: expected literal `/`, but found `-`",
        );
        insta::assert_snapshot!(
            p.parse("3/12/2007").unwrap_err(),
            @"failed to parse `3/12/2007` with pattern `dd/MM/yyyy`: expected digits for day of month, but found `/`",
        );
        insta::assert_snapshot!(
            p.parse("03/13/2007").unwrap_err(),
            @"failed to parse `03/13/2007` with pattern `dd/MM/yyyy`: parameter 'month' with value 13 is not in the required range of 1..=12",
        );
        insta::assert_snapshot!(
            p.parse("03/12/2007 ").unwrap_err(),
            @"failed to parse `03/12/2007 ` with pattern `dd/MM/yyyy`: pattern matched, but found unparsed trailing input ` `",
        );
        insta::assert_snapshot!(
            p.parse("31/04/2007").unwrap().to_date().unwrap_err(),
            @"parsed date is invalid: parameter 'day' with value 31 is not in the required range of 1..=30",
        );
        insta::assert_snapshot!(
            compile("h:mm").parse("9:05").unwrap().to_time().unwrap_err(),
            @"parsed a 12-hour clock hour, but no AM/PM marker to disambiguate it",
        );
        insta::assert_snapshot!(
            compile("yyyy").parse("2024").unwrap().to_date().unwrap_err(),
            @"a month is required to build a date, but the pattern did not parse one",
        );
        let err = compile("dd dd").parse("01 02").unwrap_err();
        assert!(err.is_parse());
        let err = compile("mm:ss").parse("01:02").unwrap().to_time().unwrap_err();
        assert!(err.is_parse());
        let tm = compile("HH a").parse("13 AM").unwrap();
        assert_eq!(tm.hour(), Some(13));
        insta::assert_snapshot!(
            tm.to_time().unwrap_err(),
            @"parsed hour more than once with conflicting values",
        );
        assert!(compile("HH a").parse("15 am").unwrap().to_time().is_err());
        assert!(compile("HH a").parse("12 AM").unwrap().to_time().is_err());
        let t = compile("HH a").parse("13 PM").unwrap().to_time().unwrap();
        assert_eq!(t, time(13, 0, 0, 0));
        let t = compile("HH a").parse("00 AM").unwrap().to_time().unwrap();
        assert_eq!(t, time(0, 0, 0, 0));
    }

    quickcheck! {
        fn prop_date_roundtrip(d: Date) -> bool {
            let p = compile("yyyy-MM-dd");
            let text = p.format(d, None).unwrap();
            p.parse(&text).unwrap().to_date().unwrap() == d
        }

        fn prop_datetime_roundtrip(dt: DateTime) -> bool {
            let p = compile("yyyy/M/d H:m:s.SSSSSSSSS");
            let text = p.format(dt, None).unwrap();
            p.parse(&text).unwrap().to_datetime().unwrap() == dt
        }

        fn prop_civil_ignores_zone(dt: DateTime, offset: Offset) -> bool {
            let p = compile("yyyy-MM-dd HH:mm:ss");
            let tz = TimeZone::fixed(offset);
            p.format(dt, Some(&tz)).unwrap() == p.format(dt, None).unwrap()
        }

        fn prop_zoned_projects(zdt: Zoned, offset: Offset) -> bool {
            let p = compile("yyyy-MM-dd hh:mm:ss a");
            let tz = TimeZone::fixed(offset);
            let expected = zdt.to_instant().to_zoned(tz.clone());
            p.format(&zdt, Some(&tz)).unwrap()
                == p.format(&expected, None).unwrap()
        }
    }
}
