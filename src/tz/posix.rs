/*!
Support for POSIX `TZ` rule strings, like `EST5EDT,M3.2.0,M11.1.0`.

POSIX rules are how the builtin registry describes each region, and they
also appear as the footer of TZif files, where they describe every
transition after the last one listed explicitly.

We enable the IANA v3+ extension, which permits transition hours to be
signed and in the range `-167..=167` instead of `0..=24`.
*/

use core::cell::Cell;

use crate::{
    error::{tz::posix::Error as E, Error, ErrorContext},
    tz::{
        transitions::{self, Transition},
        AmbiguousOffset, Offset,
    },
    util::{
        calendar::{self, SECONDS_PER_DAY, YEAR_MAX, YEAR_MIN},
        escape::{Byte, Bytes},
    },
};

macro_rules! err {
    ($($tt:tt)*) => {{
        E::Message(format!($($tt)*).into_boxed_str())
    }}
}

/// A POSIX time zone rule.
///
/// Offsets are stored in seconds in the conventional sign (east of UTC is
/// positive), even though POSIX writes them inverted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PosixTimeZone {
    std_abbrev: Box<str>,
    std_offset: i32,
    dst: Option<PosixDst>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct PosixDst {
    abbrev: Box<str>,
    offset: i32,
    rule: PosixRule,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PosixRule {
    start: PosixDayTime,
    end: PosixDayTime,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PosixDayTime {
    date: PosixDay,
    /// Seconds since the start of the day, in the range `-604799..=604799`.
    time: i32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PosixDay {
    /// `Jn`, one based and never counting February 29.
    JulianOne(i16),
    /// `n`, zero based and counting February 29.
    JulianZero(i16),
    /// `Mm.w.d`. Week `5` means the last such weekday of the month. The
    /// weekday uses `0` for Sunday.
    WeekdayOfMonth { month: i8, week: i8, weekday: i8 },
}

/// The rule used when a DST abbreviation is given without any rule. This
/// matches what most C libraries do.
const DEFAULT_RULE: PosixRule = PosixRule {
    start: PosixDayTime {
        date: PosixDay::WeekdayOfMonth { month: 3, week: 2, weekday: 0 },
        time: 2 * 3600,
    },
    end: PosixDayTime {
        date: PosixDay::WeekdayOfMonth { month: 11, week: 1, weekday: 0 },
        time: 2 * 3600,
    },
};

impl PosixTimeZone {
    /// Parses a POSIX rule string, requiring that the entire input is
    /// consumed.
    pub(crate) fn parse(input: &str) -> Result<PosixTimeZone, Error> {
        let parser = Parser::new(input.as_bytes());
        parser
            .parse()
            .map_err(Error::from)
            .and_then(PosixTimeZone::check_offsets)
            .context(E::Invalid { input: input.into() })
    }

    /// Parses a POSIX rule string from raw bytes, as found in a TZif
    /// footer.
    pub(crate) fn parse_bytes(input: &[u8]) -> Result<PosixTimeZone, Error> {
        let parser = Parser::new(input);
        parser
            .parse()
            .map_err(Error::from)
            .and_then(PosixTimeZone::check_offsets)
            .with_context(|| E::Invalid {
                input: Bytes(input).to_string().into_boxed_str(),
            })
    }

    /// Fails when the standard or DST offset is beyond `±18:00` once
    /// truncated to whole minutes.
    fn check_offsets(self) -> Result<PosixTimeZone, Error> {
        Offset::from_seconds_truncated(self.std_offset)
            .context(E::StdOffset)?;
        if let Some(ref dst) = self.dst {
            Offset::from_seconds_truncated(dst.offset)
                .context(E::DstOffset)?;
        }
        Ok(self)
    }

    /// Returns the standard offset, truncated to whole minutes.
    pub(crate) fn std_offset(&self) -> Offset {
        Offset::from_checked_seconds(self.std_offset)
    }

    /// Returns the fixed offset of this rule when it never observes
    /// daylight saving time.
    pub(crate) fn to_fixed_offset(&self) -> Option<Offset> {
        match self.dst {
            None => Some(self.std_offset()),
            Some(_) => None,
        }
    }

    /// Returns the offset in effect at the given Unix timestamp.
    pub(crate) fn to_offset(&self, timestamp: i64) -> Offset {
        let std = self.std_offset();
        let Some(ref dst) = self.dst else { return std };
        let year = year_of(timestamp + i64::from(std.seconds()));
        let (ts, len) = dst.transitions_around(std, year);
        transitions::offset_at(&ts[..len], std, timestamp)
    }

    /// Returns the possibly ambiguous offset of a local datetime, given as
    /// seconds since the Unix epoch as if it were in UTC.
    pub(crate) fn to_ambiguous_offset(&self, local: i64) -> AmbiguousOffset {
        let std = self.std_offset();
        let Some(ref dst) = self.dst else {
            return AmbiguousOffset::Unambiguous { offset: std };
        };
        let year = year_of(local);
        let (ts, len) = dst.transitions_around(std, year);
        transitions::ambiguous_offset_at(&ts[..len], std, local)
    }
}

impl PosixDst {
    fn offset(&self) -> Offset {
        Offset::from_checked_seconds(self.offset)
    }

    /// Returns the transitions in the year before, the year of and the
    /// year after the one given, in order.
    ///
    /// The second value is the number of transitions that are valid in the
    /// array returned.
    fn transitions_around(
        &self,
        std: Offset,
        year: i16,
    ) -> ([Transition; 6], usize) {
        let dst = self.offset();
        let mut out = [Transition { at: 0, before: std, after: std }; 6];
        let mut len = 0;
        let first = year.saturating_sub(1).max(YEAR_MIN);
        let last = year.saturating_add(1).min(YEAR_MAX);
        for y in first..=last {
            let start = self.rule.start.to_local_seconds(y);
            let end = self.rule.end.to_local_seconds(y);
            let on = Transition {
                at: start - i64::from(std.seconds()),
                before: std,
                after: dst,
            };
            let off = Transition {
                at: end - i64::from(dst.seconds()),
                before: dst,
                after: std,
            };
            // Southern hemisphere rules end DST before they start it.
            let (a, b) = if on.at <= off.at { (on, off) } else { (off, on) };
            out[len] = a;
            out[len + 1] = b;
            len += 2;
        }
        (out, len)
    }
}

impl PosixDayTime {
    /// Returns the local time, in seconds since the Unix epoch as if it
    /// were UTC, at which this rule fires in the given year.
    fn to_local_seconds(&self, year: i16) -> i64 {
        let epoch_day = self.date.to_epoch_day(year);
        i64::from(epoch_day) * SECONDS_PER_DAY + i64::from(self.time)
    }
}

impl PosixDay {
    fn to_epoch_day(&self, year: i16) -> i32 {
        let jan1 = calendar::to_epoch_day(year, 1, 1);
        match *self {
            PosixDay::JulianOne(n) => {
                let mut n = i32::from(n);
                if calendar::is_leap_year(year) && n >= 60 {
                    n += 1;
                }
                jan1 + n - 1
            }
            PosixDay::JulianZero(n) => {
                let max = i32::from(calendar::days_in_year(year)) - 1;
                jan1 + i32::from(n).min(max)
            }
            PosixDay::WeekdayOfMonth { month, week, weekday } => {
                let first = calendar::to_epoch_day(year, month, 1);
                // ISO weekdays are 1..=7 with Sunday as 7, so `% 7` maps
                // them to POSIX weekdays with Sunday as 0.
                let first_weekday =
                    i32::from(calendar::weekday_from_epoch_day(first) % 7);
                let delta = (i32::from(weekday) - first_weekday).rem_euclid(7);
                let mut day = 1 + delta + (i32::from(week) - 1) * 7;
                let days = i32::from(calendar::days_in_month(year, month));
                while day > days {
                    day -= 7;
                }
                first + day - 1
            }
        }
    }
}

impl core::fmt::Display for PosixTimeZone {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write_abbrev(f, &self.std_abbrev)?;
        write_posix_offset(f, self.std_offset)?;
        if let Some(ref dst) = self.dst {
            write_abbrev(f, &dst.abbrev)?;
            if dst.offset != self.std_offset + 3600 {
                write_posix_offset(f, dst.offset)?;
            }
            write!(f, ",{},{}", dst.rule.start, dst.rule.end)?;
        }
        Ok(())
    }
}

impl core::fmt::Display for PosixDayTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.date {
            PosixDay::JulianOne(n) => write!(f, "J{n}")?,
            PosixDay::JulianZero(n) => write!(f, "{n}")?,
            PosixDay::WeekdayOfMonth { month, week, weekday } => {
                write!(f, "M{month}.{week}.{weekday}")?
            }
        }
        if self.time != 2 * 3600 {
            f.write_str("/")?;
            write_hms(f, self.time)?;
        }
        Ok(())
    }
}

fn write_abbrev(
    f: &mut core::fmt::Formatter,
    abbrev: &str,
) -> core::fmt::Result {
    if abbrev.bytes().all(|b| b.is_ascii_alphabetic()) {
        f.write_str(abbrev)
    } else {
        write!(f, "<{abbrev}>")
    }
}

fn write_posix_offset(
    f: &mut core::fmt::Formatter,
    seconds: i32,
) -> core::fmt::Result {
    // POSIX is backwards.
    write_hms(f, -seconds)
}

fn write_hms(f: &mut core::fmt::Formatter, seconds: i32) -> core::fmt::Result {
    if seconds < 0 {
        f.write_str("-")?;
    }
    let seconds = seconds.unsigned_abs();
    let (h, m, s) = (seconds / 3600, seconds / 60 % 60, seconds % 60);
    write!(f, "{h}")?;
    if m != 0 || s != 0 {
        write!(f, ":{m:02}")?;
    }
    if s != 0 {
        write!(f, ":{s:02}")?;
    }
    Ok(())
}

/// Returns the civil year of the given Unix timestamp, clamped to the
/// supported range.
fn year_of(seconds: i64) -> i16 {
    let day = seconds.div_euclid(SECONDS_PER_DAY).clamp(
        i64::from(calendar::EPOCH_DAY_MIN),
        i64::from(calendar::EPOCH_DAY_MAX),
    );
    // OK because of the clamp above.
    calendar::from_epoch_day(day as i32).0
}

/// A parser for POSIX time zones.
#[derive(Debug)]
struct Parser<'s> {
    /// The `TZ` string that we're parsing.
    tz: &'s [u8],
    /// The parser's current position in `tz`.
    pos: Cell<usize>,
}

impl<'s> Parser<'s> {
    fn new(tz: &'s [u8]) -> Parser<'s> {
        Parser { tz, pos: Cell::new(0) }
    }

    /// Parses a POSIX time zone and ensures that the entire TZ string
    /// corresponds to a single valid POSIX time zone.
    fn parse(&self) -> Result<PosixTimeZone, E> {
        let time_zone = self.parse_posix_time_zone()?;
        if !self.is_done() {
            return Err(err!(
                "expected entire TZ string to be a valid POSIX \
                 time zone, but found `{}` after what would otherwise \
                 be a valid POSIX TZ string",
                Bytes(self.remaining()),
            ));
        }
        Ok(time_zone)
    }

    fn parse_posix_time_zone(&self) -> Result<PosixTimeZone, E> {
        let std_abbrev = self
            .parse_abbreviation()
            .map_err(|e| err!("failed to parse standard abbreviation: {e}"))?;
        let std_offset = self
            .parse_posix_offset()
            .map_err(|e| err!("failed to parse standard offset: {e}"))?;
        let mut dst = None;
        let starts_dst = |b: u8| b.is_ascii_alphabetic() || b == b'<';
        if self.maybe_byte().map_or(false, starts_dst) {
            dst = Some(self.parse_posix_dst(std_offset)?);
        }
        Ok(PosixTimeZone { std_abbrev, std_offset, dst })
    }

    /// Parse a DST zone with an optional explicit transition rule.
    ///
    /// This assumes the parser is positioned at the first byte of the DST
    /// abbreviation.
    fn parse_posix_dst(&self, std_offset: i32) -> Result<PosixDst, E> {
        let abbrev = self
            .parse_abbreviation()
            .map_err(|e| err!("failed to parse DST abbreviation: {e}"))?;
        // One hour ahead of standard time, unless given explicitly.
        let mut dst = PosixDst {
            abbrev,
            offset: std_offset + 3600,
            rule: DEFAULT_RULE,
        };
        if self.is_done() {
            return Ok(dst);
        }
        if self.byte() != b',' {
            dst.offset = self
                .parse_posix_offset()
                .map_err(|e| err!("failed to parse DST offset: {e}"))?;
            if self.is_done() {
                return Ok(dst);
            }
        }
        if self.byte() != b',' {
            return Err(err!(
                "after parsing DST offset in POSIX time zone string, \
                 found `{}` but expected a ','",
                Byte(self.byte()),
            ));
        }
        if !self.bump() {
            return Err(err!(
                "after parsing DST offset in POSIX time zone string, \
                 found end of string after a trailing ','",
            ));
        }
        dst.rule = self.parse_rule()?;
        Ok(dst)
    }

    /// Parses a time zone abbreviation, quoted or not.
    fn parse_abbreviation(&self) -> Result<Box<str>, E> {
        match self.maybe_byte() {
            None => Err(err!(
                "expected abbreviation, but found end of string"
            )),
            Some(b'<') => {
                if !self.bump() {
                    return Err(err!(
                        "found opening '<' quote for abbreviation in \
                         POSIX time zone string, and expected a name \
                         following it, but found the end of string instead"
                    ));
                }
                self.parse_quoted_abbreviation()
            }
            Some(_) => self.parse_unquoted_abbreviation(),
        }
    }

    fn parse_unquoted_abbreviation(&self) -> Result<Box<str>, E> {
        let start = self.pos();
        while self.maybe_byte().map_or(false, |b| b.is_ascii_alphabetic()) {
            self.bump();
        }
        self.finish_abbreviation(start, self.pos())
    }

    /// This assumes the parser is positioned immediately after the opening
    /// `<` quote.
    fn parse_quoted_abbreviation(&self) -> Result<Box<str>, E> {
        let start = self.pos();
        while self.maybe_byte().map_or(false, |b| {
            b.is_ascii_alphanumeric() || b == b'+' || b == b'-'
        }) {
            self.bump();
        }
        let end = self.pos();
        match self.maybe_byte() {
            None => {
                return Err(err!(
                    "found quoted abbreviation `{}`, but did not find \
                     expected end-of-quoted abbreviation '>' character",
                    Bytes(&self.tz[start..end]),
                ))
            }
            Some(b'>') => {}
            Some(byte) => {
                return Err(err!(
                    "found quoted abbreviation `{}`, but found `{}` instead \
                     of end-of-quoted abbreviation '>' character",
                    Bytes(&self.tz[start..end]),
                    Byte(byte),
                ))
            }
        }
        self.bump();
        self.finish_abbreviation(start, end)
    }

    fn finish_abbreviation(
        &self,
        start: usize,
        end: usize,
    ) -> Result<Box<str>, E> {
        const MAX_LEN: usize = 30;

        let abbrev = &self.tz[start..end];
        if abbrev.len() < 3 {
            return Err(err!(
                "expected abbreviation with 3 or more bytes, but found \
                 abbreviation `{}` with {} bytes",
                Bytes(abbrev),
                abbrev.len(),
            ));
        }
        if abbrev.len() > MAX_LEN {
            return Err(err!(
                "expected abbreviation with at most {MAX_LEN} bytes, \
                 but found a longer abbreviation `{}`",
                Bytes(abbrev),
            ));
        }
        // Every byte was checked to be ASCII above.
        let abbrev = core::str::from_utf8(abbrev).map_err(|_| {
            err!("found abbreviation `{}`, but it is not valid UTF-8", Bytes(abbrev))
        })?;
        Ok(abbrev.into())
    }

    /// Parse a POSIX time offset, returning it in seconds with its sign
    /// flipped to the conventional direction.
    fn parse_posix_offset(&self) -> Result<i32, E> {
        let sign = self
            .parse_optional_sign()
            .map_err(|e| {
                err!(
                    "failed to parse sign for time offset \
                     in POSIX time zone string: {e}",
                )
            })?
            .unwrap_or(1);
        let hour = self.parse_number_with_upto_n_digits(2, "hour")?;
        if !(0..=24).contains(&hour) {
            return Err(err!(
                "parsed hour `{hour}`, but hour in \
                 POSIX time zone must be in range `0..=24`",
            ));
        }
        let seconds = hour * 3600 + self.parse_minutes_seconds()?;
        // POSIX is backwards: `EST5` corresponds to `-05:00`.
        Ok(seconds * -sign)
    }

    /// Parses a POSIX DST transition rule of the form `start,end`.
    fn parse_rule(&self) -> Result<PosixRule, E> {
        let start = self.parse_posix_datetime_spec().map_err(|e| {
            err!("failed to parse start of DST transition rule: {e}")
        })?;
        if self.maybe_byte() != Some(b',') || !self.bump() {
            return Err(err!(
                "expected end of DST rule after parsing the start \
                 of the DST rule"
            ));
        }
        let end = self.parse_posix_datetime_spec().map_err(|e| {
            err!("failed to parse end of DST transition rule: {e}")
        })?;
        Ok(PosixRule { start, end })
    }

    fn parse_posix_datetime_spec(&self) -> Result<PosixDayTime, E> {
        let mut daytime = PosixDayTime {
            date: self.parse_posix_date_spec()?,
            time: 2 * 3600,
        };
        if self.maybe_byte() != Some(b'/') {
            return Ok(daytime);
        }
        if !self.bump() {
            return Err(err!(
                "expected time specification after '/' following a date \
                 specification in a POSIX time zone DST transition rule",
            ));
        }
        daytime.time = self.parse_posix_time_spec()?;
        Ok(daytime)
    }

    /// Parses one of `Jn`, `n` or `Mm.w.d`.
    fn parse_posix_date_spec(&self) -> Result<PosixDay, E> {
        match self.maybe_byte() {
            Some(b'J') => {
                if !self.bump() {
                    return Err(err!(
                        "expected one-based Julian day after 'J' in date \
                         specification of a POSIX time zone DST \
                         transition rule, but got the end of the string"
                    ));
                }
                let n = self.parse_number_with_upto_n_digits(3, "day")?;
                if !(1..=365).contains(&n) {
                    return Err(err!(
                        "parsed one based Julian day `{n}`, but one based \
                         Julian day must be in range 1..=365",
                    ));
                }
                Ok(PosixDay::JulianOne(n as i16))
            }
            Some(b'0'..=b'9') => {
                let n = self.parse_number_with_upto_n_digits(3, "day")?;
                if !(0..=365).contains(&n) {
                    return Err(err!(
                        "parsed zero based Julian day `{n}`, but zero based \
                         Julian day must be in range 0..=365",
                    ));
                }
                Ok(PosixDay::JulianZero(n as i16))
            }
            Some(b'M') => {
                if !self.bump() {
                    return Err(err!(
                        "expected month-week-weekday after 'M' in date \
                         specification of a POSIX time zone DST \
                         transition rule, but got the end of the string"
                    ));
                }
                self.parse_weekday_of_month()
            }
            Some(byte) => Err(err!(
                "expected 'J', a digit or 'M' at the beginning of a date \
                 specification of a POSIX time zone DST transition rule, \
                 but got `{}` instead",
                Byte(byte),
            )),
            None => Err(err!(
                "expected date specification in POSIX time zone DST \
                 transition rule, but got the end of the string"
            )),
        }
    }

    /// Parses `m.w.d`, positioned just after the `M`.
    fn parse_weekday_of_month(&self) -> Result<PosixDay, E> {
        let month = self.parse_number_with_upto_n_digits(2, "month")?;
        if !(1..=12).contains(&month) {
            return Err(err!(
                "parsed month `{month}`, but month in \
                 POSIX time zone must be in range 1..=12",
            ));
        }
        self.expect_dot("month")?;
        let week = self.parse_number_with_upto_n_digits(1, "week")?;
        if !(1..=5).contains(&week) {
            return Err(err!(
                "parsed week `{week}`, but week in \
                 POSIX time zone must be in range 1..=5"
            ));
        }
        self.expect_dot("week")?;
        let weekday = self.parse_number_with_upto_n_digits(1, "weekday")?;
        if !(0..=6).contains(&weekday) {
            return Err(err!(
                "parsed weekday `{weekday}`, but weekday in \
                 POSIX time zone must be in range `0..=6` \
                 (with `0` corresponding to Sunday)",
            ));
        }
        // OK because of the range checks above.
        Ok(PosixDay::WeekdayOfMonth {
            month: month as i8,
            week: week as i8,
            weekday: weekday as i8,
        })
    }

    fn expect_dot(&self, after: &str) -> Result<(), E> {
        if self.maybe_byte() != Some(b'.') {
            return Err(err!(
                "expected '.' after {after} in POSIX time zone rule"
            ));
        }
        if !self.bump() {
            return Err(err!(
                "expected number after '.' following {after} in \
                 POSIX time zone rule"
            ));
        }
        Ok(())
    }

    /// Parses `[+/-]hhh[:mm[:ss]]` using the IANA v3+ hour range.
    fn parse_posix_time_spec(&self) -> Result<i32, E> {
        let sign = self
            .parse_optional_sign()
            .map_err(|e| {
                err!(
                    "failed to parse sign for transition time \
                     in POSIX time zone string: {e}",
                )
            })?
            .unwrap_or(1);
        let hour = self.parse_number_with_upto_n_digits(3, "hour")?;
        if !(0..=167).contains(&hour) {
            return Err(err!(
                "parsed hour `{hour}`, but hour in IANA v3+ \
                 POSIX time zone must be in range `-167..=167`",
            ));
        }
        let seconds = hour * 3600 + self.parse_minutes_seconds()?;
        Ok(seconds * sign)
    }

    /// Parses the optional `:mm[:ss]` suffix of a time, returning the
    /// number of seconds it represents.
    fn parse_minutes_seconds(&self) -> Result<i32, E> {
        let mut seconds = 0;
        if self.maybe_byte() != Some(b':') {
            return Ok(seconds);
        }
        self.bump();
        let minute = self.parse_number_with_exactly_n_digits(2, "minute")?;
        if !(0..=59).contains(&minute) {
            return Err(err!(
                "parsed minute `{minute}`, but minute in \
                 POSIX time zone must be in range `0..=59`",
            ));
        }
        seconds += minute * 60;
        if self.maybe_byte() != Some(b':') {
            return Ok(seconds);
        }
        self.bump();
        let second = self.parse_number_with_exactly_n_digits(2, "second")?;
        if !(0..=59).contains(&second) {
            return Err(err!(
                "parsed second `{second}`, but second in \
                 POSIX time zone must be in range `0..=59`",
            ));
        }
        Ok(seconds + second)
    }

    fn parse_number_with_exactly_n_digits(
        &self,
        n: usize,
        what: &str,
    ) -> Result<i32, E> {
        let start = self.pos();
        let number = self.parse_number_with_upto_n_digits(n, what)?;
        if self.pos() - start != n {
            return Err(err!(
                "expected {n} digits for {what}, but found {}",
                self.pos() - start,
            ));
        }
        Ok(number)
    }

    /// Parses a number with at least 1 and at most `n` digits.
    fn parse_number_with_upto_n_digits(
        &self,
        n: usize,
        what: &str,
    ) -> Result<i32, E> {
        let mut number: i32 = 0;
        for i in 0..n {
            match self.maybe_byte() {
                Some(byte @ b'0'..=b'9') => {
                    number = number * 10 + i32::from(byte - b'0');
                    self.bump();
                }
                Some(_) | None if i == 0 => {
                    return Err(match self.maybe_byte() {
                        Some(byte) => err!(
                            "invalid {what}, expected 0-9 but got `{}`",
                            Byte(byte),
                        ),
                        None => err!(
                            "invalid {what}, expected 0-9 but got end of \
                             string"
                        ),
                    });
                }
                Some(_) | None => break,
            }
        }
        Ok(number)
    }

    /// Parses an optional sign. If one exists, then this guarantees that
    /// it is not the last byte in the input.
    fn parse_optional_sign(&self) -> Result<Option<i32>, E> {
        let sign = match self.maybe_byte() {
            Some(b'-') => -1,
            Some(b'+') => 1,
            _ => return Ok(None),
        };
        if !self.bump() {
            return Err(err!("expected digit after sign, but got end of input"));
        }
        Ok(Some(sign))
    }
}

/// Helper routines for parsing a POSIX `TZ` string.
impl<'s> Parser<'s> {
    /// Bump the parser to the next byte.
    ///
    /// If the end of the input has been reached, then `false` is returned.
    fn bump(&self) -> bool {
        if self.is_done() {
            return false;
        }
        self.pos.set(self.pos() + 1);
        !self.is_done()
    }

    fn is_done(&self) -> bool {
        self.pos() == self.tz.len()
    }

    /// Return the byte at the current position of the parser.
    ///
    /// This panics if the parser is positioned at the end of the TZ
    /// string.
    fn byte(&self) -> u8 {
        self.tz[self.pos()]
    }

    fn maybe_byte(&self) -> Option<u8> {
        self.tz.get(self.pos()).copied()
    }

    fn pos(&self) -> usize {
        self.pos.get()
    }

    fn remaining(&self) -> &'s [u8] {
        &self.tz[self.pos()..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posix(s: &str) -> PosixTimeZone {
        PosixTimeZone::parse(s).unwrap()
    }

    fn o(hours: i8) -> Offset {
        Offset::constant(hours)
    }

    #[test]
    fn parse_basic() {
        let tz = posix("EST5EDT,M3.2.0,M11.1.0");
        assert_eq!(&*tz.std_abbrev, "EST");
        assert_eq!(tz.std_offset, -5 * 3600);
        let dst = tz.dst.as_ref().unwrap();
        assert_eq!(&*dst.abbrev, "EDT");
        assert_eq!(dst.offset, -4 * 3600);
        assert_eq!(dst.rule, DEFAULT_RULE);

        let tz = posix("<+0545>-5:45");
        assert_eq!(&*tz.std_abbrev, "+0545");
        assert_eq!(tz.std_offset, 5 * 3600 + 45 * 60);
        assert_eq!(tz.to_fixed_offset(), Some(Offset::new(5, 45).unwrap()));

        let tz = posix("EST5EDT");
        assert_eq!(tz.dst.unwrap().rule, DEFAULT_RULE);

        let tz = posix("IST-2IDT,M3.4.4/26,M10.5.0");
        let rule = tz.dst.unwrap().rule;
        assert_eq!(rule.start.time, 26 * 3600);

        let tz = posix("<-03>3<-02>,M3.5.0/-2,M10.5.0/-1");
        let rule = tz.dst.unwrap().rule;
        assert_eq!(rule.start.time, -2 * 3600);
    }

    #[test]
    fn parse_errors() {
        insta::assert_snapshot!(
            PosixTimeZone::parse("").unwrap_err(),
            @"invalid POSIX time zone string ``: failed to parse standard abbreviation: expected abbreviation, but found end of string",
        );
        insta::assert_snapshot!(
            PosixTimeZone::parse("EST5EDT,M3.2.0").unwrap_err(),
            @"invalid POSIX time zone string `EST5EDT,M3.2.0`: expected end of DST rule after parsing the start of the DST rule",
        );
        insta::assert_snapshot!(
            PosixTimeZone::parse("EST5EDT,M13.2.0,M11.1.0").unwrap_err(),
            @"invalid POSIX time zone string `EST5EDT,M13.2.0,M11.1.0`: failed to parse start of DST transition rule: parsed month `13`, but month in POSIX time zone must be in range 1..=12",
        );
        assert!(PosixTimeZone::parse("ES5").is_err());
        assert!(PosixTimeZone::parse("EST").is_err());
        assert!(PosixTimeZone::parse("EST5 ").is_err());
        assert!(PosixTimeZone::parse("<EST5").is_err());
        assert!(PosixTimeZone::parse("EST25").is_err());
    }

    #[test]
    fn offsets_beyond_eighteen_hours() {
        let err = PosixTimeZone::parse("XXX-19").unwrap_err();
        assert!(err.is_range());
        insta::assert_snapshot!(
            err,
            @"invalid POSIX time zone string `XXX-19`: invalid standard offset: parameter 'offset-seconds' with value 68400 is not in the required range of -64859..=64859",
        );
        let err = PosixTimeZone::parse("AAA+24:00:00BBB").unwrap_err();
        assert!(err.is_range());
        // The implied DST offset is one hour ahead of standard time.
        let err = PosixTimeZone::parse("XXX-18YYY").unwrap_err();
        insta::assert_snapshot!(
            err,
            @"invalid POSIX time zone string `XXX-18YYY`: invalid DST offset: parameter 'offset-seconds' with value 68400 is not in the required range of -64859..=64859",
        );
        assert_eq!(posix("XXX-18").std_offset(), Offset::MAX);
        assert_eq!(posix("XXX+18:00:59").std_offset(), Offset::MIN);
    }

    #[test]
    fn display() {
        for s in [
            "EST5EDT,M3.2.0,M11.1.0",
            "CET-1CEST,M3.5.0,M10.5.0/3",
            "<+0545>-5:45",
            "IST-2IDT,M3.4.4/26,M10.5.0",
            "AEST-10AEDT,M10.1.0,M4.1.0/3",
            "XXX3YYY,J60/1:30,300/-1",
        ] {
            assert_eq!(posix(s).to_string(), s);
        }
    }

    #[test]
    fn weekday_of_month() {
        let day = |month, week, weekday| {
            let d = PosixDay::WeekdayOfMonth { month, week, weekday };
            calendar::from_epoch_day(d.to_epoch_day(2024))
        };
        // Second Sunday of March 2024.
        assert_eq!(day(3, 2, 0), (2024, 3, 10));
        // First Sunday of November 2024.
        assert_eq!(day(11, 1, 0), (2024, 11, 3));
        // Last Sunday of March and October 2024.
        assert_eq!(day(3, 5, 0), (2024, 3, 31));
        assert_eq!(day(10, 5, 0), (2024, 10, 27));
        // Last Friday of April 2024.
        assert_eq!(day(4, 5, 5), (2024, 4, 26));
    }

    #[test]
    fn julian_days() {
        let day = |d: PosixDay, year| {
            calendar::from_epoch_day(d.to_epoch_day(year))
        };
        assert_eq!(day(PosixDay::JulianOne(60), 2024), (2024, 3, 1));
        assert_eq!(day(PosixDay::JulianOne(60), 2023), (2023, 3, 1));
        assert_eq!(day(PosixDay::JulianZero(59), 2024), (2024, 2, 29));
        assert_eq!(day(PosixDay::JulianZero(59), 2023), (2023, 3, 1));
        assert_eq!(day(PosixDay::JulianZero(365), 2023), (2023, 12, 31));
    }

    #[test]
    fn offsets_new_york() {
        let tz = posix("EST5EDT,M3.2.0,M11.1.0");
        // 2024-03-10T06:59:59Z and 2024-03-10T07:00:00Z
        assert_eq!(tz.to_offset(1710053999), o(-5));
        assert_eq!(tz.to_offset(1710054000), o(-4));
        // 2024-11-03T05:59:59Z and 2024-11-03T06:00:00Z
        assert_eq!(tz.to_offset(1730613599), o(-4));
        assert_eq!(tz.to_offset(1730613600), o(-5));
        // 2007-12-03T09:15:30Z
        assert_eq!(tz.to_offset(1196673330), o(-5));
    }

    #[test]
    fn offsets_southern_hemisphere() {
        let tz = posix("AEST-10AEDT,M10.1.0,M4.1.0/3");
        // 2024-01-15T00:00:00Z is summer in Sydney.
        assert_eq!(tz.to_offset(1705276800), o(11));
        // 2024-07-15T00:00:00Z is winter.
        assert_eq!(tz.to_offset(1721001600), o(10));
    }

    #[test]
    fn ambiguous_paris() {
        let tz = posix("CET-1CEST,M3.5.0,M10.5.0/3");
        // 2024-03-31T02:30 local is in the gap.
        let local = i64::from(calendar::to_epoch_day(2024, 3, 31))
            * SECONDS_PER_DAY
            + 2 * 3600
            + 1800;
        assert_eq!(
            tz.to_ambiguous_offset(local),
            AmbiguousOffset::Gap { before: o(1), after: o(2) },
        );
        // 2024-10-27T02:30 local is in the fold.
        let local = i64::from(calendar::to_epoch_day(2024, 10, 27))
            * SECONDS_PER_DAY
            + 2 * 3600
            + 1800;
        assert_eq!(
            tz.to_ambiguous_offset(local),
            AmbiguousOffset::Fold { before: o(2), after: o(1) },
        );
        // 2024-10-27T03:00 local is after the fold.
        assert_eq!(
            tz.to_ambiguous_offset(local + 1800),
            AmbiguousOffset::Unambiguous { offset: o(1) },
        );
    }

    #[test]
    fn year_boundaries() {
        let tz = posix("EST5EDT,M3.2.0,M11.1.0");
        // 9999-12-31T23:59:59 local must not panic.
        let local = i64::from(calendar::EPOCH_DAY_MAX) * SECONDS_PER_DAY
            + SECONDS_PER_DAY
            - 1;
        assert_eq!(
            tz.to_ambiguous_offset(local),
            AmbiguousOffset::Unambiguous { offset: o(-5) },
        );
        let local = i64::from(calendar::EPOCH_DAY_MIN) * SECONDS_PER_DAY;
        assert_eq!(
            tz.to_ambiguous_offset(local),
            AmbiguousOffset::Unambiguous { offset: o(-5) },
        );
    }
}
