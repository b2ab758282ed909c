use crate::{
    error::fmt::pattern::ParseError as PE,
    fmt::pattern::{BrokenDownTime, Directive, Item, Meridiem},
    util::{
        calendar::{YEAR_MAX, YEAR_MIN},
        parse,
    },
    Error,
};

pub(super) struct Parser<'p, 'i, 't> {
    pub(super) items: &'p [Item],
    pub(super) inp: &'i [u8],
    pub(super) tm: &'t mut BrokenDownTime,
}

impl<'p, 'i, 't> Parser<'p, 'i, 't> {
    pub(super) fn parse(&mut self) -> Result<(), Error> {
        for item in self.items {
            match *item {
                Item::Literal(ref text) => self.parse_literal(text)?,
                Item::Field(directive) => self.parse_one(directive)?,
            }
        }
        if !self.inp.is_empty() {
            return Err(Error::from(PE::trailing(self.inp)));
        }
        Ok(())
    }

    fn parse_literal(&mut self, text: &str) -> Result<(), Error> {
        match self.inp.strip_prefix(text.as_bytes()) {
            Some(rest) => {
                self.inp = rest;
                Ok(())
            }
            None => Err(Error::from(PE::expected_literal(text, self.inp))),
        }
    }

    fn parse_one(&mut self, directive: Directive) -> Result<(), Error> {
        match directive {
            Directive::Year { width } => {
                let year = self.parse_year(width)?;
                set(&mut self.tm.year, year, "year")
            }
            Directive::Month { width } => {
                let month = self.parse_field(width, "month", 1, 12)?;
                set(&mut self.tm.month, month, "month")
            }
            Directive::Day { width } => {
                let day = self.parse_field(width, "day of month", 1, 31)?;
                set(&mut self.tm.day, day, "day")
            }
            Directive::Hour { width } => {
                let hour = self.parse_field(width, "hour", 0, 23)?;
                set(&mut self.tm.hour, hour, "hour")
            }
            Directive::ClockHour { width } => {
                let hour = self.parse_field(width, "clock hour", 1, 12)?;
                set(&mut self.tm.clock_hour, hour, "clock hour")
            }
            Directive::AmPm => {
                let meridiem = self.parse_meridiem()?;
                set(&mut self.tm.meridiem, meridiem, "AM/PM marker")
            }
            Directive::Minute { width } => {
                let minute = self.parse_field(width, "minute", 0, 59)?;
                set(&mut self.tm.minute, minute, "minute")
            }
            Directive::Second { width } => {
                let second = self.parse_field(width, "second", 0, 59)?;
                set(&mut self.tm.second, second, "second")
            }
            Directive::Fraction { digits } => {
                let (found, rest) =
                    parse::split_digits(self.inp, usize::from(digits));
                if found.len() != usize::from(digits) {
                    return Err(Error::from(PE::ExpectedDigits {
                        what: "fractional second",
                        found: rest.first().copied(),
                    }));
                }
                let subsec = parse::fraction(found).ok_or(
                    PE::InvalidField { what: "fractional second" },
                )?;
                self.inp = rest;
                set(&mut self.tm.subsec, subsec, "fractional second")
            }
        }
    }

    /// Parses a year. Two digit years are in `2000..=2099`, while other
    /// widths accept a leading sign.
    fn parse_year(&mut self, width: u8) -> Result<i16, Error> {
        if width == 2 {
            let n = self.parse_digits(2, 2, "two digit year")?;
            // OK because two digits are always less than 100.
            return Ok(2000 + n as i16);
        }
        let sign = match self.inp.first() {
            Some(b'-') => -1,
            Some(b'+') => 1,
            _ => 0,
        };
        if sign != 0 {
            self.inp = &self.inp[1..];
        }
        let n = self.parse_digits(width, 4, "year")?;
        let year = if sign < 0 { -n } else { n };
        if !(i64::from(YEAR_MIN)..=i64::from(YEAR_MAX)).contains(&year) {
            return Err(Error::range("year", year, YEAR_MIN, YEAR_MAX));
        }
        // OK because of the range check above.
        Ok(year as i16)
    }

    /// Parses a field and checks that it's in `min..=max`.
    fn parse_field(
        &mut self,
        width: u8,
        what: &'static str,
        min: i8,
        max: i8,
    ) -> Result<i8, Error> {
        let n = self.parse_digits(width, 2, what)?;
        if !(i64::from(min)..=i64::from(max)).contains(&n) {
            return Err(Error::range(what, n, min, max));
        }
        // OK because of the range check above.
        Ok(n as i8)
    }

    /// Parses digits for a field. A width of `1` accepts between one and
    /// `max` digits. Otherwise, exactly `width` digits are required.
    fn parse_digits(
        &mut self,
        width: u8,
        max: usize,
        what: &'static str,
    ) -> Result<i64, Error> {
        let width = usize::from(width);
        let take = if width == 1 { max } else { width };
        let (digits, rest) = parse::split_digits(self.inp, take);
        if digits.is_empty() || (width > 1 && digits.len() != width) {
            return Err(Error::from(PE::ExpectedDigits {
                what,
                found: rest.first().copied(),
            }));
        }
        let n = parse::i64(digits).ok_or(PE::InvalidField { what })?;
        self.inp = rest;
        Ok(n)
    }

    fn parse_meridiem(&mut self) -> Result<Meridiem, Error> {
        let meridiem = match self.inp {
            [b'A' | b'a', b'M' | b'm', ..] => Meridiem::AM,
            [b'P' | b'p', b'M' | b'm', ..] => Meridiem::PM,
            _ => {
                return Err(Error::from(PE::ExpectedAmPm {
                    found: self.inp.first().copied(),
                }))
            }
        };
        self.inp = &self.inp[2..];
        Ok(meridiem)
    }
}

/// Sets a parsed field, failing if it was already parsed with a different
/// value.
fn set<T: PartialEq>(
    slot: &mut Option<T>,
    value: T,
    what: &'static str,
) -> Result<(), Error> {
    match *slot {
        Some(ref old) if *old != value => {
            Err(Error::from(PE::Conflict { what }))
        }
        _ => {
            *slot = Some(value);
            Ok(())
        }
    }
}
