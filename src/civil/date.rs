use crate::{
    civil::{negate_amount, DateTime, Time, Weekday},
    error::{civil::Error as E, zoned::Error as ZE, Error, ErrorContext},
    fmt::{iso, pattern::Pattern},
    tz::TimeZone,
    util::calendar::{self, EPOCH_DAY_MAX, EPOCH_DAY_MIN, YEAR_MAX, YEAR_MIN},
    Context, Field, Unit, Zoned,
};

/// A representation of a civil date in the Gregorian calendar.
///
/// A `Date` value corresponds to a triple of year, month and day. Every
/// `Date` value is guaranteed to be a valid Gregorian calendar date. For
/// example, both `2023-02-29` and `2023-11-31` are invalid and cannot be
/// represented by a `Date`.
///
/// # Civil dates
///
/// A `Date` value behaves without regard to daylight saving time or time
/// zones in general. To find out when a day starts in a particular time
/// zone, use [`Date::at_start_of_day`].
///
/// # Comparisons
///
/// `Date` implements `Eq` and `Ord`. When a date `d1` occurs before a date
/// `d2`, then `d1 < d2`:
///
/// ```
/// use civiltime::civil::date;
///
/// assert!(date(2024, 3, 11) < date(2025, 1, 31));
/// ```
///
/// # Arithmetic
///
/// Days, weeks, months and years can be added with [`Date::plus`] and
/// subtracted with [`Date::minus`]. Month and year arithmetic clamps the
/// day of the month to the last day of the resulting month:
///
/// ```
/// use civiltime::{civil::date, Unit};
///
/// assert_eq!(date(2024, 1, 31).plus(1, Unit::Month)?, date(2024, 2, 29));
/// assert_eq!(date(2024, 2, 29).plus(1, Unit::Year)?, date(2025, 2, 28));
/// assert_eq!(date(2024, 2, 25).plus(1, Unit::Week)?, date(2024, 3, 3));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Parsing and printing
///
/// The `Display` and `FromStr` implementations use the ISO 8601
/// `YYYY-MM-DD` format. For other formats, see
/// [`Pattern`](crate::fmt::pattern::Pattern).
///
/// ```
/// use civiltime::civil::{date, Date};
///
/// let d: Date = "2007-12-03".parse()?;
/// assert_eq!(d, date(2007, 12, 3));
/// assert_eq!(d.to_string(), "2007-12-03");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Date {
    year: i16,
    month: i8,
    day: i8,
}

impl Date {
    /// The minimum representable Gregorian date.
    ///
    /// The minimum is chosen such that any [`Instant`](crate::Instant)
    /// combined with any valid time zone offset can be infallibly converted
    /// to this type.
    pub const MIN: Date = Date::constant(-9999, 1, 1);

    /// The maximum representable Gregorian date.
    ///
    /// The maximum is chosen such that any [`Instant`](crate::Instant)
    /// combined with any valid time zone offset can be infallibly converted
    /// to this type.
    pub const MAX: Date = Date::constant(9999, 12, 31);

    /// Creates a new `Date` value from its component year, month and day
    /// values.
    ///
    /// # Errors
    ///
    /// This returns a range error when the given year-month-day does not
    /// correspond to a valid date. Namely, all of the following must be
    /// true:
    ///
    /// * The year must be in the range `-9999..=9999`.
    /// * The month must be in the range `1..=12`.
    /// * The day must be at least `1` and must be at most the number of days
    /// in the corresponding month. So for example, `2024-02-29` is valid but
    /// `2023-02-29` is not.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::civil::Date;
    ///
    /// let d = Date::new(2024, 2, 29)?;
    /// assert_eq!((d.year(), d.month(), d.day()), (2024, 2, 29));
    ///
    /// assert!(Date::new(2023, 2, 29).unwrap_err().is_range());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn new(year: i16, month: i8, day: i8) -> Result<Date, Error> {
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(Error::range("year", year, YEAR_MIN, YEAR_MAX));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        let max_day = calendar::days_in_month(year, month);
        if !(1..=max_day).contains(&day) {
            return Err(Error::range("day", day, 1, max_day));
        }
        Ok(Date { year, month, day })
    }

    /// Creates a new `Date` value in a `const` context.
    ///
    /// # Panics
    ///
    /// This routine panics when [`Date::new`] would return an error.
    #[inline]
    pub const fn constant(year: i16, month: i8, day: i8) -> Date {
        if !(YEAR_MIN <= year && year <= YEAR_MAX) {
            panic!("invalid year");
        }
        if !(1 <= month && month <= 12) {
            panic!("invalid month");
        }
        if !(1 <= day && day <= calendar::days_in_month(year, month)) {
            panic!("invalid day");
        }
        Date { year, month, day }
    }

    /// Returns the current date according to the given context's clock.
    ///
    /// The current instant is converted to a civil datetime in the given
    /// time zone, or in the context's system time zone when `None`, and then
    /// everything but the date is dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::date, tz::{BuiltinRegistry, TimeZone}};
    /// use civiltime::{Context, FixedClock};
    ///
    /// // 2007-12-03T04:15:30Z
    /// let now = "2007-12-03T04:15:30Z".parse()?;
    /// let ctx = Context::new(FixedClock::new(now, "UTC"), BuiltinRegistry::new());
    /// let tz = ctx.resolve("America/New_York")?;
    ///
    /// assert_eq!(civiltime::civil::Date::now(&ctx, None), date(2007, 12, 3));
    /// assert_eq!(civiltime::civil::Date::now(&ctx, Some(&tz)), date(2007, 12, 2));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn now(ctx: &Context, tz: Option<&TimeZone>) -> Date {
        DateTime::now(ctx, tz).date()
    }

    /// Parses a date using the given compiled pattern.
    ///
    /// # Errors
    ///
    /// This returns a parse error when the text doesn't match the pattern,
    /// or when the pattern doesn't contain a year, month and day.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::{date, Date}, fmt::pattern::Pattern};
    ///
    /// let pattern = Pattern::compile("dd/MM/yyyy")?;
    /// assert_eq!(Date::parse_with("03/12/2007", &pattern)?, date(2007, 12, 3));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn parse_with(text: &str, pattern: &Pattern) -> Result<Date, Error> {
        pattern.parse(text)?.to_date()
    }

    /// Returns the year for this date.
    ///
    /// The value returned is guaranteed to be in the range `-9999..=9999`.
    #[inline]
    pub fn year(self) -> i16 {
        self.year
    }

    /// Returns the month for this date.
    ///
    /// The value returned is guaranteed to be in the range `1..=12`.
    #[inline]
    pub fn month(self) -> i8 {
        self.month
    }

    /// Returns the day for this date.
    ///
    /// The value returned is guaranteed to be in the range `1..=31`.
    #[inline]
    pub fn day(self) -> i8 {
        self.day
    }

    /// Returns the weekday corresponding to this date.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::civil::{date, Weekday};
    ///
    /// assert_eq!(date(1970, 1, 1).weekday(), Weekday::Thursday);
    /// assert_eq!(date(2024, 2, 29).weekday(), Weekday::Thursday);
    /// ```
    #[inline]
    pub fn weekday(self) -> Weekday {
        let offset = calendar::weekday_from_epoch_day(self.to_epoch_day());
        Weekday::from_monday_one_offset_unchecked(offset)
    }

    /// Returns the ordinal day of the year that this date resides in.
    ///
    /// For leap years, this always returns a value in the range `1..=366`.
    /// Otherwise, the value is in the range `1..=365`.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::civil::date;
    ///
    /// assert_eq!(date(2006, 8, 24).day_of_year(), 236);
    /// assert_eq!(date(2023, 12, 31).day_of_year(), 365);
    /// assert_eq!(date(2024, 12, 31).day_of_year(), 366);
    /// ```
    #[inline]
    pub fn day_of_year(self) -> i16 {
        calendar::day_of_year(self.year, self.month, self.day)
    }

    /// Returns true if and only if the year in which this date resides is a
    /// leap year.
    #[inline]
    pub fn in_leap_year(self) -> bool {
        calendar::is_leap_year(self.year)
    }

    /// Returns the number of days in the month in which this date resides.
    #[inline]
    pub fn days_in_month(self) -> i8 {
        calendar::days_in_month(self.year, self.month)
    }

    /// Returns the number of days in the year in which this date resides.
    #[inline]
    pub fn days_in_year(self) -> i16 {
        calendar::days_in_year(self.year)
    }

    /// Returns the value of the given field for this date.
    ///
    /// Supported fields are [`Field::Year`], [`Field::MonthOfYear`],
    /// [`Field::DayOfMonth`], [`Field::DayOfWeek`] and
    /// [`Field::DayOfYear`].
    ///
    /// # Errors
    ///
    /// This returns an invalid parameter error for any other field.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::date, Field};
    ///
    /// let d = date(2007, 12, 3);
    /// assert_eq!(d.get(Field::DayOfWeek)?, 1);
    /// assert_eq!(d.get(Field::DayOfYear)?, 337);
    /// assert!(d.get(Field::HourOfDay).unwrap_err().is_invalid_parameter());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get(self, field: Field) -> Result<i64, Error> {
        Ok(match field {
            Field::Year => i64::from(self.year),
            Field::MonthOfYear => i64::from(self.month),
            Field::DayOfMonth => i64::from(self.day),
            Field::DayOfWeek => i64::from(self.weekday().to_monday_one_offset()),
            Field::DayOfYear => i64::from(self.day_of_year()),
            _ => {
                return Err(Error::from(E::UnsupportedField {
                    field,
                    what: "civil date",
                }))
            }
        })
    }

    /// Adds the given amount of a unit to this date.
    ///
    /// Supported units are [`Unit::Day`], [`Unit::Week`], [`Unit::Month`]
    /// and [`Unit::Year`]. Adding months or years clamps the day to the last
    /// day of the resulting month when necessary.
    ///
    /// # Errors
    ///
    /// This returns an invalid parameter error for time units, and a range
    /// error when the result is outside of [`Date::MIN`] and [`Date::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::date, Unit};
    ///
    /// let d = date(2023, 3, 31);
    /// assert_eq!(d.plus(1, Unit::Month)?, date(2023, 4, 30));
    /// assert_eq!(d.plus(-1, Unit::Month)?, date(2023, 2, 28));
    /// assert_eq!(d.plus(366, Unit::Day)?, date(2024, 3, 31));
    /// assert!(d.plus(1, Unit::Hour).unwrap_err().is_invalid_parameter());
    /// assert!(d.plus(8000, Unit::Year).unwrap_err().is_range());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn plus(self, amount: i64, unit: Unit) -> Result<Date, Error> {
        let result = match unit {
            Unit::Day => self.plus_days(amount),
            Unit::Week => amount
                .checked_mul(7)
                .ok_or_else(|| Error::slim_range("weeks"))
                .and_then(|days| self.plus_days(days)),
            Unit::Month => self.plus_months(amount),
            Unit::Year => amount
                .checked_mul(12)
                .ok_or_else(|| Error::slim_range("years"))
                .and_then(|months| self.plus_months(months)),
            _ => {
                return Err(Error::from(E::UnsupportedUnit {
                    unit,
                    what: "civil date",
                }))
            }
        };
        result.with_context(|| E::FailedAdd { unit, what: "civil date" })
    }

    /// Subtracts the given amount of a unit from this date.
    ///
    /// This is equivalent to `plus` with a negated amount.
    ///
    /// # Errors
    ///
    /// See [`Date::plus`].
    #[inline]
    pub fn minus(self, amount: i64, unit: Unit) -> Result<Date, Error> {
        self.plus(negate_amount(amount, unit)?, unit)
    }

    /// Combines this date with a civil time.
    #[inline]
    pub const fn to_datetime(self, time: Time) -> DateTime {
        DateTime::from_parts(self, time)
    }

    /// Creates a civil datetime from this date and the given time
    /// components.
    ///
    /// # Panics
    ///
    /// This panics when any of the time components are out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::civil::{date, datetime};
    ///
    /// let dt = date(2010, 3, 14).at(2, 30, 0, 0);
    /// assert_eq!(dt, datetime(2010, 3, 14, 2, 30, 0, 0));
    /// ```
    #[inline]
    pub const fn at(
        self,
        hour: i8,
        minute: i8,
        second: i8,
        subsec_nanosecond: i32,
    ) -> DateTime {
        DateTime::from_parts(
            self,
            Time::constant(hour, minute, second, subsec_nanosecond),
        )
    }

    /// Returns the first instant of this date in the given time zone.
    ///
    /// Midnight usually exists, in which case it's the result. When
    /// midnight falls in a gap (some zones move their clocks forward at
    /// midnight), the result is the first local time after the gap.
    ///
    /// # Errors
    ///
    /// This returns an error when the instant would be outside of the
    /// supported range. This can only happen for the boundary dates.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::date, tz::TimeZone};
    ///
    /// // Clocks in Santiago move from 24:00 to 01:00 on the first Sunday
    /// // of September.
    /// let tz = TimeZone::posix("<-04>4<-03>,M9.1.6/24,M4.1.6/24")?;
    /// let zdt = date(2024, 9, 8).at_start_of_day(tz)?;
    /// assert_eq!(zdt.to_string(), "2024-09-08T01:00:00-03:00[<-04>4<-03>,M9.1.6/24,M4.1.6/24]");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn at_start_of_day(self, tz: TimeZone) -> Result<Zoned, Error> {
        self.to_datetime(Time::MIN)
            .to_zoned(tz)
            .context(ZE::FailedStartOfDay)
    }

    /// Returns the number of days since the Unix epoch.
    #[inline]
    pub(crate) const fn to_epoch_day(self) -> i32 {
        calendar::to_epoch_day(self.year, self.month, self.day)
    }

    /// Converts days since the Unix epoch to a date.
    ///
    /// The epoch day must be in the supported range.
    #[inline]
    pub(crate) const fn from_epoch_day(epoch_day: i32) -> Date {
        let (year, month, day) = calendar::from_epoch_day(epoch_day);
        Date { year, month, day }
    }

    /// Like `from_epoch_day`, but returns an error when the epoch day is out
    /// of range.
    pub(crate) fn from_epoch_day_checked(epoch_day: i64) -> Result<Date, Error> {
        let (min, max) = (i64::from(EPOCH_DAY_MIN), i64::from(EPOCH_DAY_MAX));
        if !(min..=max).contains(&epoch_day) {
            return Err(Error::range("epoch-day", epoch_day, min, max));
        }
        // OK because of the range check above.
        Ok(Date::from_epoch_day(epoch_day as i32))
    }

    fn plus_days(self, days: i64) -> Result<Date, Error> {
        if days == 0 {
            return Ok(self);
        }
        let epoch_day = i64::from(self.to_epoch_day())
            .checked_add(days)
            .ok_or_else(|| Error::slim_range("days"))?;
        Date::from_epoch_day_checked(epoch_day)
    }

    fn plus_months(self, months: i64) -> Result<Date, Error> {
        if months == 0 {
            return Ok(self);
        }
        // Bounds the amount so that the year arithmetic can't overflow.
        let max = 12 * i64::from(YEAR_MAX - YEAR_MIN);
        if !(-max..=max).contains(&months) {
            return Err(Error::range("months", months, -max, max));
        }
        let (year, month) = calendar::add_months(self.year, self.month, months);
        if !(i64::from(YEAR_MIN)..=i64::from(YEAR_MAX)).contains(&year) {
            return Err(Error::range("year", year, YEAR_MIN, YEAR_MAX));
        }
        // OK because of the range check above.
        let year = year as i16;
        let day = calendar::saturate_day_in_month(year, month, self.day);
        Ok(Date { year, month, day })
    }
}

impl core::fmt::Debug for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::StdFmtWrite;

        iso::DEFAULT_PRINTER
            .print_date(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::str::FromStr for Date {
    type Err = Error;

    fn from_str(string: &str) -> Result<Date, Error> {
        iso::DEFAULT_PARSER.parse_date(string.as_bytes())
    }
}

impl From<DateTime> for Date {
    #[inline]
    fn from(dt: DateTime) -> Date {
        dt.date()
    }
}

impl From<Zoned> for Date {
    #[inline]
    fn from(zdt: Zoned) -> Date {
        zdt.date()
    }
}

impl<'a> From<&'a Zoned> for Date {
    #[inline]
    fn from(zdt: &'a Zoned) -> Date {
        zdt.date()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Date {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Date, D::Error> {
        use serde::de;

        struct DateVisitor;

        impl<'de> de::Visitor<'de> for DateVisitor {
            type Value = Date;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a date string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Date, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(DateVisitor)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Date {
    fn arbitrary(g: &mut quickcheck::Gen) -> Date {
        let span = i64::from(EPOCH_DAY_MAX) - i64::from(EPOCH_DAY_MIN) + 1;
        let epoch_day = i64::arbitrary(g).rem_euclid(span) + i64::from(EPOCH_DAY_MIN);
        Date::from_epoch_day(epoch_day as i32)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Date>> {
        Box::new(
            (self.year, self.month, self.day).shrink().filter_map(
                |(year, month, day)| Date::new(year, month, day).ok(),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::civil::date;

    use super::*;

    #[test]
    fn new_errors() {
        insta::assert_snapshot!(
            Date::new(2023, 2, 29).unwrap_err(),
            @"parameter 'day' with value 29 is not in the required range of 1..=28",
        );
        insta::assert_snapshot!(
            Date::new(10000, 1, 1).unwrap_err(),
            @"parameter 'year' with value 10000 is not in the required range of -9999..=9999",
        );
        assert!(Date::new(2024, 13, 1).unwrap_err().is_range());
        assert!(Date::new(2024, 4, 0).unwrap_err().is_range());
    }

    #[test]
    fn month_arithmetic_clamps() {
        assert_eq!(date(2024, 1, 31).plus(1, Unit::Month).unwrap(), date(2024, 2, 29));
        assert_eq!(date(2023, 1, 31).plus(1, Unit::Month).unwrap(), date(2023, 2, 28));
        assert_eq!(date(2024, 3, 31).minus(1, Unit::Month).unwrap(), date(2024, 2, 29));
        assert_eq!(date(2024, 12, 15).plus(1, Unit::Month).unwrap(), date(2025, 1, 15));
        assert_eq!(date(2024, 1, 15).minus(1, Unit::Month).unwrap(), date(2023, 12, 15));
        assert_eq!(date(2024, 2, 29).minus(4, Unit::Year).unwrap(), date(2020, 2, 29));
        assert_eq!(date(2024, 2, 29).minus(1, Unit::Year).unwrap(), date(2023, 2, 28));
    }

    #[test]
    fn boundaries() {
        assert_eq!(Date::MAX.plus(0, Unit::Day).unwrap(), Date::MAX);
        assert!(Date::MAX.plus(1, Unit::Day).unwrap_err().is_range());
        assert!(Date::MIN.minus(1, Unit::Day).unwrap_err().is_range());
        assert!(Date::MIN.plus(i64::MAX, Unit::Week).unwrap_err().is_range());
        assert!(Date::MIN.minus(i64::MIN, Unit::Day).unwrap_err().is_range());
        assert_eq!(
            Date::MIN.plus(19998, Unit::Year).unwrap(),
            date(9999, 1, 1),
        );
        insta::assert_snapshot!(
            Date::MAX.plus(1, Unit::Month).unwrap_err(),
            @"failed to add months to civil date: parameter 'year' with value 10000 is not in the required range of -9999..=9999",
        );
    }

    #[test]
    fn unsupported() {
        let err = date(2024, 1, 1).plus(1, Unit::Minute).unwrap_err();
        assert!(err.is_invalid_parameter());
        insta::assert_snapshot!(
            err,
            @"unit `minutes` is not supported by civil date",
        );
        let err = date(2024, 1, 1).get(Field::NanoOfSecond).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn fields() {
        let d = date(2024, 2, 29);
        assert_eq!(d.get(Field::Year).unwrap(), 2024);
        assert_eq!(d.get(Field::MonthOfYear).unwrap(), 2);
        assert_eq!(d.get(Field::DayOfMonth).unwrap(), 29);
        assert_eq!(d.get(Field::DayOfWeek).unwrap(), 4);
        assert_eq!(d.get(Field::DayOfYear).unwrap(), 60);
        assert!(d.in_leap_year());
        assert_eq!(d.days_in_month(), 29);
        assert_eq!(d.days_in_year(), 366);
    }

    #[test]
    fn epoch_days() {
        assert_eq!(date(1970, 1, 1).to_epoch_day(), 0);
        assert_eq!(Date::from_epoch_day(-1), date(1969, 12, 31));
        assert_eq!(Date::MIN.to_epoch_day(), EPOCH_DAY_MIN);
        assert_eq!(Date::MAX.to_epoch_day(), EPOCH_DAY_MAX);
        assert!(Date::from_epoch_day_checked(i64::from(EPOCH_DAY_MAX) + 1).is_err());
    }

    quickcheck::quickcheck! {
        fn prop_plus_minus_days(d: Date, days: i16) -> quickcheck::TestResult {
            let Ok(moved) = d.plus(i64::from(days), Unit::Day) else {
                return quickcheck::TestResult::discard();
            };
            let back = moved.minus(i64::from(days), Unit::Day).unwrap();
            quickcheck::TestResult::from_bool(back == d)
        }

        fn prop_display_parse_roundtrip(d: Date) -> bool {
            d.to_string().parse::<Date>().unwrap() == d
        }

        fn prop_epoch_day_roundtrip(d: Date) -> bool {
            Date::from_epoch_day(d.to_epoch_day()) == d
        }

        fn prop_weekday_advances(d: Date) -> quickcheck::TestResult {
            let Ok(next) = d.plus(1, Unit::Day) else {
                return quickcheck::TestResult::discard();
            };
            quickcheck::TestResult::from_bool(next.weekday() == d.weekday().next())
        }
    }
}
