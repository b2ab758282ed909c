use crate::{
    civil::{negate_amount, Date, Time, Weekday},
    error::{civil::Error as E, Error, ErrorContext},
    fmt::{iso, pattern::Pattern},
    tz::{Offset, TimeZone},
    util::calendar::{NANOS_PER_DAY, NANOS_PER_SECOND, SECONDS_PER_DAY},
    Context, Duration, Field, Instant, Unit, Zoned,
};

/// A representation of a civil datetime in the Gregorian calendar.
///
/// A `DateTime` value corresponds to a pair of a [`Date`] and a [`Time`].
/// That is, a datetime contains a year, month, day, hour, minute, second and
/// the fractional number of nanoseconds.
///
/// A `DateTime` value is guaranteed to contain a valid date. For example,
/// neither `2023-02-29T00:00:00` nor `2015-06-30T23:59:60` are valid
/// `DateTime` values.
///
/// # Civil datetimes
///
/// A `DateTime` value behaves without regard to daylight saving time or time
/// zones in general. When doing arithmetic on datetimes with units of time
/// (such as [`Unit::Hour`]), days are considered to always be precisely
/// `86,400` seconds long. To get a datetime that is aware of time zone
/// transitions, convert it to a [`Zoned`] with [`DateTime::to_zoned`].
///
/// # Example
///
/// ```
/// use civiltime::{civil::{datetime, DateTime}, Unit};
///
/// let dt: DateTime = "2024-02-28T23:30:00".parse()?;
/// assert_eq!(dt.plus(1, Unit::Hour)?, datetime(2024, 2, 29, 0, 30, 0, 0));
/// assert_eq!(dt.plus(1, Unit::Year)?.to_string(), "2025-02-28T23:30:00");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    /// The minimum representable datetime, `-9999-01-01T00:00:00`.
    pub const MIN: DateTime = DateTime::from_parts(Date::MIN, Time::MIN);

    /// The maximum representable datetime,
    /// `9999-12-31T23:59:59.999999999`.
    pub const MAX: DateTime = DateTime::from_parts(Date::MAX, Time::MAX);

    /// Creates a new `DateTime` value from its component parts.
    ///
    /// # Errors
    ///
    /// This returns a range error when any component is out of range, or
    /// when the year-month-day isn't a valid date. See [`Date::new`] and
    /// [`Time::new`].
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::civil::DateTime;
    ///
    /// let dt = DateTime::new(2024, 2, 29, 21, 30, 5, 123_456_789)?;
    /// assert_eq!(dt.to_string(), "2024-02-29T21:30:05.123456789");
    /// assert!(DateTime::new(2023, 2, 29, 0, 0, 0, 0).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn new(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        subsec_nanosecond: i32,
    ) -> Result<DateTime, Error> {
        let date = Date::new(year, month, day)?;
        let time = Time::new(hour, minute, second, subsec_nanosecond)?;
        Ok(DateTime { date, time })
    }

    /// Creates a new `DateTime` value in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics when [`DateTime::new`] would return an error.
    #[inline]
    pub const fn constant(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        subsec_nanosecond: i32,
    ) -> DateTime {
        let date = Date::constant(year, month, day);
        let time = Time::constant(hour, minute, second, subsec_nanosecond);
        DateTime { date, time }
    }

    /// Creates a `DateTime` from a date and a time.
    #[inline]
    pub const fn from_parts(date: Date, time: Time) -> DateTime {
        DateTime { date, time }
    }

    /// Returns the current civil datetime according to the given context's
    /// clock.
    ///
    /// The current instant is projected into the given time zone, or into
    /// the context's system time zone when `None`. The offset is then
    /// dropped.
    pub fn now(ctx: &Context, tz: Option<&TimeZone>) -> DateTime {
        let instant = ctx.now();
        match tz {
            Some(tz) => tz.to_datetime(instant),
            None => ctx.system_zone().to_datetime(instant),
        }
    }

    /// Parses a datetime using the given compiled pattern.
    ///
    /// # Errors
    ///
    /// This returns a parse error when the text doesn't match the pattern,
    /// or when the pattern doesn't contain a full date and an hour.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::{datetime, DateTime}, fmt::pattern::Pattern};
    ///
    /// let pattern = Pattern::compile("yyyy-MM-dd HH:mm")?;
    /// assert_eq!(
    ///     DateTime::parse_with("2007-12-03 10:15", &pattern)?,
    ///     datetime(2007, 12, 3, 10, 15, 0, 0),
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn parse_with(
        text: &str,
        pattern: &Pattern,
    ) -> Result<DateTime, Error> {
        pattern.parse(text)?.to_datetime()
    }

    /// Returns the date component of this datetime.
    #[inline]
    pub fn date(self) -> Date {
        self.date
    }

    /// Returns the time component of this datetime.
    #[inline]
    pub fn time(self) -> Time {
        self.time
    }

    /// Returns the year for this datetime.
    #[inline]
    pub fn year(self) -> i16 {
        self.date.year()
    }

    /// Returns the month for this datetime.
    #[inline]
    pub fn month(self) -> i8 {
        self.date.month()
    }

    /// Returns the day for this datetime.
    #[inline]
    pub fn day(self) -> i8 {
        self.date.day()
    }

    /// Returns the "hour" component of this datetime.
    #[inline]
    pub fn hour(self) -> i8 {
        self.time.hour()
    }

    /// Returns the "minute" component of this datetime.
    #[inline]
    pub fn minute(self) -> i8 {
        self.time.minute()
    }

    /// Returns the "second" component of this datetime.
    #[inline]
    pub fn second(self) -> i8 {
        self.time.second()
    }

    /// Returns the fractional nanosecond for this datetime.
    #[inline]
    pub fn subsec_nanosecond(self) -> i32 {
        self.time.subsec_nanosecond()
    }

    /// Returns the weekday corresponding to this datetime.
    #[inline]
    pub fn weekday(self) -> Weekday {
        self.date.weekday()
    }

    /// Returns the ordinal day of the year that this datetime resides in.
    #[inline]
    pub fn day_of_year(self) -> i16 {
        self.date.day_of_year()
    }

    /// Returns the value of the given field for this datetime.
    ///
    /// Every date and time field is supported. See [`Date::get`] and
    /// [`Time::get`].
    ///
    /// # Errors
    ///
    /// This returns an invalid parameter error for
    /// [`Field::OffsetSeconds`], since a civil datetime has no offset.
    pub fn get(self, field: Field) -> Result<i64, Error> {
        if field.is_date_based() {
            self.date.get(field)
        } else if field.is_time_based() {
            self.time.get(field)
        } else {
            Err(Error::from(E::UnsupportedField {
                field,
                what: "civil datetime",
            }))
        }
    }

    /// Adds the given amount of a unit to this datetime.
    ///
    /// Every unit is supported. Calendar units act on the date and leave the
    /// time alone. Time units carry into the date, with every day being
    /// exactly 24 hours long.
    ///
    /// # Errors
    ///
    /// This returns a range error when the result is outside of
    /// [`DateTime::MIN`] and [`DateTime::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::date, Unit};
    ///
    /// let dt = date(2024, 12, 31).at(22, 0, 0, 0);
    /// assert_eq!(dt.plus(3, Unit::Hour)?, date(2025, 1, 1).at(1, 0, 0, 0));
    /// assert_eq!(dt.minus(2, Unit::Month)?, date(2024, 10, 31).at(22, 0, 0, 0));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn plus(self, amount: i64, unit: Unit) -> Result<DateTime, Error> {
        if unit.is_calendar() {
            let date = self.date.plus(amount, unit)?;
            return Ok(DateTime { date, time: self.time });
        }
        // Every non-calendar unit has a fixed length.
        let unit_nanos = unit.nanoseconds().unwrap_or(1);
        let nanos = i128::from(amount) * i128::from(unit_nanos);
        self.plus_nanos(nanos)
            .with_context(|| E::FailedAdd { unit, what: "civil datetime" })
    }

    /// Subtracts the given amount of a unit from this datetime.
    ///
    /// # Errors
    ///
    /// See [`DateTime::plus`].
    #[inline]
    pub fn minus(self, amount: i64, unit: Unit) -> Result<DateTime, Error> {
        self.plus(negate_amount(amount, unit)?, unit)
    }

    /// Adds an exact duration to this datetime, treating every day as 24
    /// hours.
    ///
    /// # Errors
    ///
    /// This returns a range error when the result is out of range.
    pub fn plus_duration(self, duration: Duration) -> Result<DateTime, Error> {
        self.plus_nanos(duration.to_nanos()).with_context(|| {
            E::FailedAdd { unit: Unit::Nanosecond, what: "civil datetime" }
        })
    }

    /// Subtracts an exact duration from this datetime.
    ///
    /// # Errors
    ///
    /// This returns a range error when the result is out of range.
    pub fn minus_duration(
        self,
        duration: Duration,
    ) -> Result<DateTime, Error> {
        self.plus_nanos(-duration.to_nanos()).with_context(|| {
            E::FailedAdd { unit: Unit::Nanosecond, what: "civil datetime" }
        })
    }

    /// Converts this datetime to a zoned datetime in the given time zone.
    ///
    /// Ambiguity is resolved with
    /// [`Disambiguation::Compatible`](crate::tz::Disambiguation::Compatible).
    /// For other strategies, use [`TimeZone::to_ambiguous_zoned`].
    ///
    /// # Errors
    ///
    /// This returns an error when the resulting instant is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::date, tz::{BuiltinRegistry, ZoneRegistry}};
    ///
    /// let tz = BuiltinRegistry::new().resolve("America/New_York")?;
    /// let zdt = date(2024, 3, 10).at(2, 30, 0, 0).to_zoned(tz)?;
    /// assert_eq!(zdt.to_string(), "2024-03-10T03:30:00-04:00[America/New_York]");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn to_zoned(self, tz: TimeZone) -> Result<Zoned, Error> {
        tz.to_zoned(self)
    }

    /// Converts this datetime to an instant by subtracting the given offset.
    ///
    /// # Errors
    ///
    /// This returns an error when the instant would be out of range. This
    /// only happens within 18 hours of [`DateTime::MIN`] or
    /// [`DateTime::MAX`].
    pub(crate) fn to_instant_with_offset(
        self,
        offset: Offset,
    ) -> Result<Instant, Error> {
        let second = self.to_local_seconds() - i64::from(offset.seconds());
        Instant::new(second, self.subsec_nanosecond())
            .context(E::FailedConvertToInstant)
    }

    /// Returns the number of whole seconds since `1970-01-01T00:00:00`,
    /// treating this datetime as if it were in UTC.
    #[inline]
    pub(crate) fn to_local_seconds(self) -> i64 {
        i64::from(self.date.to_epoch_day()) * SECONDS_PER_DAY
            + self.time.to_second_of_day()
    }

    /// The inverse of `to_local_seconds`. The seconds must correspond to a
    /// datetime in the supported range.
    #[inline]
    pub(crate) fn from_local_seconds(seconds: i64, subsec: i32) -> DateTime {
        // OK since the supported range of epoch days fits in an `i32`.
        let epoch_day = seconds.div_euclid(SECONDS_PER_DAY) as i32;
        let second_of_day = seconds.rem_euclid(SECONDS_PER_DAY);
        let date = Date::from_epoch_day(epoch_day);
        let time = Time::from_second_of_day(second_of_day)
            .with_subsec_nanosecond(subsec);
        DateTime { date, time }
    }

    /// Returns the number of nanoseconds since `1970-01-01T00:00:00`,
    /// treating this datetime as if it were in UTC.
    #[inline]
    pub(crate) fn to_local_nanos(self) -> i128 {
        i128::from(self.to_local_seconds()) * i128::from(NANOS_PER_SECOND)
            + i128::from(self.subsec_nanosecond())
    }

    fn plus_nanos(self, nanos: i128) -> Result<DateTime, Error> {
        if nanos == 0 {
            return Ok(self);
        }
        let total = i128::from(self.time.to_nanosecond_of_day()) + nanos;
        let days = total.div_euclid(i128::from(NANOS_PER_DAY));
        // OK because the remainder is less than a day.
        let nanos = total.rem_euclid(i128::from(NANOS_PER_DAY)) as i64;
        let days = i64::try_from(days)
            .map_err(|_| Error::slim_range("days"))?;
        let date = self.date.plus(days, Unit::Day)?;
        Ok(DateTime { date, time: Time::from_nanosecond_of_day(nanos) })
    }
}

impl core::fmt::Debug for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::StdFmtWrite;

        iso::DEFAULT_PRINTER
            .print_datetime(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::str::FromStr for DateTime {
    type Err = Error;

    fn from_str(string: &str) -> Result<DateTime, Error> {
        iso::DEFAULT_PARSER.parse_datetime(string.as_bytes())
    }
}

impl From<Date> for DateTime {
    /// Converts a date to a datetime at midnight.
    #[inline]
    fn from(date: Date) -> DateTime {
        DateTime::from_parts(date, Time::MIN)
    }
}

impl<'a> From<&'a Zoned> for DateTime {
    #[inline]
    fn from(zdt: &'a Zoned) -> DateTime {
        zdt.datetime()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DateTime {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DateTime {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime, D::Error> {
        use serde::de;

        struct DateTimeVisitor;

        impl<'de> de::Visitor<'de> for DateTimeVisitor {
            type Value = DateTime;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a datetime string")
            }

            fn visit_str<E: de::Error>(
                self,
                value: &str,
            ) -> Result<DateTime, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(DateTimeVisitor)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for DateTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> DateTime {
        DateTime::from_parts(Date::arbitrary(g), Time::arbitrary(g))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = DateTime>> {
        Box::new(
            (self.date, self.time)
                .shrink()
                .map(|(date, time)| DateTime::from_parts(date, time)),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::civil::{date, datetime};

    use super::*;

    #[test]
    fn carry_into_days() {
        let dt = datetime(2024, 2, 28, 23, 0, 0, 0);
        assert_eq!(dt.plus(1, Unit::Hour).unwrap(), datetime(2024, 2, 29, 0, 0, 0, 0));
        assert_eq!(dt.plus(49, Unit::Hour).unwrap(), datetime(2024, 3, 2, 0, 0, 0, 0));
        assert_eq!(
            dt.minus(1, Unit::Nanosecond).unwrap(),
            datetime(2024, 2, 28, 22, 59, 59, 999_999_999),
        );
        assert_eq!(
            dt.minus(3, Unit::HalfDay).unwrap(),
            datetime(2024, 2, 27, 11, 0, 0, 0),
        );
    }

    #[test]
    fn calendar_units_keep_time() {
        let dt = datetime(2024, 1, 31, 12, 34, 56, 789);
        assert_eq!(dt.plus(1, Unit::Month).unwrap(), datetime(2024, 2, 29, 12, 34, 56, 789));
        assert_eq!(dt.plus(2, Unit::Week).unwrap(), datetime(2024, 2, 14, 12, 34, 56, 789));
    }

    #[test]
    fn boundaries() {
        assert!(DateTime::MAX.plus(1, Unit::Nanosecond).unwrap_err().is_range());
        assert!(DateTime::MIN.minus(1, Unit::Nanosecond).unwrap_err().is_range());
        assert!(DateTime::MIN.plus(i64::MAX, Unit::HalfDay).unwrap_err().is_range());
        insta::assert_snapshot!(
            DateTime::MAX.plus(1, Unit::Second).unwrap_err(),
            @"failed to add seconds to civil datetime: failed to add days to civil date: parameter 'epoch-day' with value 2932897 is not in the required range of -4371587..=2932896",
        );
    }

    #[test]
    fn fields() {
        let dt = datetime(2007, 12, 3, 10, 15, 30, 0);
        assert_eq!(dt.get(Field::Year).unwrap(), 2007);
        assert_eq!(dt.get(Field::HourOfDay).unwrap(), 10);
        assert_eq!(dt.get(Field::DayOfWeek).unwrap(), 1);
        assert!(dt.get(Field::OffsetSeconds).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn instant_with_offset() {
        let dt = date(2007, 12, 3).at(10, 15, 30, 0);
        let instant = dt.to_instant_with_offset(Offset::constant(1)).unwrap();
        assert_eq!(instant.to_string(), "2007-12-03T09:15:30Z");
        assert!(DateTime::MIN
            .to_instant_with_offset(Offset::constant(1))
            .unwrap_err()
            .is_range());
    }

    #[test]
    fn durations() {
        let dt = datetime(2024, 3, 9, 12, 0, 0, 0);
        let d = Duration::from_hours(36);
        assert_eq!(dt.plus_duration(d).unwrap(), datetime(2024, 3, 11, 0, 0, 0, 0));
        assert_eq!(dt.minus_duration(d).unwrap(), datetime(2024, 3, 8, 0, 0, 0, 0));
    }

    quickcheck::quickcheck! {
        fn prop_local_seconds_roundtrip(dt: DateTime) -> bool {
            let got = DateTime::from_local_seconds(
                dt.to_local_seconds(),
                dt.subsec_nanosecond(),
            );
            got == dt
        }

        fn prop_plus_minus_days(dt: DateTime, days: i16) -> quickcheck::TestResult {
            let Ok(moved) = dt.plus(i64::from(days), Unit::Day) else {
                return quickcheck::TestResult::discard();
            };
            let back = moved.minus(i64::from(days), Unit::Day).unwrap();
            quickcheck::TestResult::from_bool(back == dt)
        }

        fn prop_display_parse_roundtrip(dt: DateTime) -> bool {
            dt.to_string().parse::<DateTime>().unwrap() == dt
        }
    }
}
