use crate::{
    civil::{negate_amount, Date, DateTime},
    error::{civil::Error as E, Error},
    fmt::{iso, pattern::Pattern},
    tz::TimeZone,
    util::calendar::{NANOS_PER_DAY, NANOS_PER_SECOND},
    Context, Field, Unit, Zoned,
};

/// A representation of civil "wall clock" time.
///
/// Conceptually, a `Time` value corresponds to the typical hours and
/// minutes that you might see on a clock. This type also contains the
/// second and fractional subsecond (to nanosecond precision) associated
/// with a time.
///
/// # Civil time
///
/// A `Time` value behaves as if it corresponds precisely to a single
/// nanosecond within a day, where all days have `86,400` seconds. That is,
/// any given `Time` value corresponds to a nanosecond in the inclusive range
/// `[0, 86399999999999]`, where `0` corresponds to `00:00:00.000000000`
/// ([`Time::MIN`]) and `86399999999999` corresponds to `23:59:59.999999999`
/// ([`Time::MAX`]). Moreover, in civil time, all hours have the same number
/// of minutes, all minutes have the same number of seconds and all seconds
/// have the same number of nanoseconds.
///
/// # Arithmetic
///
/// Adding time units to a `Time` wraps around midnight:
///
/// ```
/// use civiltime::{civil::time, Unit};
///
/// assert_eq!(time(23, 30, 0, 0).plus(45, Unit::Minute)?, time(0, 15, 0, 0));
/// assert_eq!(time(0, 15, 0, 0).minus(1, Unit::HalfDay)?, time(12, 15, 0, 0));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Parsing and printing
///
/// The `Display` and `FromStr` implementations use the ISO 8601
/// `HH:MM:SS[.fffffffff]` format. Seconds are always printed, and the
/// fraction is printed in groups of three digits only when it's non-zero:
///
/// ```
/// use civiltime::civil::{time, Time};
///
/// assert_eq!(time(4, 15, 30, 0).to_string(), "04:15:30");
/// assert_eq!(time(4, 15, 30, 123_000_000).to_string(), "04:15:30.123");
/// assert_eq!(time(4, 15, 30, 123_400_000).to_string(), "04:15:30.123400");
/// assert_eq!("04:15".parse::<Time>()?, time(4, 15, 0, 0));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Time {
    hour: i8,
    minute: i8,
    second: i8,
    subsec_nanosecond: i32,
}

impl Time {
    /// The minimum representable time value.
    ///
    /// This corresponds to `00:00:00.000000000`.
    pub const MIN: Time = Time::midnight();

    /// The maximum representable time value.
    ///
    /// This corresponds to `23:59:59.999999999`.
    pub const MAX: Time = Time::constant(23, 59, 59, 999_999_999);

    /// Creates a new `Time` value from its component hour, minute, second
    /// and fractional subsecond (up to nanosecond precision) values.
    ///
    /// # Errors
    ///
    /// This returns a range error unless *all* of the following conditions
    /// are true:
    ///
    /// * `0 <= hour <= 23`
    /// * `0 <= minute <= 59`
    /// * `0 <= second <= 59`
    /// * `0 <= subsec_nanosecond <= 999,999,999`
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::civil::Time;
    ///
    /// let t = Time::new(21, 30, 5, 123_456_789)?;
    /// assert_eq!(t.hour(), 21);
    /// assert_eq!(t.subsec_nanosecond(), 123_456_789);
    /// assert!(Time::new(24, 0, 0, 0).unwrap_err().is_range());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn new(
        hour: i8,
        minute: i8,
        second: i8,
        subsec_nanosecond: i32,
    ) -> Result<Time, Error> {
        if !(0..=23).contains(&hour) {
            return Err(Error::range("hour", hour, 0, 23));
        }
        if !(0..=59).contains(&minute) {
            return Err(Error::range("minute", minute, 0, 59));
        }
        if !(0..=59).contains(&second) {
            return Err(Error::range("second", second, 0, 59));
        }
        if !(0..=999_999_999).contains(&subsec_nanosecond) {
            return Err(Error::range(
                "subsec-nanosecond",
                subsec_nanosecond,
                0,
                999_999_999,
            ));
        }
        Ok(Time { hour, minute, second, subsec_nanosecond })
    }

    /// Creates a new `Time` value in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics when [`Time::new`] would return an error.
    #[inline]
    pub const fn constant(
        hour: i8,
        minute: i8,
        second: i8,
        subsec_nanosecond: i32,
    ) -> Time {
        if !(0 <= hour && hour <= 23) {
            panic!("invalid hour");
        }
        if !(0 <= minute && minute <= 59) {
            panic!("invalid minute");
        }
        if !(0 <= second && second <= 59) {
            panic!("invalid second");
        }
        if !(0 <= subsec_nanosecond && subsec_nanosecond <= 999_999_999) {
            panic!("invalid nanosecond");
        }
        Time { hour, minute, second, subsec_nanosecond }
    }

    /// Returns the first moment of time in a day.
    #[inline]
    pub const fn midnight() -> Time {
        Time { hour: 0, minute: 0, second: 0, subsec_nanosecond: 0 }
    }

    /// Returns the current wall clock time according to the given context's
    /// clock, in the given time zone or the context's system time zone when
    /// `None`.
    #[inline]
    pub fn now(ctx: &Context, tz: Option<&TimeZone>) -> Time {
        DateTime::now(ctx, tz).time()
    }

    /// Parses a time using the given compiled pattern.
    ///
    /// # Errors
    ///
    /// This returns a parse error when the text doesn't match the pattern,
    /// or when the pattern doesn't contain an hour.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::{time, Time}, fmt::pattern::Pattern};
    ///
    /// let pattern = Pattern::compile("h:mm a")?;
    /// assert_eq!(Time::parse_with("9:05 PM", &pattern)?, time(21, 5, 0, 0));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn parse_with(text: &str, pattern: &Pattern) -> Result<Time, Error> {
        pattern.parse(text)?.to_time()
    }

    /// Returns the "hour" component of this time.
    #[inline]
    pub fn hour(self) -> i8 {
        self.hour
    }

    /// Returns the "minute" component of this time.
    #[inline]
    pub fn minute(self) -> i8 {
        self.minute
    }

    /// Returns the "second" component of this time.
    #[inline]
    pub fn second(self) -> i8 {
        self.second
    }

    /// Returns the "millisecond" component of this time.
    #[inline]
    pub fn millisecond(self) -> i16 {
        (self.subsec_nanosecond / 1_000_000) as i16
    }

    /// Returns the fractional nanosecond for this `Time` value.
    ///
    /// The value returned is guaranteed to be in the range
    /// `0..=999_999_999`.
    #[inline]
    pub fn subsec_nanosecond(self) -> i32 {
        self.subsec_nanosecond
    }

    /// Combines this time with a date.
    ///
    /// # Panics
    ///
    /// This panics when the year-month-day isn't a valid date.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::civil::{datetime, time};
    ///
    /// let dt = time(7, 15, 0, 0).on(2010, 3, 14);
    /// assert_eq!(dt, datetime(2010, 3, 14, 7, 15, 0, 0));
    /// ```
    #[inline]
    pub const fn on(self, year: i16, month: i8, day: i8) -> DateTime {
        DateTime::from_parts(Date::constant(year, month, day), self)
    }

    /// Combines this time with a date.
    #[inline]
    pub const fn to_datetime(self, date: Date) -> DateTime {
        DateTime::from_parts(date, self)
    }

    /// Returns the value of the given field for this time.
    ///
    /// Supported fields are [`Field::HourOfDay`],
    /// [`Field::ClockHourOfAmPm`], [`Field::HourOfAmPm`],
    /// [`Field::AmPmOfDay`], [`Field::MinuteOfHour`],
    /// [`Field::SecondOfMinute`], [`Field::MilliOfSecond`] and
    /// [`Field::NanoOfSecond`].
    ///
    /// # Errors
    ///
    /// This returns an invalid parameter error for any other field.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::time, Field};
    ///
    /// let t = time(0, 5, 0, 0);
    /// assert_eq!(t.get(Field::ClockHourOfAmPm)?, 12);
    /// assert_eq!(t.get(Field::AmPmOfDay)?, 0);
    /// assert!(t.get(Field::Year).unwrap_err().is_invalid_parameter());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get(self, field: Field) -> Result<i64, Error> {
        let hour = i64::from(self.hour);
        Ok(match field {
            Field::HourOfDay => hour,
            Field::ClockHourOfAmPm => match hour % 12 {
                0 => 12,
                h => h,
            },
            Field::HourOfAmPm => hour % 12,
            Field::AmPmOfDay => hour / 12,
            Field::MinuteOfHour => i64::from(self.minute),
            Field::SecondOfMinute => i64::from(self.second),
            Field::MilliOfSecond => i64::from(self.millisecond()),
            Field::NanoOfSecond => i64::from(self.subsec_nanosecond),
            _ => {
                return Err(Error::from(E::UnsupportedField {
                    field,
                    what: "civil time",
                }))
            }
        })
    }

    /// Adds the given amount of a time unit to this time, wrapping around
    /// midnight.
    ///
    /// Supported units are [`Unit::Nanosecond`] through [`Unit::HalfDay`].
    /// Since the result wraps, this never fails for a supported unit.
    ///
    /// # Errors
    ///
    /// This returns an invalid parameter error for calendar units.
    pub fn plus(self, amount: i64, unit: Unit) -> Result<Time, Error> {
        let Some(unit_nanos) = unit.nanoseconds().filter(|_| !unit.is_calendar())
        else {
            return Err(Error::from(E::UnsupportedUnit {
                unit,
                what: "civil time",
            }));
        };
        let delta = (i128::from(amount) * i128::from(unit_nanos))
            .rem_euclid(i128::from(NANOS_PER_DAY));
        // OK because `delta` is less than a day.
        let nanos = (self.to_nanosecond_of_day() + delta as i64)
            .rem_euclid(NANOS_PER_DAY);
        Ok(Time::from_nanosecond_of_day(nanos))
    }

    /// Subtracts the given amount of a time unit from this time, wrapping
    /// around midnight.
    ///
    /// # Errors
    ///
    /// See [`Time::plus`].
    #[inline]
    pub fn minus(self, amount: i64, unit: Unit) -> Result<Time, Error> {
        self.plus(negate_amount(amount, unit)?, unit)
    }

    /// Returns the number of nanoseconds since midnight.
    #[inline]
    pub(crate) fn to_nanosecond_of_day(self) -> i64 {
        self.to_second_of_day() * NANOS_PER_SECOND
            + i64::from(self.subsec_nanosecond)
    }

    /// Returns the number of whole seconds since midnight.
    #[inline]
    pub(crate) fn to_second_of_day(self) -> i64 {
        i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    /// `nanos` must be in the range `0..NANOS_PER_DAY`.
    #[inline]
    pub(crate) fn from_nanosecond_of_day(nanos: i64) -> Time {
        let second_of_day = nanos.div_euclid(NANOS_PER_SECOND);
        let subsec_nanosecond = nanos.rem_euclid(NANOS_PER_SECOND) as i32;
        let mut time = Time::from_second_of_day(second_of_day);
        time.subsec_nanosecond = subsec_nanosecond;
        time
    }

    /// `seconds` must be in the range `0..86_400`.
    #[inline]
    pub(crate) fn from_second_of_day(seconds: i64) -> Time {
        let hour = (seconds / 3600) as i8;
        let minute = ((seconds / 60) % 60) as i8;
        let second = (seconds % 60) as i8;
        Time { hour, minute, second, subsec_nanosecond: 0 }
    }

    /// Returns this time with a different subsecond nanosecond.
    ///
    /// `subsec_nanosecond` must be in the range `0..=999_999_999`.
    #[inline]
    pub(crate) fn with_subsec_nanosecond(self, subsec_nanosecond: i32) -> Time {
        Time { subsec_nanosecond, ..self }
    }
}

impl core::fmt::Debug for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::StdFmtWrite;

        iso::DEFAULT_PRINTER
            .print_time(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::str::FromStr for Time {
    type Err = Error;

    fn from_str(string: &str) -> Result<Time, Error> {
        iso::DEFAULT_PARSER.parse_time(string.as_bytes())
    }
}

impl From<DateTime> for Time {
    #[inline]
    fn from(dt: DateTime) -> Time {
        dt.time()
    }
}

impl<'a> From<&'a Zoned> for Time {
    #[inline]
    fn from(zdt: &'a Zoned) -> Time {
        zdt.time()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Time {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Time {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Time, D::Error> {
        use serde::de;

        struct TimeVisitor;

        impl<'de> de::Visitor<'de> for TimeVisitor {
            type Value = Time;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a time string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Time, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(TimeVisitor)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Time {
    fn arbitrary(g: &mut quickcheck::Gen) -> Time {
        let nanos = i64::arbitrary(g).rem_euclid(NANOS_PER_DAY);
        Time::from_nanosecond_of_day(nanos)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Time>> {
        Box::new(
            self.to_nanosecond_of_day()
                .shrink()
                .filter(|&n| (0..NANOS_PER_DAY).contains(&n))
                .map(Time::from_nanosecond_of_day),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::civil::time;

    use super::*;

    #[test]
    fn wrapping() {
        let t = time(23, 59, 59, 999_999_999);
        assert_eq!(t.plus(1, Unit::Nanosecond).unwrap(), Time::MIN);
        assert_eq!(Time::MIN.minus(1, Unit::Nanosecond).unwrap(), t);
        assert_eq!(
            time(10, 0, 0, 0).plus(i64::MAX, Unit::HalfDay).unwrap(),
            time(22, 0, 0, 0),
        );
        assert_eq!(
            time(10, 0, 0, 0).plus(25, Unit::Hour).unwrap(),
            time(11, 0, 0, 0),
        );
        assert_eq!(
            time(10, 0, 0, 0).minus(3, Unit::Millisecond).unwrap(),
            time(9, 59, 59, 997_000_000),
        );
    }

    #[test]
    fn unsupported() {
        let err = Time::MIN.plus(1, Unit::Day).unwrap_err();
        assert!(err.is_invalid_parameter());
        insta::assert_snapshot!(err, @"unit `days` is not supported by civil time");
        assert!(Time::MIN.get(Field::DayOfMonth).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn fields() {
        let t = time(13, 7, 9, 123_456_789);
        assert_eq!(t.get(Field::HourOfDay).unwrap(), 13);
        assert_eq!(t.get(Field::ClockHourOfAmPm).unwrap(), 1);
        assert_eq!(t.get(Field::HourOfAmPm).unwrap(), 1);
        assert_eq!(t.get(Field::AmPmOfDay).unwrap(), 1);
        assert_eq!(t.get(Field::MinuteOfHour).unwrap(), 7);
        assert_eq!(t.get(Field::SecondOfMinute).unwrap(), 9);
        assert_eq!(t.get(Field::MilliOfSecond).unwrap(), 123);
        assert_eq!(t.get(Field::NanoOfSecond).unwrap(), 123_456_789);
        assert_eq!(time(12, 0, 0, 0).get(Field::ClockHourOfAmPm).unwrap(), 12);
    }

    #[test]
    fn new_errors() {
        insta::assert_snapshot!(
            Time::new(12, 60, 0, 0).unwrap_err(),
            @"parameter 'minute' with value 60 is not in the required range of 0..=59",
        );
        assert!(Time::new(0, 0, 0, 1_000_000_000).unwrap_err().is_range());
        assert!(Time::new(-1, 0, 0, 0).unwrap_err().is_range());
    }

    quickcheck::quickcheck! {
        fn prop_nanosecond_of_day_roundtrip(t: Time) -> bool {
            Time::from_nanosecond_of_day(t.to_nanosecond_of_day()) == t
        }

        fn prop_plus_minus(t: Time, amount: i64) -> bool {
            let moved = t.plus(amount, Unit::Second).unwrap();
            moved.minus(amount, Unit::Second).unwrap_or(t) == t
        }

        fn prop_display_parse_roundtrip(t: Time) -> bool {
            t.to_string().parse::<Time>().unwrap() == t
        }
    }
}
