use crate::{
    civil::{Date, DateTime, Time},
    error::{civil::Error as E, Error},
    fmt::iso,
    util::calendar::{NANOS_PER_SECOND, SECONDS_PER_DAY},
    Instant, Unit, Zoned,
};

/// A signed, exact amount of elapsed time, with nanosecond precision.
///
/// A `Duration` is a number of seconds plus a nanosecond fraction in the
/// range `0..=999_999_999`. Like the seconds of an [`Instant`], the seconds
/// are floored, so half a second before zero is `-1` seconds and
/// `500_000_000` nanoseconds. A day is always exactly 86,400 seconds.
///
/// The elapsed time between two points on the timeline is computed with
/// [`Duration::between`]. Durations are always exact: the elapsed time
/// between two [`Zoned`] values accounts for any daylight saving time
/// transition in between.
///
/// # Printing
///
/// A `Duration` prints as an ISO 8601 duration with only hours, minutes and
/// seconds:
///
/// ```
/// use civiltime::Duration;
///
/// assert_eq!(Duration::from_hours(168).to_string(), "PT168H");
/// assert_eq!(Duration::from_minutes(90).to_string(), "PT1H30M");
/// assert_eq!(Duration::from_millis(-500).to_string(), "PT-0.5S");
/// assert_eq!(Duration::ZERO.to_string(), "PT0S");
/// ```
///
/// # Example: daylight saving time
///
/// ```
/// use civiltime::{civil::date, tz::{BuiltinRegistry, ZoneRegistry}, Duration, Unit};
///
/// let tz = BuiltinRegistry::new().resolve("America/New_York")?;
/// let start = date(2024, 3, 7).at(12, 0, 0, 0).to_zoned(tz)?;
/// let end = start.plus(1, Unit::Week)?;
/// let elapsed = Duration::between(&start, &end);
/// assert_eq!(elapsed.to_hours(), 167);
/// assert_eq!(elapsed.to_days(), 6);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Duration {
    seconds: i64,
    nanoseconds: i32,
}

impl Duration {
    /// A duration of zero time.
    pub const ZERO: Duration = Duration { seconds: 0, nanoseconds: 0 };

    /// The smallest possible duration.
    pub const MIN: Duration = Duration { seconds: i64::MIN, nanoseconds: 0 };

    /// The largest possible duration.
    pub const MAX: Duration =
        Duration { seconds: i64::MAX, nanoseconds: 999_999_999 };

    /// Creates a new duration from seconds and nanoseconds.
    ///
    /// The nanoseconds may be any value, including negative values or
    /// values of a second or more. They are normalized into the seconds.
    ///
    /// # Panics
    ///
    /// This panics when the normalized seconds overflow an `i64`.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::Duration;
    ///
    /// let d = Duration::new(1, -1_500_000_000);
    /// assert_eq!((d.seconds(), d.nanoseconds()), (-1, 500_000_000));
    /// assert_eq!(d.to_nanos(), -500_000_000);
    /// ```
    pub const fn new(seconds: i64, nanoseconds: i32) -> Duration {
        let nanos = nanoseconds as i64;
        let carry = nanos.div_euclid(NANOS_PER_SECOND);
        let seconds = match seconds.checked_add(carry) {
            Some(seconds) => seconds,
            None => panic!("seconds overflowed when normalizing duration"),
        };
        let nanoseconds = nanos.rem_euclid(NANOS_PER_SECOND) as i32;
        Duration { seconds, nanoseconds }
    }

    /// Creates a duration from an amount of a unit.
    ///
    /// Units from [`Unit::Nanosecond`] to [`Unit::Day`] are supported, where
    /// a day is 86,400 seconds.
    ///
    /// # Errors
    ///
    /// This returns an invalid parameter error for weeks, months and years.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{Duration, Unit};
    ///
    /// assert_eq!(Duration::of(2, Unit::HalfDay)?, Duration::from_days(1));
    /// assert!(Duration::of(1, Unit::Month).unwrap_err().is_invalid_parameter());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn of(amount: i64, unit: Unit) -> Result<Duration, Error> {
        if unit > Unit::Day {
            return Err(Error::from(E::UnsupportedUnit {
                unit,
                what: "duration",
            }));
        }
        // Every unit up to days has a fixed length.
        let unit_nanos = unit.nanoseconds().unwrap_or(1);
        Duration::try_from_nanos(i128::from(amount) * i128::from(unit_nanos))
            .ok_or_else(|| Error::slim_range("duration"))
    }

    /// Creates a duration from a number of 86,400 second days.
    ///
    /// # Panics
    ///
    /// This panics when the number of seconds overflows an `i64`.
    pub const fn from_days(days: i64) -> Duration {
        match days.checked_mul(SECONDS_PER_DAY) {
            Some(seconds) => Duration::from_secs(seconds),
            None => panic!("days overflowed duration"),
        }
    }

    /// Creates a duration from a number of hours.
    ///
    /// # Panics
    ///
    /// This panics when the number of seconds overflows an `i64`.
    pub const fn from_hours(hours: i64) -> Duration {
        match hours.checked_mul(3_600) {
            Some(seconds) => Duration::from_secs(seconds),
            None => panic!("hours overflowed duration"),
        }
    }

    /// Creates a duration from a number of minutes.
    ///
    /// # Panics
    ///
    /// This panics when the number of seconds overflows an `i64`.
    pub const fn from_minutes(minutes: i64) -> Duration {
        match minutes.checked_mul(60) {
            Some(seconds) => Duration::from_secs(seconds),
            None => panic!("minutes overflowed duration"),
        }
    }

    /// Creates a duration from a number of seconds.
    #[inline]
    pub const fn from_secs(seconds: i64) -> Duration {
        Duration { seconds, nanoseconds: 0 }
    }

    /// Creates a duration from a number of milliseconds.
    pub const fn from_millis(millis: i64) -> Duration {
        let seconds = millis.div_euclid(1_000);
        let nanoseconds = (millis.rem_euclid(1_000) * 1_000_000) as i32;
        Duration { seconds, nanoseconds }
    }

    /// Creates a duration from a number of nanoseconds.
    pub const fn from_nanos(nanos: i64) -> Duration {
        let seconds = nanos.div_euclid(NANOS_PER_SECOND);
        let nanoseconds = nanos.rem_euclid(NANOS_PER_SECOND) as i32;
        Duration { seconds, nanoseconds }
    }

    /// Creates a duration from a number of nanoseconds, returning `None`
    /// when the seconds overflow an `i64`.
    pub(crate) fn try_from_nanos(nanos: i128) -> Option<Duration> {
        let per = i128::from(NANOS_PER_SECOND);
        let seconds = i64::try_from(nanos.div_euclid(per)).ok()?;
        // OK because the remainder is less than a second.
        let nanoseconds = nanos.rem_euclid(per) as i32;
        Some(Duration { seconds, nanoseconds })
    }

    /// Returns the exact time elapsed from `start` to `end`.
    ///
    /// The result is negative when `end` is before `start`. Anything that
    /// converts into a [`TimelinePoint`] can be given: instants and zoned
    /// datetimes use their instant, while civil values are treated as if
    /// they were in UTC. A [`Date`] is taken at midnight and a [`Time`] is
    /// taken on `1970-01-01`.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::{date, time}, Duration, Instant, Unit};
    ///
    /// let start: Instant = "2007-12-03T04:15:30Z".parse()?;
    /// let end = start.plus(7, Unit::Day)?;
    /// assert_eq!(Duration::between(start, end).to_days(), 7);
    /// assert_eq!(Duration::between(end, start).to_days(), -7);
    ///
    /// let elapsed = Duration::between(time(9, 0, 0, 0), time(17, 30, 0, 0));
    /// assert_eq!(elapsed.to_string(), "PT8H30M");
    ///
    /// let elapsed = Duration::between(date(2024, 1, 1), date(2025, 1, 1));
    /// assert_eq!(elapsed.to_days(), 366);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn between(
        start: impl Into<TimelinePoint>,
        end: impl Into<TimelinePoint>,
    ) -> Duration {
        let (start, end) = (start.into(), end.into());
        let nanos = end.nanos - start.nanos;
        let per = i128::from(NANOS_PER_SECOND);
        // OK because timeline points are limited to the civil range, which
        // spans far fewer than `i64::MAX` seconds.
        let seconds = nanos.div_euclid(per) as i64;
        let nanoseconds = nanos.rem_euclid(per) as i32;
        Duration { seconds, nanoseconds }
    }

    /// Returns the number of whole seconds, rounded toward negative
    /// infinity.
    ///
    /// Together with [`Duration::nanoseconds`], this gives the exact
    /// duration.
    #[inline]
    pub const fn seconds(self) -> i64 {
        self.seconds
    }

    /// Returns the nanosecond fraction, always in `0..=999_999_999`.
    #[inline]
    pub const fn nanoseconds(self) -> i32 {
        self.nanoseconds
    }

    /// Returns the number of whole 86,400 second days, truncating toward
    /// zero.
    #[inline]
    pub fn to_days(self) -> i64 {
        self.to_seconds() / SECONDS_PER_DAY
    }

    /// Returns the number of whole hours, truncating toward zero.
    #[inline]
    pub fn to_hours(self) -> i64 {
        self.to_seconds() / 3_600
    }

    /// Returns the number of whole minutes, truncating toward zero.
    #[inline]
    pub fn to_minutes(self) -> i64 {
        self.to_seconds() / 60
    }

    /// Returns the number of whole seconds, truncating toward zero.
    ///
    /// This differs from [`Duration::seconds`] for negative durations with a
    /// fraction:
    ///
    /// ```
    /// use civiltime::Duration;
    ///
    /// let d = Duration::from_millis(-1_500);
    /// assert_eq!(d.seconds(), -2);
    /// assert_eq!(d.to_seconds(), -1);
    /// ```
    #[inline]
    pub fn to_seconds(self) -> i64 {
        if self.seconds < 0 && self.nanoseconds > 0 {
            self.seconds + 1
        } else {
            self.seconds
        }
    }

    /// Returns the number of whole milliseconds, truncating toward zero.
    #[inline]
    pub fn to_millis(self) -> i128 {
        self.to_nanos() / 1_000_000
    }

    /// Returns the total number of nanoseconds.
    #[inline]
    pub fn to_nanos(self) -> i128 {
        i128::from(self.seconds) * i128::from(NANOS_PER_SECOND)
            + i128::from(self.nanoseconds)
    }

    /// Returns true when this duration is less than zero.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.seconds < 0
    }

    /// Returns true when this duration is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.seconds == 0 && self.nanoseconds == 0
    }

    /// Returns the absolute value of this duration.
    ///
    /// # Panics
    ///
    /// This panics for durations whose magnitude doesn't fit, which only
    /// happens near [`Duration::MIN`].
    #[inline]
    pub fn abs(self) -> Duration {
        if self.is_negative() {
            self.negated()
        } else {
            self
        }
    }

    /// Returns this duration with its sign flipped.
    ///
    /// # Panics
    ///
    /// This panics for durations whose negation doesn't fit, which only
    /// happens near [`Duration::MIN`].
    pub fn negated(self) -> Duration {
        match Duration::try_from_nanos(-self.to_nanos()) {
            Some(duration) => duration,
            None => panic!("negating {self} overflowed"),
        }
    }

    /// Adds two durations, returning `None` on overflow.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::Duration;
    ///
    /// let d = Duration::from_hours(1).checked_add(Duration::from_minutes(30));
    /// assert_eq!(d, Some(Duration::from_minutes(90)));
    /// assert_eq!(Duration::MAX.checked_add(Duration::from_nanos(1)), None);
    /// ```
    pub fn checked_add(self, rhs: Duration) -> Option<Duration> {
        Duration::try_from_nanos(self.to_nanos() + rhs.to_nanos())
    }

    /// Subtracts two durations, returning `None` on overflow.
    pub fn checked_sub(self, rhs: Duration) -> Option<Duration> {
        Duration::try_from_nanos(self.to_nanos() - rhs.to_nanos())
    }
}

impl core::ops::Neg for Duration {
    type Output = Duration;

    #[inline]
    fn neg(self) -> Duration {
        self.negated()
    }
}

impl core::fmt::Debug for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::StdFmtWrite;

        iso::DEFAULT_PRINTER
            .print_duration(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::str::FromStr for Duration {
    type Err = Error;

    fn from_str(string: &str) -> Result<Duration, Error> {
        iso::DEFAULT_PARSER.parse_duration(string.as_bytes())
    }
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = Error;

    fn try_from(d: std::time::Duration) -> Result<Duration, Error> {
        let seconds = i64::try_from(d.as_secs())
            .map_err(|_| Error::slim_range("duration"))?;
        // OK because `subsec_nanos` is always less than a second.
        Ok(Duration { seconds, nanoseconds: d.subsec_nanos() as i32 })
    }
}

/// A point on the timeline that [`Duration::between`] can measure from or
/// to.
///
/// This is created through its `From` implementations. [`Instant`] and
/// [`Zoned`] values convert to their instant. Civil values are placed on
/// the timeline as if they were in UTC: a [`Date`] at midnight and a
/// [`Time`] on `1970-01-01`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct TimelinePoint {
    nanos: i128,
}

impl From<Instant> for TimelinePoint {
    fn from(instant: Instant) -> TimelinePoint {
        TimelinePoint { nanos: instant.as_epoch_nanos() }
    }
}

impl<'a> From<&'a Zoned> for TimelinePoint {
    fn from(zdt: &'a Zoned) -> TimelinePoint {
        TimelinePoint::from(zdt.to_instant())
    }
}

impl From<Zoned> for TimelinePoint {
    fn from(zdt: Zoned) -> TimelinePoint {
        TimelinePoint::from(zdt.to_instant())
    }
}

impl From<DateTime> for TimelinePoint {
    fn from(dt: DateTime) -> TimelinePoint {
        TimelinePoint { nanos: dt.to_local_nanos() }
    }
}

impl From<Date> for TimelinePoint {
    fn from(date: Date) -> TimelinePoint {
        TimelinePoint::from(DateTime::from(date))
    }
}

impl From<Time> for TimelinePoint {
    fn from(time: Time) -> TimelinePoint {
        TimelinePoint { nanos: i128::from(time.to_nanosecond_of_day()) }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Duration {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Duration {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        use serde::de;

        struct DurationVisitor;

        impl<'de> de::Visitor<'de> for DurationVisitor {
            type Value = Duration;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("an ISO 8601 duration string")
            }

            fn visit_str<E: de::Error>(
                self,
                value: &str,
            ) -> Result<Duration, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(DurationVisitor)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Duration {
    fn arbitrary(g: &mut quickcheck::Gen) -> Duration {
        // Keeps the seconds within the span of supported instants.
        let seconds = i64::arbitrary(g) % 700_000_000_000;
        let nanoseconds = i32::arbitrary(g).rem_euclid(1_000_000_000);
        Duration { seconds, nanoseconds }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Duration>> {
        Box::new(
            (self.seconds, self.nanoseconds)
                .shrink()
                .map(|(s, n)| Duration::new(s, n)),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::civil::{date, time};

    use super::*;

    #[test]
    fn display() {
        insta::assert_snapshot!(Duration::from_days(7), @"PT168H");
        insta::assert_snapshot!(Duration::from_secs(3_661), @"PT1H1M1S");
        insta::assert_snapshot!(Duration::from_secs(-3_661), @"PT-1H-1M-1S");
        insta::assert_snapshot!(Duration::from_millis(1_500), @"PT1.5S");
        insta::assert_snapshot!(Duration::from_millis(-1_500), @"PT-1.5S");
        insta::assert_snapshot!(Duration::from_nanos(1), @"PT0.000000001S");
        insta::assert_snapshot!(Duration::from_minutes(-60), @"PT-1H");
    }

    #[test]
    fn parse() {
        let p = |s: &str| s.parse::<Duration>().unwrap();
        assert_eq!(p("PT168H"), Duration::from_hours(168));
        assert_eq!(p("PT-0.5S"), Duration::from_millis(-500));
        assert_eq!(p("-PT1H30M"), Duration::from_minutes(-90));
        assert_eq!(p("P2DT1S"), Duration::from_secs(2 * 86_400 + 1));
        assert_eq!(p("pt1m"), Duration::from_minutes(1));
        assert!("PT".parse::<Duration>().unwrap_err().is_parse());
        assert!("1H".parse::<Duration>().unwrap_err().is_parse());
    }

    #[test]
    fn truncation() {
        let d = Duration::new(-90_061, 1);
        assert_eq!(d.to_days(), -1);
        assert_eq!(d.to_hours(), -25);
        assert_eq!(d.to_minutes(), -1501);
        assert_eq!(d.to_seconds(), -90_060);
        assert_eq!(d.to_millis(), -90_060_999);
        assert!(d.is_negative());
        assert_eq!(d.abs(), Duration::new(90_060, 999_999_999));
    }

    #[test]
    fn between_civil() {
        let d = Duration::between(date(2024, 3, 9).at(12, 0, 0, 0), date(2024, 3, 10));
        assert_eq!(d, Duration::from_hours(12));
        let d = Duration::between(time(23, 0, 0, 0), time(1, 0, 0, 0));
        assert_eq!(d, Duration::from_hours(-22));
    }

    #[test]
    fn of_units() {
        assert_eq!(Duration::of(3, Unit::Millisecond).unwrap(), Duration::from_millis(3));
        assert_eq!(Duration::of(-1, Unit::Day).unwrap(), Duration::from_hours(-24));
        assert!(Duration::of(1, Unit::Week).unwrap_err().is_invalid_parameter());
        assert!(Duration::of(i64::MAX, Unit::Day).unwrap_err().is_range());
    }

    quickcheck::quickcheck! {
        fn prop_nanos_roundtrip(d: Duration) -> bool {
            Duration::try_from_nanos(d.to_nanos()) == Some(d)
        }

        fn prop_negate_twice(d: Duration) -> bool {
            -(-d) == d && (d.checked_add(-d) == Some(Duration::ZERO))
        }

        fn prop_display_parse(d: Duration) -> bool {
            d.to_string().parse::<Duration>().unwrap() == d
        }

        fn prop_between_plus(i: Instant, d: Duration) -> quickcheck::TestResult {
            let Ok(end) = i.plus_duration(d) else {
                return quickcheck::TestResult::discard();
            };
            quickcheck::TestResult::from_bool(Duration::between(i, end) == d)
        }
    }
}
