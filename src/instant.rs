use crate::{
    civil::{negate_amount, DateTime},
    error::{civil::Error as E, Error, ErrorContext},
    fmt::iso,
    tz::{Offset, TimeZone, ZoneRegistry},
    util::calendar::{
        EPOCH_DAY_MAX, EPOCH_DAY_MIN, NANOS_PER_SECOND, SECONDS_PER_DAY,
    },
    Context, Duration, Unit, Zoned,
};

/// An instant in time, represented as the number of seconds and
/// nanoseconds since the Unix epoch, `1970-01-01T00:00:00Z`.
///
/// An `Instant` identifies a precise point on the timeline, independent of
/// any time zone or calendar. To get civil fields like the year or the
/// hour, attach a time zone with [`Instant::to_zoned`].
///
/// The supported range is `-9999-01-02T00:00:00Z` to
/// `9999-12-30T23:59:59.999999999Z`. This guarantees that every instant can
/// be converted to a [`DateTime`] with any offset.
///
/// # Parsing and printing
///
/// An `Instant` is always printed in UTC. Parsing requires an offset (or
/// `Z`) after the time:
///
/// ```
/// use civiltime::Instant;
///
/// let instant: Instant = "2007-12-03T10:15:30+01:00".parse()?;
/// assert_eq!(instant.to_string(), "2007-12-03T09:15:30Z");
/// assert_eq!(instant.epoch_second(), 1196673330);
///
/// assert!("2007-12-03T10:15:30".parse::<Instant>().is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Arithmetic
///
/// Units from [`Unit::Nanosecond`] to [`Unit::Day`] can be added, where a
/// day is always exactly 86,400 seconds:
///
/// ```
/// use civiltime::{Instant, Unit};
///
/// let instant: Instant = "2007-12-03T10:15:30Z".parse()?;
/// assert_eq!(instant.plus(7, Unit::Day)?.to_string(), "2007-12-10T10:15:30Z");
/// assert!(instant.plus(1, Unit::Month).unwrap_err().is_invalid_parameter());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Instant {
    second: i64,
    nanosecond: i32,
}

impl Instant {
    /// The Unix epoch, `1970-01-01T00:00:00Z`.
    pub const UNIX_EPOCH: Instant = Instant { second: 0, nanosecond: 0 };

    /// The minimum representable instant, `-9999-01-02T00:00:00Z`.
    pub const MIN: Instant = Instant {
        second: (EPOCH_DAY_MIN as i64 + 1) * SECONDS_PER_DAY,
        nanosecond: 0,
    };

    /// The maximum representable instant,
    /// `9999-12-30T23:59:59.999999999Z`.
    pub const MAX: Instant = Instant {
        second: EPOCH_DAY_MAX as i64 * SECONDS_PER_DAY - 1,
        nanosecond: 999_999_999,
    };

    /// Creates a new instant from seconds since the Unix epoch and a
    /// nanosecond fraction.
    ///
    /// The nanosecond fraction is always non-negative, so
    /// `Instant::new(-1, 500_000_000)` is half a second before the epoch.
    ///
    /// # Errors
    ///
    /// This returns a range error when `nanosecond` is outside of
    /// `0..=999_999_999` or when the instant is outside of
    /// [`Instant::MIN`] and [`Instant::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::Instant;
    ///
    /// let instant = Instant::new(-1, 500_000_000)?;
    /// assert_eq!(instant.to_string(), "1969-12-31T23:59:59.500Z");
    /// assert!(Instant::new(0, 1_000_000_000).unwrap_err().is_range());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(second: i64, nanosecond: i32) -> Result<Instant, Error> {
        if !(0..=999_999_999).contains(&nanosecond) {
            return Err(Error::range(
                "instant-nanosecond",
                nanosecond,
                0,
                999_999_999,
            ));
        }
        if !(Instant::MIN.second..=Instant::MAX.second).contains(&second) {
            return Err(Error::range(
                "instant-second",
                second,
                Instant::MIN.second,
                Instant::MAX.second,
            ));
        }
        Ok(Instant { second, nanosecond })
    }

    /// Creates a new instant from a whole number of seconds since the Unix
    /// epoch.
    ///
    /// # Errors
    ///
    /// This returns a range error when the instant is out of range.
    #[inline]
    pub fn from_epoch_second(second: i64) -> Result<Instant, Error> {
        Instant::new(second, 0)
    }

    /// Creates a new instant from a number of milliseconds since the Unix
    /// epoch.
    ///
    /// # Errors
    ///
    /// This returns a range error when the instant is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::Instant;
    ///
    /// let instant = Instant::from_epoch_millis(-1)?;
    /// assert_eq!(instant.to_string(), "1969-12-31T23:59:59.999Z");
    /// assert_eq!(instant.as_epoch_millis(), -1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_epoch_millis(millis: i64) -> Result<Instant, Error> {
        let second = millis.div_euclid(1_000);
        // OK because the remainder is less than 1,000.
        let nanosecond = millis.rem_euclid(1_000) as i32 * 1_000_000;
        Instant::new(second, nanosecond)
    }

    /// Creates a new instant from a number of nanoseconds since the Unix
    /// epoch.
    pub(crate) fn from_epoch_nanos(nanos: i128) -> Result<Instant, Error> {
        let per = i128::from(NANOS_PER_SECOND);
        let second = i64::try_from(nanos.div_euclid(per))
            .map_err(|_| Error::slim_range("instant-second"))?;
        // OK because the remainder is less than a second.
        let nanosecond = nanos.rem_euclid(per) as i32;
        Instant::new(second, nanosecond)
    }

    /// Returns the current instant according to the given context's clock.
    #[inline]
    pub fn now(ctx: &Context) -> Instant {
        ctx.now()
    }

    /// Returns the number of whole seconds since the Unix epoch.
    ///
    /// This rounds toward negative infinity, so that the nanosecond
    /// fraction returned by [`Instant::subsec_nanosecond`] is never
    /// negative.
    #[inline]
    pub fn epoch_second(self) -> i64 {
        self.second
    }

    /// Returns the nanosecond fraction of this instant, in the range
    /// `0..=999_999_999`.
    #[inline]
    pub fn subsec_nanosecond(self) -> i32 {
        self.nanosecond
    }

    /// Returns the number of milliseconds since the Unix epoch, rounding
    /// toward negative infinity.
    #[inline]
    pub fn as_epoch_millis(self) -> i64 {
        self.second * 1_000 + i64::from(self.nanosecond / 1_000_000)
    }

    /// Returns the number of nanoseconds since the Unix epoch.
    #[inline]
    pub(crate) fn as_epoch_nanos(self) -> i128 {
        i128::from(self.second) * i128::from(NANOS_PER_SECOND)
            + i128::from(self.nanosecond)
    }

    /// Returns this instant in the given time zone.
    ///
    /// This never fails since every instant has exactly one civil datetime
    /// in any time zone.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{tz::{BuiltinRegistry, ZoneRegistry}, Instant};
    ///
    /// let tz = BuiltinRegistry::new().resolve("Europe/Paris")?;
    /// let instant: Instant = "2007-12-03T10:15:30Z".parse()?;
    /// let zdt = instant.to_zoned(tz);
    /// assert_eq!(zdt.to_string(), "2007-12-03T11:15:30+01:00[Europe/Paris]");
    /// assert_eq!(zdt.to_instant(), instant);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn to_zoned(self, tz: TimeZone) -> Zoned {
        Zoned::new(self, tz)
    }

    /// Returns this instant in the time zone with the given identifier,
    /// resolved against the given registry.
    ///
    /// # Errors
    ///
    /// This returns an unknown zone error when the identifier doesn't
    /// resolve.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{tz::BuiltinRegistry, Instant};
    ///
    /// let registry = BuiltinRegistry::new();
    /// let instant: Instant = "2007-12-03T10:15:30Z".parse()?;
    /// let zdt = instant.at_zone("Asia/Tokyo", &registry)?;
    /// assert_eq!(zdt.to_string(), "2007-12-03T19:15:30+09:00[Asia/Tokyo]");
    /// assert!(instant.at_zone("Asia/Atlantis", &registry).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn at_zone(
        self,
        id: &str,
        registry: &dyn ZoneRegistry,
    ) -> Result<Zoned, Error> {
        let tz = registry.resolve(id)?;
        Ok(self.to_zoned(tz))
    }

    /// Returns the civil datetime of this instant at the given offset.
    ///
    /// This never fails because the supported range of instants is
    /// narrower than the range of civil datetimes by more than the largest
    /// possible offset.
    #[inline]
    pub fn to_datetime(self, offset: Offset) -> DateTime {
        let local = self.second + i64::from(offset.seconds());
        DateTime::from_local_seconds(local, self.nanosecond)
    }

    /// Adds the given amount of a unit to this instant.
    ///
    /// Supported units are [`Unit::Nanosecond`] through [`Unit::Day`]. A
    /// day is always 86,400 seconds.
    ///
    /// # Errors
    ///
    /// This returns an invalid parameter error for weeks, months and years,
    /// and a range error when the result is out of range.
    pub fn plus(self, amount: i64, unit: Unit) -> Result<Instant, Error> {
        if unit > Unit::Day {
            return Err(Error::from(E::UnsupportedUnit {
                unit,
                what: "instant",
            }));
        }
        // Every unit up to days has a fixed length.
        let unit_nanos = unit.nanoseconds().unwrap_or(1);
        let nanos = i128::from(amount) * i128::from(unit_nanos);
        self.plus_nanos(nanos)
            .with_context(|| E::FailedAdd { unit, what: "instant" })
    }

    /// Subtracts the given amount of a unit from this instant.
    ///
    /// # Errors
    ///
    /// See [`Instant::plus`].
    #[inline]
    pub fn minus(self, amount: i64, unit: Unit) -> Result<Instant, Error> {
        self.plus(negate_amount(amount, unit)?, unit)
    }

    /// Adds an exact duration to this instant.
    ///
    /// # Errors
    ///
    /// This returns a range error when the result is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{Duration, Instant};
    ///
    /// let instant: Instant = "2007-12-03T10:15:30Z".parse()?;
    /// let later = instant.plus_duration(Duration::from_millis(1_500))?;
    /// assert_eq!(later.to_string(), "2007-12-03T10:15:31.500Z");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn plus_duration(self, duration: Duration) -> Result<Instant, Error> {
        self.plus_nanos(duration.to_nanos()).with_context(|| {
            E::FailedAdd { unit: Unit::Nanosecond, what: "instant" }
        })
    }

    /// Subtracts an exact duration from this instant.
    ///
    /// # Errors
    ///
    /// This returns a range error when the result is out of range.
    pub fn minus_duration(self, duration: Duration) -> Result<Instant, Error> {
        self.plus_nanos(-duration.to_nanos()).with_context(|| {
            E::FailedAdd { unit: Unit::Nanosecond, what: "instant" }
        })
    }

    fn plus_nanos(self, nanos: i128) -> Result<Instant, Error> {
        if nanos == 0 {
            return Ok(self);
        }
        Instant::from_epoch_nanos(self.as_epoch_nanos() + nanos)
    }
}

impl core::fmt::Debug for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::StdFmtWrite;

        iso::DEFAULT_PRINTER
            .print_instant(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::str::FromStr for Instant {
    type Err = Error;

    fn from_str(string: &str) -> Result<Instant, Error> {
        iso::DEFAULT_PARSER.parse_instant(string.as_bytes())
    }
}

impl From<Zoned> for Instant {
    #[inline]
    fn from(zdt: Zoned) -> Instant {
        zdt.to_instant()
    }
}

impl<'a> From<&'a Zoned> for Instant {
    #[inline]
    fn from(zdt: &'a Zoned) -> Instant {
        zdt.to_instant()
    }
}

impl TryFrom<std::time::SystemTime> for Instant {
    type Error = Error;

    fn try_from(system_time: std::time::SystemTime) -> Result<Instant, Error> {
        let unix_epoch = std::time::SystemTime::UNIX_EPOCH;
        let (duration, sign) = match system_time.duration_since(unix_epoch) {
            Ok(duration) => (duration, 1),
            Err(err) => (err.duration(), -1),
        };
        let nanos = i128::try_from(duration.as_nanos())
            .map_err(|_| Error::slim_range("system-time"))?;
        Instant::from_epoch_nanos(sign * nanos)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Instant {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Instant {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Instant, D::Error> {
        use serde::de;

        struct InstantVisitor;

        impl<'de> de::Visitor<'de> for InstantVisitor {
            type Value = Instant;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("an instant string with an offset")
            }

            fn visit_str<E: de::Error>(
                self,
                value: &str,
            ) -> Result<Instant, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(InstantVisitor)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Instant {
    fn arbitrary(g: &mut quickcheck::Gen) -> Instant {
        let span = Instant::MAX.second - Instant::MIN.second + 1;
        let second = i64::arbitrary(g).rem_euclid(span) + Instant::MIN.second;
        let nanosecond = i32::arbitrary(g).rem_euclid(1_000_000_000);
        Instant { second, nanosecond }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Instant>> {
        Box::new(
            (self.second, self.nanosecond)
                .shrink()
                .filter_map(|(s, n)| Instant::new(s, n).ok()),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::civil::date;

    use super::*;

    #[test]
    fn bounds() {
        assert_eq!(Instant::MIN.to_string(), "-9999-01-02T00:00:00Z");
        assert_eq!(Instant::MAX.to_string(), "9999-12-30T23:59:59.999999999Z");
        assert_eq!(
            Instant::MIN.to_datetime(Offset::MIN),
            date(-9999, 1, 1).at(6, 0, 0, 0),
        );
        assert_eq!(
            Instant::MIN.to_zoned(TimeZone::fixed(Offset::constant(-5))).to_string(),
            "-9999-01-01T19:00:00-05:00",
        );
        assert_eq!(
            Instant::MAX.to_datetime(Offset::MAX),
            date(9999, 12, 31).at(17, 59, 59, 999_999_999),
        );
        insta::assert_snapshot!(
            Instant::from_epoch_second(Instant::MAX.epoch_second() + 1).unwrap_err(),
            @"parameter 'instant-second' with value 253402214400 is not in the required range of -377705030400..=253402214399",
        );
    }

    #[test]
    fn millis() {
        let i = Instant::from_epoch_millis(1_500).unwrap();
        assert_eq!((i.epoch_second(), i.subsec_nanosecond()), (1, 500_000_000));
        let i = Instant::from_epoch_millis(-1_500).unwrap();
        assert_eq!((i.epoch_second(), i.subsec_nanosecond()), (-2, 500_000_000));
        assert_eq!(i.as_epoch_millis(), -1_500);
    }

    #[test]
    fn arithmetic() {
        let i = Instant::from_epoch_second(1196676930).unwrap();
        assert_eq!(i.plus(1, Unit::Day).unwrap().epoch_second(), 1196763330);
        assert_eq!(i.minus(1, Unit::HalfDay).unwrap().epoch_second(), 1196633730);
        assert_eq!(
            i.plus(1, Unit::Microsecond).unwrap().subsec_nanosecond(),
            1_000,
        );
        assert!(i.plus(1, Unit::Week).unwrap_err().is_invalid_parameter());
        assert!(Instant::MAX.plus(1, Unit::Nanosecond).unwrap_err().is_range());
        assert!(Instant::MIN.minus(1, Unit::Nanosecond).unwrap_err().is_range());
        assert!(i.plus(i64::MAX, Unit::Day).unwrap_err().is_range());
    }

    #[test]
    fn system_time() {
        let unix_epoch = std::time::SystemTime::UNIX_EPOCH;
        let before = unix_epoch - std::time::Duration::from_millis(1_500);
        let instant = Instant::try_from(before).unwrap();
        assert_eq!(instant.as_epoch_millis(), -1_500);
        assert_eq!(Instant::try_from(unix_epoch).unwrap(), Instant::UNIX_EPOCH);
    }

    quickcheck::quickcheck! {
        fn prop_plus_minus_days(i: Instant, days: i16) -> quickcheck::TestResult {
            let Ok(moved) = i.plus(i64::from(days), Unit::Day) else {
                return quickcheck::TestResult::discard();
            };
            let back = moved.minus(i64::from(days), Unit::Day).unwrap();
            quickcheck::TestResult::from_bool(back == i)
        }

        fn prop_zoned_roundtrip(i: Instant, offset: Offset) -> bool {
            i.to_zoned(TimeZone::fixed(offset)).to_instant() == i
        }

        fn prop_display_parse_roundtrip(i: Instant) -> bool {
            i.to_string().parse::<Instant>().unwrap() == i
        }

        fn prop_offset_roundtrip(i: Instant, offset: Offset) -> bool {
            offset.to_instant(i.to_datetime(offset)).unwrap() == i
        }
    }
}
