use crate::{
    civil::DateTime,
    error::{fmt::iso::Error as E, Error, ErrorContext},
    fmt::iso,
    Instant,
};

/// Represents a fixed time zone offset.
///
/// Negative offsets correspond to time zones west of the prime meridian,
/// while positive offsets correspond to time zones east of the prime
/// meridian. Equivalently, in all cases, `civil-time - offset = UTC`.
///
/// Offsets in this crate have whole-minute precision and are limited to
/// the range `-18:00..=+18:00`. Offsets with second precision that appear
/// in time zone data (usually local mean time from before standardization)
/// are truncated toward zero.
///
/// # Display format
///
/// An offset of zero is printed as `Z`. Every other offset is printed as
/// `±HH:MM`:
///
/// ```
/// use civiltime::tz::Offset;
///
/// assert_eq!(Offset::UTC.to_string(), "Z");
/// assert_eq!(Offset::constant(2).to_string(), "+02:00");
/// assert_eq!(Offset::new(-3, -30)?.to_string(), "-03:30");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Parsing
///
/// `Offset` implements `FromStr` and accepts `Z`, `±H`, `±HH`, `±HH:MM` and
/// `±HHMM`:
///
/// ```
/// use civiltime::tz::Offset;
///
/// assert_eq!("Z".parse::<Offset>()?, Offset::UTC);
/// assert_eq!("+2".parse::<Offset>()?, Offset::constant(2));
/// assert_eq!("-0530".parse::<Offset>()?, Offset::new(-5, -30)?);
/// assert!("+18:01".parse::<Offset>().is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Offset {
    minutes: i16,
}

impl Offset {
    /// The minimum possible time zone offset, `-18:00`.
    pub const MIN: Offset = Offset { minutes: -Offset::MAX_MINUTES };

    /// The maximum possible time zone offset, `+18:00`.
    pub const MAX: Offset = Offset { minutes: Offset::MAX_MINUTES };

    /// The offset corresponding to UTC. That is, no offset at all.
    ///
    /// This is defined to always be equivalent to `Offset::ZERO`, but it is
    /// semantically distinct. This ought to be used when UTC is desired
    /// specifically, while `Offset::ZERO` ought to be used when one wants to
    /// express "no offset."
    pub const UTC: Offset = Offset::ZERO;

    /// The offset corresponding to no offset at all.
    pub const ZERO: Offset = Offset { minutes: 0 };

    const MAX_MINUTES: i16 = 18 * 60;

    /// Creates a new time zone offset in a `const` context from a given
    /// number of hours.
    ///
    /// # Panics
    ///
    /// This routine panics when the given hours are out of range. Namely,
    /// `hours` must be in the range `-18..=18`.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::tz::Offset;
    ///
    /// let o = Offset::constant(-5);
    /// assert_eq!(o.minutes(), -300);
    /// ```
    #[inline]
    pub const fn constant(hours: i8) -> Offset {
        if !(-18 <= hours && hours <= 18) {
            panic!("invalid time zone offset hours")
        }
        Offset { minutes: hours as i16 * 60 }
    }

    /// Creates a new offset from hours and minutes.
    ///
    /// Both components must have the same sign (or be zero), `minutes` must
    /// be in the range `-59..=59` and the total must be within `±18:00`.
    ///
    /// # Errors
    ///
    /// This returns a range error when any of the above conditions don't
    /// hold.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::tz::Offset;
    ///
    /// assert_eq!(Offset::new(5, 30)?.minutes(), 330);
    /// assert_eq!(Offset::new(-5, -30)?.minutes(), -330);
    /// assert!(Offset::new(-5, 30).is_err());
    /// assert!(Offset::new(18, 1).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(hours: i8, minutes: i8) -> Result<Offset, Error> {
        if !(-18..=18).contains(&hours) {
            return Err(Error::range("offset-hours", hours, -18, 18));
        }
        if !(-59..=59).contains(&minutes) {
            return Err(Error::range("offset-minutes", minutes, -59, 59));
        }
        if (hours > 0 && minutes < 0) || (hours < 0 && minutes > 0) {
            return Err(Error::slim_range("offset-minutes-sign"));
        }
        Offset::from_minutes(i32::from(hours) * 60 + i32::from(minutes))
    }

    /// Creates a new offset from a total number of minutes.
    ///
    /// # Errors
    ///
    /// This returns a range error when the total is outside of
    /// `-1080..=1080`.
    pub fn from_minutes(minutes: i32) -> Result<Offset, Error> {
        let max = i32::from(Offset::MAX_MINUTES);
        if !(-max..=max).contains(&minutes) {
            return Err(Error::range("offset-total-minutes", minutes, -max, max));
        }
        // OK because of the range check above.
        Ok(Offset { minutes: minutes as i16 })
    }

    /// Creates a new offset from a whole number of hours.
    ///
    /// # Errors
    ///
    /// This returns a range error when `hours` is outside of `-18..=18`.
    pub fn from_hours(hours: i8) -> Result<Offset, Error> {
        Offset::new(hours, 0)
    }

    /// Creates an offset from a number of seconds that may not be a whole
    /// number of minutes. The seconds are truncated toward zero.
    ///
    /// This is used for offsets read from time zone data.
    ///
    /// # Errors
    ///
    /// This returns a range error when the truncated offset is beyond
    /// `±18:00`.
    pub(crate) fn from_seconds_truncated(
        seconds: i32,
    ) -> Result<Offset, Error> {
        let max = i32::from(Offset::MAX_MINUTES);
        let minutes = seconds / 60;
        if !(-max..=max).contains(&minutes) {
            let limit = max * 60 + 59;
            let (min, max) = (-limit, limit);
            return Err(Error::range("offset-seconds", seconds, min, max));
        }
        Ok(Offset { minutes: minutes as i16 })
    }

    /// Like `from_seconds_truncated`, for seconds already checked by it.
    pub(crate) fn from_checked_seconds(seconds: i32) -> Offset {
        debug_assert!(Offset::from_seconds_truncated(seconds).is_ok());
        Offset { minutes: (seconds / 60) as i16 }
    }

    /// Returns the total number of minutes in this offset.
    #[inline]
    pub fn minutes(self) -> i32 {
        i32::from(self.minutes)
    }

    /// Returns the total number of seconds in this offset.
    ///
    /// This is always a multiple of `60`.
    #[inline]
    pub fn seconds(self) -> i32 {
        i32::from(self.minutes) * 60
    }

    /// Returns the negation of this offset.
    ///
    /// Since the range is symmetric, this never fails.
    #[inline]
    pub fn negate(self) -> Offset {
        Offset { minutes: -self.minutes }
    }

    /// Returns true if and only if this offset is less than zero.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.minutes < 0
    }

    /// Converts the given instant to a civil datetime using this offset.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::date, tz::Offset, Instant};
    ///
    /// let instant = Instant::from_epoch_second(1196655330)?;
    /// assert_eq!(
    ///     Offset::constant(-5).to_datetime(instant),
    ///     date(2007, 12, 2).at(23, 15, 30, 0),
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn to_datetime(self, instant: Instant) -> DateTime {
        instant.to_datetime(self)
    }

    /// Converts the given civil datetime to an instant using this offset.
    ///
    /// # Errors
    ///
    /// This returns an error if the result would be outside the supported
    /// range of `Instant`. This can only happen near the boundaries of
    /// `DateTime`.
    #[inline]
    pub fn to_instant(self, dt: DateTime) -> Result<Instant, Error> {
        dt.to_instant_with_offset(self)
    }
}

impl core::fmt::Debug for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Offset({self})")
    }
}

impl core::fmt::Display for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::StdFmtWrite;

        iso::DEFAULT_PRINTER
            .print_offset(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::str::FromStr for Offset {
    type Err = Error;

    fn from_str(string: &str) -> Result<Offset, Error> {
        iso::DEFAULT_PARSER
            .parse_offset(string.as_bytes())
            .context(E::failed("offset", string.as_bytes()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Offset {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Offset {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Offset, D::Error> {
        use serde::de;

        struct OffsetVisitor;

        impl<'de> de::Visitor<'de> for OffsetVisitor {
            type Value = Offset;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a UTC offset string")
            }

            fn visit_str<E: de::Error>(
                self,
                value: &str,
            ) -> Result<Offset, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(OffsetVisitor)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Offset {
    fn arbitrary(g: &mut quickcheck::Gen) -> Offset {
        let max = i32::from(Offset::MAX_MINUTES);
        let minutes = i32::arbitrary(g).rem_euclid(2 * max + 1) - max;
        Offset { minutes: minutes as i16 }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Offset>> {
        Box::new(
            self.minutes
                .shrink()
                .filter(|m| m.abs() <= Offset::MAX_MINUTES)
                .map(|minutes| Offset { minutes }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        insta::assert_snapshot!(Offset::UTC, @"Z");
        insta::assert_snapshot!(Offset::MAX, @"+18:00");
        insta::assert_snapshot!(Offset::MIN, @"-18:00");
        insta::assert_snapshot!(Offset::new(5, 45).unwrap(), @"+05:45");
        insta::assert_snapshot!(Offset::new(0, -30).unwrap(), @"-00:30");
        insta::assert_snapshot!(
            format!("{:?}", Offset::constant(-5)),
            @"Offset(-05:00)",
        );
    }

    #[test]
    fn constructors() {
        assert_eq!(Offset::from_hours(-18).unwrap(), Offset::MIN);
        assert!(Offset::from_hours(19).unwrap_err().is_range());
        assert!(Offset::from_minutes(1081).unwrap_err().is_range());
        assert!(Offset::new(1, -1).unwrap_err().is_range());
        assert!(Offset::new(1, 60).unwrap_err().is_range());
    }

    #[test]
    fn truncated_seconds() {
        // Local mean time in Amsterdam was +00:19:32.
        let truncated = |s| Offset::from_seconds_truncated(s).unwrap();
        assert_eq!(truncated(1172).minutes(), 19);
        assert_eq!(truncated(-17762).minutes(), -296);
        assert_eq!(truncated(-64_859), Offset::MIN);
        assert!(Offset::from_seconds_truncated(-64_860).unwrap_err().is_range());
        insta::assert_snapshot!(
            Offset::from_seconds_truncated(-90_000).unwrap_err(),
            @"parameter 'offset-seconds' with value -90000 is not in the required range of -64859..=64859",
        );
    }

    #[test]
    fn parse() {
        let p = |s: &str| s.parse::<Offset>();
        assert_eq!(p("Z").unwrap(), Offset::UTC);
        assert_eq!(p("z").unwrap(), Offset::UTC);
        assert_eq!(p("+00:00").unwrap(), Offset::UTC);
        assert_eq!(p("-9").unwrap(), Offset::constant(-9));
        assert_eq!(p("+0530").unwrap(), Offset::new(5, 30).unwrap());
        assert_eq!(p("+05:30").unwrap(), Offset::new(5, 30).unwrap());

        let err = p("+19:00").unwrap_err();
        assert!(err.is_parse());
        assert!(err.is_range());
        assert!(p("05:00").unwrap_err().is_parse());
        assert!(p("+05:").unwrap_err().is_parse());
        assert!(p("+05:30:00").unwrap_err().is_parse());
    }

    quickcheck::quickcheck! {
        fn prop_display_parse(offset: Offset) -> bool {
            offset.to_string().parse::<Offset>().unwrap() == offset
        }

        fn prop_negate(offset: Offset) -> bool {
            offset.negate().negate() == offset
                && offset.negate().minutes() == -offset.minutes()
        }
    }
}
