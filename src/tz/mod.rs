/*!
Routines for interacting with time zones and the zone registries that
resolve them.

The primary type in this module is [`TimeZone`]. A `TimeZone` maps any
[`Instant`] to exactly one [`Offset`], and maps a civil
[`DateTime`](crate::civil::DateTime) to zero, one or two offsets (see
[`AmbiguousOffset`]).

Time zones are obtained by resolving an identifier with a
[`ZoneRegistry`]. Identifiers come in four shapes:

* `Z` or a bare offset like `+05:30`, which resolve to a fixed offset
without consulting the registry.
* An offset prefixed with `UTC`, `GMT` or `UT`, like `GMT+2`. The prefix
is kept in the identifier, but [`TimeZone::normalized`] returns the bare
offset.
* A region name like `America/New_York`, which is looked up in the
registry.

This crate ships two registries: [`BuiltinRegistry`], which knows a fixed
set of common regions described by POSIX rules, and [`ZoneInfoRegistry`],
which reads the TZif files of the system's zoneinfo database.

# Example

```
use civiltime::{civil::date, tz::{BuiltinRegistry, ZoneRegistry}};

let registry = BuiltinRegistry::new();
let tz = registry.resolve("America/New_York")?;
let zdt = tz.to_zoned(date(2007, 12, 3).at(10, 15, 30, 0))?;
assert_eq!(zdt.to_string(), "2007-12-03T10:15:30-05:00[America/New_York]");

let tz = registry.resolve("GMT+2")?;
assert_eq!(tz.id(), "GMT+02:00");
assert_eq!(tz.normalized().id(), "+02:00");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use std::sync::Arc;

use crate::{civil::DateTime, error::Error, Instant, Zoned};

use self::{posix::PosixTimeZone, tzif::Tzif};

pub use self::{
    ambiguous::{AmbiguousOffset, AmbiguousZoned, Disambiguation},
    db::{BuiltinRegistry, ZoneInfoRegistry, ZoneRegistry},
    offset::Offset,
};

pub(crate) use self::db::{FixedOnly, WithBuiltin};

mod ambiguous;
mod db;
mod offset;
mod posix;
pub(crate) mod system;
mod transitions;
mod tzif;

/// A representation of a time zone.
///
/// A time zone is a set of rules for determining the civil time, via an
/// offset from UTC, in a particular geographic region. Every time zone has
/// an identifier, returned by [`TimeZone::id`], and two time zones are equal
/// exactly when their identifiers are equal.
///
/// Cloning a `TimeZone` is cheap: it is either a constant (for
/// [`TimeZone::UTC`]) or a reference counted pointer.
///
/// # Example
///
/// ```
/// use civiltime::{civil::date, tz::{Offset, TimeZone}, Instant};
///
/// let tz = TimeZone::posix("CET-1CEST,M3.5.0,M10.5.0/3")?;
/// let summer = Instant::from_epoch_second(1719835200)?;
/// assert_eq!(tz.to_offset(summer), Offset::constant(2));
/// let winter = Instant::from_epoch_second(1196655330)?;
/// assert_eq!(tz.to_offset(winter), Offset::constant(1));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct TimeZone {
    /// `None` corresponds to `Z`, the fixed UTC offset zone.
    inner: Option<Arc<TimeZoneInner>>,
}

#[derive(Debug)]
struct TimeZoneInner {
    id: Box<str>,
    kind: TimeZoneKind,
}

#[derive(Debug)]
enum TimeZoneKind {
    Fixed(Offset),
    Posix(PosixTimeZone),
    Tzif(Tzif),
}

impl TimeZone {
    /// The fixed UTC offset time zone. Its identifier is `Z`.
    ///
    /// This is distinct from a region like `Etc/UTC` or a prefixed zone
    /// like `UTC`, although both of those normalize to this zone.
    pub const UTC: TimeZone = TimeZone { inner: None };

    /// Creates a time zone with a single fixed offset.
    ///
    /// The identifier of the zone returned is the offset's `Display`
    /// output, so `Offset::UTC` gives [`TimeZone::UTC`].
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::tz::{Offset, TimeZone};
    ///
    /// assert_eq!(TimeZone::fixed(Offset::constant(-5)).id(), "-05:00");
    /// assert_eq!(TimeZone::fixed(Offset::UTC), TimeZone::UTC);
    /// ```
    pub fn fixed(offset: Offset) -> TimeZone {
        if offset == Offset::UTC {
            return TimeZone::UTC;
        }
        TimeZone::fixed_with_id(&offset.to_string(), offset)
    }

    /// Creates a time zone from a POSIX `TZ` rule string, like
    /// `EST5EDT,M3.2.0,M11.1.0`.
    ///
    /// The identifier of the zone is the rule string itself. A DST
    /// abbreviation without a rule uses the current United States rule.
    ///
    /// # Errors
    ///
    /// This returns an error if the rule string isn't valid.
    pub fn posix(rule: &str) -> Result<TimeZone, Error> {
        let posix = PosixTimeZone::parse(rule)?;
        Ok(TimeZone::posix_with_id(rule, posix))
    }

    /// Like [`TimeZone::posix`], but the identifier of the zone is the name
    /// given instead of the rule string.
    ///
    /// This is useful for implementing a [`ZoneRegistry`] whose regions
    /// are described by POSIX rules.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::tz::TimeZone;
    ///
    /// let tz = TimeZone::posix_with_name("Moon/Tranquility", "LST-3")?;
    /// assert_eq!(tz.id(), "Moon/Tranquility");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn posix_with_name(
        name: &str,
        rule: &str,
    ) -> Result<TimeZone, Error> {
        let posix = PosixTimeZone::parse(rule)?;
        Ok(TimeZone::posix_with_id(name, posix))
    }

    /// Creates a time zone from TZif formatted data, as found in a zoneinfo
    /// database. The name given becomes the identifier of the zone.
    ///
    /// # Errors
    ///
    /// This returns an error if the data isn't valid TZif.
    pub fn tzif(name: &str, data: &[u8]) -> Result<TimeZone, Error> {
        let tzif = Tzif::parse(name, data)?;
        Ok(TimeZone::new(name, TimeZoneKind::Tzif(tzif)))
    }

    pub(crate) fn fixed_with_id(id: &str, offset: Offset) -> TimeZone {
        TimeZone::new(id, TimeZoneKind::Fixed(offset))
    }

    pub(crate) fn posix_with_id(id: &str, posix: PosixTimeZone) -> TimeZone {
        TimeZone::new(id, TimeZoneKind::Posix(posix))
    }

    fn new(id: &str, kind: TimeZoneKind) -> TimeZone {
        let inner = TimeZoneInner { id: id.into(), kind };
        TimeZone { inner: Some(Arc::new(inner)) }
    }

    /// Returns the identifier of this time zone.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::tz::TimeZone;
    ///
    /// assert_eq!(TimeZone::UTC.id(), "Z");
    /// ```
    pub fn id(&self) -> &str {
        match self.inner {
            None => "Z",
            Some(ref inner) => &inner.id,
        }
    }

    /// Returns the offset of this time zone if it never changes.
    pub fn to_fixed_offset(&self) -> Option<Offset> {
        let Some(ref inner) = self.inner else { return Some(Offset::UTC) };
        match inner.kind {
            TimeZoneKind::Fixed(offset) => Some(offset),
            TimeZoneKind::Posix(ref posix) => posix.to_fixed_offset(),
            TimeZoneKind::Tzif(ref tzif) => tzif.to_fixed_offset(),
        }
    }

    /// Returns true when this time zone always uses the same offset.
    pub fn is_fixed(&self) -> bool {
        self.to_fixed_offset().is_some()
    }

    /// Returns the simplest equivalent time zone.
    ///
    /// When this time zone has a single fixed offset, then the plain offset
    /// zone (with the offset as its identifier) is returned. Otherwise a
    /// clone of this zone is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::tz::{BuiltinRegistry, TimeZone, ZoneRegistry};
    ///
    /// let registry = BuiltinRegistry::new();
    /// assert_eq!(registry.resolve("UTC")?.normalized(), TimeZone::UTC);
    /// assert_eq!(registry.resolve("UT-3")?.normalized().id(), "-03:00");
    /// assert_eq!(registry.resolve("Asia/Tokyo")?.normalized().id(), "+09:00");
    /// assert_eq!(
    ///     registry.resolve("Europe/Paris")?.normalized().id(),
    ///     "Europe/Paris",
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn normalized(&self) -> TimeZone {
        match self.to_fixed_offset() {
            Some(offset) => TimeZone::fixed(offset),
            None => self.clone(),
        }
    }

    /// Returns the offset in effect at the given instant.
    pub fn to_offset(&self, instant: Instant) -> Offset {
        let Some(ref inner) = self.inner else { return Offset::UTC };
        let timestamp = instant.epoch_second();
        match inner.kind {
            TimeZoneKind::Fixed(offset) => offset,
            TimeZoneKind::Posix(ref posix) => posix.to_offset(timestamp),
            TimeZoneKind::Tzif(ref tzif) => tzif.to_offset(timestamp),
        }
    }

    /// Returns the civil datetime of the given instant in this time zone.
    pub fn to_datetime(&self, instant: Instant) -> DateTime {
        self.to_offset(instant).to_datetime(instant)
    }

    /// Returns the possibly ambiguous offset of the given civil datetime in
    /// this time zone.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::date, tz::{AmbiguousOffset, Offset, TimeZone}};
    ///
    /// let tz = TimeZone::posix("EST5EDT,M3.2.0,M11.1.0")?;
    /// assert_eq!(
    ///     tz.to_ambiguous_offset(date(2024, 3, 10).at(2, 30, 0, 0)),
    ///     AmbiguousOffset::Gap {
    ///         before: Offset::constant(-5),
    ///         after: Offset::constant(-4),
    ///     },
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_ambiguous_offset(&self, dt: DateTime) -> AmbiguousOffset {
        let Some(ref inner) = self.inner else {
            return AmbiguousOffset::Unambiguous { offset: Offset::UTC };
        };
        let local = dt.to_local_seconds();
        match inner.kind {
            TimeZoneKind::Fixed(offset) => {
                AmbiguousOffset::Unambiguous { offset }
            }
            TimeZoneKind::Posix(ref posix) => posix.to_ambiguous_offset(local),
            TimeZoneKind::Tzif(ref tzif) => tzif.to_ambiguous_offset(local),
        }
    }

    /// Returns the given civil datetime in this time zone without resolving
    /// any ambiguity yet.
    pub fn to_ambiguous_zoned(&self, dt: DateTime) -> AmbiguousZoned {
        let offset = self.to_ambiguous_offset(dt);
        AmbiguousZoned::new(self.clone(), dt, offset)
    }

    /// Converts the given civil datetime to a zoned datetime in this time
    /// zone using the [`Disambiguation::Compatible`] policy.
    ///
    /// A datetime in a gap is moved forward by the length of the gap and
    /// gets the offset after the gap. A datetime in a fold gets the earlier
    /// of its two offsets.
    ///
    /// # Errors
    ///
    /// This returns an error when the resulting instant is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::date, tz::TimeZone};
    ///
    /// let tz = TimeZone::posix("EST5EDT,M3.2.0,M11.1.0")?;
    /// let zdt = tz.to_zoned(date(2024, 3, 10).at(2, 30, 0, 0))?;
    /// assert_eq!(zdt.to_string(), "2024-03-10T03:30:00-04:00[EST5EDT,M3.2.0,M11.1.0]");
    /// let zdt = tz.to_zoned(date(2024, 11, 3).at(1, 30, 0, 0))?;
    /// assert_eq!(zdt.offset().to_string(), "-04:00");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_zoned(&self, dt: DateTime) -> Result<Zoned, Error> {
        self.to_ambiguous_zoned(dt).compatible()
    }
}

impl Eq for TimeZone {}

impl PartialEq for TimeZone {
    fn eq(&self, rhs: &TimeZone) -> bool {
        self.id() == rhs.id()
    }
}

impl core::hash::Hash for TimeZone {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl core::fmt::Debug for TimeZone {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_tuple("TimeZone").field(&self.id()).finish()
    }
}

impl core::fmt::Display for TimeZone {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use crate::civil::date;

    use super::*;

    #[test]
    fn identity() {
        let a = TimeZone::posix("EST5EDT").unwrap();
        let b = TimeZone::posix("EST5EDT").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, TimeZone::posix("EST5").unwrap());
        assert_eq!(TimeZone::fixed(Offset::ZERO), TimeZone::UTC);
        assert_eq!(format!("{:?}", TimeZone::UTC), r#"TimeZone("Z")"#);
        assert_eq!(TimeZone::fixed(Offset::constant(9)).to_string(), "+09:00");
    }

    #[test]
    fn fixed_and_normalized() {
        let tz = TimeZone::fixed_with_id("UTC", Offset::UTC);
        assert!(tz.is_fixed());
        assert_ne!(tz, TimeZone::UTC);
        assert_eq!(tz.normalized(), TimeZone::UTC);

        let tz = TimeZone::posix("JST-9").unwrap();
        assert!(tz.is_fixed());
        assert_eq!(tz.normalized().id(), "+09:00");

        let tz = TimeZone::posix("EST5EDT").unwrap();
        assert!(!tz.is_fixed());
        assert_eq!(tz.normalized(), tz);
    }

    #[test]
    fn posix_offset_out_of_range() {
        assert!(TimeZone::posix("XXX-19").unwrap_err().is_range());
        assert!(TimeZone::posix("AAA+24:00:00BBB").unwrap_err().is_range());
        let tz = TimeZone::posix("XXX-18").unwrap();
        assert_eq!(tz.to_fixed_offset(), Some(Offset::MAX));
    }

    #[test]
    fn compatible_gap_and_fold() {
        let tz = TimeZone::posix("EST5EDT,M3.2.0,M11.1.0").unwrap();

        let zdt = tz.to_zoned(date(2024, 3, 10).at(2, 30, 0, 0)).unwrap();
        assert_eq!(zdt.datetime(), date(2024, 3, 10).at(3, 30, 0, 0));
        assert_eq!(zdt.offset(), Offset::constant(-4));

        let zdt = tz.to_zoned(date(2024, 11, 3).at(1, 30, 0, 0)).unwrap();
        assert_eq!(zdt.datetime(), date(2024, 11, 3).at(1, 30, 0, 0));
        assert_eq!(zdt.offset(), Offset::constant(-4));

        let zdt = tz
            .to_ambiguous_zoned(date(2024, 11, 3).at(1, 30, 0, 0))
            .later()
            .unwrap();
        assert_eq!(zdt.offset(), Offset::constant(-5));
    }

    #[test]
    fn tzif_zone() {
        let data = tzif::build_v2(
            &[-18000, -14400],
            &[(1710054000, 1), (1730613600, 0)],
            "EST5EDT,M3.2.0,M11.1.0",
        );
        let tz = TimeZone::tzif("America/New_York", &data).unwrap();
        assert_eq!(tz.id(), "America/New_York");
        assert!(!tz.is_fixed());
        let instant = Instant::from_epoch_second(1720000000).unwrap();
        assert_eq!(tz.to_offset(instant), Offset::constant(-4));
    }
}
