use crate::{
    civil::DateTime,
    error::{tz::ambiguous::Error as E, Error, ErrorContext},
    tz::{Offset, TimeZone},
    Zoned,
};

/// Configuration for resolving ambiguous datetimes in a particular time
/// zone.
///
/// A civil datetime is ambiguous in a time zone when it either falls in a
/// gap (like the hour skipped when clocks move forward) or a fold (like the
/// hour repeated when clocks move back). This type controls which instant
/// is selected in those cases.
///
/// # Example
///
/// ```
/// use civiltime::{civil::date, tz::{BuiltinRegistry, Disambiguation, ZoneRegistry}};
///
/// let tz = BuiltinRegistry::new().resolve("America/New_York")?;
/// let dt = date(2024, 3, 10).at(2, 30, 0, 0);
///
/// let zdt = tz.to_ambiguous_zoned(dt).disambiguate(Disambiguation::Compatible)?;
/// assert_eq!(zdt.to_string(), "2024-03-10T03:30:00-04:00[America/New_York]");
///
/// let zdt = tz.to_ambiguous_zoned(dt).disambiguate(Disambiguation::Earlier)?;
/// assert_eq!(zdt.to_string(), "2024-03-10T01:30:00-05:00[America/New_York]");
///
/// assert!(tz.to_ambiguous_zoned(dt).disambiguate(Disambiguation::Reject).is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum Disambiguation {
    /// In a gap, the offset before the gap is used, which moves the clock
    /// time forward by the length of the gap. In a fold, the offset before
    /// the fold (the earlier instant) is used.
    ///
    /// This is the policy used by every conversion in this crate that
    /// doesn't let the caller choose.
    #[default]
    Compatible,
    /// Always selects the earliest instant.
    Earlier,
    /// Always selects the latest instant.
    Later,
    /// Returns an error for any datetime in a gap or a fold.
    Reject,
}

/// A possibly ambiguous [`Offset`].
///
/// This is returned by [`TimeZone::to_ambiguous_offset`] and describes the
/// relationship between a civil datetime and the offsets in effect around
/// it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AmbiguousOffset {
    /// The civil datetime maps to exactly one instant.
    Unambiguous {
        /// The offset of that instant.
        offset: Offset,
    },
    /// The civil datetime was skipped by a forward transition.
    Gap {
        /// The offset in effect before the transition.
        before: Offset,
        /// The offset in effect after the transition.
        after: Offset,
    },
    /// The civil datetime was repeated by a backward transition.
    Fold {
        /// The offset in effect before the transition.
        before: Offset,
        /// The offset in effect after the transition.
        after: Offset,
    },
}

impl AmbiguousOffset {
    /// Returns true when this is a gap or a fold.
    pub fn is_ambiguous(&self) -> bool {
        !matches!(*self, AmbiguousOffset::Unambiguous { .. })
    }

    /// Resolves this to a single offset with the given policy.
    fn resolve(&self, policy: Disambiguation) -> Result<Offset, E> {
        use self::AmbiguousOffset::*;
        use self::Disambiguation::*;

        Ok(match (*self, policy) {
            (Unambiguous { offset }, _) => offset,
            (Gap { before, .. }, Compatible | Later) => before,
            (Gap { after, .. }, Earlier) => after,
            (Fold { before, .. }, Compatible | Earlier) => before,
            (Fold { after, .. }, Later) => after,
            (Gap { before, after }, Reject) => {
                return Err(E::BecauseGap { before, after })
            }
            (Fold { before, after }, Reject) => {
                return Err(E::BecauseFold { before, after })
            }
        })
    }
}

/// A civil datetime in a time zone that may not yet correspond to a single
/// instant.
///
/// Use one of [`AmbiguousZoned::compatible`], [`AmbiguousZoned::earlier`],
/// [`AmbiguousZoned::later`], [`AmbiguousZoned::unambiguous`] or
/// [`AmbiguousZoned::disambiguate`] to get a [`Zoned`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AmbiguousZoned {
    time_zone: TimeZone,
    datetime: DateTime,
    offset: AmbiguousOffset,
}

impl AmbiguousZoned {
    pub(crate) fn new(
        time_zone: TimeZone,
        datetime: DateTime,
        offset: AmbiguousOffset,
    ) -> AmbiguousZoned {
        AmbiguousZoned { time_zone, datetime, offset }
    }

    /// Returns the time zone.
    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// Returns the civil datetime that was converted.
    pub fn datetime(&self) -> DateTime {
        self.datetime
    }

    /// Returns the possibly ambiguous offset of the datetime.
    pub fn offset(&self) -> AmbiguousOffset {
        self.offset
    }

    /// Returns true when the datetime is in a gap or a fold.
    pub fn is_ambiguous(&self) -> bool {
        self.offset.is_ambiguous()
    }

    /// Resolves with [`Disambiguation::Compatible`].
    pub fn compatible(self) -> Result<Zoned, Error> {
        self.disambiguate(Disambiguation::Compatible)
    }

    /// Resolves with [`Disambiguation::Earlier`].
    pub fn earlier(self) -> Result<Zoned, Error> {
        self.disambiguate(Disambiguation::Earlier)
    }

    /// Resolves with [`Disambiguation::Later`].
    pub fn later(self) -> Result<Zoned, Error> {
        self.disambiguate(Disambiguation::Later)
    }

    /// Resolves with [`Disambiguation::Reject`].
    pub fn unambiguous(self) -> Result<Zoned, Error> {
        self.disambiguate(Disambiguation::Reject)
    }

    /// Resolves this datetime to a [`Zoned`] using the given policy.
    ///
    /// # Errors
    ///
    /// This returns an error when the policy is [`Disambiguation::Reject`]
    /// and the datetime is ambiguous, or when the resulting instant is out
    /// of range.
    pub fn disambiguate(self, policy: Disambiguation) -> Result<Zoned, Error> {
        let id = self.time_zone.id();
        let offset = self
            .offset
            .resolve(policy)
            .with_context(|| E::InTimeZone { id: id.into() })?;
        let instant = offset.to_instant(self.datetime)?;
        Ok(instant.to_zoned(self.time_zone))
    }
}
