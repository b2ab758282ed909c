use crate::tz::{AmbiguousOffset, Offset};

/// A single change of offset in a time zone.
///
/// `at` is the number of seconds since the Unix epoch (in UTC) at which
/// `after` takes effect. Up until that point, `before` was in effect.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Transition {
    pub(crate) at: i64,
    pub(crate) before: Offset,
    pub(crate) after: Offset,
}

impl Transition {
    /// The first local second affected by this transition.
    fn wall_start(&self) -> i64 {
        self.at + i64::from(self.before.seconds().min(self.after.seconds()))
    }

    /// The first local second that is unambiguous after this transition.
    pub(crate) fn wall_end(&self) -> i64 {
        self.at + i64::from(self.before.seconds().max(self.after.seconds()))
    }
}

/// Returns the offset in effect at the given Unix timestamp.
///
/// `transitions` must be sorted by `at`. `initial` is the offset in effect
/// before the first transition.
pub(crate) fn offset_at(
    transitions: &[Transition],
    initial: Offset,
    timestamp: i64,
) -> Offset {
    let index = transitions.partition_point(|t| t.at <= timestamp);
    match index.checked_sub(1) {
        None => initial,
        Some(i) => transitions[i].after,
    }
}

/// Returns the possibly ambiguous offset of the given local datetime,
/// expressed as seconds since the Unix epoch as if it were in UTC.
///
/// `transitions` must be sorted by `at` and must not overlap in their
/// local time windows.
pub(crate) fn ambiguous_offset_at(
    transitions: &[Transition],
    initial: Offset,
    local: i64,
) -> AmbiguousOffset {
    let index = transitions.partition_point(|t| t.wall_start() <= local);
    let Some(i) = index.checked_sub(1) else {
        return AmbiguousOffset::Unambiguous { offset: initial };
    };
    let t = &transitions[i];
    if local >= t.wall_end() {
        return AmbiguousOffset::Unambiguous { offset: t.after };
    }
    if t.after > t.before {
        AmbiguousOffset::Gap { before: t.before, after: t.after }
    } else {
        AmbiguousOffset::Fold { before: t.before, after: t.after }
    }
}
