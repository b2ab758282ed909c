/*!
Sources of the current time and the host's time zone.

Every operation in this crate that depends on "now" reads it from a
[`Clock`], usually by way of a [`Context`](crate::Context). Production code
uses [`SystemClock`]. Tests use [`FixedClock`] so that their results don't
depend on when or where they run.
*/

use crate::Instant;

/// A source of the current instant and the identifier of the local time
/// zone.
///
/// # Example
///
/// A clock that always reports the Unix epoch in Tokyo:
///
/// ```
/// use civiltime::{Clock, Instant};
///
/// #[derive(Debug)]
/// struct Epoch;
///
/// impl Clock for Epoch {
///     fn now(&self) -> Instant {
///         Instant::UNIX_EPOCH
///     }
///
///     fn zone_id(&self) -> String {
///         "Asia/Tokyo".to_string()
///     }
/// }
///
/// assert_eq!(Epoch.now().to_string(), "1970-01-01T00:00:00Z");
/// ```
pub trait Clock: core::fmt::Debug + Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;

    /// Returns the identifier of the local time zone.
    ///
    /// The identifier is resolved against a
    /// [`ZoneRegistry`](crate::tz::ZoneRegistry) by the caller, so it may
    /// name a zone that doesn't exist.
    fn zone_id(&self) -> String;
}

/// The clock of the host system.
///
/// The current instant comes from [`std::time::SystemTime`]. The zone
/// identifier comes from the `TZ` environment variable, or else from the
/// target of the `/etc/localtime` symlink. When neither is available (or
/// when the `tz-system` crate feature is disabled), the identifier is
/// `UTC`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock {
    _priv: (),
}

impl SystemClock {
    /// Creates a new system clock.
    pub const fn new() -> SystemClock {
        SystemClock { _priv: () }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        let now = std::time::SystemTime::now();
        match Instant::try_from(now) {
            Ok(instant) => instant,
            Err(_err) => {
                warn!("system time {now:?} is out of range: {_err}");
                if now < std::time::UNIX_EPOCH {
                    Instant::MIN
                } else {
                    Instant::MAX
                }
            }
        }
    }

    fn zone_id(&self) -> String {
        crate::tz::system::zone_id()
    }
}

/// A clock that never moves.
///
/// # Example
///
/// ```
/// use civiltime::{Clock, FixedClock, Instant};
///
/// let instant: Instant = "2007-12-03T10:15:30Z".parse()?;
/// let clock = FixedClock::new(instant, "Europe/Paris");
/// assert_eq!(clock.now(), instant);
/// assert_eq!(clock.zone_id(), "Europe/Paris");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct FixedClock {
    instant: Instant,
    zone_id: String,
}

impl FixedClock {
    /// Creates a clock stuck at the given instant in the given zone.
    pub fn new(instant: Instant, zone_id: impl Into<String>) -> FixedClock {
        FixedClock { instant, zone_id: zone_id.into() }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.instant
    }

    fn zone_id(&self) -> String {
        self.zone_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_now_is_after_2020() {
        // 2020-01-01T00:00:00Z
        let then = Instant::from_epoch_second(1577836800).unwrap();
        assert!(SystemClock::new().now() > then);
    }

    #[test]
    fn fixed() {
        let clock = FixedClock::new(Instant::UNIX_EPOCH, "UTC");
        assert_eq!(clock.now(), Instant::UNIX_EPOCH);
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.zone_id(), "UTC");
    }
}
