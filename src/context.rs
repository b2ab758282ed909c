use std::sync::Arc;

use crate::{
    clock::{Clock, SystemClock},
    tz::{TimeZone, WithBuiltin, ZoneInfoRegistry, ZoneRegistry},
    Error, Instant,
};

/// The environment that time zone aware operations run in.
///
/// A context bundles a [`Clock`] with a [`ZoneRegistry`]. Operations that
/// need the current time or the local time zone, like
/// [`Zoned::now`](crate::Zoned::now), take a context explicitly instead of
/// consulting global state.
///
/// Cloning a context is cheap.
///
/// # Example
///
/// ```
/// use civiltime::{tz::BuiltinRegistry, Context, FixedClock, Instant};
///
/// let clock = FixedClock::new(Instant::UNIX_EPOCH, "Asia/Tokyo");
/// let ctx = Context::new(clock, BuiltinRegistry::new());
/// assert_eq!(ctx.now(), Instant::UNIX_EPOCH);
/// assert_eq!(ctx.system_zone().id(), "Asia/Tokyo");
/// ```
#[derive(Clone, Debug)]
pub struct Context {
    clock: Arc<dyn Clock>,
    registry: Arc<dyn ZoneRegistry>,
}

impl Context {
    /// Creates a new context from a clock and a registry.
    pub fn new(
        clock: impl Clock + 'static,
        registry: impl ZoneRegistry + 'static,
    ) -> Context {
        Context { clock: Arc::new(clock), registry: Arc::new(registry) }
    }

    /// Creates a context backed by the host: a [`SystemClock`] and a
    /// [`ZoneInfoRegistry`] opened with [`ZoneInfoRegistry::from_env`].
    ///
    /// Regions missing from the zoneinfo database (or every region, when
    /// no database is installed) are looked up in the
    /// [`BuiltinRegistry`](crate::tz::BuiltinRegistry).
    ///
    /// Each call opens a new registry, so callers should create one context
    /// and share it.
    pub fn system() -> Context {
        let registry = WithBuiltin::new(ZoneInfoRegistry::from_env());
        Context::new(SystemClock::new(), registry)
    }

    /// Returns the current instant according to this context's clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Returns the local time zone according to this context's clock,
    /// resolved against this context's registry.
    ///
    /// When the clock's zone identifier can't be resolved, a warning is
    /// logged and [`TimeZone::UTC`] is returned.
    pub fn system_zone(&self) -> TimeZone {
        let id = self.clock.zone_id();
        match self.registry.resolve(&id) {
            Ok(tz) => tz,
            Err(_err) => {
                warn!(
                    "failed to resolve system time zone `{id}`, \
                     falling back to UTC: {_err}",
                );
                TimeZone::UTC
            }
        }
    }

    /// Resolves a time zone identifier against this context's registry.
    ///
    /// See [`ZoneRegistry::resolve`] for the identifiers accepted.
    pub fn resolve(&self, id: &str) -> Result<TimeZone, Error> {
        self.registry.resolve(id)
    }

    /// Returns this context's clock.
    pub fn clock(&self) -> &dyn Clock {
        &*self.clock
    }

    /// Returns this context's registry.
    pub fn registry(&self) -> &dyn ZoneRegistry {
        &*self.registry
    }
}

#[cfg(test)]
mod tests {
    use crate::{clock::FixedClock, tz::BuiltinRegistry};

    use super::*;

    fn context(zone_id: &str) -> Context {
        let clock = FixedClock::new(Instant::UNIX_EPOCH, zone_id);
        Context::new(clock, BuiltinRegistry::new())
    }

    #[test]
    fn system_zone() {
        assert_eq!(context("Europe/Paris").system_zone().id(), "Europe/Paris");
        assert_eq!(context("+05:30").system_zone().id(), "+05:30");
        assert_eq!(context("Mars/Olympus_Mons").system_zone(), TimeZone::UTC);
    }

    #[test]
    fn resolve() {
        let ctx = context("UTC");
        assert_eq!(ctx.resolve("asia/tokyo").unwrap().id(), "Asia/Tokyo");
        assert!(ctx.resolve("Asia/Atlantis").unwrap_err().is_unknown_zone());
        assert_eq!(ctx.clock().zone_id(), "UTC");
        assert!(!ctx.registry().available().is_empty());
    }

    #[test]
    fn system_resolves_builtin_regions() {
        let ctx = Context::system();
        let tz = ctx.resolve("America/New_York").unwrap();
        assert_eq!(tz.id(), "America/New_York");
        assert!(ctx.registry().available().iter().any(|n| n == "Asia/Tokyo"));
    }
}
