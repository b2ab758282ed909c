use crate::{
    error::{CrateFeatureError, Error},
    tz::{TimeZone, ZoneRegistry},
};

/// A registry backed by a zoneinfo directory of TZif files.
///
/// The `tzdb-zoneinfo` crate feature is disabled, so this registry never
/// knows about any region.
#[derive(Debug)]
pub struct ZoneInfoRegistry {
    _priv: (),
}

impl ZoneInfoRegistry {
    /// Returns an empty registry.
    pub fn from_env() -> ZoneInfoRegistry {
        warn!(
            "crate feature `tzdb-zoneinfo` is disabled, \
             so no zoneinfo database will be read",
        );
        ZoneInfoRegistry { _priv: () }
    }

    /// Always returns an error since the `tzdb-zoneinfo` crate feature is
    /// disabled.
    pub fn from_dir(
        _dir: &std::path::Path,
    ) -> Result<ZoneInfoRegistry, Error> {
        Err(Error::from(CrateFeatureError::TzdbZoneInfo))
    }

    /// Does nothing.
    pub fn reset(&self) {}
}

impl ZoneRegistry for ZoneInfoRegistry {
    fn get(&self, _name: &str) -> Option<TimeZone> {
        None
    }
}
