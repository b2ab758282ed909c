/// The identifier returned when the system time zone can't be detected.
const FALLBACK: &str = "UTC";

/// Detects the identifier of the host's time zone.
///
/// The `TZ` environment variable wins when it is set and non-empty. A
/// leading `:` is stripped, as in `TZ=:America/New_York`. Otherwise, the
/// target of the `/etc/localtime` symlink is used, with everything up to
/// and including a `zoneinfo/` component removed. When neither is
/// available, `UTC` is returned.
///
/// The identifier returned is not validated. Resolving it against a
/// registry may still fail.
#[cfg(feature = "tz-system")]
pub(crate) fn zone_id() -> String {
    if let Some(id) = from_env() {
        return id;
    }
    if let Some(id) = from_localtime_symlink("/etc/localtime") {
        return id;
    }
    debug!("could not detect system time zone, falling back to {FALLBACK}");
    FALLBACK.to_string()
}

/// Always returns `UTC` since system time zone detection is disabled.
#[cfg(not(feature = "tz-system"))]
pub(crate) fn zone_id() -> String {
    trace!("crate feature `tz-system` is disabled, using {FALLBACK}");
    FALLBACK.to_string()
}

#[cfg(feature = "tz-system")]
fn from_env() -> Option<String> {
    let value = std::env::var_os("TZ")?;
    let Some(value) = value.to_str() else {
        warn!("ignoring TZ environment variable since it is not UTF-8");
        return None;
    };
    let id = value.strip_prefix(':').unwrap_or(value);
    if id.is_empty() {
        trace!("ignoring empty TZ environment variable");
        return None;
    }
    debug!("using system time zone {id} from TZ environment variable");
    Some(id.to_string())
}

#[cfg(feature = "tz-system")]
fn from_localtime_symlink(path: &str) -> Option<String> {
    let target = match std::fs::read_link(path) {
        Ok(target) => target,
        Err(_err) => {
            trace!("failed to read symlink {path}: {_err}");
            return None;
        }
    };
    let Some(target) = target.to_str() else {
        warn!("symlink target of {path} is not UTF-8");
        return None;
    };
    let id = id_from_zoneinfo_path(target)?;
    debug!("using system time zone {id} from symlink {path}");
    Some(id.to_string())
}

/// Extracts `America/New_York` from paths like
/// `/usr/share/zoneinfo/America/New_York`.
#[cfg(any(test, feature = "tz-system"))]
fn id_from_zoneinfo_path(path: &str) -> Option<&str> {
    let (_, id) = path.rsplit_once("zoneinfo/")?;
    if id.is_empty() {
        return None;
    }
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoneinfo_paths() {
        assert_eq!(
            id_from_zoneinfo_path("/usr/share/zoneinfo/America/New_York"),
            Some("America/New_York"),
        );
        assert_eq!(
            id_from_zoneinfo_path("../usr/share/zoneinfo/UTC"),
            Some("UTC"),
        );
        assert_eq!(
            id_from_zoneinfo_path("/var/db/timezone/zoneinfo/Europe/Paris"),
            Some("Europe/Paris"),
        );
        assert_eq!(id_from_zoneinfo_path("/usr/share/zoneinfo/"), None);
        assert_eq!(id_from_zoneinfo_path("/etc/timezone"), None);
    }

    #[test]
    fn detected_is_not_empty() {
        assert!(!zone_id().is_empty());
    }
}
