use crate::tz::{posix::PosixTimeZone, TimeZone, ZoneRegistry};

/// A registry of common regions compiled into this crate.
///
/// Each region is described by the POSIX rule currently in force there.
/// Historical transitions are not included, so results for datetimes
/// before a region adopted its current rule may differ from the IANA
/// database. Use [`ZoneInfoRegistry`](crate::tz::ZoneInfoRegistry) for full
/// history.
///
/// Lookups are case insensitive, but the identifier of the zone returned
/// always uses the canonical spelling.
///
/// # Example
///
/// ```
/// use civiltime::tz::{BuiltinRegistry, ZoneRegistry};
///
/// let registry = BuiltinRegistry::new();
/// assert_eq!(registry.resolve("europe/paris")?.id(), "Europe/Paris");
/// assert!(registry.available().iter().any(|name| name == "Asia/Tokyo"));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct BuiltinRegistry {
    _priv: (),
}

impl BuiltinRegistry {
    /// Creates a new builtin registry.
    pub const fn new() -> BuiltinRegistry {
        BuiltinRegistry { _priv: () }
    }
}

impl ZoneRegistry for BuiltinRegistry {
    fn get(&self, name: &str) -> Option<TimeZone> {
        let i = ZONES
            .binary_search_by(|&(n, _)| cmp_ignore_ascii_case(n, name))
            .ok()?;
        let (name, rule) = ZONES[i];
        match PosixTimeZone::parse(rule) {
            Ok(posix) => Some(TimeZone::posix_with_id(name, posix)),
            Err(_err) => {
                warn!("builtin rule for {name} is invalid: {_err}");
                None
            }
        }
    }

    fn available(&self) -> Vec<String> {
        ZONES.iter().map(|&(name, _)| name.to_string()).collect()
    }
}

/// Like std's `eq_ignore_ascii_case`, but returns a full `Ordering`.
fn cmp_ignore_ascii_case(s1: &str, s2: &str) -> core::cmp::Ordering {
    let it1 = s1.as_bytes().iter().map(|&b| b.to_ascii_lowercase());
    let it2 = s2.as_bytes().iter().map(|&b| b.to_ascii_lowercase());
    it1.cmp(it2)
}

/// Region names and their POSIX rules, sorted by lowercase name.
static ZONES: &[(&str, &str)] = &[
    ("Africa/Cairo", "EET-2EEST,M4.5.5/0,M10.5.4/24"),
    ("Africa/Johannesburg", "SAST-2"),
    ("Africa/Lagos", "WAT-1"),
    ("Africa/Nairobi", "EAT-3"),
    ("America/Anchorage", "AKST9AKDT,M3.2.0,M11.1.0"),
    ("America/Argentina/Buenos_Aires", "<-03>3"),
    ("America/Bogota", "<-05>5"),
    ("America/Chicago", "CST6CDT,M3.2.0,M11.1.0"),
    ("America/Denver", "MST7MDT,M3.2.0,M11.1.0"),
    ("America/Halifax", "AST4ADT,M3.2.0,M11.1.0"),
    ("America/Los_Angeles", "PST8PDT,M3.2.0,M11.1.0"),
    ("America/Mexico_City", "CST6"),
    ("America/New_York", "EST5EDT,M3.2.0,M11.1.0"),
    ("America/Phoenix", "MST7"),
    ("America/Santiago", "<-04>4<-03>,M9.1.6/24,M4.1.6/24"),
    ("America/Sao_Paulo", "<-03>3"),
    ("America/St_Johns", "NST3:30NDT,M3.2.0,M11.1.0"),
    ("America/Toronto", "EST5EDT,M3.2.0,M11.1.0"),
    ("Asia/Dubai", "<+04>-4"),
    ("Asia/Hong_Kong", "HKT-8"),
    ("Asia/Jerusalem", "IST-2IDT,M3.4.4/26,M10.5.0"),
    ("Asia/Kathmandu", "<+0545>-5:45"),
    ("Asia/Kolkata", "IST-5:30"),
    ("Asia/Seoul", "KST-9"),
    ("Asia/Shanghai", "CST-8"),
    ("Asia/Singapore", "<+08>-8"),
    ("Asia/Tokyo", "JST-9"),
    ("Australia/Adelaide", "ACST-9:30ACDT,M10.1.0,M4.1.0/3"),
    ("Australia/Brisbane", "AEST-10"),
    ("Australia/Sydney", "AEST-10AEDT,M10.1.0,M4.1.0/3"),
    ("Etc/GMT", "GMT0"),
    ("Etc/UTC", "UTC0"),
    ("Europe/Amsterdam", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Athens", "EET-2EEST,M3.5.0/3,M10.5.0/4"),
    ("Europe/Berlin", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Dublin", "IST-1GMT0,M10.5.0,M3.5.0/1"),
    ("Europe/Istanbul", "<+03>-3"),
    ("Europe/Lisbon", "WET0WEST,M3.5.0/1,M10.5.0"),
    ("Europe/London", "GMT0BST,M3.5.0/1,M10.5.0"),
    ("Europe/Madrid", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Moscow", "MSK-3"),
    ("Europe/Paris", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Rome", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Pacific/Auckland", "NZST-12NZDT,M9.5.0,M4.1.0/3"),
    ("Pacific/Honolulu", "HST10"),
];
