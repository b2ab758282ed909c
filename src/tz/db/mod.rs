use std::sync::Arc;

use crate::{
    error::{tz::db::Error as E, Error, ErrorContext},
    fmt::iso,
    tz::{Offset, TimeZone},
};

pub use self::{builtin::BuiltinRegistry, zoneinfo::ZoneInfoRegistry};

mod builtin;
#[cfg_attr(not(feature = "tzdb-zoneinfo"), path = "zoneinfo/disabled.rs")]
mod zoneinfo;

/// A source of time zone rules, keyed by region name.
///
/// A registry is the only way this crate turns a region name like
/// `Europe/Paris` into a [`TimeZone`]. It is always passed explicitly, so
/// tests can supply their own implementation instead of depending on the
/// time zone data installed on the host.
///
/// Implementors only need to provide [`ZoneRegistry::get`]. The provided
/// [`ZoneRegistry::resolve`] method handles fixed offset identifiers (like
/// `Z`, `+05:30` or `GMT-3`) itself and only calls `get` for everything
/// else.
///
/// # Example
///
/// ```
/// use civiltime::tz::{TimeZone, ZoneRegistry};
///
/// #[derive(Debug)]
/// struct Lunar;
///
/// impl ZoneRegistry for Lunar {
///     fn get(&self, name: &str) -> Option<TimeZone> {
///         if name != "Moon/Tranquility" {
///             return None;
///         }
///         TimeZone::posix("LST-3").ok()
///     }
/// }
///
/// let tz = Lunar.resolve("Moon/Tranquility")?;
/// assert_eq!(tz.to_fixed_offset().unwrap().to_string(), "+03:00");
/// assert_eq!(Lunar.resolve("+01:00")?.id(), "+01:00");
/// assert!(Lunar.resolve("Earth/Houston").unwrap_err().is_unknown_zone());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait ZoneRegistry: core::fmt::Debug + Send + Sync {
    /// Returns the time zone for the given region name, if this registry
    /// knows about it.
    ///
    /// The identifier of the zone returned should be the canonical name of
    /// the region.
    fn get(&self, name: &str) -> Option<TimeZone>;

    /// Returns the names of all regions known to this registry.
    ///
    /// The default implementation returns an empty list.
    fn available(&self) -> Vec<String> {
        vec![]
    }

    /// Resolves any time zone identifier.
    ///
    /// # Errors
    ///
    /// This returns an error for which
    /// [`Error::is_unknown_zone`](crate::Error::is_unknown_zone) is true
    /// when the identifier is malformed, has an out of range offset or
    /// names a region this registry doesn't know about.
    fn resolve(&self, id: &str) -> Result<TimeZone, Error> {
        if let Some(tz) = resolve_fixed(id)? {
            return Ok(tz);
        }
        match self.get(id) {
            Some(tz) => Ok(tz),
            None => {
                debug!("no time zone found for region `{id}`");
                Err(Error::from(E::unknown_zone(id)))
            }
        }
    }
}

impl<R: ZoneRegistry + ?Sized> ZoneRegistry for &R {
    fn get(&self, name: &str) -> Option<TimeZone> {
        (**self).get(name)
    }

    fn available(&self) -> Vec<String> {
        (**self).available()
    }
}

impl<R: ZoneRegistry + ?Sized> ZoneRegistry for Arc<R> {
    fn get(&self, name: &str) -> Option<TimeZone> {
        (**self).get(name)
    }

    fn available(&self) -> Vec<String> {
        (**self).available()
    }
}

impl<R: ZoneRegistry + ?Sized> ZoneRegistry for Box<R> {
    fn get(&self, name: &str) -> Option<TimeZone> {
        (**self).get(name)
    }

    fn available(&self) -> Vec<String> {
        (**self).available()
    }
}

/// A registry that knows no regions. Only fixed offset identifiers
/// resolve.
#[derive(Debug)]
pub(crate) struct FixedOnly;

impl ZoneRegistry for FixedOnly {
    fn get(&self, _name: &str) -> Option<TimeZone> {
        None
    }
}

/// A registry that consults another registry first and falls back to the
/// builtin table for regions it doesn't know.
#[derive(Debug)]
pub(crate) struct WithBuiltin<R> {
    primary: R,
    builtin: BuiltinRegistry,
}

impl<R: ZoneRegistry> WithBuiltin<R> {
    pub(crate) fn new(primary: R) -> WithBuiltin<R> {
        WithBuiltin { primary, builtin: BuiltinRegistry::new() }
    }
}

impl<R: ZoneRegistry> ZoneRegistry for WithBuiltin<R> {
    fn get(&self, name: &str) -> Option<TimeZone> {
        if let Some(tz) = self.primary.get(name) {
            return Some(tz);
        }
        let tz = self.builtin.get(name)?;
        debug!("using builtin rule for time zone `{name}`");
        Some(tz)
    }

    fn available(&self) -> Vec<String> {
        let mut names = self.primary.available();
        names.extend(self.builtin.available());
        names.sort();
        names.dedup();
        names
    }
}

/// Resolves identifiers that describe a fixed offset.
///
/// `Ok(None)` is returned when the identifier doesn't look like a fixed
/// offset at all, in which case it should be treated as a region name.
fn resolve_fixed(id: &str) -> Result<Option<TimeZone>, Error> {
    if id == "Z" {
        return Ok(Some(TimeZone::UTC));
    }
    if id.starts_with(['+', '-']) {
        return parse_offset(id, id).map(|o| Some(TimeZone::fixed(o)));
    }
    for prefix in ["UTC", "GMT", "UT"] {
        let Some(rest) = id.strip_prefix(prefix) else { continue };
        if rest.is_empty() {
            return Ok(Some(TimeZone::fixed_with_id(prefix, Offset::UTC)));
        }
        if !rest.starts_with(['+', '-']) {
            // Something like `UTC/Foo` or `UCT`. Let the registry decide.
            return Ok(None);
        }
        let offset = parse_offset(id, rest)?;
        if offset == Offset::UTC {
            return Ok(Some(TimeZone::fixed_with_id(prefix, offset)));
        }
        let normalized = format!("{prefix}{offset}");
        return Ok(Some(TimeZone::fixed_with_id(&normalized, offset)));
    }
    Ok(None)
}

fn parse_offset(id: &str, offset: &str) -> Result<Offset, Error> {
    iso::DEFAULT_PARSER
        .parse_offset(offset.as_bytes())
        .with_context(|| E::unknown_zone(id))
}
