use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
    time::{Duration, Instant as MonotonicInstant, SystemTime},
};

use crate::{
    error::{tz::db::Error as E, Error},
    tz::{TimeZone, ZoneRegistry},
};

const DEFAULT_TTL: Duration = Duration::new(5 * 60, 0);

const ZONEINFO_DIRECTORIES: &[&str] =
    &["/usr/share/zoneinfo", "/etc/zoneinfo"];

/// A registry backed by a zoneinfo directory of TZif files.
///
/// This is how most Unix systems distribute the IANA time zone database.
/// Region names are the paths of the TZif files relative to the directory,
/// e.g., `America/New_York` for `/usr/share/zoneinfo/America/New_York`.
/// Lookups are case insensitive.
///
/// Parsed time zones are cached. A cached zone is revalidated against the
/// last modified time of its file once its time-to-live has expired, so
/// updates to the database on disk are eventually picked up without
/// restarting the process.
///
/// # Example
///
/// ```no_run
/// use civiltime::tz::{ZoneInfoRegistry, ZoneRegistry};
///
/// let registry = ZoneInfoRegistry::from_env();
/// let tz = registry.resolve("America/New_York")?;
/// assert_eq!(tz.id(), "America/New_York");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct ZoneInfoRegistry {
    names: Option<ZoneInfoNames>,
    zones: RwLock<CachedZones>,
}

impl ZoneInfoRegistry {
    /// Opens the zoneinfo database named by the `TZDIR` environment
    /// variable, or else the first of `/usr/share/zoneinfo` and
    /// `/etc/zoneinfo` that can be read.
    ///
    /// If no database can be found, then a registry in which every region
    /// lookup fails is returned. A warning is logged in that case.
    pub fn from_env() -> ZoneInfoRegistry {
        if let Some(tzdir) = std::env::var_os("TZDIR") {
            let tzdir = PathBuf::from(tzdir);
            debug!("opening zoneinfo database at TZDIR={}", tzdir.display());
            match ZoneInfoRegistry::from_dir(&tzdir) {
                Ok(db) => return db,
                Err(_err) => {
                    warn!("failed opening TZDIR={}: {_err}", tzdir.display());
                    // fall through to attempt default directories
                }
            }
        }
        for dir in ZONEINFO_DIRECTORIES {
            let tzdir = Path::new(dir);
            debug!("opening zoneinfo database at {}", tzdir.display());
            match ZoneInfoRegistry::from_dir(tzdir) {
                Ok(db) => return db,
                Err(_err) => {
                    debug!("failed opening {}: {_err}", tzdir.display());
                }
            }
        }
        warn!(
            "could not find zoneinfo database at any of the following \
             paths: {}",
            ZONEINFO_DIRECTORIES.join(", "),
        );
        ZoneInfoRegistry::none()
    }

    /// Opens the zoneinfo database in the given directory.
    ///
    /// # Errors
    ///
    /// This returns an error if the path isn't a directory or if it
    /// contains no TZif files at all.
    pub fn from_dir(dir: &Path) -> Result<ZoneInfoRegistry, Error> {
        if !dir.is_dir() {
            return Err(Error::from(E::ZoneInfoNotDirectory).path(dir));
        }
        let names = Some(ZoneInfoNames::new(dir)?);
        let zones = RwLock::new(CachedZones::new());
        Ok(ZoneInfoRegistry { names, zones })
    }

    /// Creates a registry in which all lookups fail.
    fn none() -> ZoneInfoRegistry {
        ZoneInfoRegistry {
            names: None,
            zones: RwLock::new(CachedZones::new()),
        }
    }

    /// Drops every cached time zone and name, forcing the next lookup to
    /// go back to disk.
    pub fn reset(&self) {
        let mut zones = self.zones.write().unwrap();
        if let Some(ref names) = self.names {
            names.reset();
        }
        zones.reset();
    }
}

impl ZoneRegistry for ZoneInfoRegistry {
    fn get(&self, query: &str) -> Option<TimeZone> {
        // If we couldn't build any time zone names, then every lookup will
        // fail. So just bail now.
        let names = self.names.as_ref()?;
        // The fast path is when the query matches a pre-existing unexpired
        // time zone.
        {
            let zones = self.zones.read().unwrap();
            if let Some(czone) = zones.get(query) {
                if !czone.is_expired() {
                    return Some(czone.tz.clone());
                }
            }
        }
        // Either the zone isn't cached or it needs to be revalidated. Both
        // need write access, so rule out unknown names first.
        let info = names.get(query)?;
        let mut zones = self.zones.write().unwrap();
        let ttl = zones.ttl;
        match zones.get_zone_index(query) {
            Ok(i) => {
                let czone = &mut zones.zones[i];
                if czone.revalidate(&info, ttl) {
                    return Some(czone.tz.clone());
                }
                let czone = match CachedTimeZone::new(&info, ttl) {
                    Ok(czone) => czone,
                    Err(_err) => {
                        warn!(
                            "failed to re-cache time zone from file {}: {_err}",
                            info.inner.full.display(),
                        );
                        return None;
                    }
                };
                let tz = czone.tz.clone();
                zones.zones[i] = czone;
                Some(tz)
            }
            Err(i) => {
                let czone = match CachedTimeZone::new(&info, ttl) {
                    Ok(czone) => czone,
                    Err(_err) => {
                        warn!(
                            "failed to cache time zone from file {}: {_err}",
                            info.inner.full.display(),
                        );
                        return None;
                    }
                };
                let tz = czone.tz.clone();
                zones.zones.insert(i, czone);
                Some(tz)
            }
        }
    }

    fn available(&self) -> Vec<String> {
        let Some(ref names) = self.names else { return vec![] };
        names.available()
    }
}

#[derive(Debug)]
struct CachedZones {
    zones: Vec<CachedTimeZone>,
    ttl: Duration,
}

impl CachedZones {
    fn new() -> CachedZones {
        CachedZones { zones: vec![], ttl: DEFAULT_TTL }
    }

    fn get(&self, query: &str) -> Option<&CachedTimeZone> {
        self.get_zone_index(query).ok().map(|i| &self.zones[i])
    }

    fn get_zone_index(&self, query: &str) -> Result<usize, usize> {
        self.zones.binary_search_by(|zone| {
            cmp_ignore_ascii_case(zone.tz.id(), query)
        })
    }

    fn reset(&mut self) {
        self.zones.clear();
    }
}

#[derive(Clone, Debug)]
struct CachedTimeZone {
    tz: TimeZone,
    expiration: Expiration,
    last_modified: Option<SystemTime>,
}

impl CachedTimeZone {
    /// Reads and parses the TZif file for the given name. The zone stays
    /// fresh for at least `ttl`.
    fn new(
        info: &ZoneInfoName,
        ttl: Duration,
    ) -> Result<CachedTimeZone, Error> {
        let path = &info.inner.full;
        let mut file = File::open(path).map_err(|e| Error::io(e).path(path))?;
        let mut data = vec![];
        file.read_to_end(&mut data).map_err(|e| Error::io(e).path(path))?;
        let tz = TimeZone::tzif(&info.inner.original, &data)
            .map_err(|e| e.path(path))?;
        let last_modified = last_modified_from_file(path, &file);
        let expiration = Expiration::after(ttl);
        debug!("cached time zone {} from {}", info.inner.original, path.display());
        Ok(CachedTimeZone { tz, expiration, last_modified })
    }

    fn is_expired(&self) -> bool {
        self.expiration.is_expired()
    }

    /// Attempts to revalidate this cached time zone.
    ///
    /// Upon success (the file on disk has the same last modified time),
    /// this returns true and the zone is fresh for another `ttl`. Otherwise
    /// the zone must be re-read.
    fn revalidate(&mut self, info: &ZoneInfoName, ttl: Duration) -> bool {
        let Some(old_last_modified) = self.last_modified else {
            info!(
                "revalidation for {} failed because old last modified time \
                 is unavailable",
                info.inner.full.display(),
            );
            return false;
        };
        let Some(new_last_modified) = last_modified_from_path(&info.inner.full)
        else {
            info!(
                "revalidation for {} failed because new last modified time \
                 is unavailable",
                info.inner.full.display(),
            );
            return false;
        };
        if old_last_modified != new_last_modified {
            info!(
                "revalidation for {} failed because last modified times \
                 do not match",
                info.inner.full.display(),
            );
            return false;
        }
        trace!(
            "revalidation for {} succeeded because last modified times match",
            info.inner.full.display(),
        );
        self.expiration = Expiration::after(ttl);
        true
    }
}

/// A collection of time zone names extracted from a zoneinfo directory.
///
/// Names are refreshed from disk when a lookup misses and the names are
/// older than their time-to-live.
#[derive(Debug)]
struct ZoneInfoNames {
    inner: RwLock<ZoneInfoNamesInner>,
}

#[derive(Debug)]
struct ZoneInfoNamesInner {
    /// The directory from which we collected time zone names.
    dir: PathBuf,
    /// All available names, sorted by their lowercase form.
    names: Vec<ZoneInfoName>,
    ttl: Duration,
    expiration: Expiration,
}

impl ZoneInfoNames {
    fn new(dir: &Path) -> Result<ZoneInfoNames, Error> {
        let names = walk(dir)?;
        let dir = dir.to_path_buf();
        let ttl = DEFAULT_TTL;
        let expiration = Expiration::after(ttl);
        let inner = ZoneInfoNamesInner { dir, names, ttl, expiration };
        Ok(ZoneInfoNames { inner: RwLock::new(inner) })
    }

    /// Finds the name entry for the given query using a case insensitive
    /// search, refreshing stale names on a miss.
    fn get(&self, query: &str) -> Option<ZoneInfoName> {
        {
            let inner = self.inner.read().unwrap();
            if let Some(zone_info_name) = inner.get(query) {
                return Some(zone_info_name);
            }
        }
        let mut inner = self.inner.write().unwrap();
        if inner.expiration.is_expired() {
            inner.refresh();
        }
        inner.get(query)
    }

    fn available(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap();
        inner.names.iter().map(|n| n.inner.original.clone()).collect()
    }

    fn reset(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.names.clear();
        inner.expiration = Expiration::expired();
    }
}

impl ZoneInfoNamesInner {
    fn get(&self, query: &str) -> Option<ZoneInfoName> {
        self.names
            .binary_search_by(|n| cmp_ignore_ascii_case(&n.inner.lower, query))
            .ok()
            .map(|i| self.names[i].clone())
    }

    /// Refreshes the names from disk. On failure, the old names are kept
    /// and a warning is logged.
    fn refresh(&mut self) {
        let result = walk(&self.dir);
        self.expiration = Expiration::after(self.ttl);
        match result {
            Ok(names) => self.names = names,
            Err(_err) => {
                warn!(
                    "failed to refresh zoneinfo time zone name cache \
                     for {}: {_err}",
                    self.dir.display(),
                )
            }
        }
    }
}

/// A single TZif entry in a zoneinfo database directory.
#[derive(Clone, Debug)]
struct ZoneInfoName {
    inner: Arc<ZoneInfoNameInner>,
}

#[derive(Debug)]
struct ZoneInfoNameInner {
    /// The path to the TZif file.
    full: PathBuf,
    /// The name of the time zone, using `/` as a separator.
    original: String,
    /// The lowercase version of `original`, used for comparisons.
    lower: String,
}

impl ZoneInfoName {
    /// Returns `None` when the name isn't valid UTF-8.
    fn new(base: &Path, time_zone_name: &Path) -> Option<ZoneInfoName> {
        let full = base.join(time_zone_name);
        let original = time_zone_name
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<Vec<&str>>>()?
            .join("/");
        let lower = original.to_ascii_lowercase();
        let inner = ZoneInfoNameInner { full, original, lower };
        Some(ZoneInfoName { inner: Arc::new(inner) })
    }
}

/// A little helper for representing expiration time.
///
/// An overflowing expiration time is treated identically to a time that is
/// always expired.
#[derive(Clone, Copy, Debug)]
struct Expiration(Option<MonotonicInstant>);

impl Expiration {
    fn after(ttl: Duration) -> Expiration {
        Expiration(MonotonicInstant::now().checked_add(ttl))
    }

    fn expired() -> Expiration {
        Expiration(None)
    }

    fn is_expired(self) -> bool {
        self.0.map_or(true, |t| MonotonicInstant::now() > t)
    }
}

fn last_modified_from_path(path: &Path) -> Option<SystemTime> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(_err) => {
            warn!(
                "failed to open file to get last modified time {}: {_err}",
                path.display(),
            );
            return None;
        }
    };
    last_modified_from_file(path, &file)
}

/// The path given is only used for diagnostics.
fn last_modified_from_file(_path: &Path, file: &File) -> Option<SystemTime> {
    match file.metadata().and_then(|md| md.modified()) {
        Ok(systime) => Some(systime),
        Err(_err) => {
            warn!(
                "failed to get last modified time for {}: {_err}",
                _path.display()
            );
            None
        }
    }
}

/// Recursively walks the given directory and returns the names of all time
/// zones found, sorted by their lowercase form.
///
/// This returns either one or more names or an error. Files that aren't
/// TZif (like `zone.tab`) are skipped.
fn walk(start: &Path) -> Result<Vec<ZoneInfoName>, Error> {
    let mut first_err: Option<Error> = None;
    let mut seterr = |path: &Path, err: std::io::Error| {
        if first_err.is_none() {
            first_err = Some(Error::io(err).path(path));
        }
    };

    let mut names = vec![];
    let mut stack = vec![start.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let readdir = match dir.read_dir() {
            Ok(readdir) => readdir,
            Err(err) => {
                info!("error when reading {} as a directory: {err}", dir.display());
                seterr(&dir, err);
                continue;
            }
        };
        for result in readdir {
            let dent = match result {
                Ok(dent) => dent,
                Err(err) => {
                    seterr(&dir, err);
                    continue;
                }
            };
            let path = dent.path();
            let file_type = match dent.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    seterr(&path, err);
                    continue;
                }
            };
            if file_type.is_dir() {
                stack.push(path);
                continue;
            }
            // Symlinks are assumed to be files.
            let mut buf = [0; 4];
            let read = File::open(&path).and_then(|mut f| f.read_exact(&mut buf));
            if let Err(err) = read {
                info!(
                    "failed to read first 4 bytes of {}: {err}",
                    path.display()
                );
                seterr(&path, err);
                continue;
            }
            if &buf != b"TZif" {
                trace!(
                    "found file {} that isn't TZif since its first \
                     four bytes are {:?}",
                    path.display(),
                    crate::util::escape::Bytes(&buf),
                );
                continue;
            }
            let Ok(time_zone_name) = path.strip_prefix(start) else {
                continue;
            };
            match ZoneInfoName::new(start, time_zone_name) {
                Some(name) => names.push(name),
                None => {
                    info!(
                        "skipping non UTF-8 time zone name {}",
                        path.display()
                    );
                }
            }
        }
    }
    if names.is_empty() {
        return Err(first_err.unwrap_or_else(|| {
            Error::from_args(format_args!("{}: no TZif files", start.display()))
        }));
    }
    names.sort_by(|n1, n2| n1.inner.lower.cmp(&n2.inner.lower));
    Ok(names)
}

/// Like std's `eq_ignore_ascii_case`, but returns a full `Ordering`.
fn cmp_ignore_ascii_case(s1: &str, s2: &str) -> core::cmp::Ordering {
    let it1 = s1.as_bytes().iter().map(|&b| b.to_ascii_lowercase());
    let it2 = s2.as_bytes().iter().map(|&b| b.to_ascii_lowercase());
    it1.cmp(it2)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A fresh zoneinfo directory in the system temp dir, removed on drop.
    struct TempZoneInfo(PathBuf);

    impl TempZoneInfo {
        fn new(name: &str) -> TempZoneInfo {
            let dir = std::env::temp_dir().join(format!(
                "civiltime-zoneinfo-{name}-{}",
                std::process::id(),
            ));
            let _ = std::fs::remove_dir_all(&dir);
            std::fs::create_dir_all(dir.join("America")).unwrap();
            let data = crate::tz::tzif::build_v2(
                &[-18000],
                &[],
                "EST5EDT,M3.2.0,M11.1.0",
            );
            std::fs::write(dir.join("America").join("New_York"), &data)
                .unwrap();
            std::fs::write(dir.join("zone.tab"), "not tzif").unwrap();
            TempZoneInfo(dir)
        }
    }

    impl Drop for TempZoneInfo {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn lookup() -> anyhow::Result<()> {
        let tmp = TempZoneInfo::new("lookup");
        let registry = ZoneInfoRegistry::from_dir(&tmp.0)?;
        assert_eq!(registry.available(), vec!["America/New_York".to_string()]);

        let tz = registry.resolve("america/new_york")?;
        assert_eq!(tz.id(), "America/New_York");
        // Cached lookups give the same zone.
        assert_eq!(registry.get("America/New_York"), Some(tz));
        assert!(registry.get("zone.tab").is_none());
        assert!(registry.resolve("Europe/Paris").unwrap_err().is_unknown_zone());

        registry.reset();
        assert!(registry.get("America/New_York").is_some());
        Ok(())
    }

    #[test]
    fn not_a_directory() {
        let tmp = TempZoneInfo::new("notdir");
        let err = ZoneInfoRegistry::from_dir(&tmp.0.join("zone.tab")).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn empty_registry() {
        let registry = ZoneInfoRegistry::none();
        assert!(registry.get("America/New_York").is_none());
        assert!(registry.available().is_empty());
        assert_eq!(registry.resolve("UTC").unwrap().id(), "UTC");
    }
}
