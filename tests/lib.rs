use civiltime::tz::{TimeZone, ZoneRegistry};

mod init;
mod pattern;
mod properties;
#[cfg(feature = "serde")]
mod serialization;
mod zones;

/// A type alias we use for tests.
///
/// Most of these tests exercise fallible constructors and parsers, so `?`
/// keeps them readable.
type Result = std::result::Result<(), civiltime::Error>;

/// A simple logger that writes everything to stderr.
///
/// Tests that want to see log output (with the `logging` feature enabled)
/// call `Logger::init` first. Initializing more than once is harmless.
#[derive(Debug)]
struct Logger(());

const LOGGER: &'static Logger = &Logger(());

impl Logger {
    fn init() -> std::result::Result<(), log::SetLoggerError> {
        log::set_logger(LOGGER)?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }
}

impl log::Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        match (record.file(), record.line()) {
            (Some(file), Some(line)) => {
                eprintln!(
                    "{}|{}|{}:{}: {}",
                    record.level(),
                    record.target(),
                    file,
                    line,
                    record.args()
                );
            }
            (Some(file), None) => {
                eprintln!(
                    "{}|{}|{}: {}",
                    record.level(),
                    record.target(),
                    file,
                    record.args()
                );
            }
            _ => {
                eprintln!(
                    "{}|{}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {}
}

/// A registry that only knows a few regions, all with made up names.
///
/// This keeps the tests independent of both the builtin regions and the
/// host's zoneinfo database.
#[derive(Debug)]
struct FakeRegistry;

impl FakeRegistry {
    const ZONES: &'static [(&'static str, &'static str)] = &[
        ("Test/Eastern", "EST5EDT,M3.2.0,M11.1.0"),
        ("Test/Central_Europe", "CET-1CEST,M3.5.0,M10.5.0/3"),
        ("Test/Tokyo", "JST-9"),
        ("Test/Santiago", "<-04>4<-03>,M9.1.6/24,M4.1.6/24"),
    ];
}

impl ZoneRegistry for FakeRegistry {
    fn get(&self, name: &str) -> Option<TimeZone> {
        let &(name, rule) =
            FakeRegistry::ZONES.iter().find(|&&(n, _)| n == name)?;
        TimeZone::posix_with_name(name, rule).ok()
    }

    fn available(&self) -> Vec<String> {
        FakeRegistry::ZONES.iter().map(|&(n, _)| n.to_string()).collect()
    }
}
