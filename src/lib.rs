/*!
Civil dates, clock times, instants and zoned datetimes.

This crate provides value types for working with time as people write it
down (a [`civil::Date`], a [`civil::Time`] or a [`civil::DateTime`]) and as
it happens on the timeline (an [`Instant`]). A [`Zoned`] ties the two
together: an instant, the time zone it's viewed in and the resulting civil
datetime and offset.

All values are immutable. Every fallible operation returns the single
crate-wide [`Error`] type.

# Time zones are resolved explicitly

A [`tz::TimeZone`] is obtained by resolving an identifier against a
[`tz::ZoneRegistry`]. There is no global time zone database. Operations
that depend on the current time or the host's time zone take a [`Context`],
which bundles a [`Clock`] with a registry. This makes it straightforward
to test code that depends on "now":

```
use civiltime::{tz::BuiltinRegistry, Context, FixedClock, Instant, Zoned};

let instant: Instant = "2024-07-04T16:30:00Z".parse()?;
let ctx = Context::new(
    FixedClock::new(instant, "America/New_York"),
    BuiltinRegistry::new(),
);
let now = Zoned::now(&ctx, None);
assert_eq!(now.to_string(), "2024-07-04T12:30:00-04:00[America/New_York]");

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Gaps and folds

When clocks move forward, some civil datetimes never happen (a gap). When
they move backward, some happen twice (a fold). Converting such a datetime
to a `Zoned` with [`civil::DateTime::to_zoned`] uses the
[`tz::Disambiguation::Compatible`] strategy: a gap shifts forward by its
length and a fold picks the earlier instant. Other strategies are available
via [`tz::TimeZone::to_ambiguous_zoned`].

```
use civiltime::{civil::date, tz::{BuiltinRegistry, ZoneRegistry}};

let tz = BuiltinRegistry::new().resolve("America/New_York")?;

let zdt = date(2024, 3, 10).at(2, 30, 0, 0).to_zoned(tz.clone())?;
assert_eq!(zdt.to_string(), "2024-03-10T03:30:00-04:00[America/New_York]");

let zdt = date(2024, 11, 3).at(1, 30, 0, 0).to_zoned(tz)?;
assert_eq!(zdt.to_string(), "2024-11-03T01:30:00-04:00[America/New_York]");

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Formatting and parsing

Every value implements `Display` and `FromStr` using ISO 8601. Other
layouts are supported by compiling a pattern with
[`fmt::pattern::Pattern`]. See the [`fmt`] module.

# Durations

A [`Duration`] is an exact, signed amount of elapsed time. Days are always
24 hours. The duration between two zoned datetimes is the true elapsed time
between their instants, so a week spanning a daylight saving time
transition may be 167 or 169 hours.

```
use civiltime::{civil::date, tz::{BuiltinRegistry, ZoneRegistry}, Duration, Unit};

let tz = BuiltinRegistry::new().resolve("America/New_York")?;
let start = date(2024, 3, 7).at(12, 0, 0, 0).to_zoned(tz)?;
let end = start.plus(1, Unit::Week)?;
assert_eq!(Duration::between(&start, &end).to_hours(), 167);

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Crate features

* **logging** - Emits log messages through the [`log`] crate. This is
mostly useful for seeing how time zone identifiers are resolved.
* **serde** - Implements `Serialize` and `Deserialize` for the value types,
using their ISO 8601 representations.
* **tz-system** (enabled by default) - Lets [`SystemClock`] discover the
host's time zone from `TZ` or `/etc/localtime`.
* **tzdb-zoneinfo** (enabled by default) - Enables
[`tz::ZoneInfoRegistry`], which reads the TZif files of the system's
zoneinfo database.
*/

#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

pub use crate::{
    clock::{Clock, FixedClock, SystemClock},
    context::Context,
    duration::{Duration, TimelinePoint},
    error::Error,
    instant::Instant,
    unit::{Field, Unit},
    zoned::Zoned,
};

#[macro_use]
mod logging;

pub mod civil;
mod clock;
mod context;
mod duration;
mod error;
pub mod fmt;
mod instant;
pub mod tz;
mod unit;
mod util;
mod zoned;
