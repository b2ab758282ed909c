/*!
Civil ("wall clock") dates and times, without any time zone.

The types in this module describe what a calendar on the wall and a clock
face show: [`Date`], [`Time`] and their combination [`DateTime`]. None of
them identify a precise instant in time. To get one, combine a civil
datetime with a [`TimeZone`](crate::tz::TimeZone) via
[`DateTime::to_zoned`].

Every type here uses the proleptic Gregorian calendar and supports years in
the range `-9999..=9999`. Arithmetic on civil values treats every day as
exactly 24 hours long.

# Example

```
use civiltime::{civil::date, Unit};

let dt = date(2024, 1, 31).at(17, 30, 0, 0);
assert_eq!(dt.plus(1, Unit::Month)?.to_string(), "2024-02-29T17:30:00");
assert_eq!(dt.plus(8, Unit::Hour)?.to_string(), "2024-02-01T01:30:00");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub use self::{
    date::Date,
    datetime::DateTime,
    time::Time,
    weekday::Weekday,
};

mod date;
mod datetime;
mod time;
mod weekday;

/// Creates a new `Date` value in a `const` context.
///
/// This is a convenience free function for [`Date::constant`].
///
/// # Panics
///
/// This panics when the given year-month-day isn't a valid date.
///
/// # Example
///
/// ```
/// use civiltime::civil::date;
///
/// let d = date(2007, 12, 3);
/// assert_eq!(d.to_string(), "2007-12-03");
/// ```
#[inline]
pub const fn date(year: i16, month: i8, day: i8) -> Date {
    Date::constant(year, month, day)
}

/// Creates a new `Time` value in a `const` context.
///
/// This is a convenience free function for [`Time::constant`].
///
/// # Panics
///
/// This panics when any of the components are out of range.
#[inline]
pub const fn time(
    hour: i8,
    minute: i8,
    second: i8,
    subsec_nanosecond: i32,
) -> Time {
    Time::constant(hour, minute, second, subsec_nanosecond)
}

/// Creates a new `DateTime` value in a `const` context.
///
/// This is a convenience free function for [`DateTime::constant`].
///
/// # Panics
///
/// This panics when any of the components are out of range, or when the
/// year-month-day isn't a valid date.
#[inline]
pub const fn datetime(
    year: i16,
    month: i8,
    day: i8,
    hour: i8,
    minute: i8,
    second: i8,
    subsec_nanosecond: i32,
) -> DateTime {
    DateTime::constant(
        year,
        month,
        day,
        hour,
        minute,
        second,
        subsec_nanosecond,
    )
}

/// Negates an amount given to a `minus` method.
pub(crate) fn negate_amount(
    amount: i64,
    unit: crate::Unit,
) -> Result<i64, crate::Error> {
    amount.checked_neg().ok_or_else(|| {
        crate::Error::range(unit.plural(), amount, i64::MIN + 1, i64::MAX)
    })
}
