use crate::util::calendar::{NANOS_PER_DAY, NANOS_PER_SECOND};

/// A unit of time used for datetime arithmetic.
///
/// Units are given to the `plus` and `minus` methods on every datetime type
/// in this crate, and to [`Duration::of`](crate::Duration::of). Not every
/// type supports every unit. For example, a [`civil::Time`](crate::civil::Time)
/// has no notion of days and an [`Instant`](crate::Instant) has no notion of
/// months. Using an unsupported unit returns an error for which
/// [`Error::is_invalid_parameter`](crate::Error::is_invalid_parameter) is
/// true.
///
/// Units from [`Unit::Nanosecond`] to [`Unit::HalfDay`] are _time_ units:
/// they always correspond to a fixed number of nanoseconds. Units from
/// [`Unit::Day`] to [`Unit::Year`] are _calendar_ units. Days and weeks are
/// treated as exactly 24 and 168 hours on types without a time zone, but on
/// a [`Zoned`](crate::Zoned) they keep the local clock time instead.
///
/// # Example: ordering
///
/// Bigger units compare greater than smaller units.
///
/// ```
/// use civiltime::Unit;
///
/// assert!(Unit::Year > Unit::Nanosecond);
/// assert!(Unit::Day > Unit::HalfDay);
/// assert!(Unit::Hour > Unit::Minute);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Unit {
    /// A Gregorian calendar year. It usually has 365 days for non-leap years,
    /// and 366 days for leap years.
    Year = 10,
    /// A Gregorian calendar month. It usually has one of 28, 29, 30 or 31
    /// days.
    Month = 9,
    /// A week is 7 days.
    Week = 8,
    /// A day is 24 hours in civil time, but may be longer or shorter in a
    /// time zone with transitions.
    Day = 7,
    /// Half of a civil day, i.e., 12 hours.
    HalfDay = 6,
    /// An hour is always 60 minutes.
    Hour = 5,
    /// A minute is always 60 seconds. (Leap seconds do not exist here.)
    Minute = 4,
    /// A second is always 1,000 milliseconds.
    Second = 3,
    /// A millisecond is always 1,000 microseconds.
    Millisecond = 2,
    /// A microsecond is always 1,000 nanoseconds.
    Microsecond = 1,
    /// A nanosecond is the smallest granularity of time supported.
    Nanosecond = 0,
}

impl Unit {
    /// Returns the number of nanoseconds in this unit, if it has a fixed
    /// length. Days count as 24 hours. Weeks, months and years return
    /// `None`.
    pub(crate) fn nanoseconds(self) -> Option<i64> {
        Some(match self {
            Unit::Nanosecond => 1,
            Unit::Microsecond => 1_000,
            Unit::Millisecond => 1_000_000,
            Unit::Second => NANOS_PER_SECOND,
            Unit::Minute => 60 * NANOS_PER_SECOND,
            Unit::Hour => 3_600 * NANOS_PER_SECOND,
            Unit::HalfDay => 43_200 * NANOS_PER_SECOND,
            Unit::Day => NANOS_PER_DAY,
            Unit::Week | Unit::Month | Unit::Year => return None,
        })
    }

    /// Returns true when this unit is a calendar unit, i.e., days or bigger.
    pub(crate) fn is_calendar(self) -> bool {
        self >= Unit::Day
    }

    /// A human readable singular description of this unit of time.
    pub(crate) fn singular(&self) -> &'static str {
        match *self {
            Unit::Year => "year",
            Unit::Month => "month",
            Unit::Week => "week",
            Unit::Day => "day",
            Unit::HalfDay => "half-day",
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
            Unit::Millisecond => "millisecond",
            Unit::Microsecond => "microsecond",
            Unit::Nanosecond => "nanosecond",
        }
    }

    /// A human readable plural description of this unit of time.
    pub(crate) fn plural(&self) -> &'static str {
        match *self {
            Unit::Year => "years",
            Unit::Month => "months",
            Unit::Week => "weeks",
            Unit::Day => "days",
            Unit::HalfDay => "half-days",
            Unit::Hour => "hours",
            Unit::Minute => "minutes",
            Unit::Second => "seconds",
            Unit::Millisecond => "milliseconds",
            Unit::Microsecond => "microseconds",
            Unit::Nanosecond => "nanoseconds",
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.singular())
    }
}

/// A field that can be extracted from a datetime value.
///
/// Fields are read with the `get` method on [`civil::Date`],
/// [`civil::Time`], [`civil::DateTime`] and [`Zoned`]. An
/// [`Instant`](crate::Instant) has no civil fields: attach a time zone with
/// [`Instant::to_zoned`](crate::Instant::to_zoned) first.
///
/// Asking for a field a value doesn't have (like the hour of a date) returns
/// an error for which
/// [`Error::is_invalid_parameter`](crate::Error::is_invalid_parameter) is
/// true.
///
/// [`civil::Date`]: crate::civil::Date
/// [`civil::Time`]: crate::civil::Time
/// [`civil::DateTime`]: crate::civil::DateTime
/// [`Zoned`]: crate::Zoned
///
/// # Example
///
/// ```
/// use civiltime::{Field, Instant, tz::TimeZone};
///
/// let instant: Instant = "2007-12-03T04:15:30Z".parse()?;
/// let zdt = instant.to_zoned(TimeZone::UTC);
/// assert_eq!(zdt.get(Field::DayOfMonth)?, 3);
/// assert_eq!(zdt.get(Field::MonthOfYear)?, 12);
/// assert_eq!(zdt.get(Field::Year)?, 2007);
/// assert_eq!(zdt.get(Field::HourOfDay)?, 4);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Field {
    /// The proleptic Gregorian year, `-9999..=9999`.
    Year,
    /// The month of the year, `1..=12`.
    MonthOfYear,
    /// The day of the month, `1..=31`.
    DayOfMonth,
    /// The ISO day of the week, Monday is `1` and Sunday is `7`.
    DayOfWeek,
    /// The day of the year, `1..=366`.
    DayOfYear,
    /// The hour of the day, `0..=23`.
    HourOfDay,
    /// The hour on a 12-hour clock face, `1..=12`.
    ClockHourOfAmPm,
    /// The hour within the morning or afternoon, `0..=11`.
    HourOfAmPm,
    /// `0` for AM and `1` for PM.
    AmPmOfDay,
    /// The minute of the hour, `0..=59`.
    MinuteOfHour,
    /// The second of the minute, `0..=59`.
    SecondOfMinute,
    /// The millisecond of the second, `0..=999`.
    MilliOfSecond,
    /// The nanosecond of the second, `0..=999_999_999`.
    NanoOfSecond,
    /// The offset from UTC in seconds. Only available on zoned values.
    OffsetSeconds,
}

impl Field {
    /// A human readable name for this field.
    pub(crate) fn name(&self) -> &'static str {
        match *self {
            Field::Year => "year",
            Field::MonthOfYear => "month-of-year",
            Field::DayOfMonth => "day-of-month",
            Field::DayOfWeek => "day-of-week",
            Field::DayOfYear => "day-of-year",
            Field::HourOfDay => "hour-of-day",
            Field::ClockHourOfAmPm => "clock-hour-of-am-pm",
            Field::HourOfAmPm => "hour-of-am-pm",
            Field::AmPmOfDay => "am-pm-of-day",
            Field::MinuteOfHour => "minute-of-hour",
            Field::SecondOfMinute => "second-of-minute",
            Field::MilliOfSecond => "milli-of-second",
            Field::NanoOfSecond => "nano-of-second",
            Field::OffsetSeconds => "offset-seconds",
        }
    }

    /// Returns true when this field is derived from a date.
    pub(crate) fn is_date_based(&self) -> bool {
        matches!(
            *self,
            Field::Year
                | Field::MonthOfYear
                | Field::DayOfMonth
                | Field::DayOfWeek
                | Field::DayOfYear
        )
    }

    /// Returns true when this field is derived from a clock time.
    pub(crate) fn is_time_based(&self) -> bool {
        !self.is_date_based() && *self != Field::OffsetSeconds
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
