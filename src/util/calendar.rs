/*!
Pure calendar arithmetic for the proleptic Gregorian calendar.

Everything here works on plain integers and implicitly assumes the inputs
are valid (i.e., within the crate's supported civil range). Callers are
responsible for validation. None of these routines know anything about time
zones, formatting or locales.
*/

/// The number of seconds in a civil day.
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// The number of nanoseconds in a second.
pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// The number of nanoseconds in a civil day.
pub(crate) const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;

/// The smallest supported year.
pub(crate) const YEAR_MIN: i16 = -9999;

/// The largest supported year.
pub(crate) const YEAR_MAX: i16 = 9999;

/// The epoch day of `-9999-01-01`.
pub(crate) const EPOCH_DAY_MIN: i32 = -4371587;

/// The epoch day of `9999-12-31`.
pub(crate) const EPOCH_DAY_MAX: i32 = 2932896;

/// Returns true if and only if the given year is a leap year.
///
/// A year is a leap year when it is divisible by 4, except for centuries,
/// which must also be divisible by 400.
#[inline]
pub(crate) const fn is_leap_year(year: i16) -> bool {
    // A year divisible by 25 and 4 is divisible by 100. So for those, we
    // check divisibility by 16 instead, which together with 25 gives 400.
    let d = if year % 25 != 0 { 4 } else { 16 };
    (year % d) == 0
}

/// Returns the number of days in the given year.
#[inline]
pub(crate) const fn days_in_year(year: i16) -> i16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Return the number of days in the given month.
#[inline]
pub(crate) const fn days_in_month(year: i16, month: i8) -> i8 {
    if month == 2 {
        if is_leap_year(year) {
            29
        } else {
            28
        }
    } else {
        30 | (month ^ month >> 3)
    }
}

/// Clamps the given day to the last day of the given month.
///
/// This is what month and year arithmetic uses, so that, e.g., January 31
/// plus one month is the last day of February.
#[inline]
pub(crate) const fn saturate_day_in_month(
    year: i16,
    month: i8,
    day: i8,
) -> i8 {
    let max = days_in_month(year, month);
    if day > max {
        max
    } else {
        day
    }
}

/// Returns the one-based ordinal day of the year.
pub(crate) const fn day_of_year(year: i16, month: i8, day: i8) -> i16 {
    let start = to_epoch_day(year, 1, 1);
    (to_epoch_day(year, month, day) - start + 1) as i16
}

/// Converts a Gregorian date to days since the Unix epoch.
///
/// This is Neri-Schneider. There's no branching or divisions by anything
/// other than constants.
///
/// Ref: <https://github.com/cassioneri/eaf/blob/684d3cc32d14eee371d0abe4f683d6d6a49ed5c1/algorithms/neri_schneider.hpp#L83>
#[inline]
#[allow(non_upper_case_globals, non_snake_case)] // to mimic source
pub(crate) const fn to_epoch_day(year: i16, month: i8, day: i8) -> i32 {
    const s: u32 = 82;
    const K: u32 = 719468 + 146097 * s;
    const L: u32 = 400 * s;

    let year = year as i32 as u32;
    let month = month as u32;
    let day = day as u32;

    let J = month <= 2;
    let Y = year.wrapping_add(L).wrapping_sub(J as u32);
    let M = if J { month + 12 } else { month };
    let D = day - 1;
    let C = Y / 100;

    let y_star = 1461 * Y / 4 - C + C / 4;
    let m_star = (979 * M - 2919) / 32;
    let N = y_star + m_star + D;

    N.wrapping_sub(K) as i32
}

/// Converts days since the Unix epoch to a Gregorian `(year, month, day)`.
///
/// Ref: <https://github.com/cassioneri/eaf/blob/684d3cc32d14eee371d0abe4f683d6d6a49ed5c1/algorithms/neri_schneider.hpp#L40C3-L40C34>
#[inline]
#[allow(non_upper_case_globals, non_snake_case)] // to mimic source
pub(crate) const fn from_epoch_day(epoch_day: i32) -> (i16, i8, i8) {
    const s: u32 = 82;
    const K: u32 = 719468 + 146097 * s;
    const L: u32 = 400 * s;

    let N_U = epoch_day as u32;
    let N = N_U.wrapping_add(K);

    let N_1 = 4 * N + 3;
    let C = N_1 / 146097;
    let N_C = (N_1 % 146097) / 4;

    let N_2 = 4 * N_C + 3;
    let P_2 = 2939745 * (N_2 as u64);
    let Z = (P_2 / 4294967296) as u32;
    let N_Y = (P_2 % 4294967296) as u32 / 2939745 / 4;
    let Y = 100 * C + Z;

    let N_3 = 2141 * N_Y + 197913;
    let M = N_3 / 65536;
    let D = (N_3 % 65536) / 2141;

    let J = N_Y >= 306;
    let year = Y.wrapping_sub(L).wrapping_add(J as u32) as i32 as i16;
    let month = (if J { M - 12 } else { M }) as i8;
    let day = (D + 1) as i8;
    (year, month, day)
}

/// Returns the ISO weekday number (Monday is `1`, Sunday is `7`) of the
/// given epoch day.
#[inline]
pub(crate) const fn weekday_from_epoch_day(epoch_day: i32) -> i8 {
    // 1970-01-01 was a Thursday.
    ((epoch_day + 3).rem_euclid(7) + 1) as i8
}

/// Adds a signed number of months to the given year and month, returning
/// the new year and month. The year returned may be outside the supported
/// range, so it's returned as an `i64` for the caller to check.
#[inline]
pub(crate) fn add_months(year: i16, month: i8, months: i64) -> (i64, i8) {
    let total = i64::from(year) * 12 + i64::from(month - 1) + months;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as i8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_epoch_day() {
        for year in YEAR_MIN..=YEAR_MAX {
            for month in 1..=12 {
                for day in 1..=days_in_month(year, month) {
                    let epoch_day = to_epoch_day(year, month, day);
                    assert_eq!((year, month, day), from_epoch_day(epoch_day));
                }
            }
        }
    }

    #[test]
    fn epoch_day_bounds() {
        assert_eq!(to_epoch_day(1970, 1, 1), 0);
        assert_eq!(to_epoch_day(2007, 12, 3), 13850);
        assert_eq!(to_epoch_day(YEAR_MIN, 1, 1), EPOCH_DAY_MIN);
        assert_eq!(to_epoch_day(YEAR_MAX, 12, 31), EPOCH_DAY_MAX);
        assert_eq!(from_epoch_day(-1), (1969, 12, 31));
    }

    #[test]
    fn leap_year() {
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2001));
        assert!(is_leap_year(2004));
        assert!(!is_leap_year(2100));
        assert!(is_leap_year(2400));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));
        assert_eq!(days_in_year(2024), 366);
        assert_eq!(days_in_year(2023), 365);
    }

    #[test]
    fn number_of_days_in_month() {
        let expected = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (i, &days) in expected.iter().enumerate() {
            assert_eq!(days_in_month(2024, i as i8 + 1), days);
        }
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn saturate() {
        assert_eq!(saturate_day_in_month(2024, 2, 31), 29);
        assert_eq!(saturate_day_in_month(2023, 2, 31), 28);
        assert_eq!(saturate_day_in_month(2023, 4, 31), 30);
        assert_eq!(saturate_day_in_month(2023, 4, 15), 15);
    }

    #[test]
    fn weekday_and_ordinal() {
        // 2007-12-03 was a Monday.
        assert_eq!(weekday_from_epoch_day(to_epoch_day(2007, 12, 3)), 1);
        assert_eq!(weekday_from_epoch_day(0), 4);
        assert_eq!(weekday_from_epoch_day(-1), 3);
        assert_eq!(day_of_year(2024, 12, 31), 366);
        assert_eq!(day_of_year(2023, 3, 1), 60);
    }

    #[test]
    fn month_arithmetic() {
        assert_eq!(add_months(2024, 1, 1), (2024, 2));
        assert_eq!(add_months(2024, 12, 1), (2025, 1));
        assert_eq!(add_months(2024, 1, -1), (2023, 12));
        assert_eq!(add_months(2024, 3, -27), (2021, 12));
        assert_eq!(add_months(2024, 3, 24), (2026, 3));
    }
}
