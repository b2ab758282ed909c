use crate::error::Error;

/// A representation for the day of the week.
///
/// Weekdays are numbered the ISO 8601 way: Monday is `1` and Sunday is `7`.
/// This is what [`Field::DayOfWeek`](crate::Field::DayOfWeek) returns.
///
/// # Example
///
/// ```
/// use civiltime::civil::{date, Weekday};
///
/// let wd = date(2007, 12, 3).weekday();
/// assert_eq!(wd, Weekday::Monday);
/// assert_eq!(wd.to_monday_one_offset(), 1);
/// assert_eq!(wd.previous(), Weekday::Sunday);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(missing_docs)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Converts a weekday number, where Monday is `1` and Sunday is `7`.
    ///
    /// # Errors
    ///
    /// This returns a range error when the number is outside `1..=7`.
    #[inline]
    pub fn from_monday_one_offset(offset: i8) -> Result<Weekday, Error> {
        if !(1..=7).contains(&offset) {
            return Err(Error::range("weekday", offset, 1, 7));
        }
        Ok(Weekday::from_monday_one_offset_unchecked(offset))
    }

    /// Converts a weekday number, where Sunday is `0` and Saturday is `6`.
    ///
    /// # Errors
    ///
    /// This returns a range error when the number is outside `0..=6`.
    #[inline]
    pub fn from_sunday_zero_offset(offset: i8) -> Result<Weekday, Error> {
        if !(0..=6).contains(&offset) {
            return Err(Error::range("weekday", offset, 0, 6));
        }
        Ok(Weekday::from_monday_one_offset_unchecked(if offset == 0 {
            7
        } else {
            offset
        }))
    }

    /// Returns this weekday as a number, where Monday is `1` and Sunday is
    /// `7`.
    #[inline]
    pub fn to_monday_one_offset(self) -> i8 {
        match self {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
            Weekday::Sunday => 7,
        }
    }

    /// Returns this weekday as a number, where Sunday is `0` and Saturday
    /// is `6`.
    #[inline]
    pub fn to_sunday_zero_offset(self) -> i8 {
        self.to_monday_one_offset() % 7
    }

    /// Returns the day after this one, wrapping around from Sunday to
    /// Monday.
    #[inline]
    pub fn next(self) -> Weekday {
        let offset = self.to_monday_one_offset() % 7 + 1;
        Weekday::from_monday_one_offset_unchecked(offset)
    }

    /// Returns the day before this one, wrapping around from Monday to
    /// Sunday.
    #[inline]
    pub fn previous(self) -> Weekday {
        let offset = (self.to_monday_one_offset() + 5) % 7 + 1;
        Weekday::from_monday_one_offset_unchecked(offset)
    }

    /// `offset` must be in `1..=7`. Anything else is treated as Sunday.
    #[inline]
    pub(crate) fn from_monday_one_offset_unchecked(offset: i8) -> Weekday {
        match offset {
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            6 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Weekday {
    fn arbitrary(g: &mut quickcheck::Gen) -> Weekday {
        let offset = (u8::arbitrary(g) % 7) as i8 + 1;
        Weekday::from_monday_one_offset_unchecked(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        assert_eq!(Weekday::from_monday_one_offset(7).unwrap(), Weekday::Sunday);
        assert_eq!(Weekday::from_sunday_zero_offset(0).unwrap(), Weekday::Sunday);
        assert_eq!(Weekday::from_sunday_zero_offset(1).unwrap(), Weekday::Monday);
        assert!(Weekday::from_monday_one_offset(0).unwrap_err().is_range());
        assert!(Weekday::from_sunday_zero_offset(7).unwrap_err().is_range());
        assert_eq!(Weekday::Sunday.to_sunday_zero_offset(), 0);
        assert_eq!(Weekday::Saturday.to_sunday_zero_offset(), 6);
    }

    quickcheck::quickcheck! {
        fn prop_next_previous(wd: Weekday) -> bool {
            wd.next().previous() == wd && wd.previous().next() == wd
        }

        fn prop_monday_one_roundtrip(wd: Weekday) -> bool {
            let offset = wd.to_monday_one_offset();
            Weekday::from_monday_one_offset(offset).unwrap() == wd
        }
    }
}
