use crate::{
    civil::{negate_amount, Date, DateTime, Time, Weekday},
    error::{zoned::Error as E, Error, ErrorContext},
    fmt::{iso, pattern::Pattern},
    tz::{Offset, TimeZone, ZoneRegistry},
    Context, Duration, Field, Instant, Unit,
};

/// A time zone aware instant in time.
///
/// A `Zoned` is an [`Instant`] paired with a [`TimeZone`]. It also caches
/// the civil datetime and the offset of that instant in the time zone, so
/// that field accessors like [`Zoned::hour`] are cheap.
///
/// # Parsing and printing
///
/// A `Zoned` prints as an ISO 8601 datetime with an offset, followed by the
/// time zone identifier in brackets. The bracket is omitted when the
/// identifier is the same as the printed offset:
///
/// ```
/// use civiltime::{civil::date, tz::{BuiltinRegistry, Offset, TimeZone, ZoneRegistry}};
///
/// let tz = BuiltinRegistry::new().resolve("America/New_York")?;
/// let zdt = date(2007, 12, 3).at(10, 15, 30, 0).to_zoned(tz)?;
/// assert_eq!(zdt.to_string(), "2007-12-03T10:15:30-05:00[America/New_York]");
///
/// let tz = TimeZone::fixed(Offset::constant(2));
/// let zdt = date(2007, 12, 3).at(10, 15, 30, 0).to_zoned(tz)?;
/// assert_eq!(zdt.to_string(), "2007-12-03T10:15:30+02:00");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// Parsing with [`str::parse`] only accepts fixed offset identifiers. To
/// resolve region names, use [`Zoned::parse_with`] with a registry:
///
/// ```
/// use civiltime::{tz::BuiltinRegistry, Zoned};
///
/// let text = "2007-12-03T10:15:30+01:00[Europe/Paris]";
/// let zdt = Zoned::parse_with(text, &BuiltinRegistry::new())?;
/// assert_eq!(zdt.time_zone().id(), "Europe/Paris");
/// assert!(text.parse::<Zoned>().unwrap_err().is_unknown_zone());
///
/// let zdt: Zoned = "2007-12-03T10:15:30+01:00".parse()?;
/// assert_eq!(zdt.time_zone().id(), "+01:00");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Arithmetic
///
/// Adding a calendar unit (days, weeks, months or years) changes the civil
/// datetime and then finds the offset again using
/// [`Disambiguation::Compatible`](crate::tz::Disambiguation::Compatible).
/// So adding one day keeps the clock time, even over a daylight saving time
/// transition. Adding a time unit (hours or smaller) moves the instant
/// instead:
///
/// ```
/// use civiltime::{civil::date, tz::{BuiltinRegistry, ZoneRegistry}, Unit};
///
/// let tz = BuiltinRegistry::new().resolve("America/New_York")?;
/// let zdt = date(2024, 3, 9).at(12, 0, 0, 0).to_zoned(tz)?;
///
/// let next = zdt.plus(1, Unit::Day)?;
/// assert_eq!(next.to_string(), "2024-03-10T12:00:00-04:00[America/New_York]");
///
/// let next = zdt.plus(24, Unit::Hour)?;
/// assert_eq!(next.to_string(), "2024-03-10T13:00:00-04:00[America/New_York]");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Comparisons
///
/// Two `Zoned` values are equal when their civil datetime, offset and time
/// zone identifier are all equal. They are ordered by instant first, then by
/// civil datetime and finally by time zone identifier. This means the same
/// instant in two different time zones compares unequal.
#[derive(Clone)]
pub struct Zoned {
    instant: Instant,
    datetime: DateTime,
    offset: Offset,
    time_zone: TimeZone,
}

impl Zoned {
    /// Creates a new zoned datetime from an instant and a time zone.
    ///
    /// This never fails since every instant has exactly one civil datetime
    /// in any time zone.
    #[inline]
    pub fn new(instant: Instant, time_zone: TimeZone) -> Zoned {
        let offset = time_zone.to_offset(instant);
        let datetime = offset.to_datetime(instant);
        Zoned { instant, datetime, offset, time_zone }
    }

    /// Returns the current time according to the given context's clock.
    ///
    /// When `time_zone` is `None`, the context's system time zone is used.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{tz::BuiltinRegistry, Context, FixedClock, Instant, Zoned};
    ///
    /// let instant: Instant = "2007-12-03T10:15:30Z".parse()?;
    /// let ctx = Context::new(
    ///     FixedClock::new(instant, "Asia/Tokyo"),
    ///     BuiltinRegistry::new(),
    /// );
    /// let zdt = Zoned::now(&ctx, None);
    /// assert_eq!(zdt.to_string(), "2007-12-03T19:15:30+09:00[Asia/Tokyo]");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn now(ctx: &Context, time_zone: Option<TimeZone>) -> Zoned {
        let time_zone = time_zone.unwrap_or_else(|| ctx.system_zone());
        Zoned::new(ctx.now(), time_zone)
    }

    /// Parses an ISO 8601 zoned datetime, resolving any bracketed time zone
    /// identifier with the given registry.
    ///
    /// Without a bracketed identifier, the time zone is the fixed offset
    /// that was parsed.
    ///
    /// # Errors
    ///
    /// This returns a parse error when the text isn't a valid zoned
    /// datetime, and an unknown zone error when the identifier doesn't
    /// resolve. When both an offset and a region are given, the offset must
    /// be valid for the datetime in that region.
    pub fn parse_with(
        text: &str,
        registry: &dyn ZoneRegistry,
    ) -> Result<Zoned, Error> {
        iso::DEFAULT_PARSER.parse_zoned(text.as_bytes(), registry)
    }

    /// Parses text with the given pattern and interprets the resulting
    /// civil datetime in the given time zone.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{fmt::pattern::Pattern, tz::TimeZone, Zoned};
    ///
    /// let pattern = Pattern::compile("dd/MM/yyyy HH:mm")?;
    /// let zdt = Zoned::parse_with_pattern("03/12/2007 10:15", &pattern, TimeZone::UTC)?;
    /// assert_eq!(zdt.to_string(), "2007-12-03T10:15:00Z");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse_with_pattern(
        text: &str,
        pattern: &Pattern,
        time_zone: TimeZone,
    ) -> Result<Zoned, Error> {
        pattern.parse(text)?.to_zoned(time_zone)
    }

    /// Returns the time zone of this zoned datetime.
    #[inline]
    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// Returns the instant of this zoned datetime.
    #[inline]
    pub fn to_instant(&self) -> Instant {
        self.instant
    }

    /// Returns the civil datetime of this zoned datetime.
    #[inline]
    pub fn datetime(&self) -> DateTime {
        self.datetime
    }

    /// Returns the civil date of this zoned datetime.
    #[inline]
    pub fn date(&self) -> Date {
        self.datetime.date()
    }

    /// Returns the civil time of this zoned datetime.
    #[inline]
    pub fn time(&self) -> Time {
        self.datetime.time()
    }

    /// Returns the offset in effect at this zoned datetime.
    #[inline]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Returns the year.
    #[inline]
    pub fn year(&self) -> i16 {
        self.datetime.year()
    }

    /// Returns the month, `1..=12`.
    #[inline]
    pub fn month(&self) -> i8 {
        self.datetime.month()
    }

    /// Returns the day of the month.
    #[inline]
    pub fn day(&self) -> i8 {
        self.datetime.day()
    }

    /// Returns the hour, `0..=23`.
    #[inline]
    pub fn hour(&self) -> i8 {
        self.datetime.hour()
    }

    /// Returns the minute, `0..=59`.
    #[inline]
    pub fn minute(&self) -> i8 {
        self.datetime.minute()
    }

    /// Returns the second, `0..=59`.
    #[inline]
    pub fn second(&self) -> i8 {
        self.datetime.second()
    }

    /// Returns the fractional part of the second in nanoseconds.
    #[inline]
    pub fn subsec_nanosecond(&self) -> i32 {
        self.datetime.subsec_nanosecond()
    }

    /// Returns the day of the week.
    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.datetime.weekday()
    }

    /// Returns the day of the year, `1..=366`.
    #[inline]
    pub fn day_of_year(&self) -> i16 {
        self.datetime.day_of_year()
    }

    /// Returns the value of the given field.
    ///
    /// Every field is supported. [`Field::OffsetSeconds`] returns the
    /// offset from UTC in seconds.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::date, tz::{BuiltinRegistry, ZoneRegistry}, Field};
    ///
    /// let tz = BuiltinRegistry::new().resolve("America/New_York")?;
    /// let zdt = date(2024, 7, 4).at(21, 30, 0, 0).to_zoned(tz)?;
    /// assert_eq!(zdt.get(Field::OffsetSeconds)?, -4 * 3600);
    /// assert_eq!(zdt.get(Field::ClockHourOfAmPm)?, 9);
    /// assert_eq!(zdt.get(Field::AmPmOfDay)?, 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get(&self, field: Field) -> Result<i64, Error> {
        match field {
            Field::OffsetSeconds => Ok(i64::from(self.offset.seconds())),
            _ => self.datetime.get(field),
        }
    }

    /// Adds the given amount of a unit to this zoned datetime.
    ///
    /// Calendar units act on the civil datetime and then find the offset
    /// again with the compatible policy, so a result landing in a gap is
    /// moved forward. Time units act on the instant.
    ///
    /// # Errors
    ///
    /// This returns a range error when the result is out of range.
    ///
    /// # Example
    ///
    /// Adding a month to a date in a fold keeps the earlier offset:
    ///
    /// ```
    /// use civiltime::{civil::date, tz::{BuiltinRegistry, ZoneRegistry}, Unit};
    ///
    /// let tz = BuiltinRegistry::new().resolve("America/New_York")?;
    /// let zdt = date(2024, 10, 3).at(1, 30, 0, 0).to_zoned(tz)?;
    /// let next = zdt.plus(1, Unit::Month)?;
    /// assert_eq!(next.to_string(), "2024-11-03T01:30:00-04:00[America/New_York]");
    /// let next = next.plus(1, Unit::Hour)?;
    /// assert_eq!(next.to_string(), "2024-11-03T01:30:00-05:00[America/New_York]");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn plus(&self, amount: i64, unit: Unit) -> Result<Zoned, Error> {
        if unit.is_calendar() {
            let dt = self
                .datetime
                .plus(amount, unit)
                .with_context(|| E::FailedAddCalendar { unit })?;
            return self
                .time_zone
                .to_zoned(dt)
                .with_context(|| E::FailedAddCalendar { unit });
        }
        let instant = self
            .instant
            .plus(amount, unit)
            .with_context(|| E::FailedAddTime { unit })?;
        Ok(self.with_instant(instant))
    }

    /// Subtracts the given amount of a unit from this zoned datetime.
    ///
    /// # Errors
    ///
    /// See [`Zoned::plus`].
    #[inline]
    pub fn minus(&self, amount: i64, unit: Unit) -> Result<Zoned, Error> {
        self.plus(negate_amount(amount, unit)?, unit)
    }

    /// Adds an exact duration to the instant of this zoned datetime.
    ///
    /// # Errors
    ///
    /// This returns a range error when the result is out of range.
    pub fn plus_duration(&self, duration: Duration) -> Result<Zoned, Error> {
        let instant = self
            .instant
            .plus_duration(duration)
            .with_context(|| E::FailedAddTime { unit: Unit::Nanosecond })?;
        Ok(self.with_instant(instant))
    }

    /// Subtracts an exact duration from the instant of this zoned datetime.
    ///
    /// # Errors
    ///
    /// This returns a range error when the result is out of range.
    pub fn minus_duration(&self, duration: Duration) -> Result<Zoned, Error> {
        let instant = self
            .instant
            .minus_duration(duration)
            .with_context(|| E::FailedAddTime { unit: Unit::Nanosecond })?;
        Ok(self.with_instant(instant))
    }

    /// Returns the same instant in a different time zone.
    ///
    /// # Example
    ///
    /// ```
    /// use civiltime::{civil::date, tz::{BuiltinRegistry, ZoneRegistry}};
    ///
    /// let registry = BuiltinRegistry::new();
    /// let paris = registry.resolve("Europe/Paris")?;
    /// let zdt = date(2007, 12, 3).at(10, 15, 30, 0).to_zoned(paris)?;
    /// let tokyo = zdt.with_time_zone_same_instant(registry.resolve("Asia/Tokyo")?);
    /// assert_eq!(tokyo.to_string(), "2007-12-03T18:15:30+09:00[Asia/Tokyo]");
    /// assert_eq!(tokyo.to_instant(), zdt.to_instant());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn with_time_zone_same_instant(&self, time_zone: TimeZone) -> Zoned {
        Zoned::new(self.instant, time_zone)
    }

    /// Returns the first instant of this zoned datetime's day in its time
    /// zone.
    ///
    /// # Errors
    ///
    /// This returns an error when the start of the day is out of range.
    pub fn start_of_day(&self) -> Result<Zoned, Error> {
        self.date().at_start_of_day(self.time_zone.clone())
    }

    #[inline]
    fn with_instant(&self, instant: Instant) -> Zoned {
        Zoned::new(instant, self.time_zone.clone())
    }
}

impl Default for Zoned {
    #[inline]
    fn default() -> Zoned {
        Zoned::new(Instant::UNIX_EPOCH, TimeZone::UTC)
    }
}

impl core::fmt::Debug for Zoned {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for Zoned {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::StdFmtWrite;

        iso::DEFAULT_PRINTER
            .print_zoned(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

/// Parses a zoned datetime whose time zone, if bracketed, is a fixed
/// offset identifier like `+02:00` or `UTC`.
///
/// Use [`Zoned::parse_with`] to resolve region names.
impl core::str::FromStr for Zoned {
    type Err = Error;

    fn from_str(string: &str) -> Result<Zoned, Error> {
        use crate::tz::FixedOnly;

        Zoned::parse_with(string, &FixedOnly)
    }
}

impl Eq for Zoned {}

impl PartialEq for Zoned {
    #[inline]
    fn eq(&self, rhs: &Zoned) -> bool {
        self.datetime == rhs.datetime
            && self.offset == rhs.offset
            && self.time_zone == rhs.time_zone
    }
}

impl core::hash::Hash for Zoned {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.datetime.hash(state);
        self.offset.hash(state);
        self.time_zone.hash(state);
    }
}

impl Ord for Zoned {
    fn cmp(&self, rhs: &Zoned) -> core::cmp::Ordering {
        self.instant
            .cmp(&rhs.instant)
            .then_with(|| self.datetime.cmp(&rhs.datetime))
            .then_with(|| self.time_zone.id().cmp(rhs.time_zone.id()))
    }
}

impl PartialOrd for Zoned {
    #[inline]
    fn partial_cmp(&self, rhs: &Zoned) -> Option<core::cmp::Ordering> {
        Some(self.cmp(rhs))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Zoned {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Zoned {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Zoned, D::Error> {
        use serde::de;

        struct ZonedVisitor;

        impl<'de> de::Visitor<'de> for ZonedVisitor {
            type Value = Zoned;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a zoned datetime string with a fixed offset")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Zoned, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(ZonedVisitor)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Zoned {
    fn arbitrary(g: &mut quickcheck::Gen) -> Zoned {
        let instant = Instant::arbitrary(g);
        let time_zone = match u8::arbitrary(g) % 3 {
            0 => TimeZone::UTC,
            1 => TimeZone::fixed(Offset::arbitrary(g)),
            _ => crate::tz::BuiltinRegistry::new()
                .get("America/New_York")
                .unwrap_or(TimeZone::UTC),
        };
        Zoned::new(instant, time_zone)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Zoned>> {
        let time_zone = self.time_zone.clone();
        Box::new(
            self.instant
                .shrink()
                .map(move |instant| Zoned::new(instant, time_zone.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        civil::date,
        tz::{BuiltinRegistry, Disambiguation},
    };

    use super::*;

    fn new_york() -> TimeZone {
        BuiltinRegistry::new().resolve("America/New_York").unwrap()
    }

    #[test]
    fn gap_and_fold() {
        let tz = new_york();

        let gap = date(2024, 3, 10).at(2, 30, 0, 0);
        let zdt = gap.to_zoned(tz.clone()).unwrap();
        assert_eq!(zdt.datetime(), date(2024, 3, 10).at(3, 30, 0, 0));
        assert_eq!(zdt.offset(), Offset::constant(-4));
        let zdt = tz
            .to_ambiguous_zoned(gap)
            .disambiguate(Disambiguation::Later)
            .unwrap();
        assert_eq!(zdt.datetime(), date(2024, 3, 10).at(3, 30, 0, 0));

        let fold = date(2024, 11, 3).at(1, 30, 0, 0);
        let zdt = fold.to_zoned(tz.clone()).unwrap();
        assert_eq!(zdt.offset(), Offset::constant(-4));
        let later = zdt.plus(1, Unit::Hour).unwrap();
        assert_eq!(later.datetime(), fold);
        assert_eq!(later.offset(), Offset::constant(-5));
        assert_ne!(zdt, later);
        assert!(zdt < later);
    }

    #[test]
    fn calendar_vs_time_units() {
        let zdt = date(2024, 3, 9).at(2, 30, 0, 0).to_zoned(new_york()).unwrap();
        let next = zdt.plus(1, Unit::Day).unwrap();
        assert_eq!(next.datetime(), date(2024, 3, 10).at(3, 30, 0, 0));
        let next = zdt.plus(1, Unit::Week).unwrap();
        assert_eq!(next.datetime(), date(2024, 3, 16).at(2, 30, 0, 0));
        let next = zdt.plus(2, Unit::HalfDay).unwrap();
        assert_eq!(next.datetime(), date(2024, 3, 10).at(3, 30, 0, 0));
        let back = next.minus(1, Unit::Day).unwrap();
        assert_eq!(back.datetime(), date(2024, 3, 9).at(3, 30, 0, 0));
    }

    #[test]
    fn errors() {
        let zdt = Zoned::new(Instant::MAX, TimeZone::UTC);
        insta::assert_snapshot!(
            zdt.plus(1, Unit::Second).unwrap_err(),
            @"failed to add seconds to the instant of zoned datetime: failed to add seconds to instant: parameter 'instant-second' with value 253402214400 is not in the required range of -377705030400..=253402214399",
        );
        insta::assert_snapshot!(
            zdt.plus(1, Unit::Year).unwrap_err(),
            @"failed to add years to the local datetime of zoned datetime: failed to add years to civil date: parameter 'year' with value 10000 is not in the required range of -9999..=9999",
        );
    }

    #[test]
    fn fields() {
        let zdt = date(2024, 7, 4).at(0, 5, 6, 7).to_zoned(new_york()).unwrap();
        assert_eq!(zdt.get(Field::OffsetSeconds).unwrap(), -14_400);
        assert_eq!(zdt.get(Field::ClockHourOfAmPm).unwrap(), 12);
        assert_eq!(zdt.get(Field::NanoOfSecond).unwrap(), 7);
        assert_eq!(zdt.weekday(), Weekday::Thursday);
        assert_eq!(zdt.day_of_year(), 186);
    }

    #[test]
    fn display_and_parse() {
        let zdt: Zoned = "2024-07-04T00:05:06-04:00".parse().unwrap();
        assert_eq!(zdt.time_zone().id(), "-04:00");
        assert_eq!(zdt.to_string(), "2024-07-04T00:05:06-04:00");

        let zdt: Zoned = "2024-07-04T00:05:06Z[UTC]".parse().unwrap();
        assert_eq!(zdt.to_string(), "2024-07-04T00:05:06Z[UTC]");

        let registry = BuiltinRegistry::new();
        let text = "2024-11-03T01:30:00-05:00[America/New_York]";
        let zdt = Zoned::parse_with(text, &registry).unwrap();
        assert_eq!(zdt.offset(), Offset::constant(-5));
        assert_eq!(zdt.to_string(), text);
    }

    #[test]
    fn start_of_day() {
        let zdt = date(2024, 3, 10).at(12, 0, 0, 0).to_zoned(new_york()).unwrap();
        let start = zdt.start_of_day().unwrap();
        assert_eq!(start.to_string(), "2024-03-10T00:00:00-05:00[America/New_York]");
    }

    quickcheck::quickcheck! {
        fn prop_instant_roundtrip(zdt: Zoned) -> bool {
            Zoned::new(zdt.to_instant(), zdt.time_zone().clone()) == zdt
        }

        fn prop_offset_consistent(zdt: Zoned) -> bool {
            zdt.offset().to_instant(zdt.datetime()).unwrap() == zdt.to_instant()
        }

        fn prop_parse_roundtrip(zdt: Zoned) -> bool {
            let registry = BuiltinRegistry::new();
            Zoned::parse_with(&zdt.to_string(), &registry).unwrap() == zdt
        }
    }
}
