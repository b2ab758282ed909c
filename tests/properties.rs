use civiltime::{
    civil::{date, Date, DateTime},
    fmt::pattern::Pattern,
    tz::{Offset, TimeZone, ZoneRegistry},
    Duration, Instant, Unit,
};

use crate::FakeRegistry;

fn zones() -> Vec<TimeZone> {
    let mut zones = vec![
        TimeZone::UTC,
        TimeZone::fixed(Offset::new(5, 45).unwrap()),
        TimeZone::fixed(Offset::MIN),
    ];
    for name in FakeRegistry.available() {
        zones.push(FakeRegistry.resolve(&name).unwrap());
    }
    zones
}

/// Instants spread across the supported range, including both ends and
/// the transitions of the fake zones in 2024.
fn instants() -> Vec<Instant> {
    let mut instants = vec![Instant::MIN, Instant::MAX, Instant::UNIX_EPOCH];
    let step = (Instant::MAX.epoch_second() - Instant::MIN.epoch_second()) / 97;
    let mut second = Instant::MIN.epoch_second();
    while second < Instant::MAX.epoch_second() {
        instants.push(Instant::from_epoch_second(second).unwrap());
        second += step;
    }
    for text in [
        "2024-03-10T06:59:59Z",
        "2024-03-10T07:00:00Z",
        "2024-11-03T05:59:59.999999999Z",
        "2024-11-03T06:00:00Z",
        "2024-09-08T04:00:00Z",
        "2024-04-07T02:59:59Z",
    ] {
        instants.push(text.parse().unwrap());
    }
    instants
}

#[test]
fn date_pattern_roundtrip() -> crate::Result {
    let pattern = Pattern::compile("yyyy-MM-dd")?;
    for year in [-9999, -1, 0, 1, 1900, 2000, 2024, 9999] {
        for month in 1..=12 {
            for day in [1, 15, 28] {
                let d = Date::new(year, month, day)?;
                let text = pattern.format(d, None)?;
                assert_eq!(Date::parse_with(&text, &pattern)?, d, "{text}");
                assert_eq!(text.parse::<Date>()?, d);
            }
        }
    }
    Ok(())
}

#[test]
fn instant_zone_roundtrip() {
    for tz in zones() {
        for instant in instants() {
            let zdt = instant.to_zoned(tz.clone());
            assert_eq!(zdt.to_instant(), instant, "{zdt}");
        }
    }
}

#[test]
fn civil_values_ignore_format_zone() -> crate::Result {
    let pattern = Pattern::compile("yyyy-MM-dd'T'HH:mm:ss.SSS")?;
    for tz in zones() {
        for instant in instants() {
            let dt: DateTime = instant.to_datetime(Offset::UTC);
            assert_eq!(
                pattern.format(dt, Some(&tz))?,
                pattern.format(dt, None)?,
            );
        }
    }
    Ok(())
}

#[test]
fn zoned_values_project_into_format_zone() -> crate::Result {
    let pattern = Pattern::compile("yyyy-MM-dd HH:mm:ss a")?;
    let zones = zones();
    for instant in instants() {
        for z1 in zones.iter() {
            let zdt = instant.to_zoned(z1.clone());
            for z2 in zones.iter() {
                let projected = zdt.to_instant().to_zoned(z2.clone());
                assert_eq!(
                    pattern.format(&zdt, Some(z2))?,
                    pattern.format(&projected, None)?,
                );
            }
        }
    }
    Ok(())
}

#[test]
fn plus_minus_days_is_identity() -> crate::Result {
    for n in [0, 1, 7, 365, 366, 10_000, -1, -10_000] {
        let d = date(2007, 12, 3);
        assert_eq!(d.plus(n, Unit::Day)?.minus(n, Unit::Day)?, d);

        let dt = d.at(4, 15, 30, 5);
        assert_eq!(dt.plus(n, Unit::Day)?.minus(n, Unit::Day)?, dt);

        let instant: Instant = "2007-12-03T04:15:30Z".parse()?;
        let got = instant.plus(n, Unit::Day)?.minus(n, Unit::Day)?;
        assert_eq!(got, instant);
    }
    Ok(())
}

#[test]
fn month_addition_clamps() -> crate::Result {
    assert_eq!(date(2024, 1, 31).plus(1, Unit::Month)?, date(2024, 2, 29));
    assert_eq!(date(2023, 1, 31).plus(1, Unit::Month)?, date(2023, 2, 28));
    assert_eq!(date(2024, 3, 31).minus(1, Unit::Month)?, date(2024, 2, 29));
    assert_eq!(date(2024, 2, 29).plus(1, Unit::Year)?, date(2025, 2, 28));
    Ok(())
}

#[test]
fn week_of_days_between_instants() -> crate::Result {
    let start: Instant = "2007-12-03T04:15:30Z".parse()?;
    let end = start.plus(7, Unit::Day)?;
    let duration = Duration::between(start, end);
    assert_eq!(duration.to_days(), 7);
    assert_eq!(duration.to_string(), "PT168H");
    assert_eq!(Duration::between(end, start).to_days(), -7);
    Ok(())
}

#[test]
fn day_month_year_pattern() -> crate::Result {
    let pattern = Pattern::compile("dd/MM/yyyy")?;
    let d = Date::parse_with("03/12/2007", &pattern)?;
    assert_eq!(d, date(2007, 12, 3));
    assert_eq!(pattern.format(d, None)?, "03/12/2007");
    Ok(())
}
