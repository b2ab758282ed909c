use civiltime::{
    civil::date,
    tz::{AmbiguousOffset, Disambiguation, Offset, TimeZone, ZoneRegistry},
    Duration, Unit, Zoned,
};

use crate::FakeRegistry;

fn eastern() -> TimeZone {
    FakeRegistry.resolve("Test/Eastern").unwrap()
}

#[test]
fn gap_resolution() -> crate::Result {
    let tz = eastern();
    let dt = date(2024, 3, 10).at(2, 30, 0, 0);
    assert_eq!(
        tz.to_ambiguous_offset(dt),
        AmbiguousOffset::Gap {
            before: Offset::constant(-5),
            after: Offset::constant(-4),
        },
    );

    let amb = tz.to_ambiguous_zoned(dt);
    assert_eq!(
        amb.clone().compatible()?.to_string(),
        "2024-03-10T03:30:00-04:00[Test/Eastern]",
    );
    assert_eq!(
        amb.clone().earlier()?.to_string(),
        "2024-03-10T01:30:00-05:00[Test/Eastern]",
    );
    assert_eq!(
        amb.clone().later()?.to_string(),
        "2024-03-10T03:30:00-04:00[Test/Eastern]",
    );
    assert!(amb.disambiguate(Disambiguation::Reject).is_err());
    Ok(())
}

#[test]
fn fold_resolution() -> crate::Result {
    let tz = eastern();
    let dt = date(2024, 11, 3).at(1, 30, 0, 0);
    assert!(tz.to_ambiguous_offset(dt).is_ambiguous());

    let amb = tz.to_ambiguous_zoned(dt);
    assert_eq!(
        amb.clone().compatible()?.to_string(),
        "2024-11-03T01:30:00-04:00[Test/Eastern]",
    );
    assert_eq!(
        amb.clone().earlier()?.to_string(),
        "2024-11-03T01:30:00-04:00[Test/Eastern]",
    );
    assert_eq!(
        amb.clone().later()?.to_string(),
        "2024-11-03T01:30:00-05:00[Test/Eastern]",
    );
    assert!(amb.unambiguous().is_err());
    Ok(())
}

#[test]
fn calendar_units_keep_wall_clock() -> crate::Result {
    let start = date(2024, 3, 9).at(12, 0, 0, 0).to_zoned(eastern())?;

    let by_day = start.plus(1, Unit::Day)?;
    assert_eq!(by_day.to_string(), "2024-03-10T12:00:00-04:00[Test/Eastern]");
    assert_eq!(Duration::between(&start, &by_day).to_hours(), 23);

    let by_hours = start.plus(24, Unit::Hour)?;
    assert_eq!(
        by_hours.to_string(),
        "2024-03-10T13:00:00-04:00[Test/Eastern]",
    );
    assert_eq!(Duration::between(&start, &by_hours).to_hours(), 24);
    Ok(())
}

#[test]
fn week_across_spring_forward() -> crate::Result {
    let start = date(2024, 3, 7).at(0, 0, 0, 0).to_zoned(eastern())?;
    let end = start.plus(1, Unit::Week)?;
    let duration = Duration::between(&start, &end);
    assert_eq!(duration.to_hours(), 167);
    assert_eq!(duration.to_days(), 6);
    assert_eq!(duration.to_string(), "PT167H");
    Ok(())
}

#[test]
fn start_of_day_in_midnight_gap() -> crate::Result {
    let tz = FakeRegistry.resolve("Test/Santiago")?;
    let zdt = date(2024, 9, 8).at(12, 0, 0, 0).to_zoned(tz)?;
    let start = zdt.start_of_day()?;
    assert_eq!(start.to_string(), "2024-09-08T01:00:00-03:00[Test/Santiago]");
    Ok(())
}

#[test]
fn parse_with_registry() -> crate::Result {
    let zdt = Zoned::parse_with(
        "2024-11-03T01:30:00-05:00[Test/Eastern]",
        &FakeRegistry,
    )?;
    assert_eq!(zdt.offset(), Offset::constant(-5));
    assert_eq!(zdt.to_instant().to_string(), "2024-11-03T06:30:00Z");

    let zdt = Zoned::parse_with(
        "2024-07-04T09:00:00+09:00[Test/Tokyo]",
        &FakeRegistry,
    )?;
    let eastern = zdt.with_time_zone_same_instant(eastern());
    assert_eq!(eastern.to_string(), "2024-07-03T20:00:00-04:00[Test/Eastern]");

    let err = Zoned::parse_with(
        "2024-07-04T09:00:00+08:00[Test/Tokyo]",
        &FakeRegistry,
    )
    .unwrap_err();
    assert!(err.is_parse());

    let err =
        Zoned::parse_with("2024-07-04T09:00:00Z[Mars/Base]", &FakeRegistry)
            .unwrap_err();
    assert!(err.is_unknown_zone());
    Ok(())
}

#[test]
fn unknown_zones() {
    let err = FakeRegistry.resolve("America/New_York").unwrap_err();
    assert!(err.is_unknown_zone());
    insta::assert_snapshot!(
        err,
        @"unknown time zone identifier `America/New_York` (expected `Z`, `+HH:MM`, `-HH:MM`, a `UTC`/`GMT`/`UT` prefixed offset or a region name known to the registry)",
    );

    let err = FakeRegistry.resolve("+19:00").unwrap_err();
    assert!(err.is_unknown_zone());
    assert!(err.is_range());
}
