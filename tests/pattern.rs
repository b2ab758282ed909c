use civiltime::{
    civil::{date, time, DateTime, Time},
    fmt::{pattern::Pattern, StdFmtWrite},
    tz::{TimeZone, ZoneRegistry},
    Instant, Zoned,
};

use crate::FakeRegistry;

#[test]
fn format_every_value_type() -> crate::Result {
    let pattern = Pattern::compile("yyyy-MM-dd HH:mm")?;
    let tokyo = FakeRegistry.resolve("Test/Tokyo")?;
    let instant: Instant = "2007-12-03T10:15:30Z".parse()?;

    assert_eq!(pattern.format(instant, None)?, "2007-12-03 10:15");
    assert_eq!(pattern.format(instant, Some(&tokyo))?, "2007-12-03 19:15");

    let zdt = instant.to_zoned(tokyo.clone());
    assert_eq!(pattern.format(&zdt, None)?, "2007-12-03 19:15");
    let utc = TimeZone::UTC;
    assert_eq!(pattern.format(&zdt, Some(&utc))?, "2007-12-03 10:15");

    let dt = zdt.datetime();
    assert_eq!(pattern.format(dt, Some(&utc))?, "2007-12-03 19:15");

    assert!(pattern.format(time(1, 2, 3, 0), None).is_err());
    assert!(pattern.format(date(2007, 12, 3), None).is_err());
    Ok(())
}

#[test]
fn format_into_std_writer() -> crate::Result {
    let pattern = Pattern::compile("HH'h'mm")?;
    let mut out = String::new();
    {
        let mut wtr = StdFmtWrite(&mut out);
        pattern.format_to(time(9, 5, 0, 0), None, &mut wtr)?;
    }
    assert_eq!(out, "09h05");
    Ok(())
}

#[test]
fn parse_every_value_type() -> crate::Result {
    let pattern = Pattern::compile("dd.MM.yyyy hh:mm:ss.SS a")?;
    let text = "04.07.2024 11:59:58.25 PM";

    let dt = DateTime::parse_with(text, &pattern)?;
    assert_eq!(dt, date(2024, 7, 4).at(23, 59, 58, 250_000_000));
    assert_eq!(Time::parse_with(text, &pattern)?, dt.time());

    let tz = FakeRegistry.resolve("Test/Central_Europe")?;
    let zdt = Zoned::parse_with_pattern(text, &pattern, tz)?;
    assert_eq!(
        zdt.to_string(),
        "2024-07-04T23:59:58.250+02:00[Test/Central_Europe]",
    );
    assert_eq!(pattern.format(&zdt, None)?, text);
    Ok(())
}

#[test]
fn error_categories() -> crate::Result {
    let err = Pattern::compile("yyyy-MM-dd HH:mm zzz").unwrap_err();
    assert!(err.is_pattern());
    assert!(!err.is_parse());

    let pattern = Pattern::compile("dd/MM/yyyy")?;
    let err = pattern.parse("2007-12-03").unwrap_err();
    assert!(err.is_parse());
    assert!(!err.is_range());

    let err = pattern.parse("32/12/2007").unwrap_err();
    assert!(err.is_parse());
    assert!(err.is_range());
    Ok(())
}
