use civiltime::{
    civil::{date, time, Date, DateTime, Time},
    tz::Offset,
    Duration, Instant, Zoned,
};

#[derive(Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
struct Event {
    day: Date,
    at: Time,
    local: DateTime,
    instant: Instant,
    offset: Offset,
    length: Duration,
}

#[test]
fn roundtrip() -> anyhow::Result<()> {
    let event = Event {
        day: date(2024, 7, 4),
        at: time(9, 30, 0, 0),
        local: date(2024, 7, 4).at(9, 30, 0, 0),
        instant: "2024-07-04T13:30:00Z".parse()?,
        offset: Offset::constant(-4),
        length: Duration::from_minutes(90),
    };
    let json = serde_json::to_string(&event)?;
    insta::assert_snapshot!(
        json,
        @r#"{"day":"2024-07-04","at":"09:30:00","local":"2024-07-04T09:30:00","instant":"2024-07-04T13:30:00Z","offset":"-04:00","length":"PT1H30M"}"#,
    );
    let got: Event = serde_json::from_str(&json)?;
    assert_eq!(got, event);
    Ok(())
}

#[test]
fn zoned_with_fixed_offset() -> anyhow::Result<()> {
    let zdt: Zoned = "2024-07-04T09:30:00+05:30".parse()?;
    let json = serde_json::to_string(&zdt)?;
    assert_eq!(json, r#""2024-07-04T09:30:00+05:30""#);
    let got: Zoned = serde_json::from_str(&json)?;
    assert_eq!(got, zdt);
    Ok(())
}

#[test]
fn invalid_values_are_rejected() {
    assert!(serde_json::from_str::<Date>(r#""2023-02-29""#).is_err());
    assert!(serde_json::from_str::<Offset>(r#""+19:00""#).is_err());
    assert!(serde_json::from_str::<Duration>(r#""1H""#).is_err());
}
