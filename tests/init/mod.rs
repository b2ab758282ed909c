use civiltime::{
    civil::{Date, DateTime, Time},
    Context, FixedClock, Instant, Zoned,
};

use crate::FakeRegistry;

fn context(instant: &str, zone: &str) -> Context {
    let instant: Instant = instant.parse().unwrap();
    Context::new(FixedClock::new(instant, zone), FakeRegistry)
}

#[test]
fn now_uses_clock_zone() -> crate::Result {
    let _ = crate::Logger::init();

    let ctx = context("2024-07-04T16:30:00Z", "Test/Tokyo");
    let now = Zoned::now(&ctx, None);
    assert_eq!(now.to_string(), "2024-07-05T01:30:00+09:00[Test/Tokyo]");
    assert_eq!(Date::now(&ctx, None).to_string(), "2024-07-05");
    assert_eq!(Time::now(&ctx, None).to_string(), "01:30:00");

    let eastern = ctx.resolve("Test/Eastern")?;
    assert_eq!(
        DateTime::now(&ctx, Some(&eastern)).to_string(),
        "2024-07-04T12:30:00",
    );
    assert_eq!(Instant::now(&ctx), now.to_instant());
    Ok(())
}

#[test]
fn unknown_clock_zone_falls_back_to_utc() {
    let _ = crate::Logger::init();

    let ctx = context("2024-07-04T16:30:00Z", "Test/Nowhere");
    assert_eq!(ctx.system_zone().id(), "Z");
    let now = Zoned::now(&ctx, None);
    assert_eq!(now.to_string(), "2024-07-04T16:30:00Z");
}

#[test]
fn clock_zone_can_be_fixed_offset() -> crate::Result {
    let ctx = context("2024-07-04T16:30:00Z", "UTC-03:30");
    let now = Zoned::now(&ctx, None);
    assert_eq!(now.to_string(), "2024-07-04T13:00:00-03:30[UTC-03:30]");
    Ok(())
}
