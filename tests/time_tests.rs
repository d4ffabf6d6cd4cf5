use metroute::shared::time::{Duration, Time};

#[test]
fn valid_time_test_1() {
    let time = "00:00:00";
    assert_eq!(Time::from_hms(time).unwrap().as_seconds(), 0.0);
}

#[test]
fn valid_time_test_2() {
    let time = "01:01:30";
    assert_eq!(Time::from_hms(time).unwrap().as_seconds(), 3690.0);
}

#[test]
fn past_midnight_time() {
    let time = "25:10:00";
    assert_eq!(Time::from_hms(time).unwrap().as_seconds(), 90600.0);
}

#[test]
fn invalid_time_test_1() {
    let time = "00:00:0a";
    assert!(Time::from_hms(time).is_none())
}

#[test]
fn invalid_time_test_2() {
    let time = "00:00";
    assert!(Time::from_hms(time).is_none())
}

#[test]
fn oversized_time_is_rejected() {
    assert!(Time::from_hms("99999999:00:00").is_none());
    assert!(Time::from_hms("1193046:59:99999999").is_none());
    assert!(Time::parse("1193047:00:00").is_none());
    assert_eq!(
        Time::from_hms("1193046:00:00"),
        Some(Time::from_seconds(4_294_965_600.0))
    );
}

#[test]
fn parse_accepts_seconds_or_hms() {
    assert_eq!(Time::parse("90"), Some(Time::from_seconds(90.0)));
    assert_eq!(Time::parse("-12.5"), Some(Time::from_seconds(-12.5)));
    assert_eq!(Time::parse("00:01:30"), Some(Time::from_seconds(90.0)));
    assert_eq!(Time::parse("NaN"), None);
    assert_eq!(Time::parse("soon"), None);
}

#[test]
fn display_is_hms() {
    assert_eq!(Time::from_seconds(3725.9).to_string(), "01:02:05");
    assert_eq!(Time::from_seconds(-60.0).to_string(), "-00:01:00");
}

#[test]
fn adding_durations() {
    let mut time = Time::from_seconds(100.0);
    time += Duration::from_minutes(2.0);
    assert_eq!(time, Time::from_seconds(220.0));
    assert_eq!(time - Time::from_seconds(20.0), Duration::from_seconds(200.0));
}

#[test]
fn duration_validity() {
    assert!(Duration::from_seconds(0.0).is_valid());
    assert!(!Duration::from_seconds(-1.0).is_valid());
    assert!(!Duration::from_seconds(f64::INFINITY).is_valid());
    assert!(!Duration::from_seconds(f64::NAN).is_valid());
}
