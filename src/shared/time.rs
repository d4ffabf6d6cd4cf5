use std::{
    cmp::Ordering,
    fmt::Display,
    ops::{Add, AddAssign, Sub},
};

use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};

/// Label used for nodes that have not been reached yet.
pub const INFINITY: Time = Time(f64::INFINITY);

/// A point on the timetable axis, in seconds.
///
/// Times are totally ordered so they can key a heap. `-0.0` is folded into
/// `0.0` on construction, which keeps that order consistent with `==`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Time(f64);

impl From<f64> for Time {
    fn from(value: f64) -> Self {
        Self::from_seconds(value)
    }
}

impl From<u32> for Time {
    fn from(value: u32) -> Self {
        Self(value as f64)
    }
}

impl From<Time> for f64 {
    fn from(value: Time) -> Self {
        value.0
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Sub<Time> for Time {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration::from_seconds(self.0 - rhs.0)
    }
}

impl Add<Duration> for Time {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self::from_seconds(self.0 + rhs.0)
    }
}

impl AddAssign<Duration> for Time {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hms_string())
    }
}

impl Time {
    pub const ZERO: Self = Self(0.0);

    /// Seconds elapsed since local midnight.
    pub fn now() -> Self {
        let now = Local::now();
        Self(now.num_seconds_from_midnight() as f64)
    }

    pub const fn from_seconds(secs: f64) -> Self {
        // Adding positive zero turns -0.0 into 0.0 and leaves everything else alone.
        Self(secs + 0.0)
    }

    pub const fn as_seconds(&self) -> f64 {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    pub fn is_nan(&self) -> bool {
        self.0.is_nan()
    }

    pub fn to_hms_string(&self) -> String {
        if !self.0.is_finite() {
            return "--:--:--".into();
        }
        let sign = if self.0 < 0.0 { "-" } else { "" };
        let secs = self.0.abs().floor() as u64;
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        let s = secs % 60;
        format!("{sign}{:02}:{:02}:{:02}", h, m, s)
    }

    /// Parses `HH:MM:SS`. Hours may exceed 23, as they do in GTFS feeds.
    /// Returns `None` when the total does not fit in a `u32` of seconds.
    pub fn from_hms(time: &str) -> Option<Self> {
        const HOUR_TO_SEC: u32 = 60 * 60;
        const MINUTE_TO_SEC: u32 = 60;
        let mut split = time.trim().split(':');
        let hours: u32 = split.next()?.parse().ok()?;
        let hours = hours.checked_mul(HOUR_TO_SEC)?;
        let minutes: u32 = split.next()?.parse().ok()?;
        let minutes = minutes.checked_mul(MINUTE_TO_SEC)?;
        let seconds: u32 = split.next()?.parse().ok()?;
        if split.next().is_some() {
            return None;
        }
        let total = hours.checked_add(minutes)?.checked_add(seconds)?;
        Some(Self(total as f64))
    }

    /// Accepts either a plain number of seconds or `HH:MM:SS`.
    pub fn parse(value: &str) -> Option<Self> {
        if value.contains(':') {
            Self::from_hms(value)
        } else {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|secs| !secs.is_nan())
                .map(Self::from_seconds)
        }
    }
}

/// A span of seconds. Edge durations must be finite and non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Duration(f64);

impl From<f64> for Duration {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<u32> for Duration {
    fn from(value: u32) -> Self {
        Self(value as f64)
    }
}

impl Duration {
    pub const ZERO: Self = Self(0.0);

    pub const fn from_seconds(secs: f64) -> Self {
        Self(secs)
    }

    pub const fn from_minutes(minutes: f64) -> Self {
        Self(minutes * 60.0)
    }

    pub const fn from_hours(hours: f64) -> Self {
        Self(hours * 60.0 * 60.0)
    }

    pub const fn as_seconds(&self) -> f64 {
        self.0
    }

    /// True for durations usable as edge weights.
    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }

    /// Clamps negative spans to zero.
    pub fn at_least_zero(self) -> Self {
        if self.0 > 0.0 { self } else { Self::ZERO }
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

#[test]
fn parse_unparse_1() {
    let time = "00:00:00";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn parse_unparse_2() {
    let time = "12:30:30";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn negative_zero_is_zero() {
    assert_eq!(Time::from_seconds(-0.0), Time::ZERO);
    assert_eq!(Time::from_seconds(-0.0).cmp(&Time::ZERO), Ordering::Equal);
}

#[test]
fn infinity_sorts_last() {
    assert!(Time::from_seconds(1e12) < INFINITY);
    assert_eq!(INFINITY.to_hms_string(), "--:--:--");
}

#[test]
fn negative_spans_clamp() {
    let wait = (Time::from_seconds(50.0) - Time::from_seconds(100.0)).at_least_zero();
    assert_eq!(wait, Duration::ZERO);
    let wait = (Time::from_seconds(100.0) - Time::from_seconds(50.0)).at_least_zero();
    assert_eq!(wait, Duration::from_seconds(50.0));
}
