//! Clock-time arithmetic.
//!
//! Reservations and lectures describe time of day as `HH:MM` strings. This
//! module owns parsing, formatting and the minute arithmetic used by conflict
//! detection and status resolution. Wall-clock values wrap at midnight; the
//! interval helpers work on plain minute offsets so an interval that runs
//! past 24:00 still compares correctly.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{MAX_DURATION_MINUTES, MINUTES_PER_DAY};
use crate::errors::{Result, RoomKeeperError};

static CLOCK_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$")
        .expect("CLOCK_TIME_REGEX should compile - this is a bug")
});

const WEEKDAY_TOKENS: [(Weekday, &str, &str); 7] = [
    (Weekday::Mon, "mon", "monday"),
    (Weekday::Tue, "tue", "tuesday"),
    (Weekday::Wed, "wed", "wednesday"),
    (Weekday::Thu, "thu", "thursday"),
    (Weekday::Fri, "fri", "friday"),
    (Weekday::Sat, "sat", "saturday"),
    (Weekday::Sun, "sun", "sunday"),
];

/// A time of day with minute precision (`00:00` through `23:59`).
///
/// Ordering is chronological and agrees with the lexical ordering of the
/// zero-padded `HH:MM` rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: Self = Self(0);

    /// Build from hour and minute, rejecting out-of-range components.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(RoomKeeperError::InvalidFormat(format!(
                "clock time out of range: {hour}:{minute}"
            )));
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Build from an arbitrary minute offset, wrapping into a single day.
    pub fn from_minutes_wrapping(minutes: i64) -> Self {
        Self(minutes.rem_euclid(MINUTES_PER_DAY) as u16)
    }

    /// Minutes since midnight.
    pub const fn minutes(self) -> u32 {
        self.0 as u32
    }

    pub const fn hour(self) -> u32 {
        self.0 as u32 / 60
    }

    pub const fn minute(self) -> u32 {
        self.0 as u32 % 60
    }

    /// Shift by (possibly fractional, possibly negative) hours, wrapping at
    /// midnight.
    pub fn add_hours(self, hours: f64) -> Result<Self> {
        let offset = hours_to_minutes(hours)?.rem_euclid(MINUTES_PER_DAY);
        Ok(Self::from_minutes_wrapping(i64::from(self.0) + offset))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = RoomKeeperError;

    fn from_str(s: &str) -> Result<Self> {
        if !CLOCK_TIME_REGEX.is_match(s) {
            return Err(RoomKeeperError::InvalidFormat(format!("expected HH:MM, got '{s}'")));
        }
        let (hour, minute) = s
            .split_once(':')
            .ok_or_else(|| RoomKeeperError::InvalidFormat(format!("expected HH:MM, got '{s}'")))?;
        let hour: u32 = hour
            .parse()
            .map_err(|_| RoomKeeperError::InvalidFormat(format!("invalid hour in '{s}'")))?;
        let minute: u32 = minute
            .parse()
            .map_err(|_| RoomKeeperError::InvalidFormat(format!("invalid minute in '{s}'")))?;
        Self::from_hm(hour, minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Minutes since midnight for an `HH:MM` string.
pub fn time_to_minutes(time: &str) -> Result<u32> {
    time.parse::<ClockTime>().map(ClockTime::minutes)
}

/// Zero-padded `HH:MM` for a minute offset, wrapping at midnight.
pub fn minutes_to_time(minutes: i64) -> String {
    ClockTime::from_minutes_wrapping(minutes).to_string()
}

/// Convert a duration in hours to whole minutes (rounded to the nearest
/// minute). Fails for NaN, infinities and magnitudes beyond
/// [`MAX_DURATION_MINUTES`].
pub fn hours_to_minutes(hours: f64) -> Result<i64> {
    if !hours.is_finite() {
        return Err(RoomKeeperError::InvalidDuration(format!("duration is not finite: {hours}")));
    }
    let minutes = (hours * 60.0).round();
    if minutes.abs() > MAX_DURATION_MINUTES as f64 {
        return Err(RoomKeeperError::InvalidDuration(format!("duration out of range: {hours}h")));
    }
    Ok(minutes as i64)
}

/// `time` shifted by `hours`, rendered as `HH:MM` and wrapped at midnight.
pub fn add_hours(time: &str, hours: f64) -> Result<String> {
    let start: ClockTime = time.parse()?;
    Ok(start.add_hours(hours)?.to_string())
}

/// Closed-open overlap of `[start_a, end_a)` and `[start_b, end_b)`.
///
/// Touching intervals (`end_a == start_b`) do not overlap.
pub const fn intervals_overlap(start_a: i64, end_a: i64, start_b: i64, end_b: i64) -> bool {
    start_a < end_b && start_b < end_a
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    if date.len() != 10 {
        return Err(RoomKeeperError::InvalidFormat(format!("expected YYYY-MM-DD, got '{date}'")));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| RoomKeeperError::InvalidFormat(format!("invalid date '{date}': {e}")))
}

/// Three-letter weekday token (`Mon` … `Sun`) for a date.
pub fn weekday_token(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Parse a weekday token case-insensitively. Accepts short (`mon`) and full
/// (`Monday`) names.
pub fn parse_weekday(token: &str) -> Result<Weekday> {
    let lower = token.trim().to_ascii_lowercase();
    WEEKDAY_TOKENS
        .iter()
        .find(|(_, short, long)| lower == *short || lower == *long)
        .map(|(day, _, _)| *day)
        .ok_or_else(|| RoomKeeperError::InvalidFormat(format!("unknown weekday token '{token}'")))
}
