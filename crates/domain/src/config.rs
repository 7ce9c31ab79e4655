//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CLOCK_CACHE_WINDOW_SECS, DEFAULT_MAX_DURATION_HOURS, DEFAULT_SLOT_MINUTES,
    DEFAULT_STATUS_CACHE_TTL_SECS, DEFAULT_TIMEZONE,
};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

/// Booking policy applied by the write path.
///
/// The conflict engine itself only rejects non-positive durations; the
/// remaining limits are product policy and can be relaxed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub max_duration_hours: u32,
    pub slot_minutes: u32,
    pub enforce_slot_alignment: bool,
    /// Also reject bookings that overlap a scheduled lecture.
    pub reject_lecture_overlap: bool,
}

/// Room status configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    pub cache_ttl_seconds: u64,
    /// IANA zone used to turn the current instant into a wall-clock date/time.
    pub timezone: String,
}

/// Time source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub cache_window_seconds: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            max_duration_hours: DEFAULT_MAX_DURATION_HOURS,
            slot_minutes: DEFAULT_SLOT_MINUTES,
            enforce_slot_alignment: true,
            reject_lecture_overlap: false,
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: DEFAULT_STATUS_CACHE_TTL_SECS,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { cache_window_seconds: DEFAULT_CLOCK_CACHE_WINDOW_SECS }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig { path: "roomkeeper.db".to_string(), pool_size: 4 },
            booking: BookingConfig::default(),
            status: StatusConfig::default(),
            clock: ClockConfig::default(),
            log_level: default_log_level(),
        }
    }
}
