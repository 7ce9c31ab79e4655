//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Booking policy defaults
pub const DEFAULT_MAX_DURATION_HOURS: u32 = 8;
pub const DEFAULT_SLOT_MINUTES: u32 = 30;

// Booking grid shown to users (inclusive bounds, minutes since midnight)
pub const SLOT_GRID_START_MINUTES: u32 = 9 * 60;
pub const SLOT_GRID_END_MINUTES: u32 = 21 * 60;

// Cache windows
pub const DEFAULT_STATUS_CACHE_TTL_SECS: u64 = 30;
pub const DEFAULT_CLOCK_CACHE_WINDOW_SECS: u64 = 60;

pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";

pub const MINUTES_PER_DAY: i64 = 24 * 60;

// Longest duration any time arithmetic accepts (one year).
pub const MAX_DURATION_MINUTES: i64 = 366 * MINUTES_PER_DAY;

// Reservation ids: `res_<millis>_<suffix>`
pub const RESERVATION_ID_PREFIX: &str = "res";
pub const RESERVATION_ID_SUFFIX_LEN: usize = 9;
