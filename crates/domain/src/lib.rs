//! # RoomKeeper Domain
//!
//! Business domain types and models for RoomKeeper.
//!
//! This crate contains:
//! - Domain data types (Reservation, LectureSchedule, TimeInterval, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Pure clock-time arithmetic shared by every engine component
//!
//! ## Architecture
//! - No dependencies on other RoomKeeper crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::time::{
    add_hours, hours_to_minutes, intervals_overlap, minutes_to_time, parse_date, time_to_minutes,
    weekday_token, ClockTime,
};
