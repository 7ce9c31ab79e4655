//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for RoomKeeper
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum RoomKeeperError {
    /// Malformed clock time or calendar date string.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Non-positive or non-finite duration.
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Lecture occurrence lists that cannot be paired up.
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The time source could not be reached. Callers degrade to local time.
    #[error("Clock unavailable: {0}")]
    ClockUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for RoomKeeper operations
pub type Result<T> = std::result::Result<T, RoomKeeperError>;
