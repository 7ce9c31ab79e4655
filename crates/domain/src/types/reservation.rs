//! Reservation records
//!
//! Field names serialize in camelCase so persisted rows stay compatible with
//! data written by the browser client (`roomId`, `guestName`, `createdAt`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, RoomKeeperError};
use crate::types::schedule::TimeInterval;
use crate::utils::time::ClockTime;

/// A user-created booking of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub room_id: String,
    pub date: NaiveDate,
    pub time: ClockTime,
    /// Whole hours.
    pub duration: u32,
    pub guest_name: String,
    pub purpose: String,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Materialize a booking request under a freshly generated id.
    pub fn from_request(id: impl Into<String>, request: NewReservation, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            room_id: request.room_id,
            date: request.date,
            time: request.time,
            duration: request.duration,
            guest_name: request.guest_name,
            purpose: request.purpose,
            created_at,
        }
    }

    /// Occupied interval `[time, time + duration)` on `date`.
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.date, self.time, i64::from(self.duration) * 60)
    }

    /// End clock time, wrapped at midnight.
    pub fn end_time(&self) -> ClockTime {
        self.interval().end()
    }

    /// Copy with a new slot; id, room and creation time are kept.
    pub fn with_change(&self, change: &ReservationChange) -> Self {
        Self { date: change.date, time: change.time, duration: change.duration, ..self.clone() }
    }
}

/// Booking request submitted by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub room_id: String,
    pub date: NaiveDate,
    pub time: ClockTime,
    pub duration: u32,
    pub guest_name: String,
    pub purpose: String,
}

impl NewReservation {
    /// Parse a request from raw form values.
    ///
    /// Fails with `InvalidFormat` for malformed date/time strings and with
    /// `InvalidDuration` for a non-positive duration.
    pub fn parse(
        room_id: &str,
        date: &str,
        time: &str,
        duration: i64,
        guest_name: &str,
        purpose: &str,
    ) -> Result<Self> {
        Ok(Self {
            room_id: room_id.to_string(),
            date: crate::utils::time::parse_date(date)?,
            time: time.parse()?,
            duration: positive_hours(duration)?,
            guest_name: guest_name.trim().to_string(),
            purpose: purpose.trim().to_string(),
        })
    }
}

/// New slot for an existing reservation. The room cannot change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationChange {
    pub date: NaiveDate,
    pub time: ClockTime,
    pub duration: u32,
}

/// Validate a whole-hour duration coming from user input.
pub fn positive_hours(duration: i64) -> Result<u32> {
    if duration <= 0 {
        return Err(RoomKeeperError::InvalidDuration(format!(
            "duration must be a positive number of hours, got {duration}"
        )));
    }
    u32::try_from(duration)
        .map_err(|_| RoomKeeperError::InvalidDuration(format!("duration too large: {duration}")))
}
