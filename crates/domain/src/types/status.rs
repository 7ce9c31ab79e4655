//! Room occupancy status

use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;
use crate::utils::time::ClockTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Occupied,
}

impl_domain_status_conversions!(RoomStatus {
    Available => "available",
    Occupied => "occupied",
});

/// What is holding a room right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Occupant {
    Reservation { id: String },
    Lecture { id: i64, name: String },
}

/// Status of one room at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatusReport {
    pub status: RoomStatus,
    /// Earliest start strictly after now, today only.
    pub next_event_time: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_occupant: Option<Occupant>,
}

impl RoomStatusReport {
    pub fn is_occupied(&self) -> bool {
        self.status == RoomStatus::Occupied
    }

    /// `HH:MM` of the next event, or `"N/A"` when nothing else starts today.
    pub fn next_event_display(&self) -> String {
        self.next_event_time.map_or_else(|| "N/A".to_string(), |time| time.to_string())
    }
}
