//! Booking results and conflict reports

use serde::{Deserialize, Serialize};

use crate::types::reservation::Reservation;
use crate::utils::time::ClockTime;

/// A lecture occurrence that overlaps a proposed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureClash {
    pub lecture_id: i64,
    pub name: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

/// Outcome of a conflict check.
///
/// `has_conflict` is true iff `conflicts` is non-empty. Lecture clashes are
/// informational unless the booking policy rejects them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
    pub has_conflict: bool,
    pub conflicts: Vec<Reservation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lecture_clashes: Vec<LectureClash>,
}

impl ConflictReport {
    pub fn from_conflicts(conflicts: Vec<Reservation>) -> Self {
        Self { has_conflict: !conflicts.is_empty(), conflicts, lecture_clashes: Vec::new() }
    }

    #[must_use]
    pub fn with_lecture_clashes(mut self, clashes: Vec<LectureClash>) -> Self {
        self.lecture_clashes = clashes;
        self
    }

    /// True when either reservations or lectures overlap.
    pub fn blocks_with_lectures(&self) -> bool {
        self.has_conflict || !self.lecture_clashes.is_empty()
    }

    /// One line per overlapping entry, e.g. `09:00-11:00 (Team meeting, Kim)`.
    pub fn describe(&self) -> String {
        let reservations = self.conflicts.iter().map(|r| {
            format!("{}-{} ({}, {})", r.time, r.end_time(), r.purpose, r.guest_name)
        });
        let lectures = self
            .lecture_clashes
            .iter()
            .map(|l| format!("{}-{} ({}, lecture)", l.start_time, l.end_time, l.name));
        reservations.chain(lectures).collect::<Vec<_>>().join("\n")
    }
}

/// Result of a create or reschedule request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "lowercase")]
pub enum BookingOutcome {
    Booked(Reservation),
    Conflict(ConflictReport),
}

impl BookingOutcome {
    pub fn reservation(&self) -> Option<&Reservation> {
        match self {
            Self::Booked(reservation) => Some(reservation),
            Self::Conflict(_) => None,
        }
    }

    pub fn is_booked(&self) -> bool {
        matches!(self, Self::Booked(_))
    }
}
