//! Occupied intervals and per-day schedule views

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;
use crate::utils::time::{intervals_overlap, ClockTime};

/// A `[start, end)` span on a calendar date, in minutes since midnight.
///
/// `end_minutes` is not wrapped: a booking from 23:00 for two hours ends at
/// minute 1500. Use [`TimeInterval::end`] for the displayed clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    pub date: NaiveDate,
    pub start_minutes: i64,
    pub end_minutes: i64,
}

impl TimeInterval {
    pub fn new(date: NaiveDate, start: ClockTime, duration_minutes: i64) -> Self {
        let start_minutes = i64::from(start.minutes());
        Self { date, start_minutes, end_minutes: start_minutes.saturating_add(duration_minutes) }
    }

    pub fn start(&self) -> ClockTime {
        ClockTime::from_minutes_wrapping(self.start_minutes)
    }

    pub fn end(&self) -> ClockTime {
        ClockTime::from_minutes_wrapping(self.end_minutes)
    }

    pub const fn duration_minutes(&self) -> i64 {
        self.end_minutes - self.start_minutes
    }

    /// Same date and a non-empty closed-open intersection.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.date == other.date
            && intervals_overlap(
                self.start_minutes,
                self.end_minutes,
                other.start_minutes,
                other.end_minutes,
            )
    }

    /// `start <= minute < end`.
    pub const fn contains_minute(&self, minute: i64) -> bool {
        self.start_minutes <= minute && minute < self.end_minutes
    }
}

/// Source of a schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleItemKind {
    Lecture,
    Reservation,
}

impl_domain_status_conversions!(ScheduleItemKind {
    Lecture => "lecture",
    Reservation => "reservation",
});

/// Progress of a schedule entry relative to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleItemStatus {
    Ongoing,
    Upcoming,
    Completed,
}

impl_domain_status_conversions!(ScheduleItemStatus {
    Ongoing => "ongoing",
    Upcoming => "upcoming",
    Completed => "completed",
});

/// One entry of a room's day view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: String,
    pub room_id: String,
    pub title: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(rename = "type")]
    pub kind: ScheduleItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_by: Option<String>,
    pub status: ScheduleItemStatus,
}

/// Everything happening in one room on one date, ordered by start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub room_id: String,
    pub items: Vec<ScheduleItem>,
}

/// A selectable start time on the booking grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub hour: u32,
    pub minute: u32,
    /// `HH:MM`
    pub display: String,
}

impl From<ClockTime> for TimeSlot {
    fn from(time: ClockTime) -> Self {
        Self { hour: time.hour(), minute: time.minute(), display: time.to_string() }
    }
}
