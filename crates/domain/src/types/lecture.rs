//! Recurring weekly lecture schedules
//!
//! Stored lecture rows use three space-delimited columns (`week`, `time`,
//! `duration`) whose tokens pair up by position. [`LectureRecord`] is that
//! stored shape; [`LectureSchedule`] is the validated form with one
//! [`LectureOccurrence`] per position. Conversion fails on mismatched column
//! lengths instead of silently dropping the tail.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, RoomKeeperError};
use crate::utils::time::{hours_to_minutes, parse_weekday, ClockTime};

/// One weekly occurrence: `day` at `start` for `duration_hours`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LectureOccurrence {
    pub day: Weekday,
    pub start: ClockTime,
    /// Hours, possibly fractional (`1.5`).
    pub duration_hours: f64,
}

impl LectureOccurrence {
    pub fn new(day: Weekday, start: ClockTime, duration_hours: f64) -> Result<Self> {
        if !duration_hours.is_finite() || duration_hours <= 0.0 {
            return Err(RoomKeeperError::InvalidDuration(format!(
                "lecture duration must be a positive number of hours, got {duration_hours}"
            )));
        }
        hours_to_minutes(duration_hours)?;
        Ok(Self { day, start, duration_hours })
    }

    pub fn duration_minutes(&self) -> i64 {
        // Finite and in range by construction.
        hours_to_minutes(self.duration_hours).unwrap_or_default()
    }
}

/// Immutable reference data describing when a room hosts a lecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LectureRecord", into = "LectureRecord")]
pub struct LectureSchedule {
    pub id: i64,
    pub name: String,
    pub room_id: String,
    pub building: String,
    occurrences: Vec<LectureOccurrence>,
}

impl LectureSchedule {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        room_id: impl Into<String>,
        building: impl Into<String>,
        occurrences: Vec<LectureOccurrence>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            room_id: room_id.into(),
            building: building.into(),
            occurrences,
        }
    }

    /// Occurrences in their stored order.
    pub fn occurrences(&self) -> &[LectureOccurrence] {
        &self.occurrences
    }
}

/// Stored lecture row with parallel space-delimited columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureRecord {
    pub id: i64,
    pub name: String,
    pub room_id: String,
    /// e.g. `"Mon Tue"`
    pub week: String,
    /// e.g. `"10:30 10:30"`
    pub time: String,
    /// e.g. `"1.5 1.5"`
    pub duration: String,
    pub building: String,
}

impl TryFrom<LectureRecord> for LectureSchedule {
    type Error = RoomKeeperError;

    fn try_from(record: LectureRecord) -> Result<Self> {
        let days: Vec<&str> = record.week.split_whitespace().collect();
        let times: Vec<&str> = record.time.split_whitespace().collect();
        let durations: Vec<&str> = record.duration.split_whitespace().collect();

        if days.len() != times.len() || days.len() != durations.len() {
            return Err(RoomKeeperError::InvalidSchedule(format!(
                "lecture {} has {} days, {} start times and {} durations",
                record.id,
                days.len(),
                times.len(),
                durations.len()
            )));
        }

        let occurrences = days
            .iter()
            .zip(&times)
            .zip(&durations)
            .map(|((day, time), duration)| {
                let hours: f64 = duration.parse().map_err(|_| {
                    RoomKeeperError::InvalidDuration(format!(
                        "lecture {} has non-numeric duration '{duration}'",
                        record.id
                    ))
                })?;
                LectureOccurrence::new(parse_weekday(day)?, time.parse()?, hours)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(record.id, record.name, record.room_id, record.building, occurrences))
    }
}

impl From<LectureSchedule> for LectureRecord {
    fn from(schedule: LectureSchedule) -> Self {
        let join = |tokens: Vec<String>| tokens.join(" ");
        Self {
            id: schedule.id,
            week: join(schedule.occurrences.iter().map(|o| format!("{:?}", o.day)).collect()),
            time: join(schedule.occurrences.iter().map(|o| o.start.to_string()).collect()),
            duration: join(
                schedule.occurrences.iter().map(|o| o.duration_hours.to_string()).collect(),
            ),
            name: schedule.name,
            room_id: schedule.room_id,
            building: schedule.building,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(week: &str, time: &str, duration: &str) -> LectureRecord {
        LectureRecord {
            id: 1,
            name: "Linear Algebra 2".into(),
            room_id: "101-1".into(),
            week: week.into(),
            time: time.into(),
            duration: duration.into(),
            building: "Seongho".into(),
        }
    }

    #[test]
    fn pairs_columns_by_position() {
        let schedule = LectureSchedule::try_from(record("Mon Sun", "10:30 02:00", "1.5 1.5")).unwrap();
        let occurrences = schedule.occurrences();

        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].day, Weekday::Mon);
        assert_eq!(occurrences[0].start.to_string(), "10:30");
        assert_eq!(occurrences[1].day, Weekday::Sun);
        assert_eq!(occurrences[1].start.to_string(), "02:00");
        assert_eq!(occurrences[1].duration_minutes(), 90);
    }

    #[test]
    fn mismatched_columns_fail_fast() {
        let err = LectureSchedule::try_from(record("Mon Tue Wed", "10:30 10:30", "1.5 1.5")).unwrap_err();
        assert!(matches!(err, RoomKeeperError::InvalidSchedule(_)));

        let err = LectureSchedule::try_from(record("Mon", "10:30", "1.5 2")).unwrap_err();
        assert!(matches!(err, RoomKeeperError::InvalidSchedule(_)));
    }

    #[test]
    fn invalid_tokens_are_rejected() {
        assert!(matches!(
            LectureSchedule::try_from(record("Mon", "25:00", "1")),
            Err(RoomKeeperError::InvalidFormat(_))
        ));
        assert!(matches!(
            LectureSchedule::try_from(record("Mon", "09:00", "long")),
            Err(RoomKeeperError::InvalidDuration(_))
        ));
        assert!(matches!(
            LectureSchedule::try_from(record("Mon", "09:00", "0")),
            Err(RoomKeeperError::InvalidDuration(_))
        ));
        assert!(matches!(
            LectureSchedule::try_from(record("Someday", "09:00", "1")),
            Err(RoomKeeperError::InvalidFormat(_))
        ));
    }

    #[test]
    fn oversized_durations_are_rejected() {
        for duration in ["1e18", "9000", "inf"] {
            assert!(
                matches!(
                    LectureSchedule::try_from(record("Mon", "09:00", duration)),
                    Err(RoomKeeperError::InvalidDuration(_))
                ),
                "{duration}"
            );
        }
        assert!(matches!(
            LectureOccurrence::new(Weekday::Mon, "09:00".parse().unwrap(), 1e18),
            Err(RoomKeeperError::InvalidDuration(_))
        ));
    }

    #[test]
    fn day_tokens_are_case_insensitive() {
        let schedule = LectureSchedule::try_from(record("mon TUE", "09:00 09:00", "1 1")).unwrap();
        assert_eq!(schedule.occurrences()[0].day, Weekday::Mon);
        assert_eq!(schedule.occurrences()[1].day, Weekday::Tue);
    }

    #[test]
    fn serde_uses_stored_column_shape() {
        let json = r#"{
            "id": 2,
            "name": "Systems Programming",
            "roomId": "236",
            "week": "Mon Tue",
            "time": "10:30 10:30",
            "duration": "1.5 1.5",
            "building": "Seongho"
        }"#;
        let schedule: LectureSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.occurrences().len(), 2);

        let back = serde_json::to_value(&schedule).unwrap();
        assert_eq!(back["week"], "Mon Tue");
        assert_eq!(back["time"], "10:30 10:30");
        assert_eq!(back["duration"], "1.5 1.5");
        assert_eq!(back["roomId"], "236");
    }

    #[test]
    fn malformed_stored_rows_fail_to_deserialize() {
        let json = r#"{
            "id": 3, "name": "x", "roomId": "105",
            "week": "Mon Tue", "time": "10:30", "duration": "1.5 1.5", "building": "b"
        }"#;
        assert!(serde_json::from_str::<LectureSchedule>(json).is_err());
    }
}
