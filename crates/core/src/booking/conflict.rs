//! Conflict detection for proposed bookings
//!
//! A candidate `[time, time + duration)` conflicts with an existing
//! reservation in the same room on the same date when the two closed-open
//! intervals intersect; back-to-back bookings are allowed. Lectures are not
//! consulted by [`check_conflict`]; callers that want lecture clashes ask
//! [`check_lecture_conflict`] separately.

use roomkeeper_domain::{
    parse_date, positive_hours, ClockTime, ConflictReport, LectureClash, LectureSchedule,
    Reservation, Result, TimeInterval,
};

use crate::schedule::expander::expand_indexed;

/// Check a raw booking request against `existing`.
///
/// Fails with `InvalidFormat` for a malformed date or time and with
/// `InvalidDuration` when `duration` is not a positive number of hours.
pub fn check_conflict(
    room_id: &str,
    date: &str,
    time: &str,
    duration: i64,
    existing: &[Reservation],
) -> Result<ConflictReport> {
    let candidate = candidate_interval(date, time, duration)?;
    Ok(find_conflicts(room_id, &candidate, existing, None))
}

/// [`check_conflict`] for an edit: the reservation `exclude_id` is ignored.
pub fn check_conflict_excluding(
    room_id: &str,
    date: &str,
    time: &str,
    duration: i64,
    existing: &[Reservation],
    exclude_id: &str,
) -> Result<ConflictReport> {
    let candidate = candidate_interval(date, time, duration)?;
    Ok(find_conflicts(room_id, &candidate, existing, Some(exclude_id)))
}

/// Every reservation in `existing` that overlaps `candidate`, in input order.
pub fn find_conflicts(
    room_id: &str,
    candidate: &TimeInterval,
    existing: &[Reservation],
    exclude_id: Option<&str>,
) -> ConflictReport {
    let conflicts = existing
        .iter()
        .filter(|r| r.room_id == room_id && r.date == candidate.date)
        .filter(|r| exclude_id != Some(r.id.as_str()))
        .filter(|r| r.interval().overlaps(candidate))
        .cloned()
        .collect();
    ConflictReport::from_conflicts(conflicts)
}

/// Lecture occurrences in `room_id` that overlap the candidate booking.
pub fn check_lecture_conflict(
    room_id: &str,
    date: &str,
    time: &str,
    duration: i64,
    lectures: &[LectureSchedule],
) -> Result<Vec<LectureClash>> {
    let candidate = candidate_interval(date, time, duration)?;
    Ok(find_lecture_clashes(room_id, &candidate, lectures))
}

pub fn find_lecture_clashes(
    room_id: &str,
    candidate: &TimeInterval,
    lectures: &[LectureSchedule],
) -> Vec<LectureClash> {
    lectures
        .iter()
        .filter(|lecture| lecture.room_id == room_id)
        .flat_map(|lecture| {
            expand_indexed(lecture, candidate.date)
                .filter(move |(_, _, interval)| interval.overlaps(candidate))
                .map(move |(_, _, interval)| LectureClash {
                    lecture_id: lecture.id,
                    name: lecture.name.clone(),
                    start_time: interval.start(),
                    end_time: interval.end(),
                })
        })
        .collect()
}

/// Parse raw form values into the interval a booking would occupy.
pub fn candidate_interval(date: &str, time: &str, duration: i64) -> Result<TimeInterval> {
    let date = parse_date(date)?;
    let start: ClockTime = time.parse()?;
    let hours = positive_hours(duration)?;
    Ok(TimeInterval::new(date, start, i64::from(hours) * 60))
}
