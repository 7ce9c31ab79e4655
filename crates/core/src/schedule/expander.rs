//! Weekly lecture expansion
//!
//! Turns a recurring [`LectureSchedule`] into the concrete intervals it
//! occupies on one calendar date. Occurrences are matched on the weekday of
//! the date only; repeated day tokens produce one interval each.

use chrono::{Datelike, NaiveDate};
use roomkeeper_domain::{LectureOccurrence, LectureSchedule, TimeInterval};

/// Intervals `lecture` occupies on `date`, in occurrence order.
pub fn expand(lecture: &LectureSchedule, date: NaiveDate) -> Vec<TimeInterval> {
    expand_indexed(lecture, date).map(|(_, _, interval)| interval).collect()
}

/// Like [`expand`], keeping each occurrence and its position in the stored
/// columns.
pub fn expand_indexed(
    lecture: &LectureSchedule,
    date: NaiveDate,
) -> impl Iterator<Item = (usize, &LectureOccurrence, TimeInterval)> + '_ {
    let weekday = date.weekday();
    lecture
        .occurrences()
        .iter()
        .enumerate()
        .filter(move |(_, occurrence)| occurrence.day == weekday)
        .map(move |(index, occurrence)| {
            let interval = TimeInterval::new(date, occurrence.start, occurrence.duration_minutes());
            (index, occurrence, interval)
        })
}
