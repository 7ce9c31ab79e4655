//! Per-room day view and the booking time grid

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use roomkeeper_domain::constants::{
    DEFAULT_SLOT_MINUTES, MINUTES_PER_DAY, SLOT_GRID_END_MINUTES, SLOT_GRID_START_MINUTES,
};
use roomkeeper_domain::{
    ClockTime, DaySchedule, LectureSchedule, Reservation, ScheduleItem, ScheduleItemKind,
    ScheduleItemStatus, TimeInterval, TimeSlot,
};

use super::expander::{expand, expand_indexed};

/// Everything booked or taught in `room_id` on `date`, sorted by start time.
///
/// `now` is the local wall-clock instant used to label each item as ongoing,
/// upcoming or completed.
pub fn day_schedule(
    room_id: &str,
    date: NaiveDate,
    now: NaiveDateTime,
    reservations: &[Reservation],
    lectures: &[LectureSchedule],
) -> DaySchedule {
    let mut entries: Vec<(TimeInterval, ScheduleItem)> = Vec::new();

    for reservation in reservations.iter().filter(|r| r.room_id == room_id && r.date == date) {
        let interval = reservation.interval();
        entries.push((
            interval,
            ScheduleItem {
                id: reservation.id.clone(),
                room_id: reservation.room_id.clone(),
                title: reservation.purpose.clone(),
                start_time: interval.start(),
                end_time: interval.end(),
                kind: ScheduleItemKind::Reservation,
                reserved_by: Some(reservation.guest_name.clone()),
                status: item_status(&interval, now),
            },
        ));
    }

    for lecture in lectures.iter().filter(|l| l.room_id == room_id) {
        for (index, _, interval) in expand_indexed(lecture, date) {
            entries.push((
                interval,
                ScheduleItem {
                    id: format!("lecture_{}_{}_{}", lecture.id, date, index),
                    room_id: lecture.room_id.clone(),
                    title: lecture.name.clone(),
                    start_time: interval.start(),
                    end_time: interval.end(),
                    kind: ScheduleItemKind::Lecture,
                    reserved_by: None,
                    status: item_status(&interval, now),
                },
            ));
        }
    }

    // Stable: reservations stay ahead of lectures that start at the same minute.
    entries.sort_by_key(|(interval, _)| interval.start_minutes);

    DaySchedule {
        date,
        room_id: room_id.to_string(),
        items: entries.into_iter().map(|(_, item)| item).collect(),
    }
}

/// Progress of `interval` at local time `now`.
///
/// Past dates are completed and future dates upcoming. On the current date
/// the item is ongoing for `start <= now < end`.
pub fn item_status(interval: &TimeInterval, now: NaiveDateTime) -> ScheduleItemStatus {
    let today = now.date();
    if interval.date < today {
        return ScheduleItemStatus::Completed;
    }
    if interval.date > today {
        return ScheduleItemStatus::Upcoming;
    }

    let minute = i64::from(now.hour() * 60 + now.minute());
    if interval.contains_minute(minute) {
        ScheduleItemStatus::Ongoing
    } else if minute >= interval.end_minutes {
        ScheduleItemStatus::Completed
    } else {
        ScheduleItemStatus::Upcoming
    }
}

/// Selectable start times from 09:00 through 21:00 in 30 minute steps.
pub fn generate_time_slots() -> Vec<TimeSlot> {
    (SLOT_GRID_START_MINUTES..=SLOT_GRID_END_MINUTES)
        .step_by(DEFAULT_SLOT_MINUTES as usize)
        .map(|minutes| TimeSlot::from(ClockTime::from_minutes_wrapping(i64::from(minutes))))
        .collect()
}

/// Whether `[start, end)` in `room_id` on `date` is free of reservations and
/// lectures.
///
/// An `end` at or before `start` is read as the next day's clock time.
pub fn is_slot_available(
    room_id: &str,
    date: NaiveDate,
    start: ClockTime,
    end: ClockTime,
    reservations: &[Reservation],
    lectures: &[LectureSchedule],
) -> bool {
    let mut span = i64::from(end.minutes()) - i64::from(start.minutes());
    if span <= 0 {
        span += MINUTES_PER_DAY;
    }
    let candidate = TimeInterval::new(date, start, span);

    let reserved = reservations
        .iter()
        .filter(|r| r.room_id == room_id)
        .any(|r| r.interval().overlaps(&candidate));
    let taught = lectures
        .iter()
        .filter(|l| l.room_id == room_id)
        .flat_map(|l| expand(l, date))
        .any(|interval| interval.overlaps(&candidate));

    !reserved && !taught
}
