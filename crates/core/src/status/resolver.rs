//! Room status resolution
//!
//! A room is occupied when a reservation for today, or a lecture occurrence
//! on today's weekday, contains the current minute (`start <= now < end`).
//! Reservations are checked before lectures. The next event is the earliest
//! start strictly after the current minute, looking at today only.

use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike};
use roomkeeper_domain::{
    ClockTime, LectureSchedule, Occupant, Reservation, RoomStatus, RoomStatusReport,
};

use crate::schedule::expander::expand;

/// Resolve the status of `room_id` at `now`, taken in `now`'s own time zone.
pub fn resolve_status<Tz: TimeZone>(
    room_id: &str,
    now: &DateTime<Tz>,
    reservations: &[Reservation],
    lectures: &[LectureSchedule],
) -> RoomStatusReport {
    resolve_status_at(room_id, now.naive_local(), reservations, lectures)
}

/// Resolve against a local wall-clock instant. Seconds are ignored.
pub fn resolve_status_at(
    room_id: &str,
    now: NaiveDateTime,
    reservations: &[Reservation],
    lectures: &[LectureSchedule],
) -> RoomStatusReport {
    let today = now.date();
    let minute = i64::from(now.hour() * 60 + now.minute());

    let todays_reservations: Vec<&Reservation> =
        reservations.iter().filter(|r| r.room_id == room_id && r.date == today).collect();
    let todays_lectures: Vec<(&LectureSchedule, i64, i64)> = lectures
        .iter()
        .filter(|l| l.room_id == room_id)
        .flat_map(|l| {
            expand(l, today)
                .into_iter()
                .map(move |interval| (l, interval.start_minutes, interval.end_minutes))
        })
        .collect();

    let current_occupant = todays_reservations
        .iter()
        .find(|r| r.interval().contains_minute(minute))
        .map(|r| Occupant::Reservation { id: r.id.clone() })
        .or_else(|| {
            todays_lectures
                .iter()
                .find(|(_, start, end)| *start <= minute && minute < *end)
                .map(|(l, _, _)| Occupant::Lecture { id: l.id, name: l.name.clone() })
        });

    let next_event_time = todays_reservations
        .iter()
        .map(|r| i64::from(r.time.minutes()))
        .chain(todays_lectures.iter().map(|(_, start, _)| *start))
        .filter(|start| *start > minute)
        .min()
        .map(ClockTime::from_minutes_wrapping);

    RoomStatusReport {
        status: if current_occupant.is_some() { RoomStatus::Occupied } else { RoomStatus::Available },
        next_event_time,
        current_occupant,
    }
}
