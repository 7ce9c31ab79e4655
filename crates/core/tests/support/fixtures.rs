//! Reservation and lecture builders shared by the integration tests.

use chrono::{NaiveDate, TimeZone, Utc, Weekday};
use roomkeeper_domain::{LectureOccurrence, LectureSchedule, NewReservation, Reservation};

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

pub fn reservation(id: &str, room: &str, day: &str, time: &str, duration: u32) -> Reservation {
    Reservation {
        id: id.to_string(),
        room_id: room.to_string(),
        date: date(day),
        time: time.parse().unwrap(),
        duration,
        guest_name: "Kim".to_string(),
        purpose: "Team meeting".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 12, 19, 1, 0, 0).unwrap(),
    }
}

pub fn request(room: &str, day: &str, time: &str, duration: u32) -> NewReservation {
    NewReservation {
        room_id: room.to_string(),
        date: date(day),
        time: time.parse().unwrap(),
        duration,
        guest_name: "Lee".to_string(),
        purpose: "Study group".to_string(),
    }
}

pub fn lecture(id: i64, room: &str, slots: &[(Weekday, &str, f64)]) -> LectureSchedule {
    let occurrences = slots
        .iter()
        .map(|(day, start, hours)| LectureOccurrence::new(*day, start.parse().unwrap(), *hours).unwrap())
        .collect();
    LectureSchedule::new(id, format!("Lecture {id}"), room, "Seongho", occurrences)
}
