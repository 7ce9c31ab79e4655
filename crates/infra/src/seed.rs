//! Sample data for demos and first runs

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use roomkeeper_core::{Clock, ReservationStore};
use roomkeeper_domain::{
    ClockTime, LectureOccurrence, LectureSchedule, Reservation, Result, RoomKeeperError,
};
use tracing::info;

use crate::database::SqliteLectureCatalog;

const SAMPLE_BUILDING: &str = "성호관";

/// The four sample bookings, stamped with `created_at`.
pub fn sample_reservations(created_at: DateTime<Utc>) -> Result<Vec<Reservation>> {
    let rows = [
        ("res1", "101-2", (2024, 12, 20), "09:00", 2, "김철수", "팀 회의"),
        ("res2", "101-2", (2024, 12, 20), "14:00", 1, "이영희", "프레젠테이션 준비"),
        ("res3", "101-3", (2024, 12, 21), "10:00", 3, "박민수", "고객 미팅"),
        ("res4", "라운지", (2024, 12, 20), "16:00", 2, "최지훈", "네트워킹 이벤트"),
    ];

    rows.into_iter()
        .map(|(id, room_id, (y, m, d), time, duration, guest_name, purpose)| {
            Ok(Reservation {
                id: id.to_string(),
                room_id: room_id.to_string(),
                date: date(y, m, d)?,
                time: time.parse()?,
                duration,
                guest_name: guest_name.to_string(),
                purpose: purpose.to_string(),
                created_at,
            })
        })
        .collect()
}

/// The nine sample lectures. Several meet in the same room at the same
/// time; lecture data is reference data and is not checked for overlap.
pub fn sample_lectures() -> Result<Vec<LectureSchedule>> {
    let mon_sun = [(Weekday::Mon, "10:30", 1.5), (Weekday::Sun, "02:00", 1.5)];
    let mon_tue = [(Weekday::Mon, "10:30", 1.5), (Weekday::Tue, "10:30", 1.5)];

    let rows: [(i64, &str, &str, &[(Weekday, &str, f64)]); 9] = [
        (1, "선형대수2", "101-1", &mon_sun),
        (2, "시스템프로그래밍", "236", &mon_tue),
        (3, "해석개론2", "105", &mon_tue),
        (4, "논리회로", "105", &mon_tue),
        (5, "현대대수2", "236", &mon_tue),
        (6, "정수론", "202", &mon_tue),
        (7, "운영체제", "334", &mon_sun),
        (8, "전자공학 운영체제", "306", &mon_sun),
        (9, "오픈소스SW입문", "442", &mon_sun),
    ];

    rows.into_iter()
        .map(|(id, name, room_id, slots)| {
            let occurrences = slots
                .iter()
                .map(|&(day, start, hours)| {
                    LectureOccurrence::new(day, start.parse::<ClockTime>()?, hours)
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(LectureSchedule::new(id, name, room_id, SAMPLE_BUILDING, occurrences))
        })
        .collect()
}

/// Insert the sample reservations if `store` is empty.
///
/// Returns the number of rows inserted.
pub async fn load_sample_data(store: &dyn ReservationStore, clock: &dyn Clock) -> Result<usize> {
    if !store.get_all().await?.is_empty() {
        info!("reservation store already populated, skipping sample data");
        return Ok(0);
    }

    let samples = sample_reservations(clock.now().await)?;
    let count = samples.len();
    for reservation in samples {
        store.add(reservation).await?;
    }

    info!(count, "sample reservations loaded");
    Ok(count)
}

/// Replace the lecture catalog with the sample lectures.
pub async fn load_sample_lectures(catalog: &SqliteLectureCatalog) -> Result<usize> {
    let lectures = sample_lectures()?;
    let count = lectures.len();
    catalog.replace_all(lectures).await?;
    info!(count, "sample lectures loaded");
    Ok(count)
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| RoomKeeperError::InvalidFormat(format!("invalid date {year}-{month}-{day}")))
}
