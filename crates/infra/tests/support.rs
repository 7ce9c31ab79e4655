#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Asia::Seoul;
use roomkeeper_domain::Reservation;
use roomkeeper_infra::clock::FixedClock;
use roomkeeper_infra::database::DbManager;
use tempfile::TempDir;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a new temporary database with the schema applied.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("schema migrations should apply");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 19, 10, 0, 0).unwrap()
}

/// 08:00 in Seoul on 2024-12-20.
pub fn morning_clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2024, 12, 19, 23, 0, 0).unwrap(), Seoul)
}

pub fn date(raw: &str) -> NaiveDate {
    raw.parse().expect("valid test date")
}

pub fn reservation(id: &str, room_id: &str, day: &str, time: &str, duration: u32) -> Reservation {
    Reservation {
        id: id.to_string(),
        room_id: room_id.to_string(),
        date: date(day),
        time: time.parse().expect("valid test time"),
        duration,
        guest_name: "Kim".to_string(),
        purpose: "Team meeting".to_string(),
        created_at: created_at(),
    }
}
