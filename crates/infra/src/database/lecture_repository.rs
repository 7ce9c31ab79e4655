//! Lecture catalog implementation using SQLite
//!
//! Rows keep the parallel `week`/`time`/`duration` columns and are validated
//! into [`LectureSchedule`] on read.

use std::sync::Arc;

use async_trait::async_trait;
use roomkeeper_core::LectureCatalog;
use roomkeeper_domain::{LectureRecord, LectureSchedule, Result as DomainResult};
use rusqlite::{params, Connection, Row};
use tokio::task;
use tracing::warn;

use super::manager::{map_join_error, map_sql_error, DbManager};

/// SQLite-backed implementation of `LectureCatalog`
pub struct SqliteLectureCatalog {
    db: Arc<DbManager>,
}

impl SqliteLectureCatalog {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Replace the catalog contents with `lectures` in one transaction.
    pub async fn replace_all(&self, lectures: Vec<LectureSchedule>) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;
            tx.execute("DELETE FROM lectures", []).map_err(map_sql_error)?;
            for lecture in lectures {
                insert_lecture(&tx, LectureRecord::from(lecture)).map_err(map_sql_error)?;
            }
            tx.commit().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn query(&self, room_id: Option<String>) -> DomainResult<Vec<LectureSchedule>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<LectureSchedule>> {
            let conn = db.get_connection()?;
            let records = query_records(&conn, room_id.as_deref()).map_err(map_sql_error)?;
            records.into_iter().map(LectureSchedule::try_from).collect::<DomainResult<Vec<_>>>()
        })
        .await
        .map_err(map_join_error)?
        .inspect_err(|err| warn!(error = %err, "stored lecture rows failed validation"))
    }
}

#[async_trait]
impl LectureCatalog for SqliteLectureCatalog {
    async fn get_all(&self) -> DomainResult<Vec<LectureSchedule>> {
        self.query(None).await
    }

    async fn get_by_room(&self, room_id: &str) -> DomainResult<Vec<LectureSchedule>> {
        self.query(Some(room_id.to_string())).await
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn insert_lecture(conn: &Connection, record: LectureRecord) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO lectures (id, name, room_id, week, time, duration, building)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.id,
            record.name,
            record.room_id,
            record.week,
            record.time,
            record.duration,
            record.building
        ],
    )
}

fn query_records(conn: &Connection, room_id: Option<&str>) -> rusqlite::Result<Vec<LectureRecord>> {
    let base = "SELECT id, name, room_id, week, time, duration, building FROM lectures";
    match room_id {
        Some(room_id) => {
            let mut stmt = conn.prepare(&format!("{base} WHERE room_id = ?1 ORDER BY id"))?;
            let rows = stmt.query_map(params![room_id], map_lecture_row)?;
            rows.collect()
        }
        None => {
            let mut stmt = conn.prepare(&format!("{base} ORDER BY id"))?;
            let rows = stmt.query_map([], map_lecture_row)?;
            rows.collect()
        }
    }
}

fn map_lecture_row(row: &Row<'_>) -> rusqlite::Result<LectureRecord> {
    Ok(LectureRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        room_id: row.get(2)?,
        week: row.get(3)?,
        time: row.get(4)?,
        duration: row.get(5)?,
        building: row.get(6)?,
    })
}
