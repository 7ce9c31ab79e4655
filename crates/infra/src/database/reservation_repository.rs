//! Reservation store implementation using SQLite
//!
//! Dates, clock times and creation timestamps are stored as text
//! (`YYYY-MM-DD`, `HH:MM`, RFC 3339) so lexical order matches chronological
//! order and `ORDER BY date, time` sorts correctly.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use roomkeeper_core::ReservationStore;
use roomkeeper_domain::{parse_date, ClockTime, Reservation, Result as DomainResult, RoomKeeperError};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::task;
use tracing::debug;

use super::manager::{map_join_error, map_sql_error, DbManager};
use crate::errors::is_unique_violation;

const SELECT_COLUMNS: &str =
    "SELECT id, room_id, date, time, duration, guest_name, purpose, created_at FROM reservations";

/// SQLite-backed implementation of `ReservationStore`
pub struct SqliteReservationStore {
    db: Arc<DbManager>,
}

impl SqliteReservationStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    async fn query(
        &self,
        sql: String,
        args: Vec<String>,
    ) -> DomainResult<Vec<Reservation>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Reservation>> {
            let conn = db.get_connection()?;
            query_reservations(&conn, &sql, &args).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl ReservationStore for SqliteReservationStore {
    async fn add(&self, reservation: Reservation) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            match insert_reservation(&conn, &reservation) {
                Ok(_) => {
                    debug!(reservation_id = %reservation.id, room_id = %reservation.room_id, "reservation inserted");
                    Ok(())
                }
                Err(err) if is_unique_violation(&err) => {
                    Err(RoomKeeperError::DuplicateId(reservation.id))
                }
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Reservation>> {
            let conn = db.get_connection()?;
            conn.query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), params![&id], map_reservation_row)
                .optional()
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_by_room(&self, room_id: &str) -> DomainResult<Vec<Reservation>> {
        self.query(
            format!("{SELECT_COLUMNS} WHERE room_id = ?1 ORDER BY date, time"),
            vec![room_id.to_string()],
        )
        .await
    }

    async fn get_by_room_and_date(
        &self,
        room_id: &str,
        date: NaiveDate,
    ) -> DomainResult<Vec<Reservation>> {
        self.query(
            format!("{SELECT_COLUMNS} WHERE room_id = ?1 AND date = ?2 ORDER BY time"),
            vec![room_id.to_string(), date.to_string()],
        )
        .await
    }

    async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Reservation>> {
        self.query(
            format!("{SELECT_COLUMNS} WHERE date >= ?1 AND date <= ?2 ORDER BY date, time"),
            vec![start.to_string(), end.to_string()],
        )
        .await
    }

    async fn get_all(&self) -> DomainResult<Vec<Reservation>> {
        self.query(SELECT_COLUMNS.to_string(), Vec::new()).await
    }

    async fn update(&self, reservation: Reservation) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(
                    "UPDATE reservations
                     SET room_id = ?2, date = ?3, time = ?4, duration = ?5,
                         guest_name = ?6, purpose = ?7, created_at = ?8
                     WHERE id = ?1",
                    params![
                        &reservation.id,
                        &reservation.room_id,
                        reservation.date.to_string(),
                        reservation.time.to_string(),
                        reservation.duration,
                        &reservation.guest_name,
                        &reservation.purpose,
                        format_timestamp(&reservation.created_at),
                    ],
                )
                .map_err(map_sql_error)?;
            if changed == 0 {
                return Err(RoomKeeperError::NotFound(format!("reservation {}", reservation.id)));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute("DELETE FROM reservations WHERE id = ?1", params![&id])
                .map_err(map_sql_error)?;
            if changed == 0 {
                return Err(RoomKeeperError::NotFound(format!("reservation {id}")));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn clear(&self) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute("DELETE FROM reservations", []).map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn insert_reservation(conn: &Connection, reservation: &Reservation) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO reservations (id, room_id, date, time, duration, guest_name, purpose, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            &reservation.id,
            &reservation.room_id,
            reservation.date.to_string(),
            reservation.time.to_string(),
            reservation.duration,
            &reservation.guest_name,
            &reservation.purpose,
            format_timestamp(&reservation.created_at),
        ],
    )
}

fn query_reservations(
    conn: &Connection,
    sql: &str,
    args: &[String],
) -> rusqlite::Result<Vec<Reservation>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args), map_reservation_row)?;
    rows.collect()
}

fn map_reservation_row(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    let date: String = row.get(2)?;
    let time: String = row.get(3)?;
    let created_at: String = row.get(7)?;

    Ok(Reservation {
        id: row.get(0)?,
        room_id: row.get(1)?,
        date: convert(2, parse_date(&date))?,
        time: convert(3, time.parse::<ClockTime>())?,
        duration: row.get(4)?,
        guest_name: row.get(5)?,
        purpose: row.get(6)?,
        created_at: convert(7, parse_timestamp(&created_at))?,
    })
}

fn convert<T>(column: usize, value: DomainResult<T>) -> rusqlite::Result<T> {
    value.map_err(|err| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err)))
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(raw: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| RoomKeeperError::InvalidFormat(format!("invalid timestamp '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn timestamps_round_trip_through_text() {
        let ts = "2024-12-19T19:00:00.000+09:00";
        let parsed = parse_timestamp(ts).unwrap();
        assert_eq!(format_timestamp(&parsed), "2024-12-19T10:00:00.000Z");
        assert!(matches!(parse_timestamp("yesterday"), Err(RoomKeeperError::InvalidFormat(_))));
    }

    #[test]
    fn corrupt_rows_surface_as_database_errors() {
        let temp_dir = TempDir::new().unwrap();
        let db = DbManager::new(temp_dir.path().join("test.db"), 1).unwrap();
        db.run_migrations().unwrap();

        let conn = db.get_connection().unwrap();
        conn.execute(
            "INSERT INTO reservations (id, room_id, date, time, duration, guest_name, purpose, created_at)
             VALUES ('bad', '101', '2024-12-20', '9am', 1, 'g', 'p', '2024-12-19T10:00:00Z')",
            [],
        )
        .unwrap();

        let err = query_reservations(&conn, SELECT_COLUMNS, &[]).unwrap_err();
        assert!(matches!(map_sql_error(err), RoomKeeperError::Database(_)));
    }
}
