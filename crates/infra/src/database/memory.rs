//! In-memory store implementations
//!
//! Used for tests, demos and deployments without a database file. Ordering
//! matches the SQLite store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use roomkeeper_core::{LectureCatalog, ReservationStore};
use roomkeeper_domain::{LectureSchedule, Reservation, Result as DomainResult, RoomKeeperError};
use tokio::sync::RwLock;

/// `ReservationStore` over a map keyed by reservation id.
#[derive(Default)]
pub struct InMemoryReservationStore {
    reservations: RwLock<HashMap<String, Reservation>>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn collect<F>(&self, mut keep: F) -> Vec<Reservation>
    where
        F: FnMut(&Reservation) -> bool,
    {
        let guard = self.reservations.read().await;
        let mut matching: Vec<Reservation> = guard.values().filter(|r| keep(r)).cloned().collect();
        // Ids break ties so the order is deterministic across map iterations.
        matching.sort_by(|a, b| (a.date, a.time, &a.id).cmp(&(b.date, b.time, &b.id)));
        matching
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn add(&self, reservation: Reservation) -> DomainResult<()> {
        let mut guard = self.reservations.write().await;
        if guard.contains_key(&reservation.id) {
            return Err(RoomKeeperError::DuplicateId(reservation.id));
        }
        guard.insert(reservation.id.clone(), reservation);
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.read().await.get(id).cloned())
    }

    async fn get_by_room(&self, room_id: &str) -> DomainResult<Vec<Reservation>> {
        Ok(self.collect(|r| r.room_id == room_id).await)
    }

    async fn get_by_room_and_date(
        &self,
        room_id: &str,
        date: NaiveDate,
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self.collect(|r| r.room_id == room_id && r.date == date).await)
    }

    async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self.collect(|r| start <= r.date && r.date <= end).await)
    }

    async fn get_all(&self) -> DomainResult<Vec<Reservation>> {
        Ok(self.reservations.read().await.values().cloned().collect())
    }

    async fn update(&self, reservation: Reservation) -> DomainResult<()> {
        let mut guard = self.reservations.write().await;
        match guard.get_mut(&reservation.id) {
            Some(slot) => {
                *slot = reservation;
                Ok(())
            }
            None => Err(RoomKeeperError::NotFound(format!("reservation {}", reservation.id))),
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.reservations
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RoomKeeperError::NotFound(format!("reservation {id}")))
    }

    async fn clear(&self) -> DomainResult<()> {
        self.reservations.write().await.clear();
        Ok(())
    }
}

/// Fixed `LectureCatalog` built from a list of schedules.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLectureCatalog {
    lectures: Vec<LectureSchedule>,
}

impl InMemoryLectureCatalog {
    pub fn new(lectures: Vec<LectureSchedule>) -> Self {
        Self { lectures }
    }
}

#[async_trait]
impl LectureCatalog for InMemoryLectureCatalog {
    async fn get_all(&self) -> DomainResult<Vec<LectureSchedule>> {
        Ok(self.lectures.clone())
    }

    async fn get_by_room(&self, room_id: &str) -> DomainResult<Vec<LectureSchedule>> {
        Ok(self.lectures.iter().filter(|l| l.room_id == room_id).cloned().collect())
    }
}
