//! Mock repository implementations for testing
//!
//! In-memory mocks for the reservation store and lecture catalog. The store
//! can be told to yield between its read and the caller's write so races in
//! check-then-write code surface deterministically.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use roomkeeper_core::{LectureCatalog, ReservationStore};
use roomkeeper_domain::{LectureSchedule, Reservation, Result as DomainResult, RoomKeeperError};

/// In-memory mock for `ReservationStore`.
#[derive(Default, Clone)]
pub struct MockReservationStore {
    reservations: Arc<Mutex<Vec<Reservation>>>,
    read_delay: Option<Duration>,
    reads: Arc<AtomicUsize>,
}

impl MockReservationStore {
    pub fn new(reservations: Vec<Reservation>) -> Self {
        Self { reservations: Arc::new(Mutex::new(reservations)), ..Self::default() }
    }

    /// Sleep after every read, widening the window between check and write.
    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    pub fn snapshot(&self) -> Vec<Reservation> {
        self.reservations.lock().unwrap().clone()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    async fn after_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn sorted(mut reservations: Vec<Reservation>) -> Vec<Reservation> {
        reservations.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));
        reservations
    }
}

#[async_trait]
impl ReservationStore for MockReservationStore {
    async fn add(&self, reservation: Reservation) -> DomainResult<()> {
        let mut reservations = self.reservations.lock().unwrap();
        if reservations.iter().any(|r| r.id == reservation.id) {
            return Err(RoomKeeperError::DuplicateId(reservation.id));
        }
        reservations.push(reservation);
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        let found = self.reservations.lock().unwrap().iter().find(|r| r.id == id).cloned();
        self.after_read().await;
        Ok(found)
    }

    async fn get_by_room(&self, room_id: &str) -> DomainResult<Vec<Reservation>> {
        let matching: Vec<Reservation> =
            self.reservations.lock().unwrap().iter().filter(|r| r.room_id == room_id).cloned().collect();
        self.after_read().await;
        Ok(Self::sorted(matching))
    }

    async fn get_by_room_and_date(
        &self,
        room_id: &str,
        date: NaiveDate,
    ) -> DomainResult<Vec<Reservation>> {
        let matching: Vec<Reservation> = self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.room_id == room_id && r.date == date)
            .cloned()
            .collect();
        self.after_read().await;
        Ok(Self::sorted(matching))
    }

    async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Reservation>> {
        let matching: Vec<Reservation> = self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| start <= r.date && r.date <= end)
            .cloned()
            .collect();
        self.after_read().await;
        Ok(Self::sorted(matching))
    }

    async fn get_all(&self) -> DomainResult<Vec<Reservation>> {
        let all = self.snapshot();
        self.after_read().await;
        Ok(all)
    }

    async fn update(&self, reservation: Reservation) -> DomainResult<()> {
        let mut reservations = self.reservations.lock().unwrap();
        let slot = reservations
            .iter_mut()
            .find(|r| r.id == reservation.id)
            .ok_or_else(|| RoomKeeperError::NotFound(reservation.id.clone()))?;
        *slot = reservation;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let mut reservations = self.reservations.lock().unwrap();
        let before = reservations.len();
        reservations.retain(|r| r.id != id);
        if reservations.len() == before {
            return Err(RoomKeeperError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn clear(&self) -> DomainResult<()> {
        self.reservations.lock().unwrap().clear();
        Ok(())
    }
}

/// In-memory mock for `LectureCatalog`.
#[derive(Default, Clone)]
pub struct MockLectureCatalog {
    lectures: Arc<Vec<LectureSchedule>>,
}

impl MockLectureCatalog {
    pub fn new(lectures: Vec<LectureSchedule>) -> Self {
        Self { lectures: Arc::new(lectures) }
    }
}

#[async_trait]
impl LectureCatalog for MockLectureCatalog {
    async fn get_all(&self) -> DomainResult<Vec<LectureSchedule>> {
        Ok(self.lectures.as_ref().clone())
    }

    async fn get_by_room(&self, room_id: &str) -> DomainResult<Vec<LectureSchedule>> {
        Ok(self.lectures.iter().filter(|l| l.room_id == room_id).cloned().collect())
    }
}
