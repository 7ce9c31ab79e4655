//! Booking service - the serialized write path for reservations
//!
//! Every create or reschedule runs its conflict check and its store write
//! under a per-room async mutex, so two concurrent requests for overlapping
//! slots in one room cannot both succeed through this service. Different
//! rooms never contend.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::Rng;
use roomkeeper_domain::constants::{RESERVATION_ID_PREFIX, RESERVATION_ID_SUFFIX_LEN};
use roomkeeper_domain::{
    BookingConfig, BookingOutcome, ConflictReport, NewReservation, Reservation, ReservationChange,
    Result, RoomKeeperError, TimeInterval,
};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use super::conflict::{candidate_interval, find_conflicts, find_lecture_clashes};
use super::policy::BookingPolicy;
use super::ports::ReservationStore;
use crate::clock_ports::Clock;
use crate::schedule::ports::LectureCatalog;
use crate::status::cache::RoomStatusCache;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// One write lock per room id. Entries are never removed; the registry is
/// bounded by the number of distinct rooms ever booked.
#[derive(Default)]
struct RoomLocks(DashMap<String, Arc<Mutex<()>>>);

impl RoomLocks {
    fn get(&self, room_id: &str) -> Arc<Mutex<()>> {
        Arc::clone(&self.0.entry(room_id.to_string()).or_default())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.0.len()
    }
}

pub struct BookingService {
    store: Arc<dyn ReservationStore>,
    lectures: Arc<dyn LectureCatalog>,
    clock: Arc<dyn Clock>,
    policy: BookingPolicy,
    room_locks: RoomLocks,
    status_cache: Option<Arc<RoomStatusCache>>,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn ReservationStore>,
        lectures: Arc<dyn LectureCatalog>,
        clock: Arc<dyn Clock>,
        config: BookingConfig,
    ) -> Self {
        Self {
            store,
            lectures,
            clock,
            policy: BookingPolicy::new(config),
            room_locks: RoomLocks::default(),
            status_cache: None,
        }
    }

    /// Invalidate `cache` for the affected room after every successful write.
    pub fn with_status_cache(mut self, cache: Arc<RoomStatusCache>) -> Self {
        self.status_cache = Some(cache);
        self
    }

    /// Create a reservation if the slot is free.
    ///
    /// Policy violations are errors; an occupied slot is returned as
    /// [`BookingOutcome::Conflict`] and nothing is written.
    #[instrument(skip(self, request), fields(room_id = %request.room_id, date = %request.date, time = %request.time))]
    pub async fn book(&self, request: NewReservation) -> Result<BookingOutcome> {
        self.policy.validate_request(&request)?;

        let lock = self.room_lock(&request.room_id);
        let _guard = lock.lock().await;

        let candidate =
            TimeInterval::new(request.date, request.time, i64::from(request.duration) * 60);
        let report = self.evaluate(&request.room_id, &candidate, None).await?;
        if self.blocks(&report) {
            warn!(conflicts = report.conflicts.len(), lectures = report.lecture_clashes.len(), "Booking rejected: slot is taken");
            return Ok(BookingOutcome::Conflict(report));
        }

        let now = self.clock.now().await;
        let reservation = Reservation::from_request(generate_reservation_id(now), request, now);
        self.store.add(reservation.clone()).await?;
        self.invalidate(&reservation.room_id);

        info!(reservation_id = %reservation.id, "Reservation booked");
        Ok(BookingOutcome::Booked(reservation))
    }

    /// Move an existing reservation to a new slot in the same room.
    #[instrument(skip(self, change), fields(reservation_id = %id))]
    pub async fn reschedule(&self, id: &str, change: ReservationChange) -> Result<BookingOutcome> {
        self.policy.validate_slot(change.time, change.duration)?;

        let room_id = self.require(id).await?.room_id;
        let lock = self.room_lock(&room_id);
        let _guard = lock.lock().await;

        // Re-read under the lock; the reservation may have changed meanwhile.
        let current = self.require(id).await?;
        let candidate = TimeInterval::new(change.date, change.time, i64::from(change.duration) * 60);
        let report = self.evaluate(&room_id, &candidate, Some(id)).await?;
        if self.blocks(&report) {
            warn!(room_id = %room_id, conflicts = report.conflicts.len(), "Reschedule rejected: slot is taken");
            return Ok(BookingOutcome::Conflict(report));
        }

        let updated = current.with_change(&change);
        self.store.update(updated.clone()).await?;
        self.invalidate(&room_id);

        info!(room_id = %room_id, "Reservation rescheduled");
        Ok(BookingOutcome::Booked(updated))
    }

    /// Delete a reservation and return it. Fails with `NotFound`.
    #[instrument(skip(self), fields(reservation_id = %id))]
    pub async fn cancel(&self, id: &str) -> Result<Reservation> {
        let reservation = self.require(id).await?;
        let lock = self.room_lock(&reservation.room_id);
        let _guard = lock.lock().await;

        self.store.delete(id).await?;
        self.invalidate(&reservation.room_id);

        info!(room_id = %reservation.room_id, "Reservation cancelled");
        Ok(reservation)
    }

    /// Read-only conflict check on raw form values, for live feedback.
    ///
    /// `exclude_id` names the reservation being edited, if any.
    pub async fn check(
        &self,
        room_id: &str,
        date: &str,
        time: &str,
        duration: i64,
        exclude_id: Option<&str>,
    ) -> Result<ConflictReport> {
        let candidate = candidate_interval(date, time, duration)?;
        self.evaluate(room_id, &candidate, exclude_id).await
    }

    async fn evaluate(
        &self,
        room_id: &str,
        candidate: &TimeInterval,
        exclude_id: Option<&str>,
    ) -> Result<ConflictReport> {
        let existing = self.store.get_by_room_and_date(room_id, candidate.date).await?;
        let report = find_conflicts(room_id, candidate, &existing, exclude_id);

        if !self.policy.rejects_lecture_overlap() {
            return Ok(report);
        }
        let lectures = self.lectures.get_by_room(room_id).await?;
        Ok(report.with_lecture_clashes(find_lecture_clashes(room_id, candidate, &lectures)))
    }

    fn blocks(&self, report: &ConflictReport) -> bool {
        if self.policy.rejects_lecture_overlap() {
            report.blocks_with_lectures()
        } else {
            report.has_conflict
        }
    }

    async fn require(&self, id: &str) -> Result<Reservation> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| RoomKeeperError::NotFound(format!("reservation {id}")))
    }

    fn room_lock(&self, room_id: &str) -> Arc<Mutex<()>> {
        self.room_locks.get(room_id)
    }

    fn invalidate(&self, room_id: &str) {
        if let Some(cache) = &self.status_cache {
            cache.invalidate(room_id);
        }
    }
}

/// `res_<unix millis>_<9 base36 chars>`.
pub fn generate_reservation_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..RESERVATION_ID_SUFFIX_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect();
    format!("{RESERVATION_ID_PREFIX}_{}_{suffix}", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_reservation_id_shape() {
        let now = Utc.with_ymd_and_hms(2024, 12, 19, 10, 0, 0).unwrap();
        let id = generate_reservation_id(now);
        let parts: Vec<&str> = id.split('_').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "res");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
    }

    #[test]
    fn test_room_locks_hold_one_entry_per_room() {
        let locks = RoomLocks::default();
        let first = locks.get("101-2");
        for _ in 0..50 {
            assert!(Arc::ptr_eq(&first, &locks.get("101-2")));
        }
        assert!(!Arc::ptr_eq(&first, &locks.get("236")));
        assert_eq!(locks.len(), 2);
    }

    #[test]
    fn test_reservation_ids_differ() {
        let now = Utc.with_ymd_and_hms(2024, 12, 19, 10, 0, 0).unwrap();
        assert_ne!(generate_reservation_id(now), generate_reservation_id(now));
    }
}
