//! Port interfaces for reservation persistence
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use roomkeeper_domain::{Reservation, Result};

/// Durable keyed collection of reservations.
///
/// Each operation is individually atomic. The store does not enforce
/// non-overlap; callers go through the conflict check before writing.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Insert a new reservation. Fails with `DuplicateId` if the id exists.
    async fn add(&self, reservation: Reservation) -> Result<()>;

    /// Look up one reservation by id.
    async fn get_by_id(&self, id: &str) -> Result<Option<Reservation>>;

    /// Reservations for a room ordered by `(date, time)`.
    async fn get_by_room(&self, room_id: &str) -> Result<Vec<Reservation>>;

    /// Reservations for a room on one date ordered by time.
    async fn get_by_room_and_date(&self, room_id: &str, date: NaiveDate)
        -> Result<Vec<Reservation>>;

    /// Reservations with `start <= date <= end` ordered by `(date, time)`.
    async fn get_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Reservation>>;

    /// Every reservation, unordered.
    async fn get_all(&self) -> Result<Vec<Reservation>>;

    /// Replace an existing reservation. Fails with `NotFound`.
    async fn update(&self, reservation: Reservation) -> Result<()>;

    /// Remove a reservation by id. Fails with `NotFound`.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Remove every reservation.
    async fn clear(&self) -> Result<()>;
}
