//! Read side: room status and day schedules at the clock's current time

use std::sync::Arc;

use chrono::NaiveDate;
use roomkeeper_domain::{ClockTime, DaySchedule, Result, RoomStatusReport};
use tracing::instrument;

use super::cache::RoomStatusCache;
use super::resolver::resolve_status;
use crate::booking::ports::ReservationStore;
use crate::clock_ports::Clock;
use crate::schedule::day::{day_schedule, is_slot_available};
use crate::schedule::ports::LectureCatalog;

pub struct RoomStatusService {
    store: Arc<dyn ReservationStore>,
    lectures: Arc<dyn LectureCatalog>,
    clock: Arc<dyn Clock>,
    cache: Option<Arc<RoomStatusCache>>,
}

impl RoomStatusService {
    pub fn new(
        store: Arc<dyn ReservationStore>,
        lectures: Arc<dyn LectureCatalog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { store, lectures, clock, cache: None }
    }

    /// Serve repeated status reads from `cache`.
    pub fn with_cache(mut self, cache: Arc<RoomStatusCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Current status of `room_id`.
    #[instrument(skip(self))]
    pub async fn status(&self, room_id: &str) -> Result<RoomStatusReport> {
        match &self.cache {
            Some(cache) => cache.get_or_resolve(room_id, move || self.resolve(room_id)).await,
            None => self.resolve(room_id).await,
        }
    }

    /// Schedule of `room_id` on `date`, with item states relative to now.
    pub async fn day_schedule(&self, room_id: &str, date: NaiveDate) -> Result<DaySchedule> {
        let now = self.clock.local_now().await.naive_local();
        let reservations = self.store.get_by_room_and_date(room_id, date).await?;
        let lectures = self.lectures.get_by_room(room_id).await?;
        Ok(day_schedule(room_id, date, now, &reservations, &lectures))
    }

    /// Whether `[start, end)` is free of reservations and lectures.
    pub async fn is_slot_available(
        &self,
        room_id: &str,
        date: NaiveDate,
        start: ClockTime,
        end: ClockTime,
    ) -> Result<bool> {
        let reservations = self.store.get_by_room_and_date(room_id, date).await?;
        let lectures = self.lectures.get_by_room(room_id).await?;
        Ok(is_slot_available(room_id, date, start, end, &reservations, &lectures))
    }

    async fn resolve(&self, room_id: &str) -> Result<RoomStatusReport> {
        let now = self.clock.local_now().await;
        let reservations = self.store.get_by_room_and_date(room_id, now.date_naive()).await?;
        let lectures = self.lectures.get_by_room(room_id).await?;
        Ok(resolve_status(room_id, &now, &reservations, &lectures))
    }
}
