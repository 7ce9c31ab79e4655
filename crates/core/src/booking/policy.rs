//! Booking policy checks applied before a write

use roomkeeper_domain::{BookingConfig, ClockTime, NewReservation, Result, RoomKeeperError};

/// Product limits on what a single reservation may look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPolicy {
    config: BookingConfig,
}

impl BookingPolicy {
    pub fn new(config: BookingConfig) -> Self {
        Self { config }
    }

    pub fn rejects_lecture_overlap(&self) -> bool {
        self.config.reject_lecture_overlap
    }

    /// Validate a creation request.
    pub fn validate_request(&self, request: &NewReservation) -> Result<()> {
        if request.room_id.trim().is_empty() {
            return Err(RoomKeeperError::InvalidInput("room id is required".to_string()));
        }
        if request.guest_name.trim().is_empty() {
            return Err(RoomKeeperError::InvalidInput("guest name is required".to_string()));
        }
        if request.purpose.trim().is_empty() {
            return Err(RoomKeeperError::InvalidInput("purpose is required".to_string()));
        }
        self.validate_slot(request.time, request.duration)
    }

    /// Validate a start time and whole-hour duration.
    pub fn validate_slot(&self, time: ClockTime, duration: u32) -> Result<()> {
        if duration == 0 {
            return Err(RoomKeeperError::InvalidDuration(
                "duration must be a positive number of hours, got 0".to_string(),
            ));
        }
        if duration > self.config.max_duration_hours {
            return Err(RoomKeeperError::InvalidInput(format!(
                "duration of {duration}h exceeds the {}h limit",
                self.config.max_duration_hours
            )));
        }

        let step = self.config.slot_minutes;
        if self.config.enforce_slot_alignment && step > 0 && time.minutes() % step != 0 {
            return Err(RoomKeeperError::InvalidInput(format!(
                "start time {time} is not aligned to {step}-minute slots"
            )));
        }
        Ok(())
    }
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self::new(BookingConfig::default())
    }
}
