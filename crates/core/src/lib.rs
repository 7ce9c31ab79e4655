//! # RoomKeeper Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for reservation storage, lecture data and time
//! - Lecture expansion, conflict detection and status resolution
//! - The booking service that serializes writes per room
//!
//! ## Architecture Principles
//! - Only depends on `roomkeeper-domain`
//! - No database or platform code
//! - All external dependencies via traits

pub mod booking;
pub mod schedule;
pub mod status;

// Infrastructure ports
pub mod clock_ports;

pub use booking::ports::ReservationStore;
pub use booking::{check_conflict, check_conflict_excluding, check_lecture_conflict, BookingService};
pub use clock_ports::{Clock, TimeSource};
pub use schedule::ports::LectureCatalog;
pub use schedule::{day_schedule, expand, generate_time_slots, is_slot_available};
pub use status::{resolve_status, RoomStatusCache, RoomStatusService};
