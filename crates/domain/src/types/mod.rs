//! Domain types and models

pub mod booking;
pub mod lecture;
pub mod reservation;
pub mod schedule;
pub mod status;

pub use booking::{BookingOutcome, ConflictReport, LectureClash};
pub use lecture::{LectureOccurrence, LectureRecord, LectureSchedule};
pub use reservation::{positive_hours, NewReservation, Reservation, ReservationChange};
pub use schedule::{DaySchedule, ScheduleItem, ScheduleItemKind, ScheduleItemStatus, TimeInterval, TimeSlot};
pub use status::{Occupant, RoomStatus, RoomStatusReport};
