//! Conflict detection and the reservation write path

pub mod conflict;
pub mod policy;
pub mod ports;
pub mod service;

pub use conflict::{
    candidate_interval, check_conflict, check_conflict_excluding, check_lecture_conflict,
    find_conflicts, find_lecture_clashes,
};
pub use policy::BookingPolicy;
pub use ports::ReservationStore;
pub use service::{generate_reservation_id, BookingService};
