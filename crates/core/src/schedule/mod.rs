//! Lecture expansion and per-day schedule views

pub mod day;
pub mod expander;
pub mod ports;

pub use day::{day_schedule, generate_time_slots, is_slot_available, item_status};
pub use expander::{expand, expand_indexed};
pub use ports::LectureCatalog;
