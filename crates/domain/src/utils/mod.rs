//! Domain utilities

pub mod time;

pub use time::parse_weekday;
