//! # RoomKeeper Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Reservation and lecture stores (SQLite via r2d2, in-memory)
//! - Configuration loading from environment and files
//! - Clock implementations, including a cached remote time source
//! - Sample data and logging setup
//!
//! ## Architecture
//! - Implements traits defined in `roomkeeper-core`
//! - Depends on `roomkeeper-domain` and `roomkeeper-core`
//! - Contains all "impure" code (I/O, wall clock, environment)

pub mod clock;
pub mod config;
pub mod database;
pub mod errors;
pub mod observability;
pub mod seed;

// Re-export commonly used items
pub use clock::{CachedClock, FixedClock, SystemClock};
pub use database::*;
pub use errors::InfraError;
pub use observability::init_tracing;
