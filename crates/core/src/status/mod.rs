//! Room occupancy status

pub mod cache;
pub mod resolver;
pub mod service;

pub use cache::RoomStatusCache;
pub use resolver::{resolve_status, resolve_status_at};
pub use service::RoomStatusService;
