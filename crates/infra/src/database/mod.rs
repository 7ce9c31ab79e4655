//! Database implementations

pub mod lecture_repository;
pub mod manager;
pub mod memory;
pub mod reservation_repository;

pub use lecture_repository::*;
pub use manager::{DbManager, SqliteConnection, SqlitePool};
pub use memory::*;
pub use reservation_repository::*;
