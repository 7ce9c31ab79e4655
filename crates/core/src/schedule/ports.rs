//! Port interfaces for lecture reference data

use async_trait::async_trait;
use roomkeeper_domain::{LectureSchedule, Result};

/// Read-only source of recurring lecture schedules.
#[async_trait]
pub trait LectureCatalog: Send + Sync {
    /// Every known lecture.
    async fn get_all(&self) -> Result<Vec<LectureSchedule>>;

    /// Lectures held in `room_id`.
    async fn get_by_room(&self, room_id: &str) -> Result<Vec<LectureSchedule>>;
}
