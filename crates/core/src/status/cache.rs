//! Short-lived cache of per-room status reports
//!
//! Entries expire after a TTL measured on the injected [`Clock`]. Writers
//! invalidate the affected room so a fresh booking shows up immediately.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use roomkeeper_domain::{Result, RoomStatusReport};
use tracing::debug;

use crate::clock_ports::Clock;

#[derive(Debug, Clone)]
struct CachedStatus {
    report: RoomStatusReport,
    resolved_at: DateTime<Utc>,
}

pub struct RoomStatusCache {
    clock: Arc<dyn Clock>,
    ttl: chrono::Duration,
    entries: RwLock<HashMap<String, CachedStatus>>,
}

impl RoomStatusCache {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        Self { clock, ttl, entries: RwLock::new(HashMap::new()) }
    }

    /// Cached report for `room_id`, or the result of `resolve` when the entry
    /// is missing or older than the TTL. Errors from `resolve` are not cached.
    pub async fn get_or_resolve<F, Fut>(&self, room_id: &str, resolve: F) -> Result<RoomStatusReport>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RoomStatusReport>>,
    {
        let now = self.clock.now().await;
        if let Some(report) = self.fresh(room_id, now) {
            debug!(room_id, "Room status served from cache");
            return Ok(report);
        }

        let report = resolve().await?;
        self.entries
            .write()
            .insert(room_id.to_string(), CachedStatus { report: report.clone(), resolved_at: now });
        Ok(report)
    }

    pub fn invalidate(&self, room_id: &str) {
        if self.entries.write().remove(room_id).is_some() {
            debug!(room_id, "Room status cache entry invalidated");
        }
    }

    pub fn invalidate_all(&self) {
        self.entries.write().clear();
    }

    /// Number of entries, including expired ones not yet replaced.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn fresh(&self, room_id: &str, now: DateTime<Utc>) -> Option<RoomStatusReport> {
        let entries = self.entries.read();
        entries
            .get(room_id)
            .filter(|entry| now.signed_duration_since(entry.resolved_at) < self.ttl)
            .map(|entry| entry.report.clone())
    }
}
