//! Clock implementations
//!
//! [`SystemClock`] reads the host clock, [`FixedClock`] is set by hand, and
//! [`CachedClock`] fronts a remote [`TimeSource`], re-fetching at most once per
//! cache window and degrading to local time when the source is unreachable.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use parking_lot::Mutex;
use roomkeeper_core::{Clock, TimeSource};
use roomkeeper_domain::{ClockConfig, Result, StatusConfig};
use tracing::{debug, warn};

use crate::config::parse_timezone;

/// Host clock in a configured zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn from_config(config: &StatusConfig) -> Result<Self> {
        Ok(Self::new(parse_timezone(&config.timezone)?))
    }
}

#[async_trait]
impl Clock for SystemClock {
    async fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn timezone(&self) -> Tz {
        self.tz
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    instant: Mutex<DateTime<Utc>>,
    tz: Tz,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>, tz: Tz) -> Self {
        Self { instant: Mutex::new(instant), tz }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.instant.lock() = instant;
    }

    pub fn advance(&self, by: Duration) {
        *self.instant.lock() += by;
    }
}

#[async_trait]
impl Clock for FixedClock {
    async fn now(&self) -> DateTime<Utc> {
        *self.instant.lock()
    }

    fn timezone(&self) -> Tz {
        self.tz
    }
}

#[derive(Debug, Clone, Copy)]
struct SyncPoint {
    /// Instant reported for the last sync, already corrected for latency.
    time: DateTime<Utc>,
    /// Local reading taken at the same moment.
    local: DateTime<Utc>,
    /// `time - local` from the last successful fetch.
    offset: Duration,
}

/// Clock backed by a fallible [`TimeSource`].
///
/// Within `window` of the last sync the previous reading is extrapolated by
/// local elapsed time. A failed fetch falls back to local time plus the last
/// known offset (zero before the first success); the fallback is cached for
/// the window as well.
pub struct CachedClock {
    source: Arc<dyn TimeSource>,
    local: Arc<dyn Clock>,
    window: Duration,
    state: Mutex<Option<SyncPoint>>,
}

impl CachedClock {
    /// `local` supplies elapsed time and the display zone.
    pub fn new(source: Arc<dyn TimeSource>, local: Arc<dyn Clock>, window: std::time::Duration) -> Self {
        Self {
            source,
            local,
            window: Duration::from_std(window).unwrap_or(Duration::MAX),
            state: Mutex::new(None),
        }
    }

    pub fn from_config(
        source: Arc<dyn TimeSource>,
        local: Arc<dyn Clock>,
        config: &ClockConfig,
    ) -> Self {
        Self::new(source, local, std::time::Duration::from_secs(config.cache_window_seconds))
    }

    async fn sync(&self, requested_at: DateTime<Utc>, previous: Option<SyncPoint>) -> DateTime<Utc> {
        match self.source.fetch_time().await {
            Ok(reported) => {
                let received_at = self.local.now().await;
                let corrected = reported + (received_at - requested_at) / 2;
                let offset = corrected - received_at;
                debug!(offset_ms = offset.num_milliseconds(), "time source synchronised");
                *self.state.lock() = Some(SyncPoint { time: corrected, local: received_at, offset });
                corrected
            }
            Err(err) => {
                let offset = previous.map(|s| s.offset).unwrap_or_else(Duration::zero);
                let fallback = requested_at + offset;
                warn!(
                    error = %err,
                    offset_ms = offset.num_milliseconds(),
                    "time source unavailable, using local time"
                );
                *self.state.lock() = Some(SyncPoint { time: fallback, local: requested_at, offset });
                fallback
            }
        }
    }
}

#[async_trait]
impl Clock for CachedClock {
    async fn now(&self) -> DateTime<Utc> {
        let local_now = self.local.now().await;
        let previous = *self.state.lock();

        if let Some(state) = previous {
            let elapsed = local_now - state.local;
            if elapsed >= Duration::zero() && elapsed < self.window {
                return state.time + elapsed;
            }
        }

        self.sync(local_now, previous).await
    }

    fn timezone(&self) -> Tz {
        self.local.timezone()
    }
}
