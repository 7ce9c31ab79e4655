//! Port interfaces for time
//!
//! Status resolution and booking timestamps read the current instant through
//! [`Clock`] so tests can pin it and deployments can back it with a remote
//! time source. Wall-clock values (today's date, `HH:MM`) are taken in the
//! clock's configured time zone.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use roomkeeper_domain::Result;

/// Source of the current instant.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current instant. Implementations never fail; degraded sources fall back
    /// to local time.
    async fn now(&self) -> DateTime<Utc>;

    /// Zone used to derive the wall-clock date and time.
    fn timezone(&self) -> Tz;

    /// Current instant in [`Clock::timezone`].
    async fn local_now(&self) -> DateTime<Tz> {
        let tz = self.timezone();
        self.now().await.with_timezone(&tz)
    }
}

/// Authoritative, possibly unreachable, origin of the current time.
#[async_trait]
pub trait TimeSource: Send + Sync {
    /// Fetch the current instant. Fails with `ClockUnavailable`.
    async fn fetch_time(&self) -> Result<DateTime<Utc>>;
}
