//! Settable clock for deterministic time in tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use roomkeeper_core::Clock;

#[derive(Clone)]
pub struct TestClock {
    now: Arc<Mutex<DateTime<Utc>>>,
    tz: Tz,
}

impl TestClock {
    /// Clock reading `local` wall time in `tz`.
    pub fn at_local(tz: Tz, year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        let local = tz.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap();
        Self { now: Arc::new(Mutex::new(local.with_timezone(&Utc))), tz }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

#[async_trait]
impl Clock for TestClock {
    async fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    fn timezone(&self) -> Tz {
        self.tz
    }
}
