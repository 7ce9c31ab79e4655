//! Logging setup
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`]. `RUST_LOG`
//! wins when set; otherwise the configured `log_level` applies.

use roomkeeper_domain::{Result, RoomKeeperError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// `json` switches the fmt layer to one JSON object per event. Fails with
/// `Config` for an unparsable level or when a subscriber is already set.
pub fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_from_level(log_level)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .try_init()
        .map_err(|e| RoomKeeperError::Config(format!("failed to install tracing subscriber: {e}")))
}

fn filter_from_level(log_level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(log_level)
        .map_err(|e| RoomKeeperError::Config(format!("invalid log level '{log_level}': {e}")))
}
