//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required ones are missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! Required:
//! - `ROOMKEEPER_DB_PATH`: Database file path
//! - `ROOMKEEPER_DB_POOL_SIZE`: Connection pool size
//!
//! Optional (defaults in parentheses):
//! - `ROOMKEEPER_LOG_LEVEL`: Log filter directive (`info`)
//! - `ROOMKEEPER_MAX_DURATION_HOURS`: Longest bookable duration (`8`)
//! - `ROOMKEEPER_SLOT_MINUTES`: Start time granularity (`30`)
//! - `ROOMKEEPER_ENFORCE_SLOT_ALIGNMENT`: Reject misaligned starts (`true`)
//! - `ROOMKEEPER_REJECT_LECTURE_OVERLAP`: Treat lectures as conflicts (`false`)
//! - `ROOMKEEPER_STATUS_CACHE_TTL`: Status cache TTL in seconds (`30`)
//! - `ROOMKEEPER_TIMEZONE`: IANA zone for wall-clock time (`Asia/Seoul`)
//! - `ROOMKEEPER_CLOCK_CACHE_WINDOW`: Time source cache window in seconds (`60`)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./roomkeeper.json` or `./roomkeeper.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono_tz::Tz;
use roomkeeper_domain::{
    BookingConfig, ClockConfig, Config, DatabaseConfig, Result, RoomKeeperError, StatusConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `RoomKeeperError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `ROOMKEEPER_DB_PATH` and `ROOMKEEPER_DB_POOL_SIZE` must be present; every
/// other variable falls back to its default.
///
/// # Errors
/// Returns `RoomKeeperError::Config` if required variables are missing
/// or any variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("ROOMKEEPER_DB_PATH")?;
    let db_pool_size = env_var("ROOMKEEPER_DB_POOL_SIZE").and_then(|s| {
        s.parse::<u32>().map_err(|e| RoomKeeperError::Config(format!("Invalid pool size: {}", e)))
    })?;

    let booking_defaults = BookingConfig::default();
    let booking = BookingConfig {
        max_duration_hours: env_parse(
            "ROOMKEEPER_MAX_DURATION_HOURS",
            booking_defaults.max_duration_hours,
        )?,
        slot_minutes: env_parse("ROOMKEEPER_SLOT_MINUTES", booking_defaults.slot_minutes)?,
        enforce_slot_alignment: env_bool(
            "ROOMKEEPER_ENFORCE_SLOT_ALIGNMENT",
            booking_defaults.enforce_slot_alignment,
        ),
        reject_lecture_overlap: env_bool(
            "ROOMKEEPER_REJECT_LECTURE_OVERLAP",
            booking_defaults.reject_lecture_overlap,
        ),
    };

    let status_defaults = StatusConfig::default();
    let status = StatusConfig {
        cache_ttl_seconds: env_parse(
            "ROOMKEEPER_STATUS_CACHE_TTL",
            status_defaults.cache_ttl_seconds,
        )?,
        timezone: std::env::var("ROOMKEEPER_TIMEZONE").unwrap_or(status_defaults.timezone),
    };
    parse_timezone(&status.timezone)?;

    let clock = ClockConfig {
        cache_window_seconds: env_parse(
            "ROOMKEEPER_CLOCK_CACHE_WINDOW",
            ClockConfig::default().cache_window_seconds,
        )?,
    };

    let defaults = Config::default();
    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size: db_pool_size },
        booking,
        status,
        clock,
        log_level: std::env::var("ROOMKEEPER_LOG_LEVEL").unwrap_or(defaults.log_level),
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `RoomKeeperError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing or the time zone is unknown
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(RoomKeeperError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            RoomKeeperError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| RoomKeeperError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    parse_timezone(&config.status.timezone)?;
    Ok(config)
}

/// Resolve an IANA zone name such as `Asia/Seoul`.
///
/// # Errors
/// Returns `RoomKeeperError::Config` for unknown zone names.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    Tz::from_str(name)
        .map_err(|_| RoomKeeperError::Config(format!("Unknown time zone: {}", name)))
}

/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| RoomKeeperError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| RoomKeeperError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(RoomKeeperError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./roomkeeper.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("roomkeeper.json"),
        dir.join("roomkeeper.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        RoomKeeperError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional environment variable, using `default` when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| RoomKeeperError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
