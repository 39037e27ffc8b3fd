//! Application configuration loaded from environment variables.
//!
//! Every variable is optional; empty values count as unset.
//! - `BULLION_REFRESH_INTERVAL_MS` — auto-refresh period (default 30000)
//! - `BULLION_REFRESH_INDICATOR_MS` — minimum time the pull-to-refresh
//!   indicator stays visible (default 1000)
//! - `BULLION_FAILURE_RATE` — simulated failure probability (default 0.1)
//! - `BULLION_LATENCY_MIN_MS` / `BULLION_LATENCY_MAX_MS` — simulated latency
//!   bounds, max exclusive (default 500 / 2000)
//! - `BULLION_SEED` — fixed RNG seed for reproducible prices
//! - `BULLION_LOG_FILE` — log destination (default `bullion.log`)
//! - `BULLION_LOG_LEVEL` — `trace`, `debug`, `info`, `warn` or `error`

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::Level;

use crate::BullionError;
use crate::oracle::{DEFAULT_FAILURE_RATE, DEFAULT_LATENCY_MS, OracleSettings};

/// Default auto-refresh period.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 30_000;

/// Default minimum visible time of the refresh indicator.
pub const DEFAULT_REFRESH_INDICATOR_MS: u64 = 1_000;

/// Default log file.
const DEFAULT_LOG_FILE: &str = "bullion.log";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub refresh: RefreshConfig,
    pub oracle: OracleSettings,
    pub log: LogConfig,
}

/// Timing of the refresh triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshConfig {
    pub interval: Duration,
    pub indicator_floor: Duration,
}

/// Where and how verbosely to log.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub file: PathBuf,
    pub level: Level,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`BullionError::Config`] if a variable cannot be parsed, the
/// refresh interval is zero, the failure rate lies outside `0.0..=1.0`, or
/// the latency minimum is not below the maximum.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let interval_ms =
        parse_var("BULLION_REFRESH_INTERVAL_MS")?.unwrap_or(DEFAULT_REFRESH_INTERVAL_MS);
    if interval_ms == 0 {
        return Err(BullionError::Config(
            "BULLION_REFRESH_INTERVAL_MS must be greater than zero".to_string(),
        ));
    }
    let indicator_ms =
        parse_var("BULLION_REFRESH_INDICATOR_MS")?.unwrap_or(DEFAULT_REFRESH_INDICATOR_MS);

    let failure_rate: f64 = parse_var("BULLION_FAILURE_RATE")?.unwrap_or(DEFAULT_FAILURE_RATE);
    if !(0.0..=1.0).contains(&failure_rate) {
        return Err(BullionError::Config(format!(
            "BULLION_FAILURE_RATE must be between 0 and 1, got {failure_rate}"
        )));
    }

    let latency_min = parse_var("BULLION_LATENCY_MIN_MS")?.unwrap_or(DEFAULT_LATENCY_MS.start);
    let latency_max = parse_var("BULLION_LATENCY_MAX_MS")?.unwrap_or(DEFAULT_LATENCY_MS.end);
    if latency_min >= latency_max {
        return Err(BullionError::Config(format!(
            "BULLION_LATENCY_MIN_MS ({latency_min}) must be below BULLION_LATENCY_MAX_MS ({latency_max})"
        )));
    }

    let seed = parse_var("BULLION_SEED")?;

    let file = non_empty_var("BULLION_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let level = parse_var("BULLION_LOG_LEVEL")?.unwrap_or(Level::INFO);

    Ok(AppConfig {
        refresh: RefreshConfig {
            interval: Duration::from_millis(interval_ms),
            indicator_floor: Duration::from_millis(indicator_ms),
        },
        oracle: OracleSettings {
            latency_ms: latency_min..latency_max,
            failure_rate,
            seed,
        },
        log: LogConfig { file, level },
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Parses a non-empty environment variable, naming it in the error.
fn parse_var<T>(name: &str) -> crate::Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    non_empty_var(name)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| BullionError::Config(format!("invalid {name} {raw:?}: {e}")))
        })
        .transpose()
}
