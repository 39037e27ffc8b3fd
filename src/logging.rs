//! Tracing subscriber setup.
//!
//! The terminal UI owns stdout, so log lines are appended to a file instead.

use std::fs::OpenOptions;
use std::sync::Mutex;

use crate::BullionError;
use crate::config::LogConfig;

/// Installs a global `fmt` subscriber writing to the configured log file.
///
/// # Errors
///
/// Returns [`BullionError::Io`] if the file cannot be opened and
/// [`BullionError::Config`] if a global subscriber is already installed.
pub fn init_tracing(config: &LogConfig) -> crate::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|e| {
            BullionError::Io(format!("failed to open {}: {e}", config.file.display()))
        })?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.level)
        .try_init()
        .map_err(|e| BullionError::Config(format!("failed to install tracing subscriber: {e}")))
}
