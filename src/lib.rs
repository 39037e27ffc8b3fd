//! Simulated precious metal spot prices.
//!
//! [`oracle`] fabricates quotes with random latency and failures,
//! [`orchestrator`] keeps one independently refreshed tile per metal, and
//! [`tui`] renders the tiles and a detail view in the terminal.

pub mod config;
pub mod error;
pub mod headless;
pub mod logging;
pub mod models;
pub mod oracle;
pub mod orchestrator;
pub mod tui;

pub use error::{BullionError, Result};
