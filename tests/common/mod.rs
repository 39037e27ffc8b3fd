//! Shared test utilities: a scripted price source and quote builders.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use bullion::models::Metal;
use bullion::models::quote::{PriceQuote, Quote};
use bullion::oracle::PriceSource;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// One scripted answer: wait `delay`, then return `quote`.
#[derive(Clone, Debug)]
pub struct Step {
    pub delay: Duration,
    pub quote: Quote,
}

impl Step {
    pub fn new(delay_ms: u64, quote: Quote) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            quote,
        }
    }
}

/// Price source that replays per-metal scripts on the tokio clock.
///
/// Each request pops the next step for its metal; once a script runs dry the
/// fallback step is used, and without one the request fails.
#[derive(Default)]
pub struct ScriptedSource {
    scripts: Mutex<HashMap<String, VecDeque<Step>>>,
    fallback: Option<Step>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(step: Step) -> Self {
        Self {
            fallback: Some(step),
            ..Self::default()
        }
    }

    pub fn script(self, metal: Metal, steps: impl IntoIterator<Item = Step>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(metal.as_str().to_string())
            .or_default()
            .extend(steps);
        self
    }

    /// Identifiers requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn next_step(&self, metal_id: &str) -> Step {
        self.calls.lock().unwrap().push(metal_id.to_string());
        self.scripts
            .lock()
            .unwrap()
            .get_mut(metal_id)
            .and_then(VecDeque::pop_front)
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| Step::new(0, Quote::failure(metal_id, "no script")))
    }
}

impl PriceSource for ScriptedSource {
    async fn request_price(&self, metal_id: &str) -> Quote {
        let step = self.next_step(metal_id);
        tokio::time::sleep(step.delay).await;
        step.quote
    }
}

/// Fixed timestamp used by scripted quotes.
pub fn fixed_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-10-19T15:04:05Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// A successful quote with the given ounce price.
pub fn price_quote(metal: Metal, current: Decimal) -> PriceQuote {
    PriceQuote::new(metal, current, current, current, fixed_time())
}

pub fn success(metal: Metal, current: Decimal) -> Quote {
    Quote::Success(price_quote(metal, current))
}

/// The simulated fetch failure for `metal`.
pub fn failure(metal: Metal) -> Quote {
    Quote::failure(
        metal.as_str(),
        format!("Failed to fetch {} price", metal.as_str()),
    )
}
