//! Simulated spot price source.
//!
//! [`PriceOracle`] fabricates quotes locally: every request waits a random
//! latency, fails with a configurable probability, and otherwise returns
//! prices jittered around the metal's base price. Failures are returned as
//! [`Quote::Failure`], never as errors.

use std::future::Future;
use std::ops::Range;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::Metal;
use crate::models::quote::{PriceQuote, Quote};

/// Default simulated latency bounds in milliseconds (upper bound exclusive).
pub const DEFAULT_LATENCY_MS: Range<u64> = 500..2000;

/// Default probability that a request fails.
pub const DEFAULT_FAILURE_RATE: f64 = 0.1;

/// Jitter is drawn as an integer number of steps at scale 7, so
/// `±200_000` steps is `±0.02`.
const JITTER_STEPS: i64 = 200_000;
const JITTER_SCALE: u32 = 7;

/// Something that answers price requests for a metal identifier.
///
/// Implementations must never fail: problems are encoded in the returned
/// [`Quote`].
pub trait PriceSource: Send + Sync + 'static {
    fn request_price(&self, metal_id: &str) -> impl Future<Output = Quote> + Send;
}

/// Tunables for the simulated oracle.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleSettings {
    /// Latency range in milliseconds, end exclusive.
    pub latency_ms: Range<u64>,
    /// Probability in `0.0..=1.0` that a valid request fails.
    pub failure_rate: f64,
    /// Seed for reproducible runs; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_LATENCY_MS,
            failure_rate: DEFAULT_FAILURE_RATE,
            seed: None,
        }
    }
}

/// Local price generator with simulated latency and failures.
pub struct PriceOracle {
    settings: OracleSettings,
    rng: Mutex<StdRng>,
}

impl PriceOracle {
    /// Creates an oracle from settings.
    #[must_use]
    pub fn new(settings: OracleSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            settings,
            rng: Mutex::new(rng),
        }
    }

    /// Creates an oracle with default latency and failure rate and a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(OracleSettings {
            seed: Some(seed),
            ..OracleSettings::default()
        })
    }

    pub fn settings(&self) -> &OracleSettings {
        &self.settings
    }

    /// Draws the simulated network latency for one request.
    pub fn sample_latency(&self) -> Duration {
        let Range { start, end } = self.settings.latency_ms;
        let millis = if start < end {
            self.with_rng(|rng| rng.random_range(start..end))
        } else {
            start
        };
        Duration::from_millis(millis)
    }

    /// Produces a quote for `metal` immediately, applying the failure roll.
    ///
    /// This is the part of a request that happens after the latency has
    /// elapsed; `timestamp` becomes the quote's generation time.
    pub fn generate(&self, metal: Metal, timestamp: DateTime<Utc>) -> Quote {
        let failure_rate = self.settings.failure_rate.clamp(0.0, 1.0);
        let base = metal.base_price();

        let prices = self.with_rng(|rng| {
            if rng.random_bool(failure_rate) {
                return None;
            }
            Some((
                jitter(rng, base),
                jitter(rng, base * Decimal::new(99, 2)),
                jitter(rng, base * Decimal::new(101, 2)),
            ))
        });

        match prices {
            Some((current, open, close)) => {
                Quote::Success(PriceQuote::new(metal, current, open, close, timestamp))
            }
            None => Quote::failure(
                metal.as_str(),
                format!("Failed to fetch {} price", metal.as_str()),
            ),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

impl PriceSource for PriceOracle {
    async fn request_price(&self, metal_id: &str) -> Quote {
        let metal = match metal_id.parse::<Metal>() {
            Ok(metal) => metal,
            Err(unknown) => {
                warn!(metal_id, "Rejected price request for unknown metal");
                return Quote::failure(metal_id, unknown.to_string());
            }
        };

        let latency = self.sample_latency();
        tokio::time::sleep(latency).await;

        let quote = self.generate(metal, Utc::now());
        debug!(
            metal = %metal,
            latency_ms = latency.as_millis() as u64,
            success = quote.is_success(),
            "Price request resolved"
        );
        quote
    }
}

/// Returns `base * (1 + u)` with `u` uniform in `[-0.02, 0.02)`.
fn jitter(rng: &mut StdRng, base: Decimal) -> Decimal {
    let u = Decimal::new(rng.random_range(-JITTER_STEPS..JITTER_STEPS), JITTER_SCALE);
    base * (Decimal::ONE + u)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn never_failing(seed: u64) -> PriceOracle {
        PriceOracle::new(OracleSettings {
            failure_rate: 0.0,
            seed: Some(seed),
            ..OracleSettings::default()
        })
    }

    #[test]
    fn jitter_stays_within_two_percent() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5_000 {
            let value = jitter(&mut rng, dec!(1000));
            assert!(value >= dec!(980) && value < dec!(1020), "{value}");
        }
    }

    #[test]
    fn generated_prices_respect_bands() {
        let oracle = never_failing(11);
        for metal in Metal::ALL {
            let base = metal.base_price();
            for _ in 0..500 {
                let quote = oracle.generate(metal, Utc::now());
                let price = quote.price().expect("failure rate is zero");
                assert!(price.current_price >= base * dec!(0.98));
                assert!(price.current_price <= base * dec!(1.02));
                assert!(price.previous_open >= base * dec!(0.99) * dec!(0.98));
                assert!(price.previous_open <= base * dec!(0.99) * dec!(1.02));
                assert!(price.previous_close >= base * dec!(1.01) * dec!(0.98));
                assert!(price.previous_close <= base * dec!(1.01) * dec!(1.02));
                assert!(price.previous_open.scale() <= 2);
                assert!(price.current_price > Decimal::ZERO);
            }
        }
    }

    #[test]
    fn certain_failure_names_the_metal() {
        let oracle = PriceOracle::new(OracleSettings {
            failure_rate: 1.0,
            seed: Some(3),
            ..OracleSettings::default()
        });
        let quote = oracle.generate(Metal::Platinum, Utc::now());
        assert_eq!(
            quote,
            Quote::Failure {
                metal: "Platinum".to_string(),
                error: "Failed to fetch platinum price".to_string(),
            }
        );
    }

    #[test]
    fn latency_is_drawn_from_configured_range() {
        let oracle = PriceOracle::seeded(5);
        for _ in 0..1_000 {
            let latency = oracle.sample_latency();
            assert!(latency >= Duration::from_millis(500));
            assert!(latency < Duration::from_millis(2000));
        }
    }

    #[test]
    fn degenerate_latency_range_uses_start() {
        let oracle = PriceOracle::new(OracleSettings {
            latency_ms: 0..0,
            ..OracleSettings::default()
        });
        assert_eq!(oracle.sample_latency(), Duration::ZERO);
    }

    #[test]
    fn same_seed_same_quotes() {
        let now = Utc::now();
        let a = PriceOracle::seeded(42);
        let b = PriceOracle::seeded(42);
        for metal in Metal::ALL {
            assert_eq!(a.generate(metal, now), b.generate(metal, now));
        }
    }
}
