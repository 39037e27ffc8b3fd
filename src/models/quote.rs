//! Price quote payloads and their display formatting.
//!
//! A [`Quote`] is either a fully populated [`PriceQuote`] or a failure
//! carrying the metal name and a human-readable message. Quotes serialize
//! to JSON tagged by `outcome`:
//!
//! ```json
//! {"outcome":"success","metal":"Gold","currentPrice":"2011.52", ...}
//! {"outcome":"failure","metal":"Gold","error":"Failed to fetch gold price"}
//! ```

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::Metal;

/// Grams in one troy ounce (31.1035).
pub const GRAMS_PER_TROY_OUNCE: Decimal = Decimal::from_parts(311_035, 0, 0, false, 4);

/// Full timestamp layout used on the detail screen. Always rendered in UTC.
pub const TIMESTAMP_FORMAT: &str = "%A, %B %d, %Y %I:%M:%S %p UTC";

/// Long date layout, e.g. `Monday, October 19, 2026`.
pub const LONG_DATE_FORMAT: &str = "%A, %B %d, %Y";

/// Twelve-hour clock layout with seconds, e.g. `03:04:05 PM`.
pub const CLOCK_FORMAT: &str = "%I:%M:%S %p";

/// A successful price quote for one metal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Capitalized metal name.
    pub metal: String,
    /// Price per troy ounce.
    pub current_price: Decimal,
    /// Price per gram of pure (24 karat) metal.
    #[serde(rename = "price24K")]
    pub price_24k: Decimal,
    pub previous_open: Decimal,
    pub previous_close: Decimal,
    /// When the quote was generated.
    pub timestamp: DateTime<Utc>,
}

impl PriceQuote {
    /// Builds a quote from raw prices, rounding each to cents and deriving
    /// the per-gram price from the rounded ounce price.
    pub fn new(
        metal: Metal,
        current_price: Decimal,
        previous_open: Decimal,
        previous_close: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let current_price = round_cents(current_price);
        Self {
            metal: metal.display_name().to_string(),
            current_price,
            price_24k: per_gram(current_price),
            previous_open: round_cents(previous_open),
            previous_close: round_cents(previous_close),
            timestamp,
        }
    }
}

/// Outcome of a single price request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Quote {
    Success(PriceQuote),
    Failure { metal: String, error: String },
}

impl Quote {
    /// Builds a failure for `metal_id`, capitalizing it for display.
    pub fn failure(metal_id: &str, error: impl Into<String>) -> Self {
        Quote::Failure {
            metal: capitalize(metal_id),
            error: error.into(),
        }
    }

    /// Capitalized metal name, present for both outcomes.
    pub fn metal(&self) -> &str {
        match self {
            Quote::Success(quote) => &quote.metal,
            Quote::Failure { metal, .. } => metal,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Quote::Success(_))
    }

    /// Returns the price data of a successful quote.
    pub fn price(&self) -> Option<&PriceQuote> {
        match self {
            Quote::Success(quote) => Some(quote),
            Quote::Failure { .. } => None,
        }
    }

    /// Returns the message of a failed quote.
    pub fn error(&self) -> Option<&str> {
        match self {
            Quote::Success(_) => None,
            Quote::Failure { error, .. } => Some(error),
        }
    }

    /// Encodes the quote as a single JSON line (no trailing newline).
    pub fn to_json_line(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Rounds to two decimal places, halves away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a per-ounce price to a per-gram price rounded to cents.
pub fn per_gram(price_per_ounce: Decimal) -> Decimal {
    round_cents(price_per_ounce / GRAMS_PER_TROY_OUNCE)
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Formats a dollar amount with exactly two decimals, e.g. `$25.40`.
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", round_cents(amount))
}

/// Formats a quote timestamp for display. Seconds are kept, sub-second
/// precision is dropped.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a string produced by [`format_timestamp`].
pub fn parse_timestamp(text: &str) -> crate::Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)?;
    Ok(naive.and_utc())
}

/// Formats the date part in long form.
pub fn format_long_date<Tz: TimeZone>(moment: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    moment.format(LONG_DATE_FORMAT).to_string()
}

/// Formats the time of day on a twelve-hour clock.
pub fn format_clock<Tz: TimeZone>(moment: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    moment.format(CLOCK_FORMAT).to_string()
}
