//! Shared models for metal identifiers and price quotes.
//!
//! [`Metal`] is the closed set of tracked metals together with their fixed
//! base prices. Quote payloads live in [`quote`].

pub mod quote;

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four tracked precious metals, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metal {
    Gold,
    Silver,
    Platinum,
    Palladium,
}

impl Metal {
    /// Every tracked metal, in the order tiles are shown.
    pub const ALL: [Metal; 4] = [Metal::Gold, Metal::Silver, Metal::Platinum, Metal::Palladium];

    /// Returns the lower-case identifier used when requesting a price.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metal::Gold => "gold",
            Metal::Silver => "silver",
            Metal::Platinum => "platinum",
            Metal::Palladium => "palladium",
        }
    }

    /// Returns the capitalized name shown on tiles and the detail screen.
    pub fn display_name(&self) -> &'static str {
        match self {
            Metal::Gold => "Gold",
            Metal::Silver => "Silver",
            Metal::Platinum => "Platinum",
            Metal::Palladium => "Palladium",
        }
    }

    /// Base spot price in USD per troy ounce that quotes jitter around.
    pub fn base_price(&self) -> Decimal {
        match self {
            Metal::Gold => Decimal::new(2000, 0),
            Metal::Silver => Decimal::new(25, 0),
            Metal::Platinum => Decimal::new(1000, 0),
            Metal::Palladium => Decimal::new(1200, 0),
        }
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An identifier outside the four tracked metals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown metal: {0}")]
pub struct UnknownMetal(pub String);

impl FromStr for Metal {
    type Err = UnknownMetal;

    /// Parses an identifier case-insensitively. Surrounding whitespace is not
    /// trimmed, so `" gold"` is unknown.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metal::ALL
            .into_iter()
            .find(|metal| metal.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMetal(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("gold".parse::<Metal>(), Ok(Metal::Gold));
        assert_eq!("SILVER".parse::<Metal>(), Ok(Metal::Silver));
        assert_eq!("PlAtInUm".parse::<Metal>(), Ok(Metal::Platinum));
        assert_eq!("palladium".parse::<Metal>(), Ok(Metal::Palladium));
    }

    #[test]
    fn unknown_identifier_keeps_original_text() {
        let err = "Copper".parse::<Metal>().unwrap_err();
        assert_eq!(err, UnknownMetal("Copper".to_string()));
        assert_eq!(err.to_string(), "Unknown metal: Copper");
    }

    #[test]
    fn base_prices() {
        assert_eq!(Metal::Gold.base_price(), Decimal::new(2000, 0));
        assert_eq!(Metal::Silver.base_price(), Decimal::new(25, 0));
        assert_eq!(Metal::Platinum.base_price(), Decimal::new(1000, 0));
        assert_eq!(Metal::Palladium.base_price(), Decimal::new(1200, 0));
    }

    #[test]
    fn display_order_is_declaration_order() {
        let mut shuffled = vec![Metal::Palladium, Metal::Gold, Metal::Platinum, Metal::Silver];
        shuffled.sort();
        assert_eq!(shuffled, Metal::ALL.to_vec());
    }
}
