//! # Market Primitives
//!
//! Validated newtypes for trading-domain values shared across the stack.
//!
//! ## Validation
//!
//! [`AssetSymbol`] validates format at construction time and normalizes to
//! uppercase, so `"btc/usdt"` and `"BTC/USDT"` compare equal everywhere
//! downstream. [`TradeSide`] is a closed enum — no free-form "buy"/"sell"
//! strings survive past the API boundary.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum accepted symbol length.
const MAX_SYMBOL_LEN: usize = 32;

/// A validated trading or asset symbol (e.g. `BTC`, `ETH/USDT`).
///
/// Uppercase-normalized on construction. Serializes as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetSymbol(String);

impl AssetSymbol {
    /// Create a validated symbol, normalizing to uppercase.
    ///
    /// Accepts 1–32 characters of `A-Z`, `0-9`, `/`, and `-` after
    /// trimming and uppercasing. Anything else is rejected.
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = s.into();
        let normalized = raw.trim().to_ascii_uppercase();
        let valid_chars = normalized
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'/' || b == b'-');
        if normalized.is_empty() || normalized.len() > MAX_SYMBOL_LEN || !valid_chars {
            return Err(ValidationError::InvalidSymbol(raw));
        }
        Ok(Self(normalized))
    }

    /// Return the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The base asset of a pair symbol: `BTC/USDT` → `BTC`.
    /// Symbols without a separator return themselves.
    pub fn base(&self) -> &str {
        self.0.split('/').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for AssetSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for AssetSymbol {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSide {
    /// Acquire the base asset.
    Buy,
    /// Dispose of the base asset.
    Sell,
}

impl TradeSide {
    /// Return the string representation of this side.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate that an amount or price is positive and finite.
///
/// Shared precondition for trade quantities, prices, and stake amounts.
pub fn validate_amount(value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidAmount(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_normalizes_to_uppercase() {
        let s = AssetSymbol::new("btc/usdt").unwrap();
        assert_eq!(s.as_str(), "BTC/USDT");
        assert_eq!(s, "BTC/USDT");
    }

    #[test]
    fn symbol_trims_whitespace() {
        let s = AssetSymbol::new("  ETH  ").unwrap();
        assert_eq!(s.as_str(), "ETH");
    }

    #[test]
    fn symbol_rejects_empty() {
        assert!(AssetSymbol::new("").is_err());
        assert!(AssetSymbol::new("   ").is_err());
    }

    #[test]
    fn symbol_rejects_disallowed_characters() {
        assert!(AssetSymbol::new("BTC USDT").is_err());
        assert!(AssetSymbol::new("btc_usdt").is_err());
    }

    #[test]
    fn symbol_rejects_overlong() {
        assert!(AssetSymbol::new("A".repeat(33)).is_err());
        assert!(AssetSymbol::new("A".repeat(32)).is_ok());
    }

    #[test]
    fn base_splits_pair() {
        assert_eq!(AssetSymbol::new("SOL/USDT").unwrap().base(), "SOL");
        assert_eq!(AssetSymbol::new("SOL").unwrap().base(), "SOL");
    }

    #[test]
    fn symbol_serde_is_transparent() {
        let s = AssetSymbol::new("ADA/USDT").unwrap();
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"ADA/USDT\"");
    }

    #[test]
    fn trade_side_serde_snake_case() {
        assert_eq!(serde_json::to_string(&TradeSide::Buy).unwrap(), "\"buy\"");
        let side: TradeSide = serde_json::from_str("\"sell\"").unwrap();
        assert_eq!(side, TradeSide::Sell);
    }

    #[test]
    fn validate_amount_accepts_positive() {
        assert_eq!(validate_amount(0.5).unwrap(), 0.5);
    }

    #[test]
    fn validate_amount_rejects_zero_negative_nan() {
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-1.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }
}
