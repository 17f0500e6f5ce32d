use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Optional lower/upper bound. `None` on either side means the provider does
/// not publish that bound.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MinMax {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl MinMax {
    pub const UNKNOWN: Self = Self {
        min: None,
        max: None,
    };

    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub const fn min_only(min: Option<f64>) -> Self {
        Self { min, max: None }
    }

    pub const fn is_unknown(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Decimal places accepted for price and amount values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarketPrecision {
    pub price: Option<u32>,
    pub amount: Option<u32>,
}

/// Order bounds for a market.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketLimits {
    pub amount: MinMax,
    pub price: MinMax,
    pub cost: MinMax,
}

/// Canonical tradable market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Provider market identifier, the join key back into the provider.
    pub id: Option<String>,
    /// `base/quote`, present only when both codes are known.
    pub symbol: Option<String>,
    pub base: Option<String>,
    pub quote: Option<String>,
    pub base_id: Option<String>,
    pub quote_id: Option<String>,
    pub active: bool,
    pub precision: MarketPrecision,
    pub limits: MarketLimits,
    /// Untouched provider record.
    pub info: Value,
}

impl Market {
    pub fn compose_symbol(base: Option<&str>, quote: Option<&str>) -> Option<String> {
        match (base, quote) {
            (Some(base), Some(quote)) => Some(format!("{base}/{quote}")),
            _ => None,
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
