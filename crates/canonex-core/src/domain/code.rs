use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aliases from provider asset identifiers to canonical currency codes.
///
/// Lookup is case-insensitive: identifiers are upper-cased before the alias
/// table is consulted, and an identifier without an alias maps to its
/// upper-cased self.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommonCurrencies(BTreeMap<String, String>);

impl CommonCurrencies {
    /// Aliases shared by most exchanges for legacy or forked tickers.
    pub fn standard() -> Self {
        Self::default()
            .with_alias("XBT", "BTC")
            .with_alias("BCC", "BCH")
            .with_alias("BCHABC", "BCH")
            .with_alias("BCHSV", "BSV")
            .with_alias("DRK", "DASH")
    }

    pub fn with_alias(mut self, provider_id: impl AsRef<str>, code: impl AsRef<str>) -> Self {
        self.0.insert(
            provider_id.as_ref().trim().to_ascii_uppercase(),
            code.as_ref().trim().to_ascii_uppercase(),
        );
        self
    }

    /// Canonical code for a provider id.
    pub fn code_for(&self, provider_id: &str) -> String {
        let upper = provider_id.trim().to_ascii_uppercase();
        match self.0.get(&upper) {
            Some(code) => code.clone(),
            None => upper,
        }
    }

    /// Canonical code for an optional id; blank ids stay absent.
    pub fn safe_code(&self, provider_id: Option<&str>) -> Option<String> {
        provider_id
            .filter(|id| !id.trim().is_empty())
            .map(|id| self.code_for(id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
