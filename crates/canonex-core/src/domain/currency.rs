use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{MinMax, ValidationError};

/// Bounds published for a currency. Only `withdraw` is ever populated by
/// exchanges that report asset metadata; the others exist so every currency
/// has the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrencyLimits {
    pub amount: MinMax,
    pub price: MinMax,
    pub cost: MinMax,
    pub withdraw: MinMax,
}

/// Canonical currency (asset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    /// Provider asset identifier.
    pub id: Option<String>,
    /// Canonical code derived from `id`.
    pub code: Option<String>,
    pub name: Option<String>,
    /// True only when both deposits and withdrawals are operational.
    pub active: bool,
    /// Withdrawal fee. `None` when the provider omits it or it cannot be parsed.
    pub fee: Option<f64>,
    pub precision: Option<u32>,
    pub limits: CurrencyLimits,
    /// Untouched provider record.
    pub info: Value,
}

/// What to do when two provider ids normalize to the same canonical code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeCollisionPolicy {
    /// Fail the whole conversion.
    #[default]
    Reject,
    /// Keep the record seen first, report the later one as displaced.
    KeepFirst,
    /// Keep the record seen last, report the earlier one as displaced.
    KeepLast,
}

impl CodeCollisionPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::KeepFirst => "keep-first",
            Self::KeepLast => "keep-last",
        }
    }
}

impl Display for CodeCollisionPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeCollisionPolicy {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "reject" => Ok(Self::Reject),
            "keep-first" => Ok(Self::KeepFirst),
            "keep-last" => Ok(Self::KeepLast),
            other => Err(ValidationError::InvalidCollisionPolicy {
                value: other.to_owned(),
            }),
        }
    }
}

/// Two provider ids mapped onto one canonical code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCollision {
    pub code: String,
    pub existing_id: Option<String>,
    pub incoming_id: Option<String>,
}

impl Display for CodeCollision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "currency code '{}' is produced by both '{}' and '{}'",
            self.code,
            self.existing_id.as_deref().unwrap_or("<unknown>"),
            self.incoming_id.as_deref().unwrap_or("<unknown>"),
        )
    }
}

/// Currencies keyed by canonical code.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyMap(BTreeMap<String, Currency>);

impl CurrencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `currency` under `code`, resolving a clash with `policy`.
    ///
    /// Returns the record that lost the clash, if any. Under
    /// [`CodeCollisionPolicy::Reject`] a clash leaves the map untouched and
    /// is returned as an error.
    pub fn insert(
        &mut self,
        code: String,
        currency: Currency,
        policy: CodeCollisionPolicy,
    ) -> Result<Option<Currency>, CodeCollision> {
        let Some(existing) = self.0.get(&code) else {
            self.0.insert(code, currency);
            return Ok(None);
        };

        match policy {
            CodeCollisionPolicy::Reject => Err(CodeCollision {
                code,
                existing_id: existing.id.clone(),
                incoming_id: currency.id,
            }),
            CodeCollisionPolicy::KeepFirst => Ok(Some(currency)),
            CodeCollisionPolicy::KeepLast => Ok(self.0.insert(code, currency)),
        }
    }

    pub fn get(&self, code: &str) -> Option<&Currency> {
        self.0.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Currency)> {
        self.0.iter().map(|(code, currency)| (code.as_str(), currency))
    }

    pub fn into_inner(self) -> BTreeMap<String, Currency> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn currency(id: &str) -> Currency {
        Currency {
            id: Some(id.to_owned()),
            code: Some(String::from("BTC")),
            name: None,
            active: true,
            fee: None,
            precision: None,
            limits: CurrencyLimits::default(),
            info: json!({ "symbol": id }),
        }
    }

    #[test]
    fn reject_policy_keeps_map_unchanged() {
        let mut map = CurrencyMap::new();
        map.insert("BTC".into(), currency("BTC"), CodeCollisionPolicy::Reject)
            .expect("first insert");

        let collision = map
            .insert("BTC".into(), currency("XBT"), CodeCollisionPolicy::Reject)
            .expect_err("duplicate must be rejected");

        assert_eq!(collision.existing_id.as_deref(), Some("BTC"));
        assert_eq!(collision.incoming_id.as_deref(), Some("XBT"));
        assert_eq!(map.get("BTC").and_then(|c| c.id.as_deref()), Some("BTC"));
    }

    #[test]
    fn keep_first_reports_incoming_as_displaced() {
        let mut map = CurrencyMap::new();
        map.insert("BTC".into(), currency("BTC"), CodeCollisionPolicy::KeepFirst)
            .expect("first insert");
        let displaced = map
            .insert("BTC".into(), currency("XBT"), CodeCollisionPolicy::KeepFirst)
            .expect("keep-first never fails");

        assert_eq!(displaced.and_then(|c| c.id), Some(String::from("XBT")));
        assert_eq!(map.get("BTC").and_then(|c| c.id.as_deref()), Some("BTC"));
    }

    #[test]
    fn keep_last_reports_existing_as_displaced() {
        let mut map = CurrencyMap::new();
        map.insert("BTC".into(), currency("BTC"), CodeCollisionPolicy::KeepLast)
            .expect("first insert");
        let displaced = map
            .insert("BTC".into(), currency("XBT"), CodeCollisionPolicy::KeepLast)
            .expect("keep-last never fails");

        assert_eq!(displaced.and_then(|c| c.id), Some(String::from("BTC")));
        assert_eq!(map.get("BTC").and_then(|c| c.id.as_deref()), Some("XBT"));
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("keep_last".parse(), Ok(CodeCollisionPolicy::KeepLast));
        assert_eq!("Reject".parse(), Ok(CodeCollisionPolicy::Reject));
        assert!("newest".parse::<CodeCollisionPolicy>().is_err());
    }
}
