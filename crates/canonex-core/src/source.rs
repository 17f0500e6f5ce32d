use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical exchange identifiers used in descriptors and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeId {
    Bitvavo,
}

impl ExchangeId {
    pub const ALL: [Self; 1] = [Self::Bitvavo];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bitvavo => "bitvavo",
        }
    }
}

impl Display for ExchangeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExchangeId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bitvavo" => Ok(Self::Bitvavo),
            other => Err(ValidationError::InvalidExchange {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" Bitvavo ".parse::<ExchangeId>(), Ok(ExchangeId::Bitvavo));
    }

    #[test]
    fn rejects_unknown_exchange() {
        let err = "kraken".parse::<ExchangeId>().expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidExchange { .. }));
    }
}
