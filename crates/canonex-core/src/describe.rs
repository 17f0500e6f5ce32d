//! Static exchange metadata.
//!
//! One [`ExchangeDescriptor`] is assembled per adapter at construction time.
//! It carries everything that is configuration rather than behavior: base
//! URLs, the declared endpoint table, the fee schedule, capability flags and
//! the currency alias table.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http_client::HttpMethod;
use crate::request::ApiScope;
use crate::{CommonCurrencies, ExchangeId};

/// Base URLs per API scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUrls {
    pub public: String,
    pub private: String,
}

impl ApiUrls {
    /// Same host for both scopes; trailing slashes are dropped.
    pub fn uniform(base: impl AsRef<str>) -> Self {
        let base = base.as_ref().trim_end_matches('/').to_owned();
        Self {
            public: base.clone(),
            private: base,
        }
    }

    pub fn for_scope(&self, scope: ApiScope) -> &str {
        match scope {
            ApiScope::Public => &self.public,
            ApiScope::Private => &self.private,
        }
    }
}

/// Public-facing links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeUrls {
    pub api: ApiUrls,
    pub www: String,
    pub doc: String,
    pub fees: String,
    pub logo: String,
}

/// Which credential parts private calls need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredCredentials {
    pub api_key: bool,
    pub secret: bool,
}

impl RequiredCredentials {
    pub const KEY_AND_SECRET: Self = Self {
        api_key: true,
        secret: true,
    };
}

/// Unified operations an adapter implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub cors: bool,
    pub public_api: bool,
    pub private_api: bool,
    pub fetch_currencies: bool,
    pub fetch_markets: bool,
    pub fetch_time: bool,
}

/// One declared REST endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSpec {
    pub scope: ApiScope,
    pub method: HttpMethod,
    pub path: String,
}

impl EndpointSpec {
    pub fn new(scope: ApiScope, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            scope,
            method,
            path: path.into(),
        }
    }
}

/// Fee rate applicable from a given 30-day volume upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeTier {
    pub volume: f64,
    pub rate: f64,
}

/// Maker or taker side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Liquidity {
    Maker,
    Taker,
}

/// Trading fee schedule. Rates are fractions (`0.0025` = 0.25%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingFees {
    pub tier_based: bool,
    pub percentage: bool,
    pub maker: f64,
    pub taker: f64,
    pub maker_tiers: Vec<FeeTier>,
    pub taker_tiers: Vec<FeeTier>,
}

impl TradingFees {
    /// Rate for the highest tier whose volume threshold `volume` reaches.
    /// Falls back to the flat rate when there are no tiers or `volume` is
    /// below the first threshold.
    pub fn rate_for(&self, liquidity: Liquidity, volume: f64) -> f64 {
        let (tiers, flat) = match liquidity {
            Liquidity::Maker => (&self.maker_tiers, self.maker),
            Liquidity::Taker => (&self.taker_tiers, self.taker),
        };

        tiers
            .iter()
            .take_while(|tier| volume >= tier.volume)
            .last()
            .map_or(flat, |tier| tier.rate)
    }
}

/// Complete static description of one exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeDescriptor {
    pub id: ExchangeId,
    pub name: String,
    pub countries: Vec<String>,
    /// Minimum spacing between requests.
    pub rate_limit_ms: u64,
    pub version: String,
    pub certified: bool,
    pub has: Capabilities,
    pub urls: ExchangeUrls,
    pub endpoints: Vec<EndpointSpec>,
    pub fees: TradingFees,
    pub required_credentials: RequiredCredentials,
    pub common_currencies: CommonCurrencies,
}

impl ExchangeDescriptor {
    pub fn endpoint(&self, scope: ApiScope, method: HttpMethod, path: &str) -> Option<&EndpointSpec> {
        let path = path.trim_start_matches('/');
        self.endpoints
            .iter()
            .find(|spec| spec.scope == scope && spec.method == method && spec.path == path)
    }

    pub fn endpoints_for(&self, scope: ApiScope) -> impl Iterator<Item = &EndpointSpec> {
        self.endpoints.iter().filter(move |spec| spec.scope == scope)
    }

    pub fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }

    /// Replaces both API base URLs, e.g. to point at a local mock.
    pub fn with_api_base(mut self, base: impl AsRef<str>) -> Self {
        self.urls.api = ApiUrls::uniform(base);
        self
    }
}
