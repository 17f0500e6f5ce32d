//! Bitvavo REST v2 adapter.
//!
//! Every call follows the same path: endpoint lookup in the descriptor,
//! request shaping, signing (private scope only), throttling, transport,
//! status mapping and JSON decoding. Normalization lives in [`normalize`]
//! and is pure.

mod describe;
pub mod normalize;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

pub use describe::{describe, API_BASE, API_VERSION, RATE_LIMIT_MS};

use crate::cache::{CacheMode, MarketCache};
use crate::config::ConnectorConfig;
use crate::describe::ExchangeDescriptor;
use crate::exchange::{Exchange, ExchangeError};
use crate::http_client::{HttpClient, HttpMethod, ReqwestHttpClient};
use crate::request::{ApiScope, Credentials, Params, PreparedRequest, RequestBuilder};
use crate::safe::{safe_integer, safe_string};
use crate::signer::{PassthroughSigner, RequestSigner};
use crate::throttling::Throttle;
use crate::{CodeCollisionPolicy, CurrencyMap, ExchangeId, Market, UtcDateTime};

/// Bitvavo adapter.
#[derive(Clone)]
pub struct BitvavoAdapter {
    descriptor: Arc<ExchangeDescriptor>,
    builder: RequestBuilder,
    credentials: Credentials,
    http_client: Arc<dyn HttpClient>,
    signer: Arc<dyn RequestSigner>,
    throttle: Throttle,
    markets: MarketCache,
    collision_policy: CodeCollisionPolicy,
    timeout_ms: u64,
}

impl Default for BitvavoAdapter {
    fn default() -> Self {
        Self::from_config(&ConnectorConfig::from_env())
    }
}

impl BitvavoAdapter {
    pub fn from_config(config: &ConnectorConfig) -> Self {
        Self::from_config_with_client(config, Arc::new(ReqwestHttpClient::default()))
    }

    pub fn from_config_with_client(config: &ConnectorConfig, http_client: Arc<dyn HttpClient>) -> Self {
        let mut descriptor = describe();
        if let Some(base_url) = &config.base_url {
            descriptor = descriptor.with_api_base(base_url);
        }

        let interval = Duration::from_millis(config.rate_limit_ms.unwrap_or(descriptor.rate_limit_ms));
        let builder = RequestBuilder::new(
            descriptor.version.clone(),
            descriptor.urls.api.clone(),
            descriptor.required_credentials,
        );

        Self {
            descriptor: Arc::new(descriptor),
            builder,
            credentials: config.credentials.clone(),
            http_client,
            signer: Arc::new(PassthroughSigner),
            throttle: Throttle::per_interval(interval),
            markets: MarketCache::default(),
            collision_policy: config.collision_policy,
            timeout_ms: config.timeout_ms,
        }
    }

    /// Adapter over `http_client` with explicit credentials and otherwise
    /// default settings. Environment variables are not consulted.
    pub fn with_http_client(http_client: Arc<dyn HttpClient>, credentials: Credentials) -> Self {
        Self::from_config_with_client(
            &ConnectorConfig::default().with_credentials(credentials),
            http_client,
        )
    }

    pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = signer;
        self
    }

    pub fn with_collision_policy(mut self, policy: CodeCollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn with_market_cache(mut self, markets: MarketCache) -> Self {
        self.markets = markets;
        self
    }

    pub const fn collision_policy(&self) -> CodeCollisionPolicy {
        self.collision_policy
    }

    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// Shapes a request for a declared endpoint without sending it.
    ///
    /// The result is unsigned; signing happens only on dispatch.
    pub fn prepare(
        &self,
        path: &str,
        scope: ApiScope,
        method: HttpMethod,
        params: &Params,
    ) -> Result<PreparedRequest, ExchangeError> {
        if self.descriptor.endpoint(scope, method, path).is_none() {
            return Err(ExchangeError::unsupported_endpoint(scope, method, path));
        }

        self.builder
            .build(path, scope, method, params, &self.credentials)
    }

    /// Calls any declared endpoint and returns the decoded JSON body.
    pub async fn request(
        &self,
        path: &str,
        scope: ApiScope,
        method: HttpMethod,
        params: &Params,
    ) -> Result<Value, ExchangeError> {
        let prepared = self.prepare(path, scope, method, params)?;
        self.dispatch(prepared).await
    }

    async fn dispatch(&self, prepared: PreparedRequest) -> Result<Value, ExchangeError> {
        let prepared = match prepared.scope {
            ApiScope::Private => self.signer.sign(prepared, &self.credentials)?,
            ApiScope::Public => prepared,
        };

        debug!(
            method = %prepared.method,
            scope = %prepared.scope,
            url = %prepared.url,
            "dispatching bitvavo request"
        );

        self.throttle.acquire().await;

        let response = self
            .http_client
            .execute(prepared.into_http_request(self.timeout_ms))
            .await
            .map_err(|error| {
                ExchangeError::transport(
                    format!("bitvavo transport error: {}", error.message()),
                    error.retryable(),
                )
            })?;

        if !response.is_success() {
            warn!(status = response.status, "bitvavo returned a non-success status");
            return Err(status_error(response.status, &response.body));
        }

        serde_json::from_str(&response.body).map_err(|error| {
            ExchangeError::invalid_response(format!("bitvavo returned undecodable JSON: {error}"))
        })
    }

    /// Markets, served from the cache according to `mode`.
    ///
    /// Concurrent callers that miss the cache wait on one fill instead of
    /// each fetching the listing.
    pub async fn load_markets(&self, mode: CacheMode) -> Result<Arc<Vec<Market>>, ExchangeError> {
        match mode {
            CacheMode::Bypass => return Ok(Arc::new(self.fetch_markets().await?)),
            CacheMode::Use => {
                if let Some(markets) = self.markets.markets().await {
                    return Ok(markets);
                }
            }
            CacheMode::Refresh => {}
        }

        let _filling = self.markets.fill_lock().await;
        if mode == CacheMode::Use {
            if let Some(markets) = self.markets.markets().await {
                return Ok(markets);
            }
        }

        let markets = self.fetch_markets().await?;
        Ok(self.markets.store(markets).await)
    }

    /// Market by unified symbol (`ADA/BTC`). Loads markets on first use.
    pub async fn market(&self, symbol: &str) -> Result<Option<Market>, ExchangeError> {
        self.load_markets(CacheMode::Use).await?;
        Ok(self.markets.by_symbol(symbol).await)
    }

    /// Market by provider id (`ADA-BTC`). Loads markets on first use.
    pub async fn market_by_id(&self, id: &str) -> Result<Option<Market>, ExchangeError> {
        self.load_markets(CacheMode::Use).await?;
        Ok(self.markets.by_id(id).await)
    }

    pub async fn market_id(&self, symbol: &str) -> Result<Option<String>, ExchangeError> {
        Ok(self.market(symbol).await?.and_then(|market| market.id))
    }

    pub async fn symbol_for(&self, id: &str) -> Result<Option<String>, ExchangeError> {
        Ok(self.market_by_id(id).await?.and_then(|market| market.symbol))
    }

    async fn fetch_array(&self, path: &str) -> Result<Vec<Value>, ExchangeError> {
        match self
            .request(path, ApiScope::Public, HttpMethod::Get, &Params::new())
            .await?
        {
            Value::Array(records) => Ok(records),
            other => Err(ExchangeError::invalid_response(format!(
                "bitvavo '{path}' response must be a JSON array, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl Exchange for BitvavoAdapter {
    fn id(&self) -> ExchangeId {
        ExchangeId::Bitvavo
    }

    fn descriptor(&self) -> &ExchangeDescriptor {
        &self.descriptor
    }

    fn fetch_time<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<UtcDateTime, ExchangeError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self
                .request("time", ApiScope::Public, HttpMethod::Get, &Params::new())
                .await?;
            let millis = safe_integer(&body, "time").ok_or_else(|| {
                ExchangeError::invalid_response("bitvavo time response has no 'time' field")
            })?;

            UtcDateTime::from_unix_millis(millis)
                .map_err(|error| ExchangeError::invalid_response(error.to_string()))
        })
    }

    fn fetch_markets<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Market>, ExchangeError>> + Send + 'a>> {
        Box::pin(async move {
            let records = self.fetch_array("markets").await?;
            let markets = normalize::markets_from(&records, &self.descriptor.common_currencies);
            info!(count = markets.len(), "fetched bitvavo markets");
            Ok(markets)
        })
    }

    fn fetch_currencies<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<CurrencyMap, ExchangeError>> + Send + 'a>> {
        Box::pin(async move {
            let records = self.fetch_array("assets").await?;
            let currencies = normalize::currencies_from(
                &records,
                &self.descriptor.common_currencies,
                self.collision_policy,
            )?;
            info!(
                count = currencies.len(),
                records = records.len(),
                "fetched bitvavo currencies"
            );
            Ok(currencies)
        })
    }
}

fn status_error(status: u16, body: &str) -> ExchangeError {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| safe_string(&value, "error"))
        .map(|message| format!(": {message}"))
        .unwrap_or_default();

    match status {
        401 | 403 => ExchangeError::authentication(format!(
            "bitvavo rejected the credentials with status {status}{detail}"
        )),
        429 => ExchangeError::rate_limited(format!("bitvavo rate limit exceeded{detail}")),
        _ => ExchangeError::upstream(
            status,
            format!("bitvavo upstream returned status {status}{detail}"),
        ),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
