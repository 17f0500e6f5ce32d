//! # Canonex Core
//!
//! Canonical market data and request shaping for cryptocurrency exchange
//! REST APIs.
//!
//! ## Overview
//!
//! - **Canonical models** for markets and currencies, with unknown values
//!   kept as `None` rather than zero
//! - **Pure normalizers** from raw provider JSON to canonical entities
//! - **Request builder** that shapes URLs, query strings and bodies and
//!   checks credential presence before any network I/O
//! - **Exchange adapter** trait with a Bitvavo implementation
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Exchange adapters (Bitvavo) |
//! | [`cache`] | Market snapshot cache |
//! | [`config`] | Environment-driven connector configuration |
//! | [`describe`] | Static exchange metadata: endpoints, fees, URLs |
//! | [`domain`] | Canonical models (Market, Currency) |
//! | [`error`] | Core validation errors |
//! | [`exchange`] | Adapter trait and structured exchange error |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`request`] | Request shaping and credentials |
//! | [`safe`] | Typed optional extraction from untyped JSON |
//! | [`signer`] | Authentication stage for private requests |
//! | [`source`] | Exchange identifiers |
//! | [`throttling`] | Outbound request pacing |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use canonex_core::{BitvavoAdapter, Exchange};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = BitvavoAdapter::default();
//!
//!     for market in adapter.fetch_markets().await? {
//!         if market.active {
//!             println!("{}", market.symbol.unwrap_or_default());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Caller   │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Exchange        │────▶│ Request Builder  │
//! │ (Adapter Trait) │     └────────┬─────────┘
//! └────────┬────────┘              │ private only
//!          │              ┌────────▼─────────┐
//!          │              │ Request Signer   │
//!          │              └────────┬─────────┘
//!          │              ┌────────▼─────────┐
//!          │              │ Throttle + HTTP  │
//!          │              └────────┬─────────┘
//!          ▼                       │
//! ┌─────────────────┐              │
//! │ Normalizer      │◀─────────────┘
//! │ (Market, Curr.) │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Adapter operations return [`ExchangeError`]:
//!
//! ```rust
//! use canonex_core::{ExchangeError, ExchangeErrorKind};
//!
//! fn handle_error(error: ExchangeError) {
//!     match error.kind() {
//!         ExchangeErrorKind::MissingCredentials => {
//!             // Configure an API key and secret
//!         }
//!         ExchangeErrorKind::RateLimited => {
//!             // Back off before calling again
//!         }
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - API keys are read from environment variables and never logged
//! - `Credentials` redacts both parts in its `Debug` output
//! - Private requests are never built without both credential parts

pub mod adapters;
pub mod cache;
pub mod config;
pub mod describe;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod http_client;
pub mod request;
pub mod safe;
pub mod signer;
pub mod source;
pub mod throttling;

// Adapter implementations
pub use adapters::BitvavoAdapter;

// Caching
pub use cache::{CacheMode, MarketCache};

// Configuration
pub use config::ConnectorConfig;

// Static metadata
pub use describe::{
    ApiUrls, Capabilities, EndpointSpec, ExchangeDescriptor, ExchangeUrls, FeeTier, Liquidity,
    RequiredCredentials, TradingFees,
};

// Domain models
pub use domain::{
    CodeCollision, CodeCollisionPolicy, CommonCurrencies, Currency, CurrencyLimits, CurrencyMap,
    Market, MarketLimits, MarketPrecision, MinMax, UtcDateTime,
};

// Error types
pub use error::ValidationError;

// Exchange trait and errors
pub use exchange::{Exchange, ExchangeError, ExchangeErrorKind};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};

// Request shaping
pub use request::{ApiScope, Credentials, Params, PreparedRequest, RequestBuilder};

// Signing
pub use signer::{ApiKeyHeaderSigner, PassthroughSigner, RequestSigner};

// Exchange identifiers
pub use source::ExchangeId;

// Throttling
pub use throttling::Throttle;
