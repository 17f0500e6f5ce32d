//! Exchange adapter contract and its structured error.
//!
//! | Operation | Endpoint | Response |
//! |-----------|----------|----------|
//! | [`fetch_time`](Exchange::fetch_time) | `GET time` | [`UtcDateTime`] |
//! | [`fetch_markets`](Exchange::fetch_markets) | `GET markets` | `Vec<`[`Market`]`>` |
//! | [`fetch_currencies`](Exchange::fetch_currencies) | `GET assets` | [`CurrencyMap`] |
//!
//! # Example
//!
//! ```rust,ignore
//! use canonex_core::{BitvavoAdapter, Exchange};
//!
//! async fn list(adapter: &BitvavoAdapter) -> Result<(), canonex_core::ExchangeError> {
//!     for market in adapter.fetch_markets().await? {
//!         println!("{:?} active={}", market.symbol, market.active);
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::describe::ExchangeDescriptor;
use crate::http_client::HttpMethod;
use crate::request::ApiScope;
use crate::{CodeCollision, CurrencyMap, ExchangeId, Market, UtcDateTime};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeErrorKind {
    /// A private call was attempted without both an API key and secret.
    MissingCredentials,
    /// The (scope, method, path) triple is not declared by the exchange.
    UnsupportedEndpoint,
    /// The transport failed before a response arrived.
    Transport,
    /// The exchange rejected the credentials (401/403).
    Authentication,
    /// The exchange rate limited the call (429).
    RateLimited,
    /// Any other non-success HTTP status.
    Upstream,
    /// The response body was not the JSON shape the operation expects.
    InvalidResponse,
    /// Two assets normalized to one currency code under the reject policy.
    DuplicateCurrencyCode,
}

/// Structured exchange error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeError {
    kind: ExchangeErrorKind,
    message: String,
    retryable: bool,
}

impl ExchangeError {
    pub fn missing_credentials(missing: &str) -> Self {
        Self {
            kind: ExchangeErrorKind::MissingCredentials,
            message: format!("private endpoint requires credentials; missing {missing}"),
            retryable: false,
        }
    }

    pub fn unsupported_endpoint(scope: ApiScope, method: HttpMethod, path: &str) -> Self {
        Self {
            kind: ExchangeErrorKind::UnsupportedEndpoint,
            message: format!("endpoint '{scope} {method} {path}' is not declared by this exchange"),
            retryable: false,
        }
    }

    pub fn transport(message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind: ExchangeErrorKind::Transport,
            message: message.into(),
            retryable,
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self {
            kind: ExchangeErrorKind::Authentication,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: ExchangeErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ExchangeErrorKind::Upstream,
            message: message.into(),
            retryable: status >= 500,
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self {
            kind: ExchangeErrorKind::InvalidResponse,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn duplicate_currency_code(collision: &CodeCollision) -> Self {
        Self {
            kind: ExchangeErrorKind::DuplicateCurrencyCode,
            message: collision.to_string(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> ExchangeErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Hint for callers that run their own retry loop; nothing in this crate
    /// retries.
    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ExchangeErrorKind::MissingCredentials => "exchange.missing_credentials",
            ExchangeErrorKind::UnsupportedEndpoint => "exchange.unsupported_endpoint",
            ExchangeErrorKind::Transport => "exchange.transport",
            ExchangeErrorKind::Authentication => "exchange.authentication",
            ExchangeErrorKind::RateLimited => "exchange.rate_limited",
            ExchangeErrorKind::Upstream => "exchange.upstream",
            ExchangeErrorKind::InvalidResponse => "exchange.invalid_response",
            ExchangeErrorKind::DuplicateCurrencyCode => "exchange.duplicate_currency_code",
        }
    }
}

impl Display for ExchangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ExchangeError {}

/// Exchange adapter contract.
///
/// Implementations must be `Send + Sync`; they are shared across tasks.
pub trait Exchange: Send + Sync {
    fn id(&self) -> ExchangeId;

    /// Static metadata: URLs, declared endpoints, fees, capability flags.
    fn descriptor(&self) -> &ExchangeDescriptor;

    /// Exchange server clock.
    fn fetch_time<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<UtcDateTime, ExchangeError>> + Send + 'a>>;

    /// All markets in canonical form, in provider order.
    fn fetch_markets<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Market>, ExchangeError>> + Send + 'a>>;

    /// All currencies keyed by canonical code.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeErrorKind::DuplicateCurrencyCode`] when two assets
    /// share a code and the adapter's collision policy is `Reject`.
    fn fetch_currencies<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<CurrencyMap, ExchangeError>> + Send + 'a>>;
}
