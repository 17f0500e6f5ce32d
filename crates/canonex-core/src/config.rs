//! Connector configuration sourced from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `CANONEX_BITVAVO_API_KEY` | unset | API key for private endpoints |
//! | `CANONEX_BITVAVO_API_SECRET` | unset | API secret for private endpoints |
//! | `CANONEX_BITVAVO_BASE_URL` | descriptor URL | Overrides both API base URLs |
//! | `CANONEX_TIMEOUT_MS` | `10000` | Per-request transport timeout |
//! | `CANONEX_RATE_LIMIT_MS` | descriptor value | Minimum spacing between requests |
//! | `CANONEX_CURRENCY_COLLISION` | `reject` | `reject`, `keep-first` or `keep-last` |
//!
//! Unparseable values fall back to the default and log a warning; secrets
//! are never logged.

use std::str::FromStr;

use tracing::warn;

use crate::request::Credentials;
use crate::CodeCollisionPolicy;

pub const ENV_API_KEY: &str = "CANONEX_BITVAVO_API_KEY";
pub const ENV_API_SECRET: &str = "CANONEX_BITVAVO_API_SECRET";
pub const ENV_BASE_URL: &str = "CANONEX_BITVAVO_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "CANONEX_TIMEOUT_MS";
pub const ENV_RATE_LIMIT_MS: &str = "CANONEX_RATE_LIMIT_MS";
pub const ENV_CURRENCY_COLLISION: &str = "CANONEX_CURRENCY_COLLISION";

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    pub credentials: Credentials,
    pub base_url: Option<String>,
    pub timeout_ms: u64,
    /// `None` keeps the descriptor's rate limit.
    pub rate_limit_ms: Option<u64>,
    pub collision_policy: CodeCollisionPolicy,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::none(),
            base_url: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            rate_limit_ms: None,
            collision_policy: CodeCollisionPolicy::default(),
        }
    }
}

impl ConnectorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |name: &str| lookup(name).filter(|raw| !raw.trim().is_empty());

        Self {
            credentials: Credentials::from_parts(value(ENV_API_KEY), value(ENV_API_SECRET)),
            base_url: value(ENV_BASE_URL).map(|raw| raw.trim().to_owned()),
            timeout_ms: parse_or(ENV_TIMEOUT_MS, value(ENV_TIMEOUT_MS), defaults.timeout_ms),
            rate_limit_ms: value(ENV_RATE_LIMIT_MS)
                .and_then(|raw| parse_logged::<u64>(ENV_RATE_LIMIT_MS, &raw)),
            collision_policy: parse_or(
                ENV_CURRENCY_COLLISION,
                value(ENV_CURRENCY_COLLISION),
                defaults.collision_policy,
            ),
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_rate_limit_ms(mut self, rate_limit_ms: u64) -> Self {
        self.rate_limit_ms = Some(rate_limit_ms);
        self
    }

    pub fn with_collision_policy(mut self, policy: CodeCollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }
}

fn parse_or<T: FromStr>(name: &str, raw: Option<String>, default: T) -> T {
    raw.and_then(|raw| parse_logged(name, &raw))
        .unwrap_or(default)
}

fn parse_logged<T: FromStr>(name: &str, raw: &str) -> Option<T> {
    match raw.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(variable = name, value = raw, "ignoring unparseable configuration value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = ConnectorConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ConnectorConfig::default());
        assert!(!config.credentials.has_api_key());
    }

    #[test]
    fn reads_credentials_and_overrides() {
        let config = ConnectorConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "key"),
            (ENV_API_SECRET, "secret"),
            (ENV_BASE_URL, " http://127.0.0.1:9000 "),
            (ENV_TIMEOUT_MS, "2500"),
            (ENV_RATE_LIMIT_MS, "0"),
            (ENV_CURRENCY_COLLISION, "keep-last"),
        ]));

        assert_eq!(config.credentials.api_key(), Some("key"));
        assert_eq!(config.credentials.secret(), Some("secret"));
        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(config.timeout_ms, 2_500);
        assert_eq!(config.rate_limit_ms, Some(0));
        assert_eq!(config.collision_policy, CodeCollisionPolicy::KeepLast);
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let config = ConnectorConfig::from_lookup(lookup(&[
            (ENV_TIMEOUT_MS, "soon"),
            (ENV_RATE_LIMIT_MS, "-5"),
            (ENV_CURRENCY_COLLISION, "newest"),
        ]));

        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.rate_limit_ms, None);
        assert_eq!(config.collision_policy, CodeCollisionPolicy::Reject);
    }
}
