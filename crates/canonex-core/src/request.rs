//! Request shaping for exchange REST endpoints.
//!
//! [`RequestBuilder::build`] turns a logical `(path, scope, method, params)`
//! tuple into a [`PreparedRequest`]:
//!
//! 1. parameters named by `{placeholder}` tokens in the path are
//!    interpolated into it, everything else is "leftover";
//! 2. the path is prefixed with the API version segment;
//! 3. `GET` puts leftover parameters in the query string (only when there
//!    are any), other verbs put them in the body;
//! 4. private scope requires every configured credential, checked before the
//!    URL is finalized;
//! 5. the scope's base URL is prepended.
//!
//! The builder is pure: it performs no I/O, keeps no state between calls, and
//! never attaches authentication headers. Signing happens afterwards, on the
//! prepared request, in a [`RequestSigner`](crate::signer::RequestSigner).

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::describe::{ApiUrls, RequiredCredentials};
use crate::exchange::ExchangeError;
use crate::http_client::{HttpMethod, HttpRequest};
use crate::ValidationError;

/// Request parameters. Ordered so query strings are deterministic.
pub type Params = BTreeMap<String, Value>;

/// Endpoint classification selecting base URL and credential requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiScope {
    Public,
    Private,
}

impl ApiScope {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl Display for ApiScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiScope {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            other => Err(ValidationError::InvalidScope {
                value: other.to_owned(),
            }),
        }
    }
}

/// API key and secret. Blank values count as missing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    api_key: Option<String>,
    secret: Option<String>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::from_parts(Some(api_key.into()), Some(secret.into()))
    }

    pub fn from_parts(api_key: Option<String>, secret: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|value| !value.trim().is_empty()),
            secret: secret.filter(|value| !value.trim().is_empty()),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub const fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Fails naming the first credential `required` asks for that is absent.
    pub fn check(&self, required: RequiredCredentials) -> Result<(), ExchangeError> {
        if required.api_key && !self.has_api_key() {
            return Err(ExchangeError::missing_credentials("apiKey"));
        }
        if required.secret && !self.has_secret() {
            return Err(ExchangeError::missing_credentials("secret"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("api_key", &redact(&self.api_key))
            .field("secret", &redact(&self.secret))
            .finish()
    }
}

/// Fully shaped request, ready for signing and dispatch. Built fresh per call.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub scope: ApiScope,
    pub method: HttpMethod,
    pub url: String,
    /// Leftover parameters for non-read verbs; `None` when there are none.
    pub body: Option<Params>,
    /// Left empty by the builder; populated by the signer.
    pub headers: BTreeMap<String, String>,
}

impl PreparedRequest {
    /// JSON text of the body, if any.
    pub fn body_json(&self) -> Option<String> {
        self.body.as_ref().map(|params| {
            let object = params
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect::<Map<String, Value>>();
            Value::Object(object).to_string()
        })
    }

    pub fn into_http_request(self, timeout_ms: u64) -> HttpRequest {
        let body = self.body_json();
        let mut request = HttpRequest::new(self.method, self.url)
            .with_headers(&self.headers)
            .with_timeout_ms(timeout_ms);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        request
    }
}

/// Stateless request shaper bound to one exchange's static metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    version: String,
    urls: ApiUrls,
    required: RequiredCredentials,
}

impl RequestBuilder {
    pub fn new(version: impl Into<String>, urls: ApiUrls, required: RequiredCredentials) -> Self {
        Self {
            version: version.into(),
            urls,
            required,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn urls(&self) -> &ApiUrls {
        &self.urls
    }

    pub fn build(
        &self,
        path: &str,
        scope: ApiScope,
        method: HttpMethod,
        params: &Params,
        credentials: &Credentials,
    ) -> Result<PreparedRequest, ExchangeError> {
        let placeholders = extract_params(path);
        let leftover = params
            .iter()
            .filter(|(name, _)| !placeholders.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect::<Params>();

        let mut relative = format!(
            "/{}/{}",
            self.version,
            implode_params(path.trim_start_matches('/'), params)
        );

        let body = if method.is_read() {
            if !leftover.is_empty() {
                relative.push('?');
                relative.push_str(&urlencode(&leftover));
            }
            None
        } else if leftover.is_empty() {
            None
        } else {
            Some(leftover)
        };

        if scope == ApiScope::Private {
            credentials.check(self.required)?;
        }

        Ok(PreparedRequest {
            scope,
            method,
            url: format!("{}{relative}", self.urls.for_scope(scope)),
            body,
            headers: BTreeMap::new(),
        })
    }
}

/// Names of the `{placeholder}` tokens in `path`, in order of appearance.
pub fn extract_params(path: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        names.push(&after[..close]);
        rest = &after[close + 1..];
    }
    names
}

/// Replaces each `{name}` token with the percent-encoded parameter value.
/// Tokens without a matching parameter are left in place.
pub fn implode_params(path: &str, params: &Params) -> String {
    let mut result = path.to_owned();
    for name in extract_params(path) {
        if let Some(value) = params.get(name) {
            let token = format!("{{{name}}}");
            let encoded = urlencoding::encode(&param_text(value)).into_owned();
            result = result.replace(&token, &encoded);
        }
    }
    result
}

/// `key=value&...` with both sides percent-encoded.
pub fn urlencode(params: &Params) -> String {
    params
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(&param_text(value))
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn param_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
