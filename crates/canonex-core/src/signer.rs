//! Authentication stage applied to already shaped private requests.
//!
//! Request shaping and signature computation are separate: the
//! [`RequestBuilder`](crate::request::RequestBuilder) decides URL, body and
//! whether credentials must be present, and a [`RequestSigner`] turns the
//! result into an authenticated request. Adapters only call the signer for
//! private scope, so swapping the authentication scheme never touches path
//! or normalization logic.

use crate::exchange::ExchangeError;
use crate::request::{Credentials, PreparedRequest};

/// Attaches authentication to a prepared private request.
///
/// Implementations receive credentials that already passed the presence
/// check and typically add headers computed from `url`, `method` and the
/// serialized body.
pub trait RequestSigner: Send + Sync {
    fn sign(
        &self,
        request: PreparedRequest,
        credentials: &Credentials,
    ) -> Result<PreparedRequest, ExchangeError>;
}

/// Signer that forwards requests unchanged. Used until a real scheme is
/// plugged in, and by tests that only care about shaping.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughSigner;

impl RequestSigner for PassthroughSigner {
    fn sign(
        &self,
        request: PreparedRequest,
        _credentials: &Credentials,
    ) -> Result<PreparedRequest, ExchangeError> {
        Ok(request)
    }
}

/// Signer that sends the API key in a fixed header and nothing else.
///
/// Useful against sandboxes and mocks that authenticate by key alone.
#[derive(Debug, Clone)]
pub struct ApiKeyHeaderSigner {
    header: String,
}

impl ApiKeyHeaderSigner {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into().to_ascii_lowercase(),
        }
    }
}

impl RequestSigner for ApiKeyHeaderSigner {
    fn sign(
        &self,
        mut request: PreparedRequest,
        credentials: &Credentials,
    ) -> Result<PreparedRequest, ExchangeError> {
        let key = credentials
            .api_key()
            .ok_or_else(|| ExchangeError::missing_credentials("apiKey"))?;
        request.headers.insert(self.header.clone(), key.to_owned());
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::http_client::HttpMethod;
    use crate::request::ApiScope;

    fn prepared() -> PreparedRequest {
        PreparedRequest {
            scope: ApiScope::Private,
            method: HttpMethod::Get,
            url: String::from("https://api.example.test/v2/balance"),
            body: None,
            headers: BTreeMap::new(),
        }
    }

    #[test]
    fn passthrough_leaves_request_untouched() {
        let signed = PassthroughSigner
            .sign(prepared(), &Credentials::new("k", "s"))
            .expect("passthrough never fails");
        assert_eq!(signed, prepared());
    }

    #[test]
    fn key_header_signer_adds_lowercased_header() {
        let signed = ApiKeyHeaderSigner::new("Bitvavo-Access-Key")
            .sign(prepared(), &Credentials::new("key-1", "s"))
            .expect("key present");
        assert_eq!(
            signed.headers.get("bitvavo-access-key").map(String::as_str),
            Some("key-1")
        );
    }
}
