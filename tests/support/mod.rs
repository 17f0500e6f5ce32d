#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use canonex_core::{
    BitvavoAdapter, Credentials, HttpClient, HttpError, HttpRequest, HttpResponse, Throttle,
};

/// HTTP stub answering by URL path suffix and recording every request.
pub struct RecordingHttpClient {
    routes: Vec<(String, HttpResponse)>,
    failure: Option<HttpError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingHttpClient {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: HttpError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new()
        }
    }

    pub fn route(mut self, path_suffix: &str, response: HttpResponse) -> Self {
        self.routes.push((path_suffix.to_owned(), response));
        self
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }
}

impl HttpClient for RecordingHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let path = request
            .url
            .split('?')
            .next()
            .unwrap_or_default()
            .to_owned();
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);

        let response = match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(self
                .routes
                .iter()
                .find(|(suffix, _)| path.ends_with(suffix.as_str()))
                .map(|(_, response)| response.clone())
                .unwrap_or_else(|| HttpResponse::with_status(404, r#"{"error":"not found"}"#))),
        };

        Box::pin(async move { response })
    }
}

/// Adapter over `client` with pacing disabled so tests do not sleep.
pub fn adapter(client: Arc<RecordingHttpClient>, credentials: Credentials) -> BitvavoAdapter {
    BitvavoAdapter::with_http_client(client, credentials).with_throttle(Throttle::disabled())
}

pub fn markets_body() -> String {
    serde_json::json!([
        {
            "market": "ADA-BTC",
            "status": "trading",
            "base": "ADA",
            "quote": "BTC",
            "pricePrecision": 5,
            "minOrderInBaseAsset": "100",
            "minOrderInQuoteAsset": "0.001",
            "orderTypes": ["market", "limit"]
        },
        {
            "market": "BTC-EUR",
            "status": "halted",
            "base": "BTC",
            "quote": "EUR",
            "pricePrecision": 5,
            "minOrderInBaseAsset": "0.0001",
            "minOrderInQuoteAsset": "5"
        },
        {
            "market": "XBT-EUR",
            "status": "auction",
            "base": "xbt",
            "quote": "EUR"
        }
    ])
    .to_string()
}

pub fn assets_body(symbols: &[&str]) -> String {
    let records = symbols
        .iter()
        .map(|symbol| {
            serde_json::json!({
                "symbol": symbol,
                "name": format!("{symbol} asset"),
                "decimals": 8,
                "depositFee": "0",
                "depositConfirmations": 10,
                "depositStatus": "OK",
                "withdrawalFee": "0.2",
                "withdrawalMinAmount": "0.2",
                "withdrawalStatus": "OK",
                "networks": ["Mainnet"],
                "message": ""
            })
        })
        .collect::<Vec<_>>();
    serde_json::Value::Array(records).to_string()
}
