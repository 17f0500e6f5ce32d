#[path = "../support/mod.rs"]
mod support;

use std::sync::Arc;

use canonex_core::{
    ApiScope, BitvavoAdapter, CodeCollisionPolicy, Credentials, Exchange, ExchangeErrorKind,
    ExchangeId, HttpError, HttpMethod, HttpResponse,
};

use support::{adapter, assets_body, markets_body, RecordingHttpClient};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn adapter_is_shareable_across_tasks() {
    assert_send_sync::<BitvavoAdapter>();
    let shared: Arc<dyn Exchange> = Arc::new(adapter(
        Arc::new(RecordingHttpClient::new()),
        Credentials::none(),
    ));
    assert_eq!(shared.id(), ExchangeId::Bitvavo);
}

#[test]
fn descriptor_carries_static_metadata() {
    let adapter = adapter(Arc::new(RecordingHttpClient::new()), Credentials::none());
    let descriptor = adapter.descriptor();

    assert_eq!(descriptor.id, ExchangeId::Bitvavo);
    assert_eq!(descriptor.name, "Bitvavo");
    assert_eq!(descriptor.countries, vec![String::from("NL")]);
    assert_eq!(descriptor.version, "v2");
    assert_eq!(descriptor.rate_limit_ms, 100);
    assert!(descriptor.certified);
    assert!(!descriptor.has.cors);
    assert!(descriptor.has.fetch_markets && descriptor.has.fetch_currencies && descriptor.has.fetch_time);
    assert!(descriptor.required_credentials.api_key && descriptor.required_credentials.secret);
    assert_eq!(descriptor.urls.api.public, "https://api.bitvavo.com");
    assert!(descriptor
        .endpoint(ApiScope::Private, HttpMethod::Delete, "orders")
        .is_some());
}

#[tokio::test]
async fn fetch_time_returns_server_clock() {
    let client = Arc::new(
        RecordingHttpClient::new().route("/v2/time", HttpResponse::ok_json(r#"{"time":1590379519148}"#)),
    );
    let adapter = adapter(client.clone(), Credentials::none());

    let time = adapter.fetch_time().await.expect("time should parse");
    assert_eq!(time.to_string(), "2020-05-25T04:05:19.148Z");
    assert_eq!(client.recorded_requests()[0].url, "https://api.bitvavo.com/v2/time");
}

#[tokio::test]
async fn fetch_time_without_field_is_invalid_response() {
    let client = Arc::new(RecordingHttpClient::new().route("/v2/time", HttpResponse::ok_json("{}")));
    let error = adapter(client, Credentials::none())
        .fetch_time()
        .await
        .expect_err("missing time field");
    assert_eq!(error.kind(), ExchangeErrorKind::InvalidResponse);
}

#[tokio::test]
async fn fetch_markets_preserves_provider_order() {
    let client = Arc::new(
        RecordingHttpClient::new().route("/v2/markets", HttpResponse::ok_json(markets_body())),
    );
    let markets = adapter(client, Credentials::none())
        .fetch_markets()
        .await
        .expect("markets");

    let ids = markets
        .iter()
        .map(|market| market.id.as_deref().unwrap_or_default())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["ADA-BTC", "BTC-EUR", "XBT-EUR"]);
    assert_eq!(
        markets.iter().map(|market| market.active).collect::<Vec<_>>(),
        vec![true, false, false]
    );
}

#[tokio::test]
async fn fetch_currencies_keys_by_canonical_code() {
    let client = Arc::new(RecordingHttpClient::new().route(
        "/v2/assets",
        HttpResponse::ok_json(assets_body(&["ADA", "EUR", "bchsv"])),
    ));
    let currencies = adapter(client, Credentials::none())
        .fetch_currencies()
        .await
        .expect("currencies");

    assert_eq!(currencies.codes().collect::<Vec<_>>(), vec!["ADA", "BSV", "EUR"]);
    let bsv = currencies.get("BSV").expect("aliased code");
    assert_eq!(bsv.id.as_deref(), Some("bchsv"));
}

#[tokio::test]
async fn colliding_codes_fail_under_default_policy() {
    let client = Arc::new(RecordingHttpClient::new().route(
        "/v2/assets",
        HttpResponse::ok_json(assets_body(&["BTC", "XBT"])),
    ));
    let adapter = adapter(client, Credentials::none());
    assert_eq!(adapter.collision_policy(), CodeCollisionPolicy::Reject);

    let error = adapter.fetch_currencies().await.expect_err("BTC collides with XBT");
    assert_eq!(error.kind(), ExchangeErrorKind::DuplicateCurrencyCode);
    assert_eq!(error.code(), "exchange.duplicate_currency_code");
    assert!(!error.retryable());
}

#[tokio::test]
async fn colliding_codes_resolve_under_keep_first() {
    let client = Arc::new(RecordingHttpClient::new().route(
        "/v2/assets",
        HttpResponse::ok_json(assets_body(&["BTC", "XBT"])),
    ));
    let currencies = adapter(client, Credentials::none())
        .with_collision_policy(CodeCollisionPolicy::KeepFirst)
        .fetch_currencies()
        .await
        .expect("collision resolved");

    assert_eq!(currencies.len(), 1);
    assert_eq!(
        currencies.get("BTC").and_then(|currency| currency.id.as_deref()),
        Some("BTC")
    );
}

#[tokio::test]
async fn non_array_listing_is_invalid_response() {
    let client = Arc::new(
        RecordingHttpClient::new().route("/v2/assets", HttpResponse::ok_json(r#"{"errorCode":101}"#)),
    );
    let error = adapter(client, Credentials::none())
        .fetch_currencies()
        .await
        .expect_err("object is not a listing");
    assert_eq!(error.kind(), ExchangeErrorKind::InvalidResponse);
}

#[tokio::test]
async fn transport_failures_keep_retry_hint() {
    let client = Arc::new(RecordingHttpClient::failing(HttpError::new("connection reset")));
    let error = adapter(client, Credentials::none())
        .fetch_markets()
        .await
        .expect_err("transport down");

    assert_eq!(error.kind(), ExchangeErrorKind::Transport);
    assert!(error.retryable());
    assert!(error.message().contains("connection reset"));
}

#[tokio::test]
async fn unknown_paths_surface_as_upstream_errors() {
    let client = Arc::new(RecordingHttpClient::new());
    let error = adapter(client, Credentials::none())
        .fetch_markets()
        .await
        .expect_err("stub answers 404");

    assert_eq!(error.kind(), ExchangeErrorKind::Upstream);
    assert!(!error.retryable());
    assert!(error.message().contains("not found"));
}

#[tokio::test]
async fn asset_without_symbol_does_not_sink_the_listing() {
    let mut records: Vec<serde_json::Value> =
        serde_json::from_str(&assets_body(&["ADA"])).expect("fixture");
    records.push(serde_json::json!({ "name": "unnamed asset", "depositStatus": "OK" }));

    let client = Arc::new(RecordingHttpClient::new().route(
        "/v2/assets",
        HttpResponse::ok_json(serde_json::Value::Array(records).to_string()),
    ));
    let currencies = adapter(client, Credentials::none())
        .fetch_currencies()
        .await
        .expect("listing survives one bad record");

    assert_eq!(currencies.codes().collect::<Vec<_>>(), vec!["ADA"]);
}
