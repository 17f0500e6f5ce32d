use crate::describe::{
    ApiUrls, Capabilities, EndpointSpec, ExchangeDescriptor, ExchangeUrls, FeeTier,
    RequiredCredentials, TradingFees,
};
use crate::http_client::HttpMethod;
use crate::request::ApiScope;
use crate::{CommonCurrencies, ExchangeId};

pub const API_BASE: &str = "https://api.bitvavo.com";
pub const API_VERSION: &str = "v2";
pub const RATE_LIMIT_MS: u64 = 100;

const PUBLIC_GET: &[&str] = &[
    "time",
    "markets",
    "assets",
    "{market}/book",
    "{market}/trades",
    "{market}/candles",
    "ticker/price",
    "ticker/book",
    "ticker/24h",
];

const PRIVATE_GET: &[&str] = &[
    "order",
    "orders",
    "ordersOpen",
    "trades",
    "balance",
    "deposit",
    "depositHistory",
    "withdrawalHistory",
];

const PRIVATE_POST: &[&str] = &["order", "withdrawal"];
const PRIVATE_PUT: &[&str] = &["order"];
const PRIVATE_DELETE: &[&str] = &["order", "orders"];

const TAKER_TIERS: &[(f64, f64)] = &[
    (0.0, 0.0025),
    (50_000.0, 0.0024),
    (100_000.0, 0.0022),
    (250_000.0, 0.0020),
    (500_000.0, 0.0018),
    (1_000_000.0, 0.0016),
    (2_500_000.0, 0.0014),
    (5_000_000.0, 0.0012),
    (10_000_000.0, 0.0010),
];

// Negative maker rates are rebates.
const MAKER_TIERS: &[(f64, f64)] = &[
    (0.0, 0.0020),
    (50_000.0, 0.0015),
    (100_000.0, 0.0010),
    (250_000.0, 0.0006),
    (500_000.0, 0.0003),
    (1_000_000.0, 0.0001),
    (2_500_000.0, -0.0001),
    (5_000_000.0, -0.0003),
    (10_000_000.0, -0.0005),
];

/// Static Bitvavo metadata.
pub fn describe() -> ExchangeDescriptor {
    ExchangeDescriptor {
        id: ExchangeId::Bitvavo,
        name: String::from("Bitvavo"),
        countries: vec![String::from("NL")],
        rate_limit_ms: RATE_LIMIT_MS,
        version: String::from(API_VERSION),
        certified: true,
        has: Capabilities {
            cors: false,
            public_api: true,
            private_api: true,
            fetch_currencies: true,
            fetch_markets: true,
            fetch_time: true,
        },
        urls: ExchangeUrls {
            api: ApiUrls::uniform(API_BASE),
            www: String::from("https://bitvavo.com/"),
            doc: String::from("https://docs.bitvavo.com/"),
            fees: String::from("https://bitvavo.com/en/fees"),
            logo: String::from(
                "https://user-images.githubusercontent.com/1294454/82067900-faeb0f80-96d9-11ea-9f22-0071cfcb9871.jpg",
            ),
        },
        endpoints: endpoints(),
        fees: TradingFees {
            tier_based: true,
            percentage: true,
            maker: 0.0020,
            taker: 0.0025,
            maker_tiers: tiers(MAKER_TIERS),
            taker_tiers: tiers(TAKER_TIERS),
        },
        required_credentials: RequiredCredentials::KEY_AND_SECRET,
        common_currencies: CommonCurrencies::standard(),
    }
}

fn endpoints() -> Vec<EndpointSpec> {
    let groups: [(ApiScope, HttpMethod, &[&str]); 5] = [
        (ApiScope::Public, HttpMethod::Get, PUBLIC_GET),
        (ApiScope::Private, HttpMethod::Get, PRIVATE_GET),
        (ApiScope::Private, HttpMethod::Post, PRIVATE_POST),
        (ApiScope::Private, HttpMethod::Put, PRIVATE_PUT),
        (ApiScope::Private, HttpMethod::Delete, PRIVATE_DELETE),
    ];

    groups
        .into_iter()
        .flat_map(|(scope, method, paths)| {
            paths
                .iter()
                .map(move |path| EndpointSpec::new(scope, method, *path))
        })
        .collect()
}

fn tiers(table: &[(f64, f64)]) -> Vec<FeeTier> {
    table
        .iter()
        .map(|&(volume, rate)| FeeTier { volume, rate })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::Liquidity;

    #[test]
    fn declares_every_endpoint_once() {
        let descriptor = describe();
        assert_eq!(descriptor.endpoints.len(), 22);
        assert_eq!(descriptor.endpoints_for(ApiScope::Public).count(), 9);
        assert!(descriptor
            .endpoint(ApiScope::Public, HttpMethod::Get, "{market}/book")
            .is_some());
        assert!(descriptor
            .endpoint(ApiScope::Private, HttpMethod::Put, "/order")
            .is_some());
        assert!(descriptor
            .endpoint(ApiScope::Public, HttpMethod::Post, "order")
            .is_none());
    }

    #[test]
    fn fee_tiers_follow_volume() {
        let fees = describe().fees;
        assert_eq!(fees.rate_for(Liquidity::Taker, 0.0), 0.0025);
        assert_eq!(fees.rate_for(Liquidity::Taker, 120_000.0), 0.0022);
        assert_eq!(fees.rate_for(Liquidity::Maker, 3_000_000.0), -0.0001);
        assert_eq!(fees.rate_for(Liquidity::Maker, 50_000_000.0), -0.0005);
    }

    #[test]
    fn both_scopes_share_the_api_host() {
        let descriptor = describe();
        assert_eq!(descriptor.urls.api.public, API_BASE);
        assert_eq!(descriptor.urls.api.private, API_BASE);
        assert_eq!(descriptor.rate_limit().as_millis(), 100);
    }
}
