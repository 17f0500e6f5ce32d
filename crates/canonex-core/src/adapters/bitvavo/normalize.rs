//! Bitvavo record normalization.
//!
//! Pure functions from raw `markets` / `assets` records to canonical
//! entities. Missing or mistyped fields become `None`; nothing here fails on
//! a single malformed field.

use serde_json::Value;
use tracing::warn;

use crate::exchange::ExchangeError;
use crate::safe::{safe_count, safe_float, safe_string};
use crate::{
    CodeCollisionPolicy, CommonCurrencies, Currency, CurrencyLimits, CurrencyMap, Market,
    MarketLimits, MarketPrecision, MinMax,
};

const STATUS_TRADING: &str = "trading";
const STATUS_OK: &str = "OK";

/// Converts one `markets` record.
pub fn market_from(raw: &Value, common: &CommonCurrencies) -> Market {
    let base_id = safe_string(raw, "base");
    let quote_id = safe_string(raw, "quote");
    let base = common.safe_code(base_id.as_deref());
    let quote = common.safe_code(quote_id.as_deref());

    Market {
        id: safe_string(raw, "market"),
        symbol: Market::compose_symbol(base.as_deref(), quote.as_deref()),
        base,
        quote,
        base_id,
        quote_id,
        active: safe_string(raw, "status").as_deref() == Some(STATUS_TRADING),
        precision: MarketPrecision {
            price: safe_count(raw, "pricePrecision"),
            amount: None,
        },
        limits: MarketLimits {
            amount: MinMax::min_only(safe_float(raw, "minOrderInBaseAsset")),
            price: MinMax::UNKNOWN,
            cost: MinMax::min_only(safe_float(raw, "minOrderInQuoteAsset")),
        },
        info: raw.clone(),
    }
}

pub fn markets_from(records: &[Value], common: &CommonCurrencies) -> Vec<Market> {
    records
        .iter()
        .map(|raw| market_from(raw, common))
        .collect()
}

/// Converts one `assets` record.
pub fn currency_from(raw: &Value, common: &CommonCurrencies) -> Currency {
    let id = safe_string(raw, "symbol");
    let deposit_ok = safe_string(raw, "depositStatus").as_deref() == Some(STATUS_OK);
    let withdrawal_ok = safe_string(raw, "withdrawalStatus").as_deref() == Some(STATUS_OK);

    Currency {
        code: common.safe_code(id.as_deref()),
        id,
        name: safe_string(raw, "name"),
        active: deposit_ok && withdrawal_ok,
        fee: safe_float(raw, "withdrawalFee"),
        precision: safe_count(raw, "decimals"),
        limits: CurrencyLimits {
            withdraw: MinMax::min_only(safe_float(raw, "withdrawalMinAmount")),
            ..CurrencyLimits::default()
        },
        info: raw.clone(),
    }
}

/// Builds the code-keyed currency map from an `assets` response.
///
/// Records without an asset symbol have no key to file them under; they are
/// skipped with a warning and the rest of the listing is kept.
///
/// # Errors
///
/// Returns `DuplicateCurrencyCode` when two records share a code under
/// [`CodeCollisionPolicy::Reject`].
pub fn currencies_from(
    records: &[Value],
    common: &CommonCurrencies,
    policy: CodeCollisionPolicy,
) -> Result<CurrencyMap, ExchangeError> {
    let mut currencies = CurrencyMap::new();
    let mut skipped = 0_usize;

    for (index, raw) in records.iter().enumerate() {
        let currency = currency_from(raw, common);
        let Some(code) = currency.code.clone() else {
            warn!(index, "skipping asset record without a symbol");
            skipped += 1;
            continue;
        };
        let incoming_id = currency.id.clone();

        let displaced = currencies
            .insert(code.clone(), currency, policy)
            .map_err(|collision| ExchangeError::duplicate_currency_code(&collision))?;

        if let Some(displaced) = displaced {
            let kept_id = currencies.get(&code).and_then(|kept| kept.id.clone());
            warn!(
                code = %code,
                kept = kept_id.as_deref().unwrap_or("<unknown>"),
                displaced = displaced.id.as_deref().unwrap_or("<unknown>"),
                incoming = incoming_id.as_deref().unwrap_or("<unknown>"),
                policy = %policy,
                "currency code collision resolved"
            );
        }
    }

    if skipped > 0 {
        warn!(
            skipped,
            kept = currencies.len(),
            "asset records without a symbol were skipped"
        );
    }

    Ok(currencies)
}
