//! # Canonical Models
//!
//! Provider-agnostic entity shapes every exchange adapter produces.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Market`] | Tradable pair with precision and order limits |
//! | [`Currency`] | Asset with deposit/withdrawal state and fee |
//! | [`CurrencyMap`] | Code-keyed currencies with an explicit collision policy |
//! | [`CommonCurrencies`] | Provider id to canonical code aliasing |
//! | [`MinMax`] | Optional lower/upper bound pair |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! ## Unknown is not zero
//!
//! Every numeric field the provider may omit is an `Option`. A field the
//! provider does not report stays `None` and serializes as `null`; it is
//! never filled with `0`, and `precision.amount` is never inferred from
//! other fields.
//!
//! Each entity keeps the untouched provider record under `info`.

mod code;
mod currency;
mod market;
mod timestamp;

pub use code::CommonCurrencies;
pub use currency::{CodeCollision, CodeCollisionPolicy, Currency, CurrencyLimits, CurrencyMap};
pub use market::{Market, MarketLimits, MarketPrecision, MinMax};
pub use timestamp::UtcDateTime;
