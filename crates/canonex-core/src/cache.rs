//! In-memory cache of normalized markets.
//!
//! Only canonical entities are cached. Prepared requests are never cached:
//! signatures are call specific.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::Market;

/// How a market lookup treats the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Serve a non-expired snapshot, otherwise fetch and store.
    #[default]
    Use,
    /// Always fetch and replace the snapshot.
    Refresh,
    /// Always fetch; leave the snapshot alone.
    Bypass,
}

#[derive(Debug)]
struct Snapshot {
    markets: Arc<Vec<Market>>,
    by_symbol: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
    loaded_at: Instant,
}

impl Snapshot {
    fn new(markets: Vec<Market>) -> Self {
        let mut by_symbol = HashMap::with_capacity(markets.len());
        let mut by_id = HashMap::with_capacity(markets.len());
        for (index, market) in markets.iter().enumerate() {
            if let Some(symbol) = &market.symbol {
                by_symbol.entry(symbol.clone()).or_insert(index);
            }
            if let Some(id) = &market.id {
                by_id.entry(id.clone()).or_insert(index);
            }
        }

        Self {
            markets: Arc::new(markets),
            by_symbol,
            by_id,
            loaded_at: Instant::now(),
        }
    }
}

/// Thread-safe market snapshot with a TTL.
///
/// Clones share the snapshot and the fill lock.
#[derive(Debug, Clone)]
pub struct MarketCache {
    inner: Arc<tokio::sync::RwLock<Option<Snapshot>>>,
    fill: Arc<tokio::sync::Mutex<()>>,
    ttl: Duration,
}

impl MarketCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(None)),
            fill: Arc::new(tokio::sync::Mutex::new(())),
            ttl,
        }
    }

    /// Markets rarely change; one hour matches typical listing cadence.
    pub fn with_default_ttl() -> Self {
        Self::new(Duration::from_secs(3_600))
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current snapshot if present and not expired.
    pub async fn markets(&self) -> Option<Arc<Vec<Market>>> {
        let guard = self.inner.read().await;
        guard
            .as_ref()
            .filter(|snapshot| snapshot.loaded_at.elapsed() <= self.ttl)
            .map(|snapshot| Arc::clone(&snapshot.markets))
    }

    /// Serializes snapshot fills. Holders should re-check [`Self::markets`]
    /// after acquiring it, since another task may have filled it meanwhile.
    pub async fn fill_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.fill.lock().await
    }

    /// Replaces the snapshot and returns the stored list.
    pub async fn store(&self, markets: Vec<Market>) -> Arc<Vec<Market>> {
        let snapshot = Snapshot::new(markets);
        let stored = Arc::clone(&snapshot.markets);
        *self.inner.write().await = Some(snapshot);
        stored
    }

    pub async fn by_symbol(&self, symbol: &str) -> Option<Market> {
        let guard = self.inner.read().await;
        let snapshot = guard.as_ref()?;
        let index = *snapshot.by_symbol.get(symbol)?;
        snapshot.markets.get(index).cloned()
    }

    pub async fn by_id(&self, id: &str) -> Option<Market> {
        let guard = self.inner.read().await;
        let snapshot = guard.as_ref()?;
        let index = *snapshot.by_id.get(id)?;
        snapshot.markets.get(index).cloned()
    }

    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }

    pub async fn is_loaded(&self) -> bool {
        self.inner.read().await.is_some()
    }
}

impl Default for MarketCache {
    fn default() -> Self {
        Self::with_default_ttl()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{MarketLimits, MarketPrecision};

    fn market(id: &str, base: &str, quote: &str) -> Market {
        Market {
            id: Some(id.to_owned()),
            symbol: Market::compose_symbol(Some(base), Some(quote)),
            base: Some(base.to_owned()),
            quote: Some(quote.to_owned()),
            base_id: Some(base.to_owned()),
            quote_id: Some(quote.to_owned()),
            active: true,
            precision: MarketPrecision::default(),
            limits: MarketLimits::default(),
            info: json!({ "market": id }),
        }
    }

    #[tokio::test]
    async fn indexes_by_symbol_and_id() {
        let cache = MarketCache::with_default_ttl();
        cache
            .store(vec![market("ADA-BTC", "ADA", "BTC"), market("BTC-EUR", "BTC", "EUR")])
            .await;

        let by_symbol = cache.by_symbol("BTC/EUR").await.expect("cached");
        assert_eq!(by_symbol.id.as_deref(), Some("BTC-EUR"));
        let by_id = cache.by_id("ADA-BTC").await.expect("cached");
        assert_eq!(by_id.symbol.as_deref(), Some("ADA/BTC"));
        assert!(cache.by_symbol("ETH/EUR").await.is_none());
    }

    #[tokio::test]
    async fn zero_ttl_snapshot_is_stale_immediately() {
        let cache = MarketCache::new(Duration::ZERO);
        cache.store(vec![market("ADA-BTC", "ADA", "BTC")]).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(cache.markets().await.is_none());
        assert!(cache.is_loaded().await);
    }

    #[tokio::test]
    async fn clones_share_the_fill_lock() {
        let cache = MarketCache::default();
        let shared = cache.clone();
        let _filling = cache.fill_lock().await;
        assert!(shared.fill.try_lock().is_err());
    }

    #[tokio::test]
    async fn clear_drops_snapshot() {
        let cache = MarketCache::default();
        cache.store(vec![market("ADA-BTC", "ADA", "BTC")]).await;
        cache.clear().await;
        assert!(!cache.is_loaded().await);
    }
}
