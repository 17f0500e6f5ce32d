use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Paces outbound calls to one request per `interval`, with a small burst
/// allowance. A zero interval disables pacing.
#[derive(Clone)]
pub struct Throttle {
    limiter: Option<Arc<DirectRateLimiter>>,
    interval: Duration,
}

impl Throttle {
    pub fn new(interval: Duration, burst: u32) -> Self {
        let limiter = Quota::with_period(interval).map(|quota| {
            let burst = NonZeroU32::new(burst.max(1)).unwrap_or(NonZeroU32::MIN);
            Arc::new(RateLimiter::direct(quota.allow_burst(burst)))
        });
        Self { limiter, interval }
    }

    /// One request per `interval`, no burst.
    pub fn per_interval(interval: Duration) -> Self {
        Self::new(interval, 1)
    }

    pub fn disabled() -> Self {
        Self {
            limiter: None,
            interval: Duration::ZERO,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Takes a slot if one is free right now.
    pub fn try_acquire(&self) -> bool {
        match &self.limiter {
            Some(limiter) => limiter.check().is_ok(),
            None => true,
        }
    }

    /// Waits until a slot is free.
    pub async fn acquire(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("interval", &self.interval)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_immediate_call_is_refused() {
        let throttle = Throttle::per_interval(Duration::from_secs(60));
        assert!(throttle.try_acquire());
        assert!(!throttle.try_acquire());
    }

    #[test]
    fn burst_allows_several_immediate_calls() {
        let throttle = Throttle::new(Duration::from_secs(60), 3);
        assert!(throttle.try_acquire());
        assert!(throttle.try_acquire());
        assert!(throttle.try_acquire());
        assert!(!throttle.try_acquire());
    }

    #[test]
    fn zero_interval_disables_pacing() {
        let throttle = Throttle::per_interval(Duration::ZERO);
        assert!(!throttle.is_enabled());
        for _ in 0..100 {
            assert!(throttle.try_acquire());
        }
    }

    #[tokio::test]
    async fn acquire_returns_once_slot_frees() {
        let throttle = Throttle::per_interval(Duration::from_millis(5));
        throttle.acquire().await;
        throttle.acquire().await;
        assert_eq!(throttle.interval(), Duration::from_millis(5));
    }
}
