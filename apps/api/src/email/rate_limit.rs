//! Request limiting keyed by client address.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited { retry_after: Duration },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed)
    }
}

/// Carried in `AppState` as `Arc<dyn RateLimiter>`.
pub trait RateLimiter: Send + Sync {
    fn check(&self, key: &str) -> RateDecision;
}

/// GCRA limiter per client key: a burst of `max_requests`, refilled evenly
/// so that a full burst is available again after `window`.
pub struct ClientRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    clock: DefaultClock,
}

impl ClientRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Result<Self> {
        let burst = NonZeroU32::new(max_requests)
            .context("EMAIL_RATE_LIMIT_MAX must be at least 1")?;
        let quota = Quota::with_period(window / max_requests)
            .context("EMAIL_RATE_LIMIT_WINDOW_SECS must be at least 1")?
            .allow_burst(burst);

        Ok(Self {
            limiter: DefaultKeyedRateLimiter::keyed(quota),
            clock: DefaultClock::default(),
        })
    }

    /// Forgets keys whose state has fully replenished. Returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let before = self.limiter.len();
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        before.saturating_sub(self.limiter.len())
    }

    pub fn tracked_keys(&self) -> usize {
        self.limiter.len()
    }
}

impl RateLimiter for ClientRateLimiter {
    fn check(&self, key: &str) -> RateDecision {
        match self.limiter.check_key(&key.to_string()) {
            Ok(()) => RateDecision::Allowed,
            Err(not_until) => RateDecision::Limited {
                retry_after: not_until.wait_time_from(self.clock.now()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_burst_then_blocks() {
        let limiter = ClientRateLimiter::new(5, Duration::from_secs(60)).unwrap();
        for _ in 0..5 {
            assert_eq!(limiter.check("10.0.0.1"), RateDecision::Allowed);
        }
        assert!(!limiter.check("10.0.0.1").is_allowed());
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = ClientRateLimiter::new(1, Duration::from_secs(60)).unwrap();
        assert!(limiter.check("a").is_allowed());
        assert!(limiter.check("b").is_allowed());
        assert!(!limiter.check("a").is_allowed());
        assert_eq!(limiter.tracked_keys(), 2);
    }

    #[test]
    fn test_limited_reports_wait_within_refill_period() {
        let limiter = ClientRateLimiter::new(2, Duration::from_secs(60)).unwrap();
        limiter.check("a");
        limiter.check("a");
        let RateDecision::Limited { retry_after } = limiter.check("a") else {
            panic!("third request should be limited");
        };
        // One slot refills every 30 seconds.
        assert!(retry_after > Duration::from_secs(25));
        assert!(retry_after <= Duration::from_secs(30));
    }

    #[test]
    fn test_capacity_returns_after_window() {
        let limiter = ClientRateLimiter::new(1, Duration::from_millis(50)).unwrap();
        assert!(limiter.check("a").is_allowed());
        assert!(!limiter.check("a").is_allowed());
        std::thread::sleep(Duration::from_millis(80));
        assert!(limiter.check("a").is_allowed());
    }

    #[test]
    fn test_purge_drops_replenished_keys() {
        let limiter = ClientRateLimiter::new(1, Duration::from_millis(50)).unwrap();
        limiter.check("old");
        std::thread::sleep(Duration::from_millis(80));
        limiter.check("new");
        assert_eq!(limiter.purge_expired(), 1);
        assert_eq!(limiter.tracked_keys(), 1);
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        assert!(ClientRateLimiter::new(0, Duration::from_secs(60)).is_err());
        assert!(ClientRateLimiter::new(5, Duration::ZERO).is_err());
    }
}
