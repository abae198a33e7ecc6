//! Sliding-window rate limiter
//!
//! Per-key timestamp windows backed by DashMap for thread-safe concurrent
//! access. State is in-memory only and intentionally ephemeral: a restart
//! resets every window.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Idle-key eviction
//! - 1.0.0: Initial release

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Keys with no activity for this many window-lengths are dropped by
/// `evict_idle`.
const IDLE_EVICTION_WINDOWS: u32 = 3;

/// Sliding-window admission counter.
///
/// Every call records its timestamp, rejected or not: with `limit = N`, the
/// `(N+1)`-th event inside the window is the first rejected one, and a
/// sustained flood keeps the window full rather than backing off. Only
/// time-based expiry shrinks the count; no tokens are refunded.
pub struct RateLimiter {
    windows: DashMap<String, Vec<Instant>>,
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        RateLimiter {
            windows: DashMap::new(),
            limit,
            window,
        }
    }

    /// Admit or reject one event for `key`. Returns true when the event is
    /// allowed.
    ///
    /// Synchronous and non-suspending: the prune-append-count sequence runs
    /// to completion while the map entry is held, so concurrent event
    /// handling never observes a half-updated window.
    pub fn admit(&self, key: &str) -> bool {
        self.admit_at(key, Instant::now())
    }

    /// Clock-injected admission check, used by `admit` and by tests.
    pub fn admit_at(&self, key: &str, now: Instant) -> bool {
        let mut entry = self.windows.entry(key.to_string()).or_default();

        entry.retain(|&time| now.duration_since(time) < self.window);
        entry.push(now);

        entry.len() <= self.limit
    }

    /// Drop keys whose newest timestamp has aged past several window-lengths.
    ///
    /// Active keys are untouched: an evicted window was already fully
    /// expired, so admission behavior is unchanged.
    pub fn evict_idle(&self) {
        self.evict_idle_at(Instant::now());
    }

    pub fn evict_idle_at(&self, now: Instant) {
        let horizon = self.window * IDLE_EVICTION_WINDOWS;
        self.windows.retain(|_, times| {
            times
                .last()
                .map_or(false, |&newest| now.duration_since(newest) < horizon)
        });
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(10);

    fn at(base: Instant, secs: u64) -> Instant {
        base + Duration::from_secs(secs)
    }

    #[test]
    fn test_allows_under_limit() {
        let limiter = RateLimiter::new(3, WINDOW);
        let base = Instant::now();

        assert!(limiter.admit_at("user1", at(base, 0)));
        assert!(limiter.admit_at("user1", at(base, 1)));
        assert!(limiter.admit_at("user1", at(base, 2)));
    }

    #[test]
    fn test_rejects_over_limit() {
        let limiter = RateLimiter::new(2, WINDOW);
        let base = Instant::now();

        assert!(limiter.admit_at("user1", at(base, 0)));
        assert!(limiter.admit_at("user1", at(base, 1)));
        assert!(!limiter.admit_at("user1", at(base, 2)));
    }

    #[test]
    fn test_window_resets_after_gap() {
        let limiter = RateLimiter::new(1, WINDOW);
        let base = Instant::now();

        assert!(limiter.admit_at("user1", at(base, 0)));
        assert!(!limiter.admit_at("user1", at(base, 1)));

        // Gap >= window since the last event: full reset
        assert!(limiter.admit_at("user1", at(base, 12)));
    }

    #[test]
    fn test_rejected_calls_still_recorded() {
        let limiter = RateLimiter::new(1, WINDOW);
        let base = Instant::now();

        assert!(limiter.admit_at("user1", at(base, 0)));
        // Rejected, but its timestamp lands in the window anyway
        assert!(!limiter.admit_at("user1", at(base, 5)));

        // 12s after the first event the window would be clear if rejections
        // were not recorded; the t+5 rejection keeps it full.
        assert!(!limiter.admit_at("user1", at(base, 12)));

        // Only a gap past the newest recorded event clears it
        assert!(limiter.admit_at("user1", at(base, 23)));
    }

    #[test]
    fn test_per_key_independence() {
        let limiter = RateLimiter::new(1, WINDOW);
        let base = Instant::now();

        assert!(limiter.admit_at("user1", at(base, 0)));
        assert!(limiter.admit_at("user2", at(base, 0)));
        assert!(!limiter.admit_at("user1", at(base, 1)));
        assert!(!limiter.admit_at("user2", at(base, 1)));
    }

    #[test]
    fn test_first_seen_key_never_fails() {
        let limiter = RateLimiter::new(5, WINDOW);
        assert!(limiter.admit(""));
        assert!(limiter.admit("brand-new-key"));
    }

    #[test]
    fn test_evict_idle_drops_stale_keys_only() {
        let limiter = RateLimiter::new(2, WINDOW);
        let base = Instant::now();

        limiter.admit_at("idle", at(base, 0));
        limiter.admit_at("active", at(base, 29));
        assert_eq!(limiter.tracked_keys(), 2);

        // 31s in: "idle" is past 3 windows, "active" is not
        limiter.evict_idle_at(at(base, 31));
        assert_eq!(limiter.tracked_keys(), 1);

        // Admission behavior for the surviving key is unchanged
        assert!(limiter.admit_at("active", at(base, 32)));
        assert!(!limiter.admit_at("active", at(base, 33)));
    }

    #[test]
    fn test_evicted_key_starts_fresh() {
        let limiter = RateLimiter::new(1, WINDOW);
        let base = Instant::now();

        limiter.admit_at("user1", at(base, 0));
        limiter.evict_idle_at(at(base, 40));
        assert_eq!(limiter.tracked_keys(), 0);

        assert!(limiter.admit_at("user1", at(base, 41)));
    }
}
