//! Per-purpose limiter pair
//!
//! One explicitly owned component holding both sliding windows: the short
//! anti-spam window for raw message flow and the longer, tighter window for
//! AI invocations. The two never share state.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0

use super::limiter::RateLimiter;
use crate::core::Config;
use std::time::Duration;

pub struct RateGuard {
    flood: RateLimiter,
    ai: RateLimiter,
}

impl RateGuard {
    pub fn new(
        flood_limit: usize,
        flood_window: Duration,
        ai_limit: usize,
        ai_window: Duration,
    ) -> Self {
        RateGuard {
            flood: RateLimiter::new(flood_limit, flood_window),
            ai: RateLimiter::new(ai_limit, ai_window),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.flood_limit,
            config.flood_window(),
            config.ai_limit,
            config.ai_window(),
        )
    }

    /// Flood admission for one inbound message.
    pub fn admit_message(&self, user_id: &str) -> bool {
        self.flood.admit(user_id)
    }

    /// Throttle admission for one AI invocation.
    pub fn admit_ai(&self, user_id: &str) -> bool {
        self.ai.admit(user_id)
    }

    /// Sweep idle keys from both windows.
    pub fn evict_idle(&self) {
        self.flood.evict_idle();
        self.ai.evict_idle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purposes_do_not_share_state() {
        let guard = RateGuard::new(1, Duration::from_secs(10), 1, Duration::from_secs(60));

        // Exhaust the flood window for user1
        assert!(guard.admit_message("user1"));
        assert!(!guard.admit_message("user1"));

        // The AI window for the same user is untouched
        assert!(guard.admit_ai("user1"));
        assert!(!guard.admit_ai("user1"));
    }

    #[test]
    fn test_guard_keys_are_per_user() {
        let guard = RateGuard::new(1, Duration::from_secs(10), 1, Duration::from_secs(60));

        assert!(guard.admit_ai("user1"));
        assert!(guard.admit_ai("user2"));
        assert!(!guard.admit_ai("user1"));
    }
}
