//! # Rate Limiting Feature
//!
//! Sliding-window admission control for inbound messages and AI requests.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add RateGuard pairing the flood and AI limiters
//! - 1.0.0: Initial release with per-user sliding window rate limiting

pub mod guard;
pub mod limiter;

pub use guard::RateGuard;
pub use limiter::RateLimiter;
