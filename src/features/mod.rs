//! # Features Layer
//!
//! Feature modules: audit relay, AI backends and dispatch, rate limiting.

pub mod ai;
pub mod audit;
pub mod rate_limiting;

pub use ai::{AiBackend, AiRequest, BackendError, BackendRegistry, Dispatcher};
pub use rate_limiting::{RateGuard, RateLimiter};
