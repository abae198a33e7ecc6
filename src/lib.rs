// Core layer - configuration, chunking, embed construction
pub mod core;

// Features layer - audit relay, AI backends, rate limiting
pub mod features;

// Application layer
pub mod command_handler;
pub mod commands;

// Re-export core config
pub use core::Config;

// Re-export feature items
pub use features::{
    // AI
    AiBackend, AiRequest, BackendError, BackendRegistry, Dispatcher,
    // Rate limiting
    RateGuard, RateLimiter,
};
