//! # Core Module
//!
//! Core configuration, response chunking, and embed construction for the
//! sentinel bot.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add embeds module with audit embed builder
//! - 1.0.0: Initial creation with config and response modules

pub mod config;
pub mod embeds;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use response::{chunk_text, truncate, MESSAGE_LIMIT};
