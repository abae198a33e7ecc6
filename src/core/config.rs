//! # Configuration
//!
//! Environment-driven configuration for the sentinel bot.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add rate-limit and chunking knobs
//! - 1.0.0: Initial release with token and model settings

use crate::core::response::MESSAGE_LIMIT;
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Runtime configuration, loaded once at startup.
///
/// AI credentials are optional: a missing key marks that backend unavailable
/// for the process lifetime, it is never a startup error.
#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    /// Guild-scoped command registration for development (instant updates).
    /// Global registration when unset.
    pub discord_guild_id: Option<String>,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub openai_model: String,
    pub gemini_model: String,
    pub log_level: String,
    /// Anti-spam window applied to every inbound message.
    pub flood_window_secs: u64,
    pub flood_limit: usize,
    /// Throttle window applied to AI invocations only.
    pub ai_window_secs: u64,
    pub ai_limit: usize,
    /// Reply fragment budget, kept under Discord's 2000-character cap.
    pub max_chunk_size: usize,
    pub max_output_tokens: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let discord_token =
            env::var("DISCORD_BOT_TOKEN").context("DISCORD_BOT_TOKEN not found in environment")?;

        Ok(Config {
            discord_token,
            discord_guild_id: env::var("DISCORD_GUILD_ID").ok(),
            openai_api_key: non_empty(env::var("OPENAI_API_KEY").ok()),
            gemini_api_key: non_empty(env::var("GEMINI_API_KEY").ok()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            flood_window_secs: parse_or("SPAM_TIME_WINDOW", 10),
            flood_limit: parse_or("SPAM_MESSAGE_LIMIT", 5),
            ai_window_secs: parse_or("AI_TIME_WINDOW", 60),
            ai_limit: parse_or("AI_REQUEST_LIMIT", 3),
            // The chunk budget can never exceed the transport's hard cap
            max_chunk_size: parse_or("MAX_CHUNK_SIZE", 1900).min(MESSAGE_LIMIT),
            max_output_tokens: parse_or("MAX_OUTPUT_TOKENS", 1000),
        })
    }

    pub fn flood_window(&self) -> Duration {
        Duration::from_secs(self.flood_window_secs)
    }

    pub fn ai_window(&self) -> Duration {
        Duration::from_secs(self.ai_window_secs)
    }
}

/// Treat empty credential strings the same as unset ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a numeric knob, falling back to the default on absence or garbage.
fn parse_or<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_filters_blank() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(
            non_empty(Some("sk-abc".to_string())),
            Some("sk-abc".to_string())
        );
    }

    #[test]
    fn test_parse_or_falls_back() {
        // Key that should never exist in the test environment
        assert_eq!(parse_or("SENTINEL_TEST_MISSING_KNOB", 42usize), 42);
    }
}
