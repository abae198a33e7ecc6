//! Backend capability trait and provider error taxonomy
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use crate::core::response::truncate;
use async_trait::async_trait;
use thiserror::Error;

/// Cap on user-visible provider diagnostics.
const DIAGNOSTIC_LIMIT: usize = 100;

/// Errors surfaced by a provider call. Per-request and recoverable: one
/// failed invocation never affects other requests or limiter state.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Network-level failure or unclassified provider error
    #[error("transport failure: {0}")]
    Transport(String),
    /// Credential rejected by the provider
    #[error("authentication rejected: {0}")]
    Auth(String),
    /// Provider-side rate limit or exhausted quota
    #[error("provider rate limit: {0}")]
    RateLimited(String),
    /// Response arrived but did not carry usable text
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl BackendError {
    /// Short diagnostic suitable for a user-visible notice.
    pub fn diagnostic(&self) -> String {
        truncate(&self.to_string(), DIAGNOSTIC_LIMIT)
    }

    /// Classify an opaque provider error message by its well-known markers.
    ///
    /// The openai crate surfaces API failures as display-only errors, so
    /// auth and quota problems are recognized from the message text.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if lower.contains("401")
            || lower.contains("invalid_api_key")
            || lower.contains("incorrect api key")
            || lower.contains("unauthorized")
        {
            BackendError::Auth(message)
        } else if lower.contains("429")
            || lower.contains("insufficient_quota")
            || lower.contains("rate limit")
        {
            BackendError::RateLimited(message)
        } else {
            BackendError::Transport(message)
        }
    }
}

/// One interchangeable text-generation provider.
///
/// The dispatcher only ever sees this trait: adding a provider means one
/// implementation plus one registry entry, no dispatcher changes.
#[async_trait]
pub trait AiBackend: Send + Sync {
    /// Display name used in reply prefixes and notices.
    fn name(&self) -> &'static str;

    /// Lower-case selector users pass to the `/ai` command.
    fn selector(&self) -> &'static str;

    /// Credential presence, computed once at startup and cached. A key that
    /// goes bad later surfaces as a runtime `BackendError`, not as
    /// unavailability.
    fn is_available(&self) -> bool;

    /// Single-turn generation for one prompt.
    async fn invoke(&self, prompt: &str) -> Result<String, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth_markers() {
        assert!(matches!(
            BackendError::classify("HTTP 401 Unauthorized"),
            BackendError::Auth(_)
        ));
        assert!(matches!(
            BackendError::classify("error code: invalid_api_key"),
            BackendError::Auth(_)
        ));
    }

    #[test]
    fn test_classify_rate_limit_markers() {
        assert!(matches!(
            BackendError::classify("status 429 too many requests"),
            BackendError::RateLimited(_)
        ));
        assert!(matches!(
            BackendError::classify("insufficient_quota: billing hard limit"),
            BackendError::RateLimited(_)
        ));
    }

    #[test]
    fn test_classify_defaults_to_transport() {
        assert!(matches!(
            BackendError::classify("connection reset by peer"),
            BackendError::Transport(_)
        ));
    }

    #[test]
    fn test_diagnostic_is_bounded() {
        let err = BackendError::Transport("x".repeat(500));
        let diag = err.diagnostic();
        assert!(diag.len() <= DIAGNOSTIC_LIMIT);
        assert!(diag.ends_with("..."));
    }

    #[test]
    fn test_diagnostic_keeps_short_messages() {
        let err = BackendError::Auth("key revoked".to_string());
        assert_eq!(err.diagnostic(), "authentication rejected: key revoked");
    }
}
