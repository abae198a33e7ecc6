//! AI request dispatcher
//!
//! Admission pipeline for one `/ai` invocation: validate the selector,
//! charge the AI rate window, check availability, acknowledge, invoke, and
//! fragment the reply for the transport's message cap. Each step before the
//! acknowledgment is a short-circuit that produces exactly one notice chunk
//! and touches neither the transport nor the network.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Acknowledger seam so slash and text invocations share the pipeline
//! - 1.0.0: Initial release

use anyhow::Result;
use async_trait::async_trait;
use log::{error, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::backend::AiBackend;
use super::registry::BackendRegistry;
use crate::core::response::chunk_text;
use crate::features::rate_limiting::RateGuard;

/// One validated AI invocation. Immutable once constructed.
pub struct AiRequest {
    pub user_id: String,
    pub selector: String,
    pub prompt: String,
}

/// Transport seam for the deferred acknowledgment sent once a request is
/// admitted and before the (unbounded-latency) backend call begins.
#[async_trait]
pub trait Acknowledger: Send + Sync {
    async fn defer(&self) -> Result<()>;
}

pub struct Dispatcher {
    registry: Arc<BackendRegistry>,
    guard: Arc<RateGuard>,
    chunk_size: usize,
}

impl Dispatcher {
    pub fn new(registry: Arc<BackendRegistry>, guard: Arc<RateGuard>, chunk_size: usize) -> Self {
        Dispatcher {
            registry,
            guard,
            chunk_size,
        }
    }

    /// Run one request through the pipeline and return the reply chunks in
    /// delivery order.
    ///
    /// The admission check completes before the first await, so concurrent
    /// events never interleave with a half-finished window update. A failed
    /// backend call does not refund the admission slot.
    pub async fn handle(&self, request: &AiRequest, ack: &dyn Acknowledger) -> Vec<String> {
        let request_id = Uuid::new_v4();

        let Some(backend) = self.registry.resolve(&request.selector) else {
            info!(
                "[{request_id}] Rejected unknown backend selector '{}' from user {}",
                request.selector, request.user_id
            );
            return vec![format!(
                "❌ Invalid AI model `{}`. Use {}.",
                request.selector,
                self.selector_list()
            )];
        };

        if !self.guard.admit_ai(&request.user_id) {
            info!(
                "[{request_id}] AI rate limit hit | user: {} | backend: {}",
                request.user_id,
                backend.name()
            );
            return vec![
                "🚫 You're making too many AI requests. Please wait a minute.".to_string(),
            ];
        }

        if !backend.is_available() {
            return vec![format!(
                "❌ {} is not available (API key missing).",
                backend.name()
            )];
        }

        if let Err(e) = ack.defer().await {
            // The reply path will fail loudly if the transport is truly gone
            warn!("[{request_id}] Failed to send deferred acknowledgment: {e}");
        }

        info!(
            "[{request_id}] Invoking {} | user: {} | prompt: {} chars",
            backend.name(),
            request.user_id,
            request.prompt.len()
        );

        match backend.invoke(&request.prompt).await {
            Ok(text) => {
                info!(
                    "[{request_id}] {} responded | {} chars",
                    backend.name(),
                    text.len()
                );
                self.chunk_reply(backend.name(), &text)
            }
            Err(e) => {
                error!(
                    "[{request_id}] {} request failed: {}",
                    backend.name(),
                    e.diagnostic()
                );
                vec![format!(
                    "⚠️ Error communicating with {}: {}",
                    backend.name(),
                    e.diagnostic()
                )]
            }
        }
    }

    /// Fixed-size fragments, provider label on the first fragment only.
    fn chunk_reply(&self, backend_name: &str, text: &str) -> Vec<String> {
        let mut chunks = chunk_text(text, self.chunk_size);
        if let Some(first) = chunks.first_mut() {
            *first = format!("🤖 **{backend_name}**: {first}");
        }
        chunks
    }

    fn selector_list(&self) -> String {
        self.registry
            .selectors()
            .iter()
            .map(|s| format!("`{s}`"))
            .collect::<Vec<_>>()
            .join(" or ")
    }
}
