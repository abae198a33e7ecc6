//! Backend registry
//!
//! Selector → backend lookup, built once at startup from the configured
//! credentials and read-only thereafter.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use std::collections::HashMap;
use std::sync::Arc;

use super::backend::AiBackend;
use super::chatgpt::ChatGptBackend;
use super::gemini::GeminiBackend;
use crate::core::Config;

pub struct BackendRegistry {
    backends: HashMap<&'static str, Arc<dyn AiBackend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        BackendRegistry {
            backends: HashMap::new(),
        }
    }

    /// Build the two stock backends from config. Missing credentials leave
    /// the backend registered but unavailable, so selector validation and
    /// availability stay distinct refusals.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ChatGptBackend::new(
            config.openai_api_key.as_deref(),
            config.openai_model.clone(),
            config.max_output_tokens,
        )));
        registry.register(Arc::new(GeminiBackend::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.max_output_tokens,
        )));
        registry
    }

    pub fn register(&mut self, backend: Arc<dyn AiBackend>) {
        self.backends.insert(backend.selector(), backend);
    }

    /// Case-insensitive selector lookup.
    pub fn resolve(&self, selector: &str) -> Option<Arc<dyn AiBackend>> {
        self.backends
            .get(selector.to_lowercase().as_str())
            .cloned()
    }

    /// Registered selectors, sorted for stable display.
    pub fn selectors(&self) -> Vec<&'static str> {
        let mut selectors: Vec<&'static str> = self.backends.keys().copied().collect();
        selectors.sort_unstable();
        selectors
    }

    pub fn backends(&self) -> impl Iterator<Item = &Arc<dyn AiBackend>> {
        self.backends.values()
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}
