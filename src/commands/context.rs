//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::sync::Arc;
use std::time::Instant;

use crate::core::Config;
use crate::features::ai::{BackendRegistry, Dispatcher};
use crate::features::rate_limiting::RateGuard;

/// Services shared by every command handler: the backend registry for
/// availability display, the dispatcher for AI invocations, the rate guard,
/// and the loaded configuration.
#[derive(Clone)]
pub struct CommandContext {
    pub registry: Arc<BackendRegistry>,
    pub dispatcher: Arc<Dispatcher>,
    pub rate_guard: Arc<RateGuard>,
    pub config: Config,
    pub start_time: Instant,
}

impl CommandContext {
    pub fn new(
        registry: Arc<BackendRegistry>,
        dispatcher: Arc<Dispatcher>,
        rate_guard: Arc<RateGuard>,
        config: Config,
    ) -> Self {
        CommandContext {
            registry,
            dispatcher,
            rate_guard,
            config,
            start_time: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_is_clone() {
        // Shared across handlers behind Arc, and cloneable for spawned tasks
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }
}
