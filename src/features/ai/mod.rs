//! # AI Feature
//!
//! Interchangeable text-generation backends behind one capability trait,
//! plus the dispatcher that admits, invokes, and fragments replies.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

pub mod backend;
pub mod chatgpt;
pub mod dispatcher;
pub mod gemini;
pub mod registry;

pub use backend::{AiBackend, BackendError};
pub use chatgpt::ChatGptBackend;
pub use dispatcher::{Acknowledger, AiRequest, Dispatcher};
pub use gemini::GeminiBackend;
pub use registry::BackendRegistry;
