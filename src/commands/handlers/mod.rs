//! Command handlers, one module per command family

pub mod ai;
pub mod info;
pub mod logs;

pub use ai::AiCommandHandler;
pub use info::InfoHandler;
pub use logs::LogsHandler;
