//! Conversation orchestration

mod orchestrator;
pub mod prompt;

pub use orchestrator::{DEFAULT_MAX_TOKENS, ToolOrchestrator, Turn};
pub use prompt::render_system_prompt;
