//! Completion-service abstraction
//!
//! The model endpoint is a black box: a transcript plus an optional tool
//! catalog goes in, one message (possibly requesting tools) comes out.

use std::sync::Arc;

use tracing::debug;

mod client;
mod error;
pub mod mock;
mod normalize;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use normalize::normalize_tool_call;
pub use openai::OpenAIClient;
pub use types::{
    CompletionRequest, CompletionResponse, Message, Role, StopReason, TokenUsage, ToolCall, ToolDefinition,
};

use crate::config::LlmConfig;

/// Create the completion client described by the config
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(model = %config.model, base_url = %config.base_url, "create_client: called");
    Ok(Arc::new(OpenAIClient::from_config(config)?))
}
