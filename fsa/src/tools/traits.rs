//! Tool trait definition

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::llm::{ToolCall, ToolDefinition};
use crate::sandbox::PathSandbox;

use super::{OperationResult, ToolError};

/// A read-only filesystem tool that can be called by the LLM
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the function name in LLM tool calls)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool against the sandbox
    async fn execute(&self, input: Value, sandbox: &PathSandbox) -> Result<OperationResult, ToolError>;
}

/// Anything that can publish a tool catalog and run tool calls
///
/// The local [`ToolExecutor`](super::ToolExecutor) is one implementation; a
/// client for tools served over another process boundary would be another.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    /// Catalog of every registered tool, stable for the invoker's lifetime
    fn catalog(&self) -> &[ToolDefinition];

    /// Run one tool call; failures come back as error results, never panics
    async fn invoke(&self, call: &ToolCall) -> ToolResult;
}

/// One piece of a tool result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    Text { text: String },
    Json { value: Value },
}

/// Result of a tool execution: text for the model plus a structured payload
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub content: Vec<ContentPart>,
    pub structured: Option<Value>,
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(text: impl Into<String>, structured: Value) -> Self {
        debug!("ToolResult::success: called");
        Self {
            content: vec![ContentPart::Text { text: text.into() }],
            structured: Some(structured),
            is_error: false,
        }
    }

    /// Create an error result
    pub fn error(text: impl Into<String>) -> Self {
        debug!("ToolResult::error: called");
        Self {
            content: vec![ContentPart::Text { text: text.into() }],
            structured: None,
            is_error: true,
        }
    }

    /// Text of all text parts, joined in order
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                ContentPart::Json { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
