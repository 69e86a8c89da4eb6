//! Chat completion request/response types
//!
//! Messages follow the role-tagged chat transcript used by OpenAI-compatible
//! endpoints: an assistant message may carry tool calls, and a tool message
//! points back at the call it answers through `tool_call_id`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Everything needed for one completion call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Full transcript, system instruction first
    pub messages: Vec<Message>,

    /// Tool catalog; empty means the model may not call tools
    pub tools: Vec<ToolDefinition>,

    pub max_tokens: u32,
}

/// One message in a conversation transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    fn with_role(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        debug!("Message::system: called");
        Self::with_role(Role::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        debug!("Message::user: called");
        Self::with_role(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        debug!("Message::assistant: called");
        Self::with_role(Role::Assistant, text)
    }

    /// Assistant message recording one tool call
    pub fn assistant_tool_call(text: impl Into<String>, call: ToolCall) -> Self {
        debug!(tool_id = %call.id, "Message::assistant_tool_call: called");
        Self {
            tool_calls: vec![call],
            ..Self::with_role(Role::Assistant, text)
        }
    }

    /// Tool-role message carrying the textual result of a call
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        let tool_call_id = tool_call_id.into();
        debug!(%tool_call_id, "Message::tool_result: called");
        Self {
            tool_call_id: Some(tool_call_id),
            ..Self::with_role(Role::Tool, content)
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

/// Response from a completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Text content (if any)
    pub content: Option<String>,

    /// Tool calls requested by the model, already normalized
    pub tool_calls: Vec<ToolCall>,

    pub stop_reason: StopReason,

    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Plain text answer with no tool calls
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    /// Response that only requests tools
    pub fn with_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: None,
            tool_calls,
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage::default(),
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// A tool call requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// Always a JSON object
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    ToolUse,
    MaxTokens,
}

impl StopReason {
    /// Parse an OpenAI `finish_reason`
    pub fn from_openai(reason: Option<&str>) -> Self {
        match reason {
            Some("tool_calls") => StopReason::ToolUse,
            Some("length") => StopReason::MaxTokens,
            _ => StopReason::EndTurn,
        }
    }
}

/// Token counts reported by the server; zero when it reports none
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl std::ops::AddAssign for TokenUsage {
    fn add_assign(&mut self, other: Self) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

/// Tool catalog entry exposed to the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments object
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        let name = name.into();
        debug!(%name, "ToolDefinition::new: called");
        Self {
            name,
            description: description.into(),
            parameters,
        }
    }

    /// Convert to the OpenAI `tools` array element
    pub fn to_openai_schema(&self) -> Value {
        debug!(%self.name, "ToolDefinition::to_openai_schema: called");
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::system("s").role, Role::System);
        assert_eq!(Message::user("Hello").content, "Hello");

        let call = ToolCall::new("call_1", "list_directory", serde_json::json!({}));
        let msg = Message::assistant_tool_call("", call.clone());
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.tool_calls, vec![call]);

        let msg = Message::tool_result("call_1", "Directory '.' is empty.");
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn test_message_serialization_skips_empty_fields() {
        let value = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(value, serde_json::json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn test_stop_reason_from_openai() {
        assert_eq!(StopReason::from_openai(Some("stop")), StopReason::EndTurn);
        assert_eq!(StopReason::from_openai(Some("tool_calls")), StopReason::ToolUse);
        assert_eq!(StopReason::from_openai(Some("length")), StopReason::MaxTokens);
        assert_eq!(StopReason::from_openai(None), StopReason::EndTurn);
    }

    #[test]
    fn test_tool_definition_to_openai_schema() {
        let tool = ToolDefinition::new(
            "get_file_content",
            "Read a file",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "file_path": { "type": "string" }
                },
                "required": ["file_path"]
            }),
        );

        let schema = tool.to_openai_schema();
        assert_eq!(schema["type"], "function");
        assert_eq!(schema["function"]["name"], "get_file_content");
        assert_eq!(schema["function"]["description"], "Read a file");
        assert!(schema["function"]["parameters"].is_object());
    }

    #[test]
    fn test_completion_response_helpers() {
        assert!(!CompletionResponse::text("done").has_tool_calls());

        let resp = CompletionResponse::with_tool_calls(vec![ToolCall::new("a", "b", serde_json::json!({}))]);
        assert!(resp.has_tool_calls());
        assert_eq!(resp.stop_reason, StopReason::ToolUse);
        assert!(resp.content.is_none());
    }
}
