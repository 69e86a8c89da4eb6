//! ToolOrchestrator - one conversational turn with at most one round of tools
//!
//! `MODEL_CALL_1` goes out with the tool catalog attached. If the model asks
//! for tools, each call is run in request order and its result appended to
//! the transcript, then `MODEL_CALL_2` goes out with no catalog so the model
//! must answer in text.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, Message, StopReason, TokenUsage, ToolCall};
use crate::tools::{ToolInvoker, ToolResult};

/// Default response budget per completion call
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Outcome of one turn
#[derive(Debug, Clone)]
pub struct Turn {
    /// Final answer text; empty when the model returned none
    pub answer: String,
    /// Messages sent on the last completion call, system instruction first
    pub transcript: Vec<Message>,
    /// Tool calls executed during the turn, in order
    pub tool_calls: Vec<ToolCall>,
    /// Tokens summed over every completion call of the turn
    pub usage: TokenUsage,
    /// The answer was cut off by the response budget
    pub truncated: bool,
}

/// Drives the completion service and the tool invoker for single turns
pub struct ToolOrchestrator {
    llm: Arc<dyn LlmClient>,
    tools: Arc<dyn ToolInvoker>,
    system_prompt: String,
    max_tokens: u32,
}

impl ToolOrchestrator {
    pub fn new(llm: Arc<dyn LlmClient>, tools: Arc<dyn ToolInvoker>, system_prompt: impl Into<String>) -> Self {
        Self {
            llm,
            tools,
            system_prompt: system_prompt.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Run one turn and return only the answer
    pub async fn ask(&self, user_input: &str) -> Result<String, LlmError> {
        Ok(self.run_turn(user_input).await?.answer)
    }

    /// Run one turn: tool failures are fed back to the model, completion
    /// failures end the turn with an error
    pub async fn run_turn(&self, user_input: &str) -> Result<Turn, LlmError> {
        debug!(input_len = user_input.len(), "ToolOrchestrator::run_turn: called");
        let mut messages = vec![Message::system(&self.system_prompt), Message::user(user_input)];

        let first = self.complete(&messages, true).await?;
        let mut usage = first.usage;
        if !first.has_tool_calls() {
            debug!("ToolOrchestrator::run_turn: no tool calls, answering directly");
            return Ok(Turn {
                truncated: is_truncated(&first),
                answer: first.content.unwrap_or_default(),
                transcript: messages,
                tool_calls: Vec::new(),
                usage,
            });
        }

        info!(count = first.tool_calls.len(), "ToolOrchestrator::run_turn: executing tool calls");
        let mut preamble = first.content.unwrap_or_default();
        for call in &first.tool_calls {
            let result = self.tools.invoke(call).await;
            log_result(call, &result);
            messages.push(Message::assistant_tool_call(std::mem::take(&mut preamble), call.clone()));
            messages.push(Message::tool_result(call.id.clone(), result.text()));
        }

        let second = self.complete(&messages, false).await?;
        usage += second.usage;
        if second.has_tool_calls() {
            debug!(
                ignored = second.tool_calls.len(),
                "ToolOrchestrator::run_turn: ignoring tool calls on final completion"
            );
        }

        Ok(Turn {
            truncated: is_truncated(&second),
            answer: second.content.unwrap_or_default(),
            transcript: messages,
            tool_calls: first.tool_calls,
            usage,
        })
    }

    async fn complete(&self, messages: &[Message], with_tools: bool) -> Result<CompletionResponse, LlmError> {
        let tools = if with_tools {
            self.tools.catalog().to_vec()
        } else {
            Vec::new()
        };
        debug!(messages = messages.len(), tools = tools.len(), "ToolOrchestrator::complete: called");

        let request = CompletionRequest {
            messages: messages.to_vec(),
            tools,
            max_tokens: self.max_tokens,
        };
        self.llm.complete(request).await
    }
}

fn is_truncated(response: &CompletionResponse) -> bool {
    let truncated = response.stop_reason == StopReason::MaxTokens;
    if truncated {
        warn!("ToolOrchestrator::run_turn: answer hit the max_tokens budget");
    }
    truncated
}

fn log_result(call: &ToolCall, result: &ToolResult) {
    if result.is_error {
        info!(tool_name = %call.name, tool_id = %call.id, "tool call failed, reporting error to model");
    } else {
        debug!(tool_name = %call.name, tool_id = %call.id, "tool call succeeded");
    }
}
