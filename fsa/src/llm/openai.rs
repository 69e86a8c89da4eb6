//! OpenAI-compatible chat completions client
//!
//! Speaks `/v1/chat/completions`, which both OpenAI and Ollama serve. The
//! bearer header is only sent when an API key is configured, so a local
//! Ollama works without credentials.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::is_retryable_status;
use super::normalize::normalize_tool_call;
use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, Message, StopReason, TokenUsage};
use crate::config::LlmConfig;

/// Maximum number of retries for transient errors
const MAX_RETRIES: u32 = 3;

/// Initial backoff delay for retries
const INITIAL_BACKOFF_MS: u64 = 1000;

pub struct OpenAIClient {
    model: String,
    api_key: Option<String>,
    base_url: String,
    http: Client,
    max_tokens: u32,
    timeout: Duration,
    initial_backoff: Duration,
}

impl OpenAIClient {
    /// Create a client from the `llm` config section
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(?config, "OpenAIClient::from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key: config.api_key(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            max_tokens: config.max_tokens,
            timeout,
            initial_backoff: Duration::from_millis(INITIAL_BACKOFF_MS),
        })
    }

    /// Build the request body for the chat completions endpoint
    fn build_request_body(&self, request: &CompletionRequest) -> Value {
        debug!(%self.model, %request.max_tokens, "build_request_body: called");

        let messages: Vec<Value> = request.messages.iter().map(convert_message).collect();
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": request.max_tokens.min(self.max_tokens),
        });

        if !request.tools.is_empty() {
            debug!(tool_count = request.tools.len(), "build_request_body: adding tools");
            body["tools"] = Value::Array(request.tools.iter().map(|t| t.to_openai_schema()).collect());
            body["tool_choice"] = serde_json::json!("auto");
        }

        body
    }

    /// Parse the API response, normalizing each tool call
    fn parse_response(&self, api_response: OpenAIResponse) -> CompletionResponse {
        debug!(choices = api_response.choices.len(), "parse_response: called");
        let usage = api_response
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        let Some(choice) = api_response.choices.into_iter().next() else {
            warn!("parse_response: response has no choices");
            return CompletionResponse {
                content: None,
                tool_calls: Vec::new(),
                stop_reason: StopReason::EndTurn,
                usage,
            };
        };

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(idx, raw)| normalize_tool_call(raw, idx))
            .collect();

        CompletionResponse {
            content: choice.message.content,
            tool_calls,
            stop_reason: StopReason::from_openai(choice.finish_reason.as_deref()),
            usage,
        }
    }
}

/// Convert one transcript message to its wire form
fn convert_message(msg: &Message) -> Value {
    let mut value = serde_json::json!({
        "role": msg.role.as_str(),
        "content": msg.content,
    });

    if !msg.tool_calls.is_empty() {
        value["tool_calls"] = Value::Array(
            msg.tool_calls
                .iter()
                .map(|call| {
                    serde_json::json!({
                        "id": call.id,
                        "type": "function",
                        "function": {
                            "name": call.name,
                            "arguments": call.arguments.to_string(),
                        }
                    })
                })
                .collect(),
        );
    }

    if let Some(id) = &msg.tool_call_id {
        value["tool_call_id"] = serde_json::json!(id);
    }

    value
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(%self.model, messages = request.messages.len(), "OpenAIClient::complete: called");
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_request_body(&request);

        let mut last_error: Option<LlmError> = None;
        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                // A server-requested delay wins over the exponential one
                let backoff = self.initial_backoff * 2u32.pow(attempt - 1);
                let wait = last_error
                    .as_ref()
                    .and_then(LlmError::retry_after)
                    .map_or(backoff, |after| after.max(backoff));
                warn!(attempt, wait_ms = wait.as_millis() as u64, "complete: retrying after transient error");
                tokio::time::sleep(wait).await;
            }

            let mut builder = self.http.post(&url).header("content-type", "application/json");
            if let Some(key) = &self.api_key {
                builder = builder.bearer_auth(key);
            }

            let response = match builder.json(&body).send().await {
                Ok(r) => r,
                Err(e) if e.is_timeout() => {
                    debug!(attempt, "complete: request timed out");
                    last_error = Some(LlmError::Timeout(self.timeout));
                    continue;
                }
                Err(e) => {
                    debug!(attempt, error = %e, "complete: network error");
                    last_error = Some(LlmError::Network(e));
                    continue;
                }
            };

            let status = response.status().as_u16();

            if status == 429 {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(Duration::ZERO);
                debug!(attempt, ?retry_after, "complete: rate limited (429)");
                last_error = Some(LlmError::RateLimited { retry_after });
                continue;
            }

            if is_retryable_status(status) && attempt < MAX_RETRIES {
                let text = response.text().await.unwrap_or_default();
                debug!(attempt, status, "complete: retryable error");
                last_error = Some(LlmError::ApiError { status, message: text });
                continue;
            }

            if !response.status().is_success() {
                debug!(%status, "complete: API error");
                let text = response.text().await.unwrap_or_default();
                return Err(LlmError::ApiError { status, message: text });
            }

            let text = response.text().await?;
            let api_response: OpenAIResponse = serde_json::from_str(&text)?;
            debug!("complete: success");
            return Ok(self.parse_response(api_response));
        }

        Err(last_error.unwrap_or_else(|| LlmError::InvalidResponse("Max retries exceeded".to_string())))
    }
}

// Wire response types

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    #[serde(default)]
    content: Option<String>,
    /// Kept raw so both call shapes reach the normalizer
    #[serde(default)]
    tool_calls: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}
