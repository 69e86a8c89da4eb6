//! Scripted LLM client for tests

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::debug;

use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError};

/// One scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    Respond(CompletionResponse),
    /// Fail with an API error of this status
    Fail { status: u16, message: String },
}

/// Mock LLM client that replays scripted replies and records every request
pub struct MockLlmClient {
    replies: Vec<MockReply>,
    call_count: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmClient {
    pub fn new(responses: Vec<CompletionResponse>) -> Self {
        Self::scripted(responses.into_iter().map(MockReply::Respond).collect())
    }

    pub fn scripted(replies: Vec<MockReply>) -> Self {
        debug!(reply_count = %replies.len(), "MockLlmClient::scripted: called");
        Self {
            replies,
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!("MockLlmClient::complete: called");
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
        match self.replies.get(idx) {
            Some(MockReply::Respond(response)) => Ok(response.clone()),
            Some(MockReply::Fail { status, message }) => Err(LlmError::ApiError {
                status: *status,
                message: message.clone(),
            }),
            None => {
                debug!(%idx, "MockLlmClient::complete: no more mock responses");
                Err(LlmError::InvalidResponse("No more mock responses".to_string()))
            }
        }
    }
}
