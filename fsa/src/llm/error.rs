//! Failures talking to the completion service

use std::time::Duration;
use thiserror::Error;

/// Why a completion request produced no response
///
/// The client retries transient failures itself. Whatever reaches the
/// orchestrator ends the current turn.
#[derive(Debug, Error)]
pub enum LlmError {
    /// 429 from the server, with the delay it asked for
    #[error("completion service is rate limiting requests (asked to wait {retry_after:?})")]
    RateLimited { retry_after: Duration },

    /// Any other non-success status, with the response body
    #[error("completion service returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("could not reach completion service: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed completion response: {0}")]
    InvalidResponse(String),

    #[error("no completion response within {0:?}")]
    Timeout(Duration),

    #[error("completion payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Delay the server asked for before the next attempt
    pub fn retry_after(&self) -> Option<Duration> {
        if let LlmError::RateLimited { retry_after } = self {
            Some(*retry_after)
        } else {
            None
        }
    }
}

/// Statuses from an overloaded or restarting server, as opposed to a bad request
///
/// 429 is handled on its own since it carries a server-chosen delay.
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 500 | 502 | 503 | 504)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_rate_limit_carries_a_delay() {
        let limited = LlmError::RateLimited {
            retry_after: Duration::from_secs(7),
        };
        assert_eq!(limited.retry_after(), Some(Duration::from_secs(7)));

        let timeout = LlmError::Timeout(Duration::from_secs(7));
        assert_eq!(timeout.retry_after(), None);
    }

    #[test]
    fn test_server_side_statuses_are_retryable() {
        for status in [408, 500, 502, 503, 504] {
            assert!(is_retryable_status(status), "{} should be retried", status);
        }
        for status in [400, 401, 404, 422] {
            assert!(!is_retryable_status(status), "{} should not be retried", status);
        }
    }

    #[test]
    fn test_status_error_names_the_service() {
        let err = LlmError::ApiError {
            status: 404,
            message: "model 'qwen9' not found".to_string(),
        };
        assert_eq!(err.to_string(), "completion service returned 404: model 'qwen9' not found");
    }
}
