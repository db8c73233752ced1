//! Mock LLM Service Implementation
//!
//! Minimal mock used by `LlmServiceFactory` when provider is `"mock"`.
//! Returns deterministic responses; tests can pin a canned reply or force
//! the call to fail.

use crate::{CompletionRequest, CompletionResponse, LlmError, LlmService};

/// Mock LLM service for testing
#[derive(Debug, Clone, Default)]
pub struct MockLlmService {
    canned_reply: Option<String>,
    fail: bool,
}

impl MockLlmService {
    /// Create a new mock LLM service that echoes the last user message
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that always replies with the given text
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            canned_reply: Some(reply.into()),
            fail: false,
        }
    }

    /// Mock whose every call fails with a request error
    pub fn failing() -> Self {
        Self {
            canned_reply: None,
            fail: true,
        }
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        tracing::info!("Mock LLM service processing completion request");

        if self.fail {
            return Err(LlmError::Request(
                "mock provider configured to fail".to_string(),
            ));
        }

        let model = if request.model.is_empty() {
            "mock-model".to_string()
        } else {
            request.model
        };

        // Generate a simple response based on the last user message
        let last_message = request
            .messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or("empty");

        let content = match &self.canned_reply {
            Some(reply) => reply.clone(),
            None => format!("Mock response to: {}", last_message),
        };

        let input_tokens = request
            .messages
            .iter()
            .map(|m| m.content.len() as i32 / 4)
            .sum::<i32>();
        let output_tokens = content.len() as i32 / 4;

        Ok(CompletionResponse {
            content,
            model,
            input_tokens,
            output_tokens,
            stop_reason: "end_turn".to_string(),
        })
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }
}
