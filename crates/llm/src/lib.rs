//! LLM provider abstraction for Aurora
//!
//! One trait, one concrete implementation per provider, selected once at
//! process start by `LlmServiceFactory`. Every call is a single synchronous
//! request/response: no caching, no retries, no streaming.

pub mod anthropic;
pub mod gemini;
pub mod mock;

use std::sync::Arc;

pub use anthropic::AnthropicService;
pub use gemini::GeminiService;
pub use mock::MockLlmService;

/// Role of a message in a completion request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmRole {
    User,
    Assistant,
}

/// One turn of conversation history, in order
#[derive(Debug, Clone)]
pub struct LlmMessage {
    pub role: LlmRole,
    pub content: String,
}

/// Request for a completion from the provider
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier; empty string means "use the provider default"
    pub model: String,
    /// Static instruction text conditioning the whole conversation
    pub system_prompt: Option<String>,
    /// Full ordered history, oldest first. Never a subset: the provider
    /// sees everything the conversation has accumulated.
    pub messages: Vec<LlmMessage>,
    pub max_tokens: Option<u32>,
}

/// Completion returned by the provider
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub input_tokens: i32,
    pub output_tokens: i32,
    pub stop_reason: String,
}

/// Errors from LLM provider calls
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid response: {0}")]
    Response(String),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("API key is not configured")]
    MissingApiKey,

    #[error("Unknown LLM provider: {0}")]
    UnknownProvider(String),
}

/// A service that can generate a reply given a system prompt and ordered history
#[async_trait::async_trait]
pub trait LlmService: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Model used when a request does not name one
    fn default_model(&self) -> &str;
}

/// Provider configuration, fixed at process start
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Absent keys are not a construction error: the first `complete` call
    /// fails with `LlmError::MissingApiKey` instead.
    pub api_key: Option<String>,
    pub default_model: String,
    pub max_tokens: u32,
    /// Override for tests; `None` means the provider's public endpoint
    pub base_url: Option<String>,
}

impl LlmConfig {
    /// Build provider config from application config
    pub fn from_app_config(config: &aurora_common::Config) -> Self {
        let default_model = config.llm_model.clone().unwrap_or_else(|| {
            match config.llm_provider.as_str() {
                "gemini" => gemini::DEFAULT_MODEL.to_string(),
                _ => anthropic::DEFAULT_MODEL.to_string(),
            }
        });

        Self {
            api_key: config.provider_api_key().map(str::to_string),
            default_model,
            max_tokens: config.llm_max_tokens,
            base_url: None,
        }
    }
}

/// Factory selecting the concrete provider at startup
pub struct LlmServiceFactory;

impl LlmServiceFactory {
    /// Create the service named by `provider`: "anthropic", "gemini", or "mock"
    pub fn create(provider: &str, config: LlmConfig) -> Result<Arc<dyn LlmService>, LlmError> {
        match provider {
            "anthropic" => Ok(Arc::new(AnthropicService::new(config))),
            "gemini" => Ok(Arc::new(GeminiService::new(config))),
            "mock" => Ok(Arc::new(MockLlmService::new())),
            other => Err(LlmError::UnknownProvider(other.to_string())),
        }
    }
}
