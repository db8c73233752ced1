//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// LLM provider selection: "anthropic", "gemini", or "mock"
    pub llm_provider: String,

    /// Provider API keys. Optional at startup: a missing key surfaces as an
    /// upstream error on the first provider call, not as a boot failure.
    pub anthropic_api_key: Option<String>,
    pub google_api_key: Option<String>,

    /// Model identifier passed to the selected provider
    pub llm_model: Option<String>,

    /// Completion token cap per provider call
    pub llm_max_tokens: u32,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            llm_provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "anthropic".to_string()),
            anthropic_api_key: env::var("ANTHROPIC_API_KEY").ok(),
            google_api_key: env::var("GOOGLE_API_KEY").ok(),
            llm_model: env::var("LLM_MODEL").ok(),
            llm_max_tokens: env::var("LLM_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024),

            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "aurora=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
        };

        Ok(config)
    }

    /// API key for the selected provider, if configured
    pub fn provider_api_key(&self) -> Option<&str> {
        match self.llm_provider.as_str() {
            "gemini" => self.google_api_key.as_deref(),
            _ => self.anthropic_api_key.as_deref(),
        }
    }
}
