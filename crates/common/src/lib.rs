//! Shared utilities, configuration, and error handling for Aurora
//!
//! This crate provides common functionality used across the Aurora application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Custom axum extractors

pub mod config;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
