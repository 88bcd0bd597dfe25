//! Layered error definitions
//!
//! Categorized by source: input / alignment / provider / config

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Input Errors =====
    /// Malformed input data
    #[error("invalid input in {context}: {message}")]
    InvalidInput { context: String, message: String },

    // ===== Alignment Errors =====
    /// Non-positive speed handed to the delta computation
    #[error("invalid speed at index {index}: {value} km/h (must be > 0)")]
    InvalidSpeed { index: usize, value: f64 },

    /// Paired sequences differ in length
    #[error("length mismatch in {context}: expected {expected}, got {actual}")]
    LengthMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    // ===== Provider Errors =====
    /// Lap provider failure
    #[error("provider error for '{query}': {message}")]
    Provider { query: String, message: String },

    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create invalid input error
    pub fn invalid_input(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create length mismatch error
    pub fn length_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Create provider error
    pub fn provider(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }
}
