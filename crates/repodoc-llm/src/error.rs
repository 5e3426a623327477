//! Error types for the LLM crate.

/// Result type alias using the LLM error type.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Error type for LLM operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Backend/API error from the provider.
    #[error("backend error: {0}")]
    Backend(String),

    /// Network/connectivity error.
    #[error("network error: {0}")]
    Network(String),

    /// Configuration error (API key missing, etc.).
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Rate limit exceeded.
    #[error("rate limit exceeded: {0}")]
    RateLimit(String),

    /// Authentication failed.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Network(format!("request timed out: {err}"))
        } else if err.is_connect() {
            LlmError::Network(format!("connection failed: {err}"))
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::Serialization(err.to_string())
    }
}
