//! Error types for authentication.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur during OAuth exchange or session handling.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Network/HTTP error.
    #[error("network error: {0}")]
    Network(String),

    /// The provider refused to issue a credential for the code.
    #[error("credential exchange failed: {0}")]
    Exchange(String),

    /// A session token failed verification.
    #[error("invalid session token: {0}")]
    Token(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Network(e.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        AuthError::Token(e.to_string())
    }
}
