//! Error types for configuration loading.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while building the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    /// An environment variable is set but its value cannot be used.
    #[error("invalid value for {var}: {reason}")]
    InvalidVar {
        /// The variable name.
        var: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Create an invalid-value error.
    pub fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidVar {
            var,
            reason: reason.into(),
        }
    }
}
