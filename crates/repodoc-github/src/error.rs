//! Error types for the GitHub proxy.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, GithubError>;

/// Errors that can occur while proxying a GitHub API request.
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    /// Network/transport error before a response was received.
    #[error("network error: {0}")]
    Network(String),

    /// GitHub returned a non-success status. Carries the upstream status
    /// and body so callers can distinguish "no README" from "rate limited".
    #[error("GitHub returned status {status}")]
    Status {
        /// Upstream HTTP status code.
        status: u16,
        /// Upstream response body, verbatim.
        body: String,
    },

    /// A response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Client construction failed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GithubError {
    /// Best human-readable summary of an upstream failure.
    ///
    /// GitHub error bodies are JSON with a `message` field; fall back to a
    /// generic summary when the body is anything else, so raw upstream
    /// detail is never emitted to clients.
    pub fn safe_summary(&self) -> String {
        match self {
            GithubError::Status { status, body } => {
                let message = serde_json::from_str::<serde_json::Value>(body)
                    .ok()
                    .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from));
                match message {
                    Some(m) => format!("GitHub API returned status {status}: {m}"),
                    None => format!("GitHub API returned status {status}"),
                }
            }
            _ => "GitHub API request failed".to_string(),
        }
    }
}

impl From<reqwest::Error> for GithubError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GithubError::Network(format!("request timed out: {err}"))
        } else if err.is_connect() {
            GithubError::Network(format!("connection failed: {err}"))
        } else {
            GithubError::Network(err.to_string())
        }
    }
}
