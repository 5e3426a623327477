//! Error types for the server.
//!
//! Client-facing responses carry a uniform `{message, error?}` JSON shape.
//! Upstream failure detail is logged server-side; clients only ever see the
//! classified kind plus a safe summary.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use repodoc_github::GithubError;
use repodoc_llm::LlmError;
use repodoc_store::StoreError;

/// Server error type.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Missing or malformed client input.
    #[error("{0}")]
    BadRequest(String),

    /// Missing, invalid, expired, or unresolvable session token.
    #[error("{0}")]
    Unauthenticated(String),

    /// Valid session, but no usable provider credential.
    #[error("{0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Required configuration is absent.
    #[error("{0}")]
    Config(String),

    /// An upstream call (provider or LLM) failed.
    #[error("{message}")]
    Upstream {
        /// Status to surface; forwarded from the provider where it
        /// originated there, 500 for transport-level failures.
        status: u16,
        /// Safe summary of the failure.
        message: String,
    },

    /// Internal server error.
    #[error("{0}")]
    Internal(String),

    /// Database/storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

impl From<GithubError> for ServerError {
    fn from(e: GithubError) -> Self {
        let summary = e.safe_summary();
        match e {
            GithubError::Status { status, body } => {
                tracing::warn!(status, body = %body, "GitHub API error");
                ServerError::Upstream {
                    status,
                    message: summary,
                }
            }
            GithubError::Network(detail) => {
                tracing::warn!(error = %detail, "GitHub API unreachable");
                ServerError::Upstream {
                    status: 500,
                    message: summary,
                }
            }
            GithubError::Parse(detail) => {
                tracing::error!(error = %detail, "Unparseable GitHub response");
                ServerError::Internal("unexpected provider response".to_string())
            }
            GithubError::Internal(detail) => ServerError::Internal(detail),
        }
    }
}

impl From<LlmError> for ServerError {
    fn from(e: LlmError) -> Self {
        tracing::error!(error = %e, "Completion backend error");
        ServerError::Upstream {
            status: 500,
            message: "documentation generation failed".to_string(),
        }
    }
}

/// Error response body: uniform across every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub message: String,
    /// Error kind for programmatic handling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ServerError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ServerError::Unauthenticated(_) => (StatusCode::UNAUTHORIZED, "unauthenticated"),
            ServerError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ServerError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            ServerError::Upstream { status, .. } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                "upstream_error",
            ),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            ServerError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        let message = self.to_string();

        match &self {
            ServerError::Internal(_) | ServerError::Store(_) | ServerError::Config(_) => {
                tracing::error!(status = %status, kind, error = %message, "Server error");
            }
            _ => {
                tracing::warn!(status = %status, kind, error = %message, "Client error");
            }
        }

        let body = ErrorResponse {
            message,
            error: Some(kind.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_parts(err: ServerError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServerError::BadRequest("x".into()).status_and_kind().0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Unauthenticated("x".into()).status_and_kind().0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServerError::Forbidden("x".into()).status_and_kind().0,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServerError::Config("x".into()).status_and_kind().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_upstream_status_is_forwarded() {
        let err = ServerError::Upstream {
            status: 404,
            message: "GitHub API returned status 404".into(),
        };
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "upstream_error");
        assert!(body["message"].as_str().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn test_github_error_conversion_redacts_body() {
        let err: ServerError = GithubError::Status {
            status: 403,
            body: r#"{"message":"API rate limit exceeded","internal":"secret detail"}"#
                .to_string(),
        }
        .into();

        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("API rate limit exceeded"));
        assert!(!message.contains("secret detail"));
    }

    #[tokio::test]
    async fn test_llm_error_maps_to_generic_500() {
        let err: ServerError = LlmError::Backend("provider internals".to_string()).into();
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["message"].as_str().unwrap().contains("provider internals"));
    }

    #[tokio::test]
    async fn test_error_shape() {
        let (_, body) = response_parts(ServerError::NotFound("route not found".into())).await;
        assert_eq!(body["message"], "route not found");
        assert_eq!(body["error"], "not_found");
    }
}
