//! Health check endpoints.

use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Simple health check (no auth required).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Plain-text service banner at the root path.
pub async fn root() -> &'static str {
    "repodoc gateway running"
}

/// Create health check routes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}
