//! HTTP route handlers.

mod auth;
mod docs;
mod github;
mod health;

pub use auth::{CallbackQuery, MeResponse, callback_handler, login_handler, me_handler};
pub use docs::{DocsRequest, DocsResponse, generate_docs_handler};
pub use github::{
    commit_files_handler, list_commits_handler, list_pull_files_handler, list_pulls_handler,
    list_repos_handler,
};
pub use health::{HealthResponse, health, health_routes, root};

use axum::http::{Method, Uri};

use crate::error::ServerError;

/// Fallback for unmatched routes.
pub async fn not_found(method: Method, uri: Uri) -> ServerError {
    tracing::warn!(method = %method, path = %uri.path(), "Route not found");
    ServerError::NotFound(format!("route not found: {}", uri.path()))
}
