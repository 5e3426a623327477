//! HTTP gateway for repodoc.
//!
//! This crate provides the network transport layer: the OAuth login flow,
//! the session-verified GitHub proxy endpoints, and the documentation
//! generation endpoint.
//!
//! # Features
//!
//! - GitHub OAuth exchange with signed session tokens
//! - Per-request session verification against the user store
//! - Credential-attaching passthrough of read-only GitHub API calls
//! - Multi-source documentation prompt aggregation + one LLM call
//! - CORS, structured request logging, uniform JSON error shape
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use repodoc_config::Config;
//! use repodoc_server::{AppState, Server};
//!
//! let config = Config::from_env()?;
//! let store = Arc::new(repodoc_store::UserStore::open(&config.database_path)?);
//! let state = AppState::new(config, store, llm_backend)?;
//! Server::new(state).run().await?;
//! ```

pub mod auth;
pub mod docgen;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;

pub use auth::{CurrentUser, session_middleware};
pub use error::{ErrorResponse, Result, ServerError};
pub use state::AppState;

use std::net::SocketAddr;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// The repodoc HTTP server.
pub struct Server {
    /// Application state.
    state: AppState,
}

impl Server {
    /// Create a new server from a pre-built application state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        Router::new()
            // Health + banner (no auth)
            .merge(routes::health_routes())
            // OAuth flow (unauthenticated by nature) + current user
            .merge(self.auth_routes())
            // GitHub proxy + documentation generation
            .nest("/api/github", self.api_routes())
            // Unmatched routes get the uniform JSON error shape
            .fallback(routes::not_found)
            // Request logging (inner), CORS and tracing (outer)
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                logging::request_logging_middleware,
            ))
            .layer(self.cors_layer())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Login, callback, and current-user routes.
    ///
    /// Only `/auth/me` requires a session; login and callback are the steps
    /// that establish one.
    fn auth_routes(&self) -> Router<AppState> {
        let protected = Router::new()
            .route("/auth/me", get(routes::me_handler))
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                auth::session_middleware,
            ));

        Router::new()
            .route("/auth/github/login", get(routes::login_handler))
            .route("/auth/github/callback", get(routes::callback_handler))
            .merge(protected)
    }

    /// Session-protected API routes.
    fn api_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/repos", get(routes::list_repos_handler))
            .route(
                "/repos/{owner}/{repo}/pulls",
                get(routes::list_pulls_handler),
            )
            .route(
                "/repos/{owner}/{repo}/pulls/{number}/files",
                get(routes::list_pull_files_handler),
            )
            .route(
                "/repos/{owner}/{repo}/commits",
                get(routes::list_commits_handler),
            )
            .route(
                "/repos/{owner}/{repo}/commits/{sha}",
                get(routes::commit_files_handler),
            )
            .route("/docs", post(routes::generate_docs_handler))
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                auth::session_middleware,
            ))
    }

    /// CORS layer from the configured origins.
    fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .state
            .config
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(origin = %origin, error = %e, "Ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    }

    /// Run the server on the configured bind address.
    pub async fn run(self) -> Result<()> {
        let addr = self.state.config.bind_address;
        self.run_on(addr).await
    }

    /// Run the server on a specific address (useful for testing).
    pub async fn run_on(self, addr: SocketAddr) -> Result<()> {
        let router = self.router();

        info!("Starting server on {}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Internal(format!("failed to bind: {e}")))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Internal(format!("server error: {e}")))?;

        Ok(())
    }
}
