//! Application state shared across handlers.

use std::sync::Arc;

use repodoc_auth::OAuthConfig;
use repodoc_config::Config;
use repodoc_github::GithubClient;
use repodoc_llm::SharedBackend;
use repodoc_store::UserStore;

use crate::error::{Result, ServerError};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// OAuth application settings. `None` when the GitHub client ID/secret
    /// are unconfigured; login attempts then fail with a config error.
    pub oauth: Option<Arc<OAuthConfig>>,

    /// GitHub API client.
    pub github: Arc<GithubClient>,

    /// User record store.
    pub store: Arc<UserStore>,

    /// Completion backend for documentation generation.
    pub llm: SharedBackend,
}

impl AppState {
    /// Create application state from configuration.
    pub fn new(config: Config, store: Arc<UserStore>, llm: SharedBackend) -> Result<Self> {
        let oauth = match (&config.github_client_id, &config.github_client_secret) {
            (Some(id), Some(secret)) => Some(Arc::new(OAuthConfig::github(
                id,
                secret,
                &config.server_url,
            ))),
            _ => None,
        };

        let github = GithubClient::new()
            .map_err(|e| ServerError::Internal(format!("GitHub client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            oauth,
            github: Arc::new(github),
            store,
            llm,
        })
    }

    /// Replace the OAuth settings (tests, endpoint overrides).
    pub fn with_oauth(mut self, oauth: OAuthConfig) -> Self {
        self.oauth = Some(Arc::new(oauth));
        self
    }

    /// Replace the GitHub client (tests, GitHub Enterprise).
    pub fn with_github(mut self, github: GithubClient) -> Self {
        self.github = Arc::new(github);
        self
    }
}
