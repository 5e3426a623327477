//! Configuration for the repodoc gateway.
//!
//! The configuration is read from the process environment exactly once at
//! startup and passed into components by reference. Components never reach
//! into ambient environment state themselves.
//!
//! # Required variables
//!
//! - `CLIENT_URL` - base URL of the browser client (OAuth success redirect)
//! - `SERVER_URL` - public base URL of this server (builds the callback URL)
//! - `SESSION_SECRET` - signing secret for session tokens
//! - `GROQ_API_KEY` - API key for the documentation-generation backend
//!
//! # Optional variables
//!
//! - `GITHUB_CLIENT_ID` / `GITHUB_CLIENT_SECRET` - OAuth application
//!   credentials; when absent, login attempts fail with a configuration
//!   error instead of the process refusing to start
//! - `PORT` (default 5000), `SESSION_TTL_SECS` (default 7 days),
//!   `DATABASE_PATH`, `GROQ_MODEL`, `DOCS_LISTING_LIMIT` (default 20)

pub mod error;

pub use error::{ConfigError, Result};

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default session token lifetime (7 days).
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Default number of directory entries embedded in a documentation prompt.
pub const DEFAULT_LISTING_LIMIT: usize = 20;

/// Application configuration, built once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to.
    pub bind_address: SocketAddr,

    /// Base URL of the browser client, target of the post-login redirect.
    pub client_url: String,

    /// Public base URL of this server, used to build the OAuth callback URL.
    pub server_url: String,

    /// GitHub OAuth client ID. `None` means OAuth login is unconfigured.
    pub github_client_id: Option<String>,

    /// GitHub OAuth client secret.
    pub github_client_secret: Option<String>,

    /// Signing secret for session tokens.
    pub session_secret: String,

    /// Session token lifetime.
    pub session_ttl: Duration,

    /// Path of the SQLite user store.
    pub database_path: PathBuf,

    /// API key for the completion backend.
    pub groq_api_key: String,

    /// Model override for the completion backend.
    pub groq_model: Option<String>,

    /// Directory entries embedded in a documentation prompt.
    pub docs_listing_limit: usize,

    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,

    /// Enable per-request logging.
    pub request_logging: bool,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests supply a map instead of mutating
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let client_url = require(&lookup, "CLIENT_URL")?;
        let server_url = require(&lookup, "SERVER_URL")?;
        let session_secret = require(&lookup, "SESSION_SECRET")?;
        let groq_api_key = require(&lookup, "GROQ_API_KEY")?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("PORT", e.to_string()))?,
            None => DEFAULT_PORT,
        };
        let bind_address = SocketAddr::from(([0, 0, 0, 0], port));

        let session_ttl = match lookup("SESSION_TTL_SECS") {
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .map_err(|e| ConfigError::invalid("SESSION_TTL_SECS", e.to_string()))?;
                if secs == 0 {
                    return Err(ConfigError::invalid("SESSION_TTL_SECS", "must be positive"));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_SESSION_TTL,
        };

        let database_path = lookup("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let docs_listing_limit = match lookup("DOCS_LISTING_LIMIT") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| ConfigError::invalid("DOCS_LISTING_LIMIT", e.to_string()))?,
            None => DEFAULT_LISTING_LIMIT,
        };

        Ok(Self {
            bind_address,
            cors_origins: vec![client_url.clone()],
            client_url,
            server_url,
            github_client_id: non_empty(lookup("GITHUB_CLIENT_ID")),
            github_client_secret: non_empty(lookup("GITHUB_CLIENT_SECRET")),
            session_secret,
            session_ttl,
            database_path,
            groq_api_key,
            groq_model: non_empty(lookup("GROQ_MODEL")),
            docs_listing_limit,
            request_logging: true,
        })
    }

    /// Whether the GitHub OAuth application is fully configured.
    pub fn oauth_configured(&self) -> bool {
        self.github_client_id.is_some() && self.github_client_secret.is_some()
    }

    /// Set the bind address.
    pub fn with_bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr;
        self
    }

    /// Set allowed CORS origins.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Enable or disable request logging.
    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.request_logging = enabled;
        self
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<String> {
    match non_empty(lookup(key)) {
        Some(value) => Ok(value),
        None => Err(ConfigError::MissingVar(key)),
    }
}

/// Treat empty/whitespace-only values as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Default SQLite path under the platform data directory.
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("repodoc"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("users.db")
}
