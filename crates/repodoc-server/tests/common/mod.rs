//! Common test utilities for integration tests.
//!
//! Boots the full gateway against a stub GitHub server on an ephemeral
//! port, an in-memory user store, and a mock completion backend, then
//! drives it over real HTTP with reqwest.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use reqwest::Client;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use repodoc_auth::OAuthConfig;
use repodoc_config::Config;
use repodoc_github::GithubClient;
use repodoc_llm::MockBackend;
use repodoc_server::{AppState, Server};
use repodoc_store::UserStore;

/// Session-signing secret used by every test server.
pub const SESSION_SECRET: &str = "integration-test-secret";

/// Client base URL configured on every test server.
pub const CLIENT_URL: &str = "http://client.example";

// ─────────────────────────────────────────────────────────────────────────────
// Stub GitHub
// ─────────────────────────────────────────────────────────────────────────────

/// Behavior switches for the stub GitHub server.
#[derive(Debug, Clone, Default)]
pub struct StubOptions {
    /// Reject the authorization code at the token endpoint.
    pub reject_code: bool,
    /// Fail the repository-metadata endpoint.
    pub fail_metadata: bool,
    /// Raw README body; `None` means 404.
    pub readme: Option<String>,
    /// Raw package.json body; `None` means 404.
    pub manifest: Option<String>,
}

/// A stub GitHub (OAuth + REST) server on an ephemeral port.
pub struct StubGithub {
    pub base_url: String,
    _handle: JoinHandle<()>,
}

impl StubGithub {
    pub async fn start(options: StubOptions) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let router = stub_router(Arc::new(options));

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            _handle: handle,
        })
    }
}

fn stub_router(options: Arc<StubOptions>) -> Router {
    Router::new()
        .route("/login/oauth/access_token", post(stub_token))
        .route("/user", get(stub_profile))
        .route("/user/repos", get(stub_repos))
        .route("/repos/{owner}/{repo}", get(stub_metadata))
        .route("/repos/{owner}/{repo}/readme", get(stub_readme))
        .route("/repos/{owner}/{repo}/contents", get(stub_contents))
        .route(
            "/repos/{owner}/{repo}/contents/package.json",
            get(stub_manifest),
        )
        .route("/repos/{owner}/{repo}/pulls", get(stub_pulls))
        .route(
            "/repos/{owner}/{repo}/pulls/{number}/files",
            get(stub_pull_files),
        )
        .route("/repos/{owner}/{repo}/commits", get(stub_commits))
        .route("/repos/{owner}/{repo}/commits/{sha}", get(stub_commit))
        .with_state(options)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"}))).into_response()
}

async fn stub_token(State(options): State<Arc<StubOptions>>) -> Json<Value> {
    if options.reject_code {
        // GitHub signals a bad code with a 200 carrying an error field.
        Json(json!({"error": "bad_verification_code"}))
    } else {
        Json(json!({
            "access_token": "gho_stub_credential",
            "token_type": "bearer",
            "scope": "user:email",
        }))
    }
}

async fn stub_profile() -> Json<Value> {
    Json(json!({
        "id": 4242,
        "login": "octocat",
        "name": "Octo Cat",
        "email": "octo@example.com",
        "avatar_url": "https://avatars.example/4242",
    }))
}

async fn stub_repos() -> Json<Value> {
    Json(json!([
        {"id": 1, "name": "widget", "full_name": "octocat/widget"},
        {"id": 2, "name": "gadget", "full_name": "octocat/gadget"},
    ]))
}

async fn stub_metadata(
    State(options): State<Arc<StubOptions>>,
    Path((_owner, repo)): Path<(String, String)>,
) -> Response {
    if options.fail_metadata || repo == "missing" {
        return not_found();
    }
    Json(json!({
        "description": "A widget",
        "language": "Rust",
        "stargazers_count": 42,
    }))
    .into_response()
}

async fn stub_readme(State(options): State<Arc<StubOptions>>) -> Response {
    match &options.readme {
        Some(body) => body.clone().into_response(),
        None => not_found(),
    }
}

async fn stub_manifest(State(options): State<Arc<StubOptions>>) -> Response {
    match &options.manifest {
        Some(body) => body.clone().into_response(),
        None => not_found(),
    }
}

async fn stub_contents() -> Json<Value> {
    Json(json!([
        {"name": "src", "type": "dir"},
        {"name": "Cargo.toml", "type": "file"},
        {"name": "README.md", "type": "file"},
    ]))
}

async fn stub_pulls(Path((_owner, repo)): Path<(String, String)>) -> Response {
    if repo == "missing" {
        return not_found();
    }
    Json(json!([{"number": 1, "title": "Add feature"}])).into_response()
}

async fn stub_pull_files() -> Json<Value> {
    Json(json!([{"filename": "src/lib.rs", "status": "modified"}]))
}

async fn stub_commits() -> Json<Value> {
    Json(json!([{"sha": "abc123"}]))
}

async fn stub_commit(Path((_owner, _repo, sha)): Path<(String, String, String)>) -> Json<Value> {
    if sha == "nofiles" {
        Json(json!({"sha": sha}))
    } else {
        Json(json!({
            "sha": sha,
            "files": [
                {"filename": "src/lib.rs", "status": "modified"},
                {"filename": "README.md", "status": "added"},
            ],
        }))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Server
// ─────────────────────────────────────────────────────────────────────────────

/// A gateway instance running in the background against a stub GitHub.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<UserStore>,
    pub llm: Arc<MockBackend>,
    pub github: StubGithub,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start with default stub behavior and a single mock completion.
    pub async fn start() -> Result<Self> {
        Self::start_with(StubOptions::default(), vec!["# Generated".to_string()]).await
    }

    /// Start with explicit stub behavior and mock completions.
    pub async fn start_with(options: StubOptions, completions: Vec<String>) -> Result<Self> {
        let github = StubGithub::start(options).await?;

        let config = Config::from_lookup(|key| match key {
            "CLIENT_URL" => Some(CLIENT_URL.to_string()),
            "SERVER_URL" => Some("http://server.example".to_string()),
            "SESSION_SECRET" => Some(SESSION_SECRET.to_string()),
            "GROQ_API_KEY" => Some("gsk_test".to_string()),
            "GITHUB_CLIENT_ID" => Some("test-client-id".to_string()),
            "GITHUB_CLIENT_SECRET" => Some("test-client-secret".to_string()),
            _ => None,
        })?
        .with_request_logging(false);

        let store = Arc::new(UserStore::open_in_memory()?);
        let llm = Arc::new(MockBackend::with_texts(completions));

        let oauth = OAuthConfig::github("test-client-id", "test-client-secret", &config.server_url)
            .with_endpoints(
                format!("{}/login/oauth/authorize", github.base_url),
                format!("{}/login/oauth/access_token", github.base_url),
            );
        let github_client = GithubClient::new()?.with_base_url(&github.base_url);

        let state = AppState::new(config, store.clone(), llm.clone())?
            .with_oauth(oauth)
            .with_github(github_client);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let router = Server::new(state).router();

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            addr,
            client,
            store,
            llm,
            github,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Run the callback with a stub-accepted code and return the minted
    /// session token from the redirect.
    pub async fn login(&self) -> Result<String> {
        let response = self
            .client
            .get(self.url("/auth/github/callback?code=good-code"))
            .send()
            .await?;
        anyhow::ensure!(
            response.status().as_u16() == 302,
            "callback returned {}",
            response.status()
        );

        let location = response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let token = location
            .split("token=")
            .nth(1)
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("no token in redirect: {location}"))?;
        Ok(token)
    }
}
