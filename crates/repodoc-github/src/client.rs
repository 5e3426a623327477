//! Credential-attaching GitHub API client.

use std::time::Duration;

use reqwest::{Client, Response, header};
use serde_json::Value;

use crate::error::{GithubError, Result};
use crate::types::{ContentEntry, GithubUser, RepoDetails};

/// Default GitHub API base URL.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default timeout for proxied requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Media type for JSON API responses.
pub const JSON_CONTENT: &str = "application/vnd.github+json";

/// Media type that makes content endpoints return the raw file body.
pub const RAW_CONTENT: &str = "application/vnd.github.v3.raw";

/// GitHub API client.
///
/// Every request is a GET against `<base><path>` with the caller's stored
/// credential as a bearer token. Non-success responses are surfaced as
/// [`GithubError::Status`] with the upstream status and body; nothing is
/// retried and nothing is fabricated.
pub struct GithubClient {
    client: Client,
    base_url: String,
}

impl GithubClient {
    /// Create a client against the public GitHub API.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("repodoc/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GithubError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API base (GitHub Enterprise, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// The configured API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send_get(&self, credential: &str, path: &str, accept: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(path, accept, "Proxying GitHub request");

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, format!("Bearer {credential}"))
            .header(header::ACCEPT, accept)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::Status { status, body });
        }

        Ok(response)
    }

    /// GET a path and parse the response as JSON, passthrough.
    pub async fn get_json(&self, credential: &str, path: &str) -> Result<Value> {
        let response = self.send_get(credential, path, JSON_CONTENT).await?;
        response
            .json()
            .await
            .map_err(|e| GithubError::Parse(e.to_string()))
    }

    /// GET a path with a caller-supplied media type and return the raw body.
    pub async fn get_raw(&self, credential: &str, path: &str, accept: &str) -> Result<String> {
        let response = self.send_get(credential, path, accept).await?;
        Ok(response.text().await?)
    }

    /// Fetch the authenticated user's profile.
    pub async fn current_user(&self, credential: &str) -> Result<GithubUser> {
        let response = self.send_get(credential, "/user", JSON_CONTENT).await?;
        response
            .json()
            .await
            .map_err(|e| GithubError::Parse(e.to_string()))
    }

    /// Fetch repository metadata (description, language, star count).
    pub async fn repo_details(
        &self,
        credential: &str,
        owner: &str,
        repo: &str,
    ) -> Result<RepoDetails> {
        let response = self
            .send_get(credential, &format!("/repos/{owner}/{repo}"), JSON_CONTENT)
            .await?;
        response
            .json()
            .await
            .map_err(|e| GithubError::Parse(e.to_string()))
    }

    /// Fetch the top-level directory listing of a repository.
    pub async fn contents(
        &self,
        credential: &str,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<ContentEntry>> {
        let response = self
            .send_get(
                credential,
                &format!("/repos/{owner}/{repo}/contents"),
                JSON_CONTENT,
            )
            .await?;
        response
            .json()
            .await
            .map_err(|e| GithubError::Parse(e.to_string()))
    }

    /// Fetch one commit's changed files.
    ///
    /// The commit-detail response carries a `files` array; when GitHub omits
    /// it the projection is an empty array, never an error.
    pub async fn commit_files(
        &self,
        credential: &str,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<Value> {
        let detail = self
            .get_json(credential, &format!("/repos/{owner}/{repo}/commits/{sha}"))
            .await?;
        Ok(files_from_commit(detail))
    }
}

/// Project the `files` field out of a commit-detail body.
pub fn files_from_commit(detail: Value) -> Value {
    match detail {
        Value::Object(mut map) => map
            .remove("files")
            .filter(|v| v.is_array())
            .unwrap_or_else(|| Value::Array(Vec::new())),
        _ => Value::Array(Vec::new()),
    }
}
