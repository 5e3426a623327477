//! Typed views over GitHub API responses.
//!
//! Only the fields the gateway actually consumes are modeled; everything
//! else flows through as raw JSON.

use serde::Deserialize;

/// The authenticated user's profile, from `GET /user`.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub id: i64,
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Repository metadata, from `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoDetails {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
}

/// One entry of a directory listing, from `GET /repos/{owner}/{repo}/contents`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    /// Entry kind as reported by GitHub: `"dir"`, `"file"`, `"symlink"`, ...
    #[serde(rename = "type")]
    pub kind: String,
}

impl ContentEntry {
    /// Whether this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == "dir"
    }
}
