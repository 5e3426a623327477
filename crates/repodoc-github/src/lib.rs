//! GitHub API proxy for repodoc.
//!
//! Forwards read-only requests to the GitHub REST API with a stored user
//! credential attached, and propagates upstream failures with their status
//! so callers can branch on them (missing README vs. rate limit).
//!
//! # Components
//!
//! - [`client`] — the credential-attaching [`GithubClient`]
//! - [`types`] — typed views over the responses the gateway consumes

pub mod client;
pub mod error;
pub mod types;

pub use client::{GithubClient, JSON_CONTENT, RAW_CONTENT, files_from_commit};
pub use error::{GithubError, Result};
pub use types::{ContentEntry, GithubUser, RepoDetails};
