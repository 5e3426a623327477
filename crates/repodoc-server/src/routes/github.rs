//! Read-only GitHub proxy endpoints.
//!
//! Every handler attaches the authenticated user's stored credential and
//! passes the provider's JSON through unchanged. Upstream failures keep
//! their status code on the way out.

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use serde_json::Value;

use crate::auth::CurrentUser;
use crate::error::{Result, ServerError};
use crate::state::AppState;

fn credential(user: &repodoc_store::UserRecord) -> Result<&str> {
    // The session verifier already guarantees a credential is present.
    user.access_token.as_deref().ok_or_else(|| {
        ServerError::Forbidden("GitHub access token not found, please re-authenticate".to_string())
    })
}

/// GET /api/github/repos - the user's repositories.
pub async fn list_repos_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Value>> {
    let data = state
        .github
        .get_json(credential(&user)?, "/user/repos")
        .await?;
    Ok(Json(data))
}

/// GET /api/github/repos/{owner}/{repo}/pulls - open pull requests.
pub async fn list_pulls_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let data = state
        .github
        .get_json(credential(&user)?, &format!("/repos/{owner}/{repo}/pulls"))
        .await?;
    Ok(Json(data))
}

/// GET /api/github/repos/{owner}/{repo}/pulls/{number}/files - changed files
/// of one pull request.
pub async fn list_pull_files_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
) -> Result<Json<Value>> {
    let data = state
        .github
        .get_json(
            credential(&user)?,
            &format!("/repos/{owner}/{repo}/pulls/{number}/files"),
        )
        .await?;
    Ok(Json(data))
}

/// GET /api/github/repos/{owner}/{repo}/commits - commit history.
pub async fn list_commits_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let data = state
        .github
        .get_json(
            credential(&user)?,
            &format!("/repos/{owner}/{repo}/commits"),
        )
        .await?;
    Ok(Json(data))
}

/// GET /api/github/repos/{owner}/{repo}/commits/{sha} - the files changed by
/// one commit. Projects the `files` field of the commit detail; an absent
/// field yields an empty array.
pub async fn commit_files_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((owner, repo, sha)): Path<(String, String, String)>,
) -> Result<Json<Value>> {
    let files = state
        .github
        .commit_files(credential(&user)?, &owner, &repo, &sha)
        .await?;
    Ok(Json(files))
}
