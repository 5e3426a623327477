//! Documentation generation endpoint.

use axum::{
    Json,
    extract::{Extension, State},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use repodoc_llm::CompletionRequest;

use crate::auth::CurrentUser;
use crate::docgen::{self, DOC_MAX_TOKENS, DOC_TEMPERATURE, SYSTEM_PROMPT};
use crate::error::{Result, ServerError};
use crate::state::AppState;

/// Request body for documentation generation.
#[derive(Debug, Deserialize)]
pub struct DocsRequest {
    pub owner: String,
    pub repo: String,
}

/// Documentation generation response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsResponse {
    pub owner: String,
    pub repo: String,
    /// Generated markdown.
    pub documentation: String,
    /// Server-generated timestamp, RFC 3339.
    pub generated_at: String,
}

/// POST /api/github/docs - generate documentation for a repository.
pub async fn generate_docs_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<DocsRequest>,
) -> Result<Json<DocsResponse>> {
    let credential = user.access_token.as_deref().ok_or_else(|| {
        ServerError::Forbidden("GitHub access token not found, please re-authenticate".to_string())
    })?;

    let DocsRequest { owner, repo } = request;

    let context = docgen::gather(&state.github, credential, &owner, &repo).await?;
    let prompt = docgen::build_prompt(&owner, &repo, &context, state.config.docs_listing_limit);

    info!(owner = %owner, repo = %repo, "Generating documentation");

    let mut completion_request = CompletionRequest::new(prompt, DOC_MAX_TOKENS)
        .with_system(SYSTEM_PROMPT)
        .with_temperature(DOC_TEMPERATURE);
    if let Some(ref model) = state.config.groq_model {
        completion_request = completion_request.with_model(model);
    }

    let completion = state.llm.complete(completion_request).await?;

    Ok(Json(DocsResponse {
        owner,
        repo,
        documentation: completion.text,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }))
}
