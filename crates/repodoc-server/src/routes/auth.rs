//! OAuth login flow and current-user endpoints.

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use repodoc_auth::{AuthError, build_authorization_url, exchange_code, mint_session_token};
use repodoc_store::{ProviderProfile, UserRecord};

use crate::auth::CurrentUser;
use crate::error::ServerError;
use crate::state::AppState;

/// Query parameters of the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
}

/// Current-user response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub id: String,
    pub github_id: i64,
    pub name: Option<String>,
    pub login: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for MeResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            github_id: user.github_id,
            name: user.name,
            login: user.login,
            email: user.email,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

/// GET /auth/github/login - redirect the browser to the provider.
///
/// The configuration check runs before any URL is constructed, so an
/// unconfigured deployment can never emit a malformed redirect.
pub async fn login_handler(State(state): State<AppState>) -> Result<Response, ServerError> {
    let oauth = state
        .oauth
        .as_deref()
        .ok_or_else(|| ServerError::Config("GitHub OAuth is not configured".to_string()))?;

    let authorize_url = build_authorization_url(oauth);
    Ok(found(&authorize_url))
}

/// GET /auth/github/callback - complete the exchange and establish a session.
pub async fn callback_handler(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, ServerError> {
    let oauth = state
        .oauth
        .as_deref()
        .ok_or_else(|| ServerError::Config("GitHub OAuth is not configured".to_string()))?;

    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ServerError::BadRequest("no authorization code provided".to_string()))?;

    let credential = exchange_code(oauth, &code).await.map_err(|e| match e {
        AuthError::Exchange(_) => {
            // The raw provider response is already logged by the exchange.
            ServerError::BadRequest("failed to get GitHub access token".to_string())
        }
        other => {
            error!(error = %other, "Token exchange failed");
            ServerError::Internal("authentication failed".to_string())
        }
    })?;

    // From here on every failure is a 500 with a generic message; nothing
    // provider-specific reaches the browser.
    let profile = state.github.current_user(&credential).await.map_err(|e| {
        error!(error = %e, "Profile fetch failed");
        ServerError::Internal("authentication failed".to_string())
    })?;

    let user = state.store.upsert_by_github_id(
        &ProviderProfile {
            github_id: profile.id,
            login: profile.login,
            name: profile.name,
            email: profile.email,
            avatar: profile.avatar_url,
        },
        &credential,
    )?;

    let token = mint_session_token(
        &state.config.session_secret,
        &user.id,
        state.config.session_ttl,
    )
    .map_err(|e| {
        error!(error = %e, "Session token minting failed");
        ServerError::Internal("authentication failed".to_string())
    })?;

    info!(github_id = user.github_id, login = %user.login, "Login established");

    let location = format!(
        "{}/auth-success?token={token}",
        state.config.client_url.trim_end_matches('/')
    );
    Ok(found(&location))
}

/// GET /auth/me - the authenticated user's profile.
pub async fn me_handler(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<MeResponse> {
    Json(MeResponse::from(user))
}

/// Build a 302 redirect response.
fn found(location: &str) -> Response {
    match header::HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(e) => {
            warn!(error = %e, "Redirect target is not a valid header value");
            ServerError::Internal("invalid redirect target".to_string()).into_response()
        }
    }
}
