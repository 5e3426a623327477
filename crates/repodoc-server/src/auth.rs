//! Session-verifier middleware.
//!
//! Applied to every protected route. Resolves the bearer session token to a
//! stored user record and attaches it to the request; rejects with the
//! precise status dictated by which invariant failed:
//!
//! - missing/invalid/expired token, or unresolvable subject → 401
//! - resolved user without a stored provider credential → 403

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use repodoc_auth::verify_session_token;
use repodoc_store::UserRecord;

use crate::error::ServerError;
use crate::state::AppState;

/// The authenticated user, injected into request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

/// Session verification middleware.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ServerError> {
    let user = authenticate(&state, &request)?;
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Validate the request's bearer token and resolve it to a user record.
///
/// One store lookup per request; no caching layer.
fn authenticate(state: &AppState, request: &Request<Body>) -> Result<UserRecord, ServerError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ServerError::Unauthenticated("no token provided".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ServerError::Unauthenticated("no token provided".to_string()))?;

    let claims = verify_session_token(&state.config.session_secret, token).map_err(|e| {
        // The verifier error is diagnostic detail; clients get a generic
        // message only.
        tracing::debug!(error = %e, "Session token rejected");
        ServerError::Unauthenticated("invalid or expired session".to_string())
    })?;

    let user = state
        .store
        .find_by_id(&claims.sub)?
        .ok_or_else(|| ServerError::Unauthenticated("user not found".to_string()))?;

    if !user.has_credential() {
        return Err(ServerError::Forbidden(
            "GitHub access token not found, please re-authenticate".to_string(),
        ));
    }

    Ok(user)
}
