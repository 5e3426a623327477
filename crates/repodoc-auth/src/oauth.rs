//! GitHub authorization-code OAuth flow.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// Timeout for the server-to-server token exchange.
const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(30);

/// OAuth configuration for the GitHub web-application flow.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub authorize_url: String,
    pub token_url: String,
    pub redirect_uri: String,
    pub scope: String,
}

impl OAuthConfig {
    /// Create OAuth config for github.com.
    ///
    /// The callback URL is derived from the public server URL; the scope is
    /// the minimal read-only profile/email grant.
    pub fn github(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        server_url: &str,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            authorize_url: "https://github.com/login/oauth/authorize".to_string(),
            token_url: "https://github.com/login/oauth/access_token".to_string(),
            redirect_uri: format!(
                "{}/auth/github/callback",
                server_url.trim_end_matches('/')
            ),
            scope: "user:email".to_string(),
        }
    }

    /// Override the provider endpoints (GitHub Enterprise, tests).
    pub fn with_endpoints(
        mut self,
        authorize_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        self.authorize_url = authorize_url.into();
        self.token_url = token_url.into();
        self
    }
}

/// Build the authorization URL for the OAuth flow.
pub fn build_authorization_url(config: &OAuthConfig) -> String {
    let params = [
        ("client_id", config.client_id.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("scope", config.scope.as_str()),
    ];

    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", config.authorize_url, query)
}

#[derive(Debug, Serialize)]
struct TokenExchangeRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Exchange an authorization code for a provider credential.
///
/// GitHub signals a rejected code with a 200 response carrying an `error`
/// field instead of `access_token`; both that and a non-success status are
/// surfaced as [`AuthError::Exchange`]. The raw provider response is logged
/// for diagnosis and never returned to the caller.
pub async fn exchange_code(config: &OAuthConfig, code: &str) -> Result<String> {
    let request_body = TokenExchangeRequest {
        client_id: &config.client_id,
        client_secret: &config.client_secret,
        code,
    };

    let client = reqwest::Client::new();
    let response = client
        .post(&config.token_url)
        .timeout(EXCHANGE_TIMEOUT)
        .header("Accept", "application/json")
        .json(&request_body)
        .send()
        .await
        .map_err(|e| AuthError::Network(format!("token exchange request failed: {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unreadable response".to_string());

    if !status.is_success() {
        tracing::error!(status = %status, response = %body, "Token exchange rejected");
        return Err(AuthError::Exchange(format!(
            "provider returned status {status}"
        )));
    }

    let parsed: TokenExchangeResponse = serde_json::from_str(&body).map_err(|e| {
        tracing::error!(response = %body, "Unparseable token exchange response");
        AuthError::Exchange(format!("unparseable provider response: {e}"))
    })?;

    match parsed.access_token.filter(|t| !t.is_empty()) {
        Some(token) => Ok(token),
        None => {
            tracing::error!(response = %body, "No access token in exchange response");
            Err(AuthError::Exchange(
                "provider did not return an access token".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OAuthConfig {
        OAuthConfig::github("iv1.test-client", "shhh", "http://localhost:5000/")
    }

    #[test]
    fn test_callback_url_derived_from_server_url() {
        let config = config();
        assert_eq!(
            config.redirect_uri,
            "http://localhost:5000/auth/github/callback"
        );
    }

    #[test]
    fn test_authorization_url() {
        let url = build_authorization_url(&config());

        assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(url.contains("client_id=iv1.test-client"));
        assert!(url.contains("scope=user%3Aemail"));
        // redirect_uri must be URL-encoded
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A5000%2Fauth%2Fgithub%2Fcallback"
        ));
    }

    #[test]
    fn test_endpoint_override() {
        let config = config().with_endpoints(
            "http://127.0.0.1:9/authorize",
            "http://127.0.0.1:9/token",
        );
        let url = build_authorization_url(&config);
        assert!(url.starts_with("http://127.0.0.1:9/authorize?"));
        assert_eq!(config.token_url, "http://127.0.0.1:9/token");
    }

    #[tokio::test]
    async fn test_exchange_against_unreachable_provider_is_a_network_error() {
        // Port 1 is never listening; the request must fail before any body
        // parsing happens.
        let config = config().with_endpoints(
            "http://127.0.0.1:1/authorize",
            "http://127.0.0.1:1/token",
        );
        let err = exchange_code(&config, "abc123").await.unwrap_err();
        assert!(matches!(err, AuthError::Network(_)));
    }
}
