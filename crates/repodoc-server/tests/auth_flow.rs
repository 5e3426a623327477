//! End-to-end tests for the OAuth exchange flow and session verification.

mod common;

use anyhow::Result;
use common::{StubOptions, TestServer};

#[tokio::test]
async fn test_login_redirects_to_provider() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .client
        .get(server.url("/auth/github/login"))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 302);
    let location = response.headers()["location"].to_str()?;
    assert!(location.contains("/login/oauth/authorize?"));
    assert!(location.contains("client_id=test-client-id"));
    assert!(location.contains("scope=user%3Aemail"));
    Ok(())
}

#[tokio::test]
async fn test_callback_without_code_is_400() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .client
        .get(server.url("/auth/github/callback"))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await?;
    assert!(body["message"].as_str().unwrap().contains("code"));
    Ok(())
}

#[tokio::test]
async fn test_callback_with_rejected_code_is_400() -> Result<()> {
    let options = StubOptions {
        reject_code: true,
        ..Default::default()
    };
    let server = TestServer::start_with(options, vec![]).await?;

    let response = server
        .client
        .get(server.url("/auth/github/callback?code=bad-code"))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await?;
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("access token")
    );
    Ok(())
}

#[tokio::test]
async fn test_successful_login_then_me_returns_upserted_profile() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login().await?;

    let response = server
        .client
        .get(server.url("/auth/me"))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["githubId"], 4242);
    assert_eq!(body["login"], "octocat");
    assert_eq!(body["name"], "Octo Cat");
    assert_eq!(body["email"], "octo@example.com");
    assert_eq!(body["avatar"], "https://avatars.example/4242");
    assert!(body["createdAt"].is_string());
    // The provider credential must never appear in a response.
    assert!(body.get("accessToken").is_none());
    assert!(body.get("access_token").is_none());
    Ok(())
}

#[tokio::test]
async fn test_login_twice_keeps_a_single_record() -> Result<()> {
    let server = TestServer::start().await?;

    let first = server.login().await?;
    let second = server.login().await?;

    assert_eq!(server.store.count()?, 1);

    // Both sessions resolve to the same user.
    for token in [first, second] {
        let response = server
            .client
            .get(server.url("/auth/me"))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 200);
    }

    let user = server.store.find_by_github_id(4242)?.unwrap();
    assert_eq!(user.access_token.as_deref(), Some("gho_stub_credential"));
    Ok(())
}

#[tokio::test]
async fn test_redirect_goes_to_client_success_url() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .client
        .get(server.url("/auth/github/callback?code=good-code"))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 302);
    let location = response.headers()["location"].to_str()?;
    assert!(location.starts_with(&format!("{}/auth-success?token=", common::CLIENT_URL)));
    Ok(())
}

#[tokio::test]
async fn test_me_without_token_is_401() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server.client.get(server.url("/auth/me")).send().await?;
    assert_eq!(response.status().as_u16(), 401);
    Ok(())
}

#[tokio::test]
async fn test_me_with_garbage_token_is_401() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .client
        .get(server.url("/auth/me"))
        .header("Authorization", "Bearer not.a.session")
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 401);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "invalid or expired session");
    Ok(())
}

#[tokio::test]
async fn test_cleared_credential_is_403_with_reauth_instruction() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login().await?;

    let user = server.store.find_by_github_id(4242)?.unwrap();
    server.store.clear_credential(&user.id)?;

    let response = server
        .client
        .get(server.url("/auth/me"))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 403);
    let body: serde_json::Value = response.json().await?;
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("re-authenticate")
    );
    Ok(())
}
