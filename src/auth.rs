//! Username/password exchange for an API access token.

use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::config::DEFAULT_API_URL;
use crate::error::AuthError;
use crate::http::check_status;

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
}

/// Exchanges credentials for an access token.
///
/// Every failure is reported as [`AuthError::InvalidCredentials`]; the
/// underlying cause is logged at debug level.
#[tracing::instrument(skip(client, password))]
pub async fn generate_token(
    client: &Client,
    username: &str,
    password: &str,
    api_url: Option<&str>,
) -> Result<String> {
    let url = format!(
        "{}/auth",
        api_url.unwrap_or(DEFAULT_API_URL).trim_end_matches('/')
    );

    request_token(client, &url, username, password)
        .await
        .map_err(|e| {
            debug!("Token exchange with {} failed: {:#}", url, e);
            anyhow::Error::from(AuthError::InvalidCredentials)
        })
}

async fn request_token(
    client: &Client,
    url: &str,
    username: &str,
    password: &str,
) -> Result<String> {
    let response = client
        .post(url)
        .form(&[
            ("username", username),
            ("password", password),
            ("grant_type", "password"),
        ])
        .send()
        .await
        .context("Failed to send authentication request")?;

    let response = response.error_for_status().map_err(check_status)?;

    let body = response
        .json::<TokenResponse>()
        .await
        .context("Failed to parse authentication response")?;

    Ok(body.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_generate_token_success() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/auth")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("username".into(), "inspector@example.com".into()),
                Matcher::UrlEncoded("password".into(), "hunter2".into()),
                Matcher::UrlEncoded("grant_type".into(), "password".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "abc123", "token_type": "bearer"}"#)
            .create_async()
            .await;

        let token = generate_token(
            &Client::new(),
            "inspector@example.com",
            "hunter2",
            Some(server.url().as_str()),
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(token, "abc123");
    }

    #[tokio::test]
    async fn test_generate_token_rejected() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/auth")
            .with_status(401)
            .create_async()
            .await;

        let err = generate_token(&Client::new(), "user", "wrong", Some(server.url().as_str()))
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(
            err.downcast_ref::<AuthError>(),
            Some(AuthError::InvalidCredentials)
        ));
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[tokio::test]
    async fn test_generate_token_missing_field() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/auth")
            .with_status(200)
            .with_body(r#"{"token_type": "bearer"}"#)
            .create_async()
            .await;

        let err = generate_token(&Client::new(), "user", "pw", Some(server.url().as_str()))
            .await
            .unwrap_err();

        assert!(err.downcast_ref::<AuthError>().is_some());
    }
}
