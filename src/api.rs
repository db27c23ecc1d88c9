//! Entry point tying the token, transport and export operations together.

use anyhow::Result;
use reqwest::Client;

use crate::auth::generate_token;
use crate::config::ExportDefaults;
use crate::export::Exports;
use crate::http::HttpClient;

/// Authenticated API client.
#[derive(Clone, Debug)]
pub struct Api {
    http_client: HttpClient,
}

impl Api {
    /// Creates a client from an existing access token.
    pub fn new(token: impl Into<String>, api_url: Option<String>) -> Self {
        Self::with_client(Client::new(), token, api_url)
    }

    pub fn with_client(client: Client, token: impl Into<String>, api_url: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(client, token, api_url),
        }
    }

    /// Exchanges credentials for a token and creates a client with it.
    #[tracing::instrument(skip(password))]
    pub async fn login(username: &str, password: &str, api_url: Option<String>) -> Result<Self> {
        let client = Client::new();
        let token = generate_token(&client, username, password, api_url.as_deref()).await?;
        Ok(Self::with_client(client, token, api_url))
    }

    /// Raw access to other endpoints.
    pub fn transport(&self) -> &HttpClient {
        &self.http_client
    }

    pub fn exports(&self) -> Exports<HttpClient> {
        Exports::new(self.http_client.clone())
    }

    pub fn exports_with(&self, defaults: ExportDefaults) -> Exports<HttpClient> {
        Exports::with_defaults(self.http_client.clone(), defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_API_URL;
    use crate::http::Transport;

    #[test]
    fn test_new_uses_default_url() {
        let api = Api::new("token", None);
        assert_eq!(api.transport().api_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_exports_with_defaults() {
        let api = Api::new("token", Some("https://api.test".into()));
        let defaults = ExportDefaults {
            timezone: "Asia/Tokyo".into(),
            format: "docx".into(),
        };
        assert_eq!(api.exports_with(defaults.clone()).defaults(), &defaults);
        assert_eq!(api.exports().defaults(), &ExportDefaults::default());
    }

    #[tokio::test]
    async fn test_login_then_request_with_token() {
        let mut server = mockito::Server::new_async().await;

        let auth = server
            .mock("POST", "/auth")
            .with_status(200)
            .with_body(r#"{"access_token": "fresh-token"}"#)
            .create_async()
            .await;
        let audit = server
            .mock("GET", "/audits/audit_1")
            .match_header("authorization", "Bearer fresh-token")
            .with_status(200)
            .with_body(r#"{"audit_id": "audit_1"}"#)
            .create_async()
            .await;

        let api = Api::login("user", "pw", Some(server.url())).await.unwrap();
        let body = api.transport().get("/audits/audit_1").await.unwrap();

        auth.assert_async().await;
        audit.assert_async().await;
        assert_eq!(body["audit_id"], "audit_1");
    }
}
