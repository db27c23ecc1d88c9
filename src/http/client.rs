//! reqwest-backed [`Transport`] with bearer authentication.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::io::Write;

use super::error::check_status;
use super::{SinkFactory, Transport};
use crate::config::DEFAULT_API_URL;

/// HTTP client bound to one API base URL and access token.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    api_url: String,
    token: String,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a client for `api_url`, defaulting to the public API.
    pub fn new(client: Client, token: impl Into<String>, api_url: Option<String>) -> Self {
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Joins an API path to the base URL. Absolute URIs are returned unchanged.
    pub fn url(&self, path_or_uri: &str) -> String {
        if is_absolute(path_or_uri) {
            path_or_uri.to_string()
        } else if path_or_uri.starts_with('/') {
            format!("{}{}", self.api_url, path_or_uri)
        } else {
            format!("{}/{}", self.api_url, path_or_uri)
        }
    }

    /// Attaches the token only to requests aimed at the API itself.
    fn authorize(&self, request: RequestBuilder, url: &str) -> RequestBuilder {
        let same_origin = url
            .strip_prefix(self.api_url.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?']));
        if same_origin {
            request.bearer_auth(&self.token)
        } else {
            request
        }
    }
}

fn is_absolute(uri: &str) -> bool {
    uri.starts_with("https://") || uri.starts_with("http://")
}

#[async_trait]
impl Transport for HttpClient {
    #[tracing::instrument(skip(self, query))]
    async fn post(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let url = self.url(path);
        debug!("POST {} with query {:?}...", url, query);

        let response = self
            .authorize(self.client.post(&url), &url)
            .query(query)
            .send()
            .await
            .context("Failed to send request")?;

        let response = response.error_for_status().map_err(check_status)?;

        response
            .json::<Value>()
            .await
            .context("Failed to parse JSON response")
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        debug!("GET JSON from {}...", url);

        let response = self
            .authorize(self.client.get(&url), &url)
            .send()
            .await
            .context("Failed to send request")?;

        let response = response.error_for_status().map_err(check_status)?;

        response
            .json::<Value>()
            .await
            .context("Failed to parse JSON response")
    }

    #[tracing::instrument(skip(self, sink))]
    async fn stream_get(&self, uri: &str, sink: SinkFactory) -> Result<u64> {
        let url = self.url(uri);
        debug!("Streaming {}...", url);

        let response = self
            .authorize(self.client.get(&url), &url)
            .send()
            .await
            .context("Failed to start download request")?;

        let mut response = response.error_for_status().map_err(check_status)?;

        let mut writer = sink()?;
        let mut downloaded_bytes: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .context("Failed to read chunk from download stream")?
        {
            writer
                .write_all(&chunk)
                .context("Failed to write chunk to sink")?;
            downloaded_bytes += chunk.len() as u64;
        }
        writer.flush().context("Failed to flush sink")?;

        debug!(
            "Downloaded {:.2} MB",
            downloaded_bytes as f64 / (1024.0 * 1024.0)
        );

        Ok(downloaded_bytes)
    }
}
