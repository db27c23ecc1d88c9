//! HTTP transport used by the export operations.

mod client;
mod error;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::io::Write;

pub use client::HttpClient;
pub use error::{ApiError, check_status, is_not_found};

/// Opens the destination of a streamed download.
///
/// Called at most once, and only after the server answered with a 2xx status.
pub type SinkFactory = Box<dyn FnOnce() -> Result<Box<dyn Write + Send>> + Send>;

/// Authenticated access to the API.
///
/// Non-2xx responses fail with an [`ApiError`] carrying the status code.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST to an API path with query parameters and return the JSON body.
    async fn post(&self, path: &str, query: &[(String, String)]) -> Result<Value>;

    /// GET an API path and return the JSON body.
    async fn get(&self, path: &str) -> Result<Value>;

    /// GET a path or absolute URI and stream the body into the sink.
    /// Returns the number of bytes written.
    async fn stream_get(&self, uri: &str, sink: SinkFactory) -> Result<u64>;
}
