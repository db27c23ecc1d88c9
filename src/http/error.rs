//! Typed errors for non-2xx API responses.

use reqwest::StatusCode;
use thiserror::Error;

/// A request reached the server but was answered with a non-2xx status.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401
    #[error("Authentication failed for {url}. Check the API token.")]
    Unauthorized { url: String },
    /// HTTP 403
    #[error("Access forbidden: {url}")]
    Forbidden { url: String },
    /// HTTP 404
    #[error("Not found: {url}")]
    NotFound { url: String },
    /// HTTP 429
    #[error("Rate limit exceeded for {url}. Try again later.")]
    RateLimited { url: String },
    /// Any other non-2xx status
    #[error("HTTP {} error from {url}", .status.as_u16())]
    Status { status: StatusCode, url: String },
}

impl ApiError {
    /// Classifies a non-2xx status code.
    pub fn from_status(status: StatusCode, url: impl Into<String>) -> Self {
        let url = url.into();
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized { url },
            StatusCode::FORBIDDEN => ApiError::Forbidden { url },
            StatusCode::NOT_FOUND => ApiError::NotFound { url },
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited { url },
            status => ApiError::Status { status, url },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Status { status, .. } => *status,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// Converts an error from `error_for_status()` into an [`ApiError`] when it
/// carries a status, leaving connection and body errors untouched.
pub fn check_status(error: reqwest::Error) -> anyhow::Error {
    match (error.status(), error.url()) {
        (Some(status), Some(url)) => ApiError::from_status(status, url.as_str()).into(),
        (Some(status), None) => ApiError::from_status(status, "<unknown>").into(),
        _ => anyhow::Error::from(error),
    }
}

/// Returns true if the error chain contains an HTTP 404 from the API.
pub fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<ApiError>()
        .is_some_and(ApiError::is_not_found)
}
