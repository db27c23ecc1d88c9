use thiserror::Error;

/// Failures raised by the export operations themselves.
///
/// Transport failures are reported as [`crate::http::ApiError`] instead.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(
        "Export {id} did not complete: gave up after {attempts} tries (last status: {status}). \
         Increasing max_tries may help."
    )]
    PollTimeout {
        id: String,
        attempts: usize,
        status: String,
    },

    #[error("Cannot extract a filename from URI '{0}'")]
    InvalidUri(String),

    #[error("'{0}' is not a plain file name")]
    InvalidFilename(String),

    #[error("The {0} must not be empty")]
    EmptyIdentifier(&'static str),
}

/// Failures of the credential exchange.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_timeout_mentions_attempts() {
        let err = ExportError::PollTimeout {
            id: "export_1".into(),
            attempts: 5,
            status: "IN PROGRESS".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("after 5 tries"));
        assert!(msg.contains("export_1"));
        assert!(msg.contains("IN PROGRESS"));
    }

    #[test]
    fn test_invalid_uri_display() {
        let err = ExportError::InvalidUri("no-slash".into());
        assert_eq!(
            err.to_string(),
            "Cannot extract a filename from URI 'no-slash'"
        );
    }
}
