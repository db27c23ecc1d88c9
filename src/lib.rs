//! Client for inspection report exports.
//!
//! An export is rendered asynchronously on the server: [`Exports::create`]
//! starts it, [`Exports::get`] polls until it is ready and
//! [`Exports::download`] streams the document to a file or writer.
//!
//! ```no_run
//! use audit_export::{Api, DownloadTarget, ExportRequest, PollConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let api = Api::new("access-token", None);
//! let exports = api.exports();
//!
//! let job = exports.create(&ExportRequest::new("audit_123")).await?;
//! let id = job.id.unwrap_or_default();
//! let job = exports.get("audit_123", &id, &PollConfig::default()).await?;
//! if let Some(uri) = job.uri {
//!     exports.download(&uri, DownloadTarget::in_dir("reports")).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod http;

pub use api::Api;
pub use config::{ExportDefaults, PollConfig};
pub use error::{AuthError, ExportError};
pub use export::{
    DownloadTarget, ExportJob, ExportRequest, ExportStatus, Exports, filename_from_uri,
};
pub use http::{ApiError, HttpClient, Transport};
