//! Export jobs: create one for an audit, wait for it to finish, download it.
//!
//! - `model` - wire shapes of jobs and requests
//! - `poll` - the bounded polling loop behind [`Exports::get`]
//! - `download` - filename derivation and streaming to a file or sink

mod download;
mod model;
mod poll;

use anyhow::{Context, Result};
use log::{debug, warn};

pub use download::{DownloadTarget, filename_from_uri};
pub use model::{ExportJob, ExportRequest, ExportStatus};
pub use poll::PollOutcome;

use crate::config::ExportDefaults;
use crate::error::ExportError;
use crate::http::{Transport, is_not_found};

/// Export operations over a [`Transport`].
pub struct Exports<T: Transport> {
    transport: T,
    defaults: ExportDefaults,
}

impl<T: Transport> Exports<T> {
    pub fn new(transport: T) -> Self {
        Self::with_defaults(transport, ExportDefaults::default())
    }

    pub fn with_defaults(transport: T, defaults: ExportDefaults) -> Self {
        Self {
            transport,
            defaults,
        }
    }

    pub fn defaults(&self) -> &ExportDefaults {
        &self.defaults
    }

    /// Starts rendering an export of the audit. The returned job is usually
    /// still in progress.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, request: &ExportRequest) -> Result<ExportJob> {
        require_non_empty(&request.audit_id, "audit id")?;

        let path = format!("/audits/{}/export", request.audit_id);
        let query = request.query(&self.defaults);
        debug!("Creating export for audit {}...", request.audit_id);

        let body = self.transport.post(&path, &query).await?;
        serde_json::from_value(body).context("Failed to parse created export")
    }

    /// Fetches the current state of an export job.
    ///
    /// Freshly created exports are sometimes not visible yet and answer 404.
    /// That case is retried once, right away; a second failure is returned.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, audit_id: &str, id: &str) -> Result<ExportJob> {
        require_non_empty(audit_id, "audit id")?;
        require_non_empty(id, "export id")?;

        let path = format!("/audits/{}/exports/{}", audit_id, id);
        let body = match self.transport.get(&path).await {
            Ok(body) => body,
            Err(e) if is_not_found(&e) => {
                warn!("Export {} not found yet, retrying once...", id);
                self.transport.get(&path).await?
            }
            Err(e) => return Err(e),
        };

        serde_json::from_value(body).context("Failed to parse export")
    }
}

fn require_non_empty(value: &str, name: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(ExportError::EmptyIdentifier(name).into());
    }
    Ok(())
}
