//! Waiting for an export job to finish.

use anyhow::Result;
use log::{debug, info, warn};

use super::{ExportJob, ExportStatus, Exports};
use crate::config::PollConfig;
use crate::error::ExportError;
use crate::http::Transport;

/// What one lookup means for the polling loop.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The job finished; stop and return it.
    Success(ExportJob),
    /// Still rendering and tries remain; wait and look again.
    Pending,
    /// Out of tries, or the job reported a status other than in progress.
    Exhausted(ExportJob),
}

impl PollOutcome {
    /// Decides the next step after lookup number `attempt` (1-based).
    ///
    /// Only the exact in-progress status keeps the loop going.
    pub fn decide(job: ExportJob, attempt: usize, max_tries: usize) -> Self {
        match job.status {
            ExportStatus::Success => PollOutcome::Success(job),
            ExportStatus::InProgress if attempt < max_tries => PollOutcome::Pending,
            _ => PollOutcome::Exhausted(job),
        }
    }
}

impl<T: Transport> Exports<T> {
    /// Looks up the export until it succeeds.
    ///
    /// Fails with [`ExportError::PollTimeout`] once `config.max_tries` lookups
    /// saw it in progress, or as soon as it reports any other status. Lookup
    /// errors end the loop immediately.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, audit_id: &str, id: &str, config: &PollConfig) -> Result<ExportJob> {
        let mut attempt = 1;

        loop {
            debug!(
                "Checking export {} (attempt {}/{})...",
                id, attempt, config.max_tries
            );
            let job = self.find_by_id(audit_id, id).await?;

            match PollOutcome::decide(job, attempt, config.max_tries) {
                PollOutcome::Success(job) => {
                    info!("Export {} is ready after {} tries", id, attempt);
                    return Ok(job);
                }
                PollOutcome::Pending => {
                    tokio::time::sleep(config.interval).await;
                    attempt += 1;
                }
                PollOutcome::Exhausted(job) => {
                    warn!(
                        "Giving up on export {} after {} tries (status: {})",
                        id, attempt, job.status
                    );
                    return Err(ExportError::PollTimeout {
                        id: id.to_string(),
                        attempts: attempt,
                        status: job.status.to_string(),
                    }
                    .into());
                }
            }
        }
    }
}
