//! Wire shapes of export jobs and export requests.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::config::ExportDefaults;

const SUCCESS: &str = "SUCCESS";
const IN_PROGRESS: &str = "IN PROGRESS";

/// Server-side state of an export job.
///
/// Only the two statuses the poller acts on are named; anything else is kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExportStatus {
    Success,
    InProgress,
    Other(String),
}

impl Default for ExportStatus {
    fn default() -> Self {
        ExportStatus::Other(String::new())
    }
}

impl From<String> for ExportStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            SUCCESS => ExportStatus::Success,
            IN_PROGRESS => ExportStatus::InProgress,
            _ => ExportStatus::Other(value),
        }
    }
}

impl From<ExportStatus> for String {
    fn from(status: ExportStatus) -> Self {
        match status {
            ExportStatus::Success => SUCCESS.to_string(),
            ExportStatus::InProgress => IN_PROGRESS.to_string(),
            ExportStatus::Other(value) => value,
        }
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportStatus::Success => f.write_str(SUCCESS),
            ExportStatus::InProgress => f.write_str(IN_PROGRESS),
            ExportStatus::Other(value) => f.write_str(value),
        }
    }
}

/// Snapshot of an export job as returned by the API.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct ExportJob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub status: ExportStatus,
    /// Location of the rendered document, present once the job succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Fields this client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExportJob {
    pub fn is_success(&self) -> bool {
        self.status == ExportStatus::Success
    }
}

/// Parameters for creating an export of one audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub audit_id: String,
    pub timezone: Option<String>,
    pub format: Option<String>,
    pub export_profile: Option<String>,
}

impl ExportRequest {
    pub fn new(audit_id: impl Into<String>) -> Self {
        Self {
            audit_id: audit_id.into(),
            timezone: None,
            format: None,
            export_profile: None,
        }
    }

    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn export_profile(mut self, export_profile: impl Into<String>) -> Self {
        self.export_profile = Some(export_profile.into());
        self
    }

    /// Query parameters for the creation request. An empty export profile is
    /// left out.
    pub fn query(&self, defaults: &ExportDefaults) -> Vec<(String, String)> {
        let mut query = vec![
            (
                "format".to_string(),
                self.format.clone().unwrap_or_else(|| defaults.format.clone()),
            ),
            (
                "timezone".to_string(),
                self.timezone
                    .clone()
                    .unwrap_or_else(|| defaults.timezone.clone()),
            ),
        ];
        if let Some(profile) = self.export_profile.as_deref().filter(|p| !p.is_empty()) {
            query.push(("export_profile".to_string(), profile.to_string()));
        }
        query
    }
}
