//! Explicit configuration values passed into the export operations.

use std::time::Duration;

/// Base URL of the public API.
pub const DEFAULT_API_URL: &str = "https://api.safetyculture.io";

/// Timezone used when an export request does not set one.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Document format used when an export request does not set one.
pub const DEFAULT_FORMAT: &str = "pdf";

/// Delay between two status checks of a pending export.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Number of status checks before giving up on a pending export.
pub const DEFAULT_MAX_TRIES: usize = 5;

/// Values filled into an export request when the caller leaves them unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDefaults {
    pub timezone: String,
    pub format: String,
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

/// Polling budget for a single [`crate::export::Exports::get`] call.
///
/// The poller always performs at least one lookup, so a `max_tries` of zero
/// behaves like one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_tries: usize,
}

impl PollConfig {
    pub fn new(interval: Duration, max_tries: usize) -> Self {
        Self {
            interval,
            max_tries,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_tries(mut self, max_tries: usize) -> Self {
        self.max_tries = max_tries;
        self
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, DEFAULT_MAX_TRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_defaults() {
        let defaults = ExportDefaults::default();
        assert_eq!(defaults.timezone, "UTC");
        assert_eq!(defaults.format, "pdf");
    }

    #[test]
    fn test_poll_config_defaults() {
        let config = PollConfig::default();
        assert_eq!(config.interval, Duration::from_millis(5000));
        assert_eq!(config.max_tries, 5);
    }

    #[test]
    fn test_poll_config_builders() {
        let config = PollConfig::default()
            .with_interval(Duration::from_millis(10))
            .with_max_tries(2);
        assert_eq!(config, PollConfig::new(Duration::from_millis(10), 2));
    }
}
