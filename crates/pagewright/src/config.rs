//! Global test configuration.
//!
//! Mirrors the runner globals that supply defaults to every wait call. Keys
//! use the runner's camelCase spelling so an existing globals file can be
//! deserialized as-is.

use crate::result::{PageError, PageResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default wait timeout (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (500ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Global defaults consumed by components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Globals {
    /// Maximum time a wait polls before timing out (ms)
    pub wait_for_condition_timeout: u64,
    /// Interval between polls (ms)
    pub wait_for_condition_poll_interval: u64,
    /// Whether a timed-out wait fails the step
    pub abort_on_assertion_failure: bool,
    /// Base URL pages resolve their paths against
    pub launch_url: Option<String>,
}

impl Default for Globals {
    fn default() -> Self {
        Self {
            wait_for_condition_timeout: DEFAULT_WAIT_TIMEOUT_MS,
            wait_for_condition_poll_interval: DEFAULT_POLL_INTERVAL_MS,
            abort_on_assertion_failure: true,
            launch_url: None,
        }
    }
}

impl Globals {
    /// Create globals with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wait timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.wait_for_condition_timeout = timeout_ms;
        self
    }

    /// Set the polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.wait_for_condition_poll_interval = poll_interval_ms;
        self
    }

    /// Set whether timed-out waits fail the step
    #[must_use]
    pub const fn with_abort_on_failure(mut self, abort: bool) -> Self {
        self.abort_on_assertion_failure = abort;
        self
    }

    /// Set the launch URL
    #[must_use]
    pub fn with_launch_url(mut self, url: impl Into<String>) -> Self {
        self.launch_url = Some(url.into());
        self
    }

    /// Wait timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.wait_for_condition_timeout)
    }

    /// Poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.wait_for_condition_poll_interval)
    }

    /// Parse globals from YAML
    pub fn from_yaml_str(source: &str) -> PageResult<Self> {
        Ok(serde_yaml_ng::from_str(source)?)
    }

    /// Parse globals from JSON
    pub fn from_json_str(source: &str) -> PageResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load globals from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> PageResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&source),
            Some("json") => Self::from_json_str(&source),
            other => Err(PageError::Config {
                message: format!(
                    "unsupported globals file extension {:?} for {}",
                    other.unwrap_or(""),
                    path.display()
                ),
            }),
        }
    }
}
