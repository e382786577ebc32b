//! Run configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! the `QA_PROBE_BASE_URL` environment variable, then whatever the caller
//! (usually the CLI) sets explicitly.

use crate::data::PAGE_URL;
use crate::harness::ScenarioContext;
use crate::result::{QaError, QaResult};
use crate::wait::{WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the application base URL
pub const BASE_URL_ENV: &str = "QA_PROBE_BASE_URL";

/// Default per-scenario timeout (30 seconds)
pub const DEFAULT_SCENARIO_TIMEOUT_MS: u64 = 30_000;

/// Browser viewport size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels
    pub width: u32,
    /// Height in CSS pixels
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Configuration for a suite run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Where the application under test is served
    pub base_url: String,
    /// Upper bound for one scenario including its hooks
    pub scenario_timeout_ms: u64,
    /// Upper bound for bounded waits inside a scenario
    pub wait_timeout_ms: u64,
    /// Polling interval for bounded waits
    pub poll_interval_ms: u64,
    /// Run the scenarios of a suite concurrently
    pub parallel: bool,
    /// Stop after the first scenario that does not pass
    pub fail_fast: bool,
    /// Run the browser without a window
    pub headless: bool,
    /// Explicit Chromium executable
    pub chromium_path: Option<PathBuf>,
    /// Browser viewport
    pub viewport: Viewport,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_url: PAGE_URL.to_string(),
            scenario_timeout_ms: DEFAULT_SCENARIO_TIMEOUT_MS,
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            parallel: false,
            fail_fast: false,
            headless: true,
            chromium_path: None,
            viewport: Viewport::default(),
        }
    }
}

impl RunConfig {
    /// Create a configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or the values are invalid.
    pub fn from_yaml_str(yaml: &str) -> QaResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> QaResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading run config");
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Apply environment overrides from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides from an arbitrary lookup
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            tracing::debug!(%url, "base URL overridden from {BASE_URL_ENV}");
            self.base_url = url;
        }
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-scenario timeout
    #[must_use]
    pub const fn with_scenario_timeout(mut self, ms: u64) -> Self {
        self.scenario_timeout_ms = ms;
        self
    }

    /// Set the bounded-wait timeout
    #[must_use]
    pub const fn with_wait_timeout(mut self, ms: u64) -> Self {
        self.wait_timeout_ms = ms;
        self
    }

    /// Enable parallel execution
    #[must_use]
    pub const fn with_parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// Enable fail-fast mode
    #[must_use]
    pub const fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Show the browser window
    #[must_use]
    pub const fn headed(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Check the values are usable
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Config`] naming the first bad value.
    pub fn validate(&self) -> QaResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(QaError::config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.scenario_timeout_ms == 0 {
            return Err(QaError::config("scenario_timeout_ms must be positive"));
        }
        if self.poll_interval_ms == 0 || self.poll_interval_ms > self.wait_timeout_ms {
            return Err(QaError::config(
                "poll_interval_ms must be positive and no larger than wait_timeout_ms",
            ));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(QaError::config("viewport dimensions must be positive"));
        }
        Ok(())
    }

    /// Per-scenario timeout as Duration
    #[must_use]
    pub const fn scenario_timeout(&self) -> Duration {
        Duration::from_millis(self.scenario_timeout_ms)
    }

    /// Options for bounded waits
    #[must_use]
    pub const fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.wait_timeout_ms,
            poll_interval_ms: self.poll_interval_ms,
        }
    }

    /// Context handed to every scenario body and hook
    #[must_use]
    pub fn context(&self) -> ScenarioContext {
        ScenarioContext {
            base_url: self.base_url.clone(),
            wait: self.wait_options(),
        }
    }
}
