//! Test harness for running scenario suites.
//!
//! A [`Suite`] is a named list of [`Scenario`]s sharing one [`Fixture`].
//! [`TestHarness`] opens a fresh page per scenario, runs the fixture's
//! before-hook and the body under the scenario timeout, then always runs the
//! after-hook and closes the page.
//!
//! ```text
//!   new_page ──► before_each ──► body ──► after_each ──► close
//!                └──── scenario timeout ───┘  └─ own timeout ─┘
//! ```

use crate::config::RunConfig;
use crate::driver::{PageDriver, PageFactory};
use crate::fixture::Fixture;
use crate::result::{QaError, QaResult};
use crate::wait::WaitOptions;
use futures::future::{join_all, BoxFuture};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Values every scenario body and hook may read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioContext {
    /// Where the application under test is served
    pub base_url: String,
    /// Bounds for waits inside the scenario
    pub wait: WaitOptions,
}

impl Default for ScenarioContext {
    fn default() -> Self {
        RunConfig::default().context()
    }
}

/// Boxed future returned by a scenario body
pub type ScenarioFuture<'a> = BoxFuture<'a, QaResult<()>>;

/// A scenario body
pub type ScenarioFn = Arc<
    dyn for<'a> Fn(&'a mut dyn PageDriver, &'a ScenarioContext) -> ScenarioFuture<'a>
        + Send
        + Sync,
>;

/// A single named scenario
#[derive(Clone)]
pub struct Scenario {
    /// Scenario name
    pub name: String,
    body: Option<ScenarioFn>,
    skip_reason: Option<String>,
}

impl Scenario {
    /// Create a runnable scenario
    ///
    /// Bodies are usually `async fn`s wrapped as `|page, ctx| Box::pin(body(page, ctx))`.
    #[must_use]
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: for<'a> Fn(&'a mut dyn PageDriver, &'a ScenarioContext) -> ScenarioFuture<'a>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            body: Some(Arc::new(body)),
            skip_reason: None,
        }
    }

    /// Create a scenario that is listed but never run
    #[must_use]
    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: None,
            skip_reason: Some(reason.into()),
        }
    }

    /// Why the scenario is skipped, if it is
    #[must_use]
    pub fn skip_reason(&self) -> Option<&str> {
        self.skip_reason.as_deref()
    }

    /// Whether the scenario is skipped
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        self.skip_reason.is_some()
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("skip_reason", &self.skip_reason)
            .finish_non_exhaustive()
    }
}

/// A named group of scenarios sharing a fixture
#[derive(Clone)]
pub struct Suite {
    /// Short identifier used on the command line
    pub id: String,
    /// Display name
    pub name: String,
    /// Hooks run around every scenario
    pub fixture: Arc<dyn Fixture>,
    /// Scenarios in declaration order
    pub scenarios: Vec<Scenario>,
}

impl Suite {
    /// Create an empty suite
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, fixture: impl Fixture + 'static) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fixture: Arc::new(fixture),
            scenarios: Vec::new(),
        }
    }

    /// Add a scenario
    #[must_use]
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    /// Keep only scenarios whose name contains `pattern`
    #[must_use]
    pub fn filtered(mut self, pattern: &str) -> Self {
        self.scenarios.retain(|s| s.name.contains(pattern));
        self
    }

    /// Get the number of scenarios
    #[must_use]
    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("fixture", &self.fixture.name())
            .field("scenarios", &self.scenarios)
            .finish()
    }
}

/// Which hook failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hook {
    /// Runs before the body
    Before,
    /// Runs after the body
    After,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

/// How a scenario ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Body and hooks succeeded
    Passed,
    /// The body returned an error
    Failed {
        /// Error message
        error: String,
    },
    /// A hook failed while the body did not
    HookFailed {
        /// Failing hook
        hook: Hook,
        /// Error message
        error: String,
    },
    /// Before-hook plus body exceeded the scenario timeout
    TimedOut {
        /// Timeout in milliseconds
        ms: u64,
    },
    /// Not run
    Skipped {
        /// Why
        reason: String,
    },
}

impl Outcome {
    /// Short lowercase label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed { .. } => "failed",
            Self::HookFailed { .. } => "hook failed",
            Self::TimedOut { .. } => "timed out",
            Self::Skipped { .. } => "skipped",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed { error } => write!(f, "failed: {error}"),
            Self::HookFailed { hook, error } => write!(f, "{hook} hook failed: {error}"),
            Self::TimedOut { ms } => write!(f, "timed out after {ms}ms"),
            Self::Skipped { reason } => write!(f, "skipped: {reason}"),
        }
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    /// Suite display name
    pub suite: String,
    /// Scenario name
    pub name: String,
    /// How it ended
    pub outcome: Outcome,
    /// After-hook error when the outcome already records another failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_hook_error: Option<String>,
    /// Time spent, hooks included
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl ScenarioResult {
    fn new(suite: &str, name: &str, outcome: Outcome) -> Self {
        Self {
            suite: suite.to_string(),
            name: name.to_string(),
            outcome,
            after_hook_error: None,
            duration: Duration::ZERO,
        }
    }

    /// Whether the scenario passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed && self.after_hook_error.is_none()
    }

    /// Whether the scenario was skipped
    #[must_use]
    pub const fn skipped(&self) -> bool {
        matches!(self.outcome, Outcome::Skipped { .. })
    }

    /// Whether the scenario counts against the run
    #[must_use]
    pub fn failed(&self) -> bool {
        !self.passed() && !self.skipped()
    }
}

/// Results from running a suite
#[derive(Debug, Clone, Serialize)]
pub struct SuiteResults {
    /// Suite identifier
    pub suite_id: String,
    /// Suite display name
    pub suite_name: String,
    /// Individual scenario results, in declaration order
    pub results: Vec<ScenarioResult>,
    /// Total duration
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl SuiteResults {
    fn not_run(suite: &Suite, reason: &str) -> Self {
        Self {
            suite_id: suite.id.clone(),
            suite_name: suite.name.clone(),
            results: suite
                .scenarios
                .iter()
                .map(|s| {
                    ScenarioResult::new(
                        &suite.name,
                        &s.name,
                        Outcome::Skipped {
                            reason: reason.to_string(),
                        },
                    )
                })
                .collect(),
            duration: Duration::ZERO,
        }
    }

    /// Check no scenario failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        !self.results.iter().any(ScenarioResult::failed)
    }

    /// Count passed scenarios
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    /// Count failed scenarios
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.failed()).count()
    }

    /// Count skipped scenarios
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.results.iter().filter(|r| r.skipped()).count()
    }

    /// Get total scenario count
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Get failed scenarios
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioResult> {
        self.results.iter().filter(|r| r.failed()).collect()
    }

    /// Look up a scenario result by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.name == name)
    }
}

/// Results from running several suites
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Per-suite results, in run order
    pub suites: Vec<SuiteResults>,
    /// Total duration
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl RunReport {
    /// Check no scenario failed in any suite
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.suites.iter().all(SuiteResults::all_passed)
    }

    /// Count passed scenarios
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.suites.iter().map(SuiteResults::passed_count).sum()
    }

    /// Count failed scenarios
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.suites.iter().map(SuiteResults::failed_count).sum()
    }

    /// Count skipped scenarios
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.suites.iter().map(SuiteResults::skipped_count).sum()
    }

    /// Get total scenario count
    #[must_use]
    pub fn total(&self) -> usize {
        self.suites.iter().map(SuiteResults::total).sum()
    }
}

/// How the scenarios of one suite are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteMode {
    /// One after another
    Serial,
    /// All at once, each on its own page
    Parallel,
}

/// Receives progress notifications while a run is in flight
pub trait RunObserver: Send + Sync {
    /// A scenario is about to start
    fn scenario_started(&self, _suite: &str, _scenario: &str) {}

    /// A scenario has finished
    fn scenario_finished(&self, _result: &ScenarioResult) {}
}

impl RunObserver for () {}

/// Where a scenario stopped
enum Stage {
    Before,
    Body,
}

/// Test harness for running suites
#[derive(Debug, Clone, Default)]
pub struct TestHarness {
    config: RunConfig,
}

impl TestHarness {
    /// Create a harness for the given configuration
    #[must_use]
    pub const fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Scheduling mode derived from the configuration
    #[must_use]
    pub const fn mode(&self) -> SuiteMode {
        if self.config.parallel {
            SuiteMode::Parallel
        } else {
            SuiteMode::Serial
        }
    }

    /// Run a suite
    pub async fn run_suite(&self, suite: &Suite, pages: &dyn PageFactory) -> SuiteResults {
        self.run_suite_with(suite, pages, &()).await
    }

    /// Run a suite, reporting progress to `observer`
    pub async fn run_suite_with(
        &self,
        suite: &Suite,
        pages: &dyn PageFactory,
        observer: &dyn RunObserver,
    ) -> SuiteResults {
        let start = Instant::now();
        let ctx = self.config.context();
        tracing::info!(suite = %suite.name, scenarios = suite.scenario_count(), "running suite");

        let results = match self.mode() {
            SuiteMode::Parallel => {
                tracing::warn!(
                    suite = %suite.name,
                    "parallel scenarios share one application instance; question lists may interfere"
                );
                join_all(
                    suite
                        .scenarios
                        .iter()
                        .map(|s| self.observed(suite, s, pages, &ctx, observer)),
                )
                .await
            }
            SuiteMode::Serial => {
                let mut results = Vec::with_capacity(suite.scenarios.len());
                let mut stopped = false;
                for scenario in &suite.scenarios {
                    let result = if stopped {
                        let skipped = ScenarioResult::new(
                            &suite.name,
                            &scenario.name,
                            Outcome::Skipped {
                                reason: "fail-fast: an earlier scenario failed".to_string(),
                            },
                        );
                        observer.scenario_finished(&skipped);
                        skipped
                    } else {
                        self.observed(suite, scenario, pages, &ctx, observer).await
                    };
                    stopped |= self.config.fail_fast && result.failed();
                    results.push(result);
                }
                results
            }
        };

        let suite_results = SuiteResults {
            suite_id: suite.id.clone(),
            suite_name: suite.name.clone(),
            results,
            duration: start.elapsed(),
        };
        tracing::info!(
            suite = %suite.name,
            passed = suite_results.passed_count(),
            failed = suite_results.failed_count(),
            skipped = suite_results.skipped_count(),
            "suite finished"
        );
        suite_results
    }

    /// Run several suites in order
    pub async fn run_all(
        &self,
        suites: &[Suite],
        pages: &dyn PageFactory,
        observer: &dyn RunObserver,
    ) -> RunReport {
        let start = Instant::now();
        let mut report = RunReport::default();
        for suite in suites {
            if self.config.fail_fast && !report.all_passed() {
                report
                    .suites
                    .push(SuiteResults::not_run(suite, "fail-fast: an earlier suite failed"));
                continue;
            }
            report
                .suites
                .push(self.run_suite_with(suite, pages, observer).await);
        }
        report.duration = start.elapsed();
        report
    }

    async fn observed(
        &self,
        suite: &Suite,
        scenario: &Scenario,
        pages: &dyn PageFactory,
        ctx: &ScenarioContext,
        observer: &dyn RunObserver,
    ) -> ScenarioResult {
        observer.scenario_started(&suite.name, &scenario.name);
        let result = self.run_scenario(suite, scenario, pages, ctx).await;
        match &result.outcome {
            Outcome::Passed => {
                tracing::info!(suite = %suite.name, scenario = %scenario.name, "passed");
            }
            Outcome::Skipped { reason } => {
                tracing::info!(suite = %suite.name, scenario = %scenario.name, %reason, "skipped");
            }
            outcome => {
                tracing::warn!(suite = %suite.name, scenario = %scenario.name, %outcome, "did not pass");
            }
        }
        observer.scenario_finished(&result);
        result
    }

    async fn run_scenario(
        &self,
        suite: &Suite,
        scenario: &Scenario,
        pages: &dyn PageFactory,
        ctx: &ScenarioContext,
    ) -> ScenarioResult {
        let start = Instant::now();
        let body = match (&scenario.body, &scenario.skip_reason) {
            (Some(body), None) => Arc::clone(body),
            (_, reason) => {
                let reason = reason.clone().unwrap_or_else(|| "no body".to_string());
                return ScenarioResult::new(&suite.name, &scenario.name, Outcome::Skipped { reason });
            }
        };

        let mut page = match pages.new_page().await {
            Ok(page) => page,
            Err(e) => {
                let mut result = ScenarioResult::new(
                    &suite.name,
                    &scenario.name,
                    Outcome::Failed {
                        error: format!("could not open page: {e}"),
                    },
                );
                result.duration = start.elapsed();
                return result;
            }
        };

        let timeout = self.config.scenario_timeout();
        let timeout_ms = self.config.scenario_timeout_ms;
        let fixture = &suite.fixture;

        tracing::debug!(scenario = %scenario.name, fixture = fixture.name(), "before hook");
        let main = tokio::time::timeout(timeout, async {
            fixture
                .before_each(page.as_mut(), ctx)
                .await
                .map_err(|e| (Stage::Before, e))?;
            body(page.as_mut(), ctx).await.map_err(|e| (Stage::Body, e))
        })
        .await;

        let mut outcome = match main {
            Err(_) => Outcome::TimedOut { ms: timeout_ms },
            Ok(Ok(())) => Outcome::Passed,
            Ok(Err((Stage::Before, e))) => Outcome::HookFailed {
                hook: Hook::Before,
                error: e.to_string(),
            },
            Ok(Err((Stage::Body, e))) => Outcome::Failed {
                error: e.to_string(),
            },
        };

        tracing::debug!(scenario = %scenario.name, fixture = fixture.name(), "after hook");
        let after = match tokio::time::timeout(timeout, fixture.after_each(page.as_mut(), ctx)).await {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(_) => Some(
                QaError::Timeout {
                    ms: timeout_ms,
                    waited_for: "after hook".to_string(),
                }
                .to_string(),
            ),
        };

        let mut after_hook_error = None;
        if let Some(error) = after {
            if outcome == Outcome::Passed {
                outcome = Outcome::HookFailed {
                    hook: Hook::After,
                    error,
                };
            } else {
                after_hook_error = Some(
                    QaError::HookFailed {
                        hook: Hook::After.to_string(),
                        message: error,
                    }
                    .to_string(),
                );
            }
        }

        if let Err(e) = page.close().await {
            tracing::warn!(scenario = %scenario.name, error = %e, "failed to close page");
        }

        ScenarioResult {
            suite: suite.name.clone(),
            name: scenario.name.clone(),
            outcome,
            after_hook_error,
            duration: start.elapsed(),
        }
    }
}
