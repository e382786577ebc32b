//! Output formatting and progress reporting

use crate::error::CliResult;
use chrono::{DateTime, Utc};
use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use qa_probe::{Outcome, RunObserver, RunReport, ScenarioResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Output format for run results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Progress reporter for suite execution
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar over `total` scenarios
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Increment progress
    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    /// Update progress message
    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(message.to_string());
        }
    }

    /// Finish and clear the progress bar
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    fn write_line(&self, line: &str) {
        match self.progress_bar {
            Some(ref pb) if !pb.is_finished() => pb.println(line),
            _ => {
                let _ = self.term.write_line(line);
            }
        }
    }

    fn prefixed(&self, symbol: &str, plain: &str, paint: fn(&str) -> String) -> String {
        if self.use_color {
            paint(symbol)
        } else {
            plain.to_string()
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = self.prefixed("✓", "PASS", |s| style(s).green().bold().to_string());
        self.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Failures are printed even in quiet mode
        let prefix = self.prefixed("✗", "FAIL", |s| style(s).red().bold().to_string());
        self.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = self.prefixed("⚠", "SKIP", |s| style(s).yellow().bold().to_string());
        self.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = self.prefixed("ℹ", "INFO", |s| style(s).blue().bold().to_string());
        self.write_line(&format!("{prefix} {message}"));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        self.write_line("");
        self.write_line(&styled);
    }

    /// Print one line per scenario, grouped by suite
    pub fn report(&self, report: &RunReport) {
        for suite in &report.suites {
            self.header(&suite.suite_name);
            for result in &suite.results {
                self.scenario_line(result);
            }
        }
    }

    fn scenario_line(&self, result: &ScenarioResult) {
        if result.passed() {
            self.success(&result.name);
        } else if result.skipped() {
            self.warning(&format!("{} ({})", result.name, result.outcome));
        } else {
            let mut line = format!("{}: {}", result.name, result.outcome);
            if let Some(ref after) = result.after_hook_error {
                line.push_str(&format!(" [{after}]"));
            }
            self.failure(&line);
        }
    }

    /// Print run summary
    pub fn summary(&self, passed: usize, failed: usize, skipped: usize, duration: Duration) {
        if self.quiet && failed == 0 {
            return;
        }

        let _ = self.term.write_line("");

        let total = passed + failed + skipped;
        let duration_secs = duration.as_secs_f64();

        if self.use_color {
            let passed_style = Style::new().green().bold();
            let failed_style = Style::new().red().bold();
            let skipped_style = Style::new().yellow();

            let status = if failed > 0 {
                failed_style.apply_to("FAILED")
            } else {
                passed_style.apply_to("PASSED")
            };

            let _ = self.term.write_line(&format!(
                "{} {} scenarios in {:.2}s ({} passed, {} failed, {} skipped)",
                status,
                total,
                duration_secs,
                passed_style.apply_to(passed),
                if failed > 0 {
                    failed_style.apply_to(failed).to_string()
                } else {
                    failed.to_string()
                },
                skipped_style.apply_to(skipped)
            ));
        } else {
            let status = if failed > 0 { "FAILED" } else { "PASSED" };
            let _ = self.term.write_line(&format!(
                "{status} {total} scenarios in {duration_secs:.2}s ({passed} passed, {failed} failed, {skipped} skipped)"
            ));
        }
    }
}

impl RunObserver for ProgressReporter {
    fn scenario_started(&self, _suite: &str, scenario: &str) {
        self.set_message(scenario);
    }

    fn scenario_finished(&self, result: &ScenarioResult) {
        self.increment(1);
        if matches!(result.outcome, Outcome::TimedOut { .. }) {
            tracing::warn!(scenario = %result.name, "scenario timed out");
        }
    }
}

/// JSON document written by `run --format json`
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// Tool version
    pub version: &'static str,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Application under test
    pub base_url: &'a str,
    /// Whether every scenario passed or was skipped
    pub success: bool,
    /// Scenario totals
    pub passed: usize,
    /// Failed scenarios
    pub failed: usize,
    /// Skipped scenarios
    pub skipped: usize,
    /// Full per-suite results
    #[serde(flatten)]
    pub report: &'a RunReport,
}

impl<'a> JsonReport<'a> {
    /// Wrap a finished run
    #[must_use]
    pub fn new(report: &'a RunReport, base_url: &'a str, started_at: DateTime<Utc>) -> Self {
        Self {
            version: qa_probe::VERSION,
            started_at,
            base_url,
            success: report.all_passed(),
            passed: report.passed_count(),
            failed: report.failed_count(),
            skipped: report.skipped_count(),
            report,
        }
    }

    /// Render as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn render(&self) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
