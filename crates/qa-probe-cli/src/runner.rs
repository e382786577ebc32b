//! Suite runner: turns command-line arguments into a harness run

use crate::commands::{ListArgs, RunArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{JsonReport, OutputFormat, ProgressReporter};
use chrono::Utc;
use qa_probe::{suites, PageFactory, RunConfig, RunReport, Suite, TestHarness};
use std::fmt::Write as _;

/// Pick the suites to run, in declaration order
///
/// # Errors
///
/// Returns error if an id is unknown or the filter leaves nothing to run
pub fn select_suites(ids: &[String], filter: Option<&str>) -> CliResult<Vec<Suite>> {
    let mut selected: Vec<Suite> = if ids.is_empty() {
        suites::all()
    } else {
        suites::all()
            .into_iter()
            .filter(|s| ids.iter().any(|id| *id == s.id))
            .collect()
    };

    if let Some(unknown) = ids.iter().find(|id| suites::find(id).is_none()) {
        return Err(CliError::invalid_argument(format!("unknown suite '{unknown}'")));
    }

    if let Some(pattern) = filter {
        selected = selected
            .into_iter()
            .map(|s| s.filtered(pattern))
            .filter(|s| s.scenario_count() > 0)
            .collect();
        if selected.is_empty() {
            return Err(CliError::invalid_argument(format!(
                "no scenario matches '{pattern}'"
            )));
        }
    }

    Ok(selected)
}

/// Layer the run configuration: file or defaults, then environment, then flags
///
/// # Errors
///
/// Returns error if the file cannot be read or the result does not validate
pub fn build_run_config(args: &RunArgs) -> CliResult<RunConfig> {
    build_run_config_with(args, |key| std::env::var(key).ok())
}

fn build_run_config_with(
    args: &RunArgs,
    lookup: impl Fn(&str) -> Option<String>,
) -> CliResult<RunConfig> {
    let mut config = match args.config {
        Some(ref path) => RunConfig::from_yaml_file(path)?,
        None => RunConfig::default(),
    }
    .with_overrides_from(lookup);

    if let Some(ref url) = args.base_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(ms) = args.timeout {
        config = config.with_scenario_timeout(ms);
    }
    if args.parallel {
        config = config.with_parallel();
    }
    if args.fail_fast {
        config = config.with_fail_fast();
    }
    if args.headed {
        config = config.headed();
    }
    if let Some(ref path) = args.chromium {
        config.chromium_path = Some(path.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Runs selected suites and reports the outcome
#[derive(Debug)]
pub struct SuiteRunner {
    config: CliConfig,
    run_config: RunConfig,
    format: OutputFormat,
}

impl SuiteRunner {
    /// Create a runner
    #[must_use]
    pub const fn new(config: CliConfig, run_config: RunConfig, format: OutputFormat) -> Self {
        Self {
            config,
            run_config,
            format,
        }
    }

    /// Run `suites` against pages from `pages`
    ///
    /// # Errors
    ///
    /// Returns error if the JSON report cannot be written
    pub async fn run(&self, suites: &[Suite], pages: &dyn PageFactory) -> CliResult<RunReport> {
        let json = self.format == OutputFormat::Json;
        let mut reporter = ProgressReporter::new(
            self.config.color.should_color(),
            self.config.verbosity.is_quiet() || json,
        );

        let total: usize = suites.iter().map(Suite::scenario_count).sum();
        reporter.info(&format!(
            "Running {total} scenarios against {}",
            self.run_config.base_url
        ));
        reporter.start_progress(total as u64, "starting");

        let started_at = Utc::now();
        let harness = TestHarness::new(self.run_config.clone());
        let report = harness.run_all(suites, pages, &reporter).await;
        reporter.finish();

        if json {
            println!(
                "{}",
                JsonReport::new(&report, &self.run_config.base_url, started_at).render()?
            );
        } else {
            reporter.report(&report);
            reporter.summary(
                report.passed_count(),
                report.failed_count(),
                report.skipped_count(),
                report.duration,
            );
        }
        Ok(report)
    }
}

/// Render the `list` output
///
/// # Errors
///
/// Returns error if a suite id is unknown
pub fn render_list(args: &ListArgs) -> CliResult<String> {
    let mut out = String::new();
    for suite in select_suites(&args.suites, None)? {
        let _ = writeln!(out, "{} ({})", suite.name, suite.id);
        for scenario in &suite.scenarios {
            match scenario.skip_reason() {
                Some(reason) => {
                    let _ = writeln!(out, "  - {} [skipped: {reason}]", scenario.name);
                }
                None => {
                    let _ = writeln!(out, "  - {}", scenario.name);
                }
            }
        }
    }
    Ok(out)
}

/// Execute the `run` command against a freshly launched Chromium
///
/// # Errors
///
/// Returns error on bad arguments, configuration, or browser launch failure
#[cfg(feature = "browser")]
pub async fn run_command(config: CliConfig, args: &RunArgs) -> CliResult<RunReport> {
    use qa_probe::{BrowserConfig, ChromiumBrowser};

    let suites = select_suites(&args.suites, args.filter.as_deref())?;
    let run_config = build_run_config(args)?;

    let mut browser_config = BrowserConfig::from_run_config(&run_config);
    if args.no_sandbox {
        browser_config = browser_config.with_no_sandbox();
    }
    let browser = ChromiumBrowser::launch(browser_config).await?;

    let runner = SuiteRunner::new(config, run_config, args.format.into());
    let result = runner.run(&suites, &browser).await;
    if let Err(e) = browser.close().await {
        tracing::warn!(error = %e, "browser did not close cleanly");
    }
    result
}

/// Execute the `run` command (browser support not compiled in)
///
/// # Errors
///
/// Always returns an error after validating the arguments
#[cfg(not(feature = "browser"))]
pub async fn run_command(_config: CliConfig, args: &RunArgs) -> CliResult<RunReport> {
    select_suites(&args.suites, args.filter.as_deref())?;
    build_run_config(args)?;
    Err(CliError::config(
        "browser support not enabled. Rebuild with --features browser",
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::{ColorChoice, Verbosity};
    use qa_probe::{mock::MockQaPage, PageDriver, QaResult, BASE_URL_ENV};
    use std::io::Write;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    mod select_tests {
        use super::*;

        #[test]
        fn test_all_suites_by_default() {
            let selected = select_suites(&[], None).unwrap();
            let names: Vec<_> = selected.iter().map(|s| s.id.as_str()).collect();
            assert_eq!(names, suites::SUITE_IDS);
        }

        #[test]
        fn test_keeps_declaration_order() {
            let selected = select_suites(&ids(&["questions", "buttons"]), None).unwrap();
            let names: Vec<_> = selected.iter().map(|s| s.id.as_str()).collect();
            assert_eq!(names, ["buttons", "questions"]);
        }

        #[test]
        fn test_unknown_suite() {
            let err = select_suites(&ids(&["checkout"]), None).unwrap_err();
            assert!(err.to_string().contains("checkout"));
        }

        #[test]
        fn test_filter_drops_empty_suites() {
            let selected = select_suites(&[], Some("sorted alphabetically")).unwrap();
            assert_eq!(selected.len(), 1);
            assert_eq!(selected[0].id, "questions");
            assert_eq!(selected[0].scenario_count(), 1);
        }

        #[test]
        fn test_filter_without_match() {
            assert!(select_suites(&[], Some("no such scenario")).is_err());
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = build_run_config_with(&RunArgs::default(), |_| None).unwrap();
            assert_eq!(config, RunConfig::default());
        }

        #[test]
        fn test_flags_override_environment() {
            let args = RunArgs {
                base_url: Some("http://127.0.0.1:9000".into()),
                timeout: Some(1_000),
                parallel: true,
                headed: true,
                ..RunArgs::default()
            };
            let config = build_run_config_with(&args, |key| {
                (key == BASE_URL_ENV).then(|| "http://env.example:8000".to_string())
            })
            .unwrap();
            assert_eq!(config.base_url, "http://127.0.0.1:9000");
            assert_eq!(config.scenario_timeout_ms, 1_000);
            assert!(config.parallel);
            assert!(!config.headless);
        }

        #[test]
        fn test_environment_applies_without_flag() {
            let config = build_run_config_with(&RunArgs::default(), |key| {
                (key == BASE_URL_ENV).then(|| "http://env.example:8000".to_string())
            })
            .unwrap();
            assert_eq!(config.base_url, "http://env.example:8000");
        }

        #[test]
        fn test_config_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "base_url: http://file.example:8000\nfail_fast: true").unwrap();
            let args = RunArgs {
                config: Some(file.path().to_path_buf()),
                ..RunArgs::default()
            };
            let config = build_run_config_with(&args, |_| None).unwrap();
            assert_eq!(config.base_url, "http://file.example:8000");
            assert!(config.fail_fast);
        }

        #[test]
        fn test_zero_timeout_rejected() {
            let args = RunArgs {
                timeout: Some(0),
                ..RunArgs::default()
            };
            let err = build_run_config_with(&args, |_| None).unwrap_err();
            assert!(matches!(err, CliError::QaProbe(_)));
        }
    }

    mod runner_tests {
        use super::*;

        fn quiet() -> CliConfig {
            CliConfig::new()
                .with_verbosity(Verbosity::Quiet)
                .with_color(ColorChoice::Never)
        }

        #[tokio::test]
        async fn test_run_against_mock() {
            let pages = || -> QaResult<Box<dyn PageDriver>> { Ok(Box::new(MockQaPage::new())) };
            let runner = SuiteRunner::new(quiet(), RunConfig::default(), OutputFormat::Text);
            let report = runner.run(&select_suites(&[], None).unwrap(), &pages).await.unwrap();
            assert!(report.all_passed());
            assert_eq!(report.total(), 15);
            assert_eq!(report.skipped_count(), 1);
        }

        #[tokio::test]
        async fn test_run_reports_failures() {
            let pages = || -> QaResult<Box<dyn PageDriver>> {
                Ok(Box::new(MockQaPage::new().with_broken_sort()))
            };
            let runner = SuiteRunner::new(quiet(), RunConfig::default(), OutputFormat::Text);
            let suites = select_suites(&ids(&["questions"]), None).unwrap();
            let report = runner.run(&suites, &pages).await.unwrap();
            assert!(!report.all_passed());
            assert_eq!(report.failed_count(), 1);
        }
    }

    mod list_tests {
        use super::*;

        #[test]
        fn test_list_all() {
            let out = render_list(&ListArgs::default()).unwrap();
            assert!(out.contains("Basic Navigation and Page Content Tests (navigation)"));
            assert!(out.contains("[skipped: disabled due to a known failure]"));
            assert_eq!(out.lines().filter(|l| l.starts_with("  - ")).count(), 15);
        }

        #[test]
        fn test_list_one_suite() {
            let out = render_list(&ListArgs {
                suites: ids(&["buttons"]),
            })
            .unwrap();
            assert!(out.starts_with("Button Color and Text Test (buttons)"));
            assert_eq!(out.lines().count(), 4);
        }
    }
}
