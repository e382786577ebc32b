//! CLI command definitions using clap

use clap::{builder::PossibleValuesParser, Parser, Subcommand, ValueEnum};
use qa_probe::suites::SUITE_IDS;
use std::path::PathBuf;

/// qa-probe: end-to-end checks for the Q/A tool
#[derive(Parser, Debug)]
#[command(name = "qa-probe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run suites against the application in Chromium
    Run(RunArgs),

    /// List suites and their scenarios
    List(ListArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Suite to run (repeatable; default: all)
    #[arg(short, long = "suite", value_name = "NAME", value_parser = PossibleValuesParser::new(SUITE_IDS))]
    pub suites: Vec<String>,

    /// Only run scenarios whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Base URL of the application under test
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Run the scenarios of each suite concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Stop after the first scenario that does not pass
    #[arg(long)]
    pub fail_fast: bool,

    /// Per-scenario timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Chromium executable to launch
    #[arg(long, value_name = "PATH")]
    pub chromium: Option<PathBuf>,

    /// Launch Chromium without its sandbox (containers/CI)
    #[arg(long)]
    pub no_sandbox: bool,

    /// YAML run configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the list command
#[derive(Parser, Debug, Default)]
pub struct ListArgs {
    /// Suite to list (repeatable; default: all)
    #[arg(short, long = "suite", value_name = "NAME", value_parser = PossibleValuesParser::new(SUITE_IDS))]
    pub suites: Vec<String>,
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON run report on stdout
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_run_command() {
            let cli = Cli::parse_from(["qa-probe", "run"]);
            let Commands::Run(args) = cli.command else {
                panic!("expected run command");
            };
            assert!(args.suites.is_empty());
            assert_eq!(args.format, FormatArg::Text);
            assert!(!args.parallel);
        }

        #[test]
        fn test_parse_run_with_options() {
            let cli = Cli::parse_from([
                "qa-probe",
                "run",
                "--suite",
                "buttons",
                "-s",
                "questions",
                "--filter",
                "sorted",
                "--base-url",
                "http://127.0.0.1:8000",
                "--parallel",
                "--fail-fast",
                "--timeout",
                "5000",
                "--headed",
                "--format",
                "json",
            ]);
            let Commands::Run(args) = cli.command else {
                panic!("expected run command");
            };
            assert_eq!(args.suites, vec!["buttons", "questions"]);
            assert_eq!(args.filter.as_deref(), Some("sorted"));
            assert_eq!(args.base_url.as_deref(), Some("http://127.0.0.1:8000"));
            assert!(args.parallel && args.fail_fast && args.headed);
            assert_eq!(args.timeout, Some(5_000));
            assert_eq!(args.format, FormatArg::Json);
        }

        #[test]
        fn test_unknown_suite_rejected() {
            let result = Cli::try_parse_from(["qa-probe", "run", "--suite", "checkout"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_list_command() {
            let cli = Cli::parse_from(["qa-probe", "list", "--suite", "negative"]);
            let Commands::List(args) = cli.command else {
                panic!("expected list command");
            };
            assert_eq!(args.suites, vec!["negative"]);
        }

        #[test]
        fn test_global_flags() {
            let cli = Cli::parse_from(["qa-probe", "list", "-vv", "--color", "never"]);
            assert_eq!(cli.verbose, 2);
            assert!(matches!(cli.color, ColorArg::Never));
            assert!(!cli.quiet);
        }
    }
}
