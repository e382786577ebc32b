//! qa-probe: run the Q/A tool suites in Chromium
//!
//! ## Usage
//!
//! ```bash
//! qa-probe list                              # Show suites and scenarios
//! qa-probe run                               # Run every suite
//! qa-probe run --suite buttons --headed      # One suite, visible browser
//! qa-probe run --base-url http://ci:8000 --format json
//! ```

use clap::Parser;
use qa_probe_cli::{render_list, run_command, Cli, CliConfig, CliError, CliResult, Commands, Verbosity};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the run passed
fn run() -> CliResult<bool> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);

    match cli.command {
        Commands::List(args) => {
            print!("{}", render_list(&args)?);
            Ok(true)
        }
        Commands::Run(args) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(CliError::Io)?;
            let report = runtime.block_on(run_command(config, &args))?;
            Ok(report.all_passed())
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.clone().into())
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
