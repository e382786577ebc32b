//! qa-probe CLI library
//!
//! Command-line front end for the qa-probe suites: argument parsing,
//! configuration layering, progress output and report rendering.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, FormatArg, ListArgs, RunArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{JsonReport, OutputFormat, ProgressReporter};
pub use runner::{build_run_config, render_list, run_command, select_suites, SuiteRunner};
