//! vsh CLI library
//!
//! Command-line runner for the Virtual Stain Hub suites: `test` runs them
//! in a browser, `auth` saves a signed-in session, `list` prints what would
//! run.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{AuthArgs, Cli, ColorArg, Commands, ListArgs, TestArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult, EXIT_ERROR, EXIT_SUCCESS, EXIT_TEST_FAILURES};
pub use output::ProgressReporter;
