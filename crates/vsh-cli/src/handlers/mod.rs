//! Command handlers
//!
//! Each handler owns the logic for one subcommand; `main` only parses
//! arguments and maps the outcome to an exit code.

pub mod auth;
pub mod list;

pub use auth::execute_auth;
pub use list::{execute_list, render_list};
pub use test::{apply_overrides, execute_test};

use crate::error::{CliError, CliResult};
use vsh_probe::SuiteConfig;

/// Refuse to start a browser without an account to sign in with
///
/// # Errors
///
/// Returns a configuration error naming the missing variable
pub fn require_credentials(config: &SuiteConfig) -> CliResult<()> {
    if config.username.trim().is_empty() {
        return Err(CliError::config(
            "username is empty (set VSH_USERNAME or username in the config file)",
        ));
    }
    if config.password.is_empty() {
        return Err(CliError::config(
            "password is empty (set VSH_PASSWORD or password in the config file)",
        ));
    }
    Ok(())
}
