//! Auth command handler

use super::require_credentials;
use crate::commands::AuthArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::ProgressReporter;
use std::path::PathBuf;
use std::sync::Arc;
use vsh_probe::SuiteConfig;
use vsh_suite::global_setup;

/// Execute the auth command: sign in once and save the storage state
///
/// # Errors
///
/// Returns a configuration error before launching the browser, or the
/// first browser, sign-in or write failure
pub async fn execute_auth(cli: &CliConfig, args: &AuthArgs) -> CliResult<PathBuf> {
    let mut config = SuiteConfig::load(args.config.as_deref())?;
    if args.headed {
        config = config.with_headless(false);
    }
    config.validate()?;
    require_credentials(&config)?;

    let reporter = ProgressReporter::new(cli.color.should_color(), cli.verbosity.is_quiet());
    reporter.info(&format!("Signing in to {}", config.base_url));

    let saved = global_setup(Arc::new(config), Some(args.out.as_path())).await?;
    reporter.info(&format!("Session saved to {}", saved.display()));
    Ok(saved)
}
