//! One-off sign-in that saves a reusable session.
//!
//! The storage state written here is loaded by the runner before each test
//! when `storage_state` is configured, so suites can skip the Okta round
//! trip.

use crate::helpers::login_to_dashboard;
use crate::log;
use crate::pages::OrgDashboardPage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vsh_probe::{
    BrowserPageFactory, PageFactory, PageObject, ProbeError, ProbeResult, SuiteConfig,
};

/// Where the session is saved when no path is given
pub const DEFAULT_AUTH_FILE: &str = "auth.json";

/// Sign in on a page from `factory` and save its storage state to `out`.
///
/// # Errors
///
/// Returns error if sign-in fails, the dashboard never loads or the file
/// cannot be written.
pub async fn save_session(
    factory: &dyn PageFactory,
    config: &SuiteConfig,
    out: &Path,
) -> ProbeResult<PathBuf> {
    tracing::info!(base_url = %config.base_url, "starting global setup");
    let page = factory.new_page().await?;

    let result = async {
        login_to_dashboard(&page, config).await?;
        OrgDashboardPage::new(&page).is_loaded().await?;
        let state = page.storage_state().await?;
        state.save(out)?;
        tracing::info!(path = %out.display(), cookies = state.cookies.len(), "session saved");
        Ok::<_, ProbeError>(out.to_path_buf())
    }
    .await;
    if let Err(ref err) = result {
        log::error(&format!("Global setup failed: {err}"));
    }

    if let Err(err) = page.close().await {
        tracing::warn!(error = %err, "failed to close setup page");
    }
    result
}

/// Launch a browser, sign in and save the session to `out`
/// (default [`DEFAULT_AUTH_FILE`]).
///
/// # Errors
///
/// Returns error if the browser cannot be launched or sign-in fails.
pub async fn global_setup(config: Arc<SuiteConfig>, out: Option<&Path>) -> ProbeResult<PathBuf> {
    let out = out.unwrap_or_else(|| Path::new(DEFAULT_AUTH_FILE));
    let factory = BrowserPageFactory::launch(Arc::clone(&config)).await?;
    let saved = save_session(&factory, &config, out).await;
    factory.close().await?;
    saved
}
