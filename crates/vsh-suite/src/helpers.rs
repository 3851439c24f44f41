//! Shared navigation steps.

use crate::log;
use crate::pages::{LandingPage, LoginPage};
use vsh_probe::{Page, PageObject, ProbeResult, SuiteConfig};

/// Sign in through the landing page and Okta with the configured account.
///
/// # Errors
///
/// Returns the first failing step: navigation, a page that never loads or a
/// field that is not actionable.
pub async fn login_to_dashboard(page: &Page, config: &SuiteConfig) -> ProbeResult<()> {
    let landing = LandingPage::new(page);
    let login = LoginPage::new(page);

    landing.open().await?;
    landing.is_loaded().await?;
    landing.click_okta_sign_in().await?;
    login.is_loaded().await?;

    log::info(&format!("Signing in as {}", config.username));
    login.login(&config.username, &config.password).await
}
