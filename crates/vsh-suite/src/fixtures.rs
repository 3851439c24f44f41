//! Fixtures shared by the suites.

use crate::pages::{LandingPage, LoginPage};
use async_trait::async_trait;
use vsh_probe::{Fixture, Page, PageObject, ProbeResult};

/// Starts every test on the Okta login page, reached from the landing page
#[derive(Debug, Clone)]
pub struct LoginFixture {
    /// Landing page, already loaded
    pub landing: LandingPage,
    /// Login page, already loaded
    pub login: LoginPage,
}

#[async_trait]
impl Fixture for LoginFixture {
    async fn setup(page: &Page) -> ProbeResult<Self> {
        let landing = LandingPage::new(page);
        landing.open().await?;
        landing.is_loaded().await?;

        let login = LoginPage::new(page);
        landing.click_okta_sign_in().await?;
        login.is_loaded().await?;

        Ok(Self { landing, login })
    }

    fn name(&self) -> &str {
        "LoginFixture"
    }
}
