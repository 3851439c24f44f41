//! Landing screen shown before authentication.

use vsh_probe::{AriaRole, BasePage, Locator, Page, PageObject, ProbeResult};

/// Public landing page with the Okta entry point
#[derive(Debug, Clone)]
pub struct LandingPage {
    base: BasePage,
    /// "Sign In" button that hands over to Okta
    pub okta_sign_in_btn: Locator,
    /// Pictor Labs logo
    pub pictor_labs_banner: Locator,
    /// "Welcome to Virtual Stain Hub"
    pub virtual_stain_hub_heading: Locator,
    /// "by Pictor Labs" tagline
    pub by_pictor_labs_text: Locator,
}

impl LandingPage {
    /// Build the locators for `page`
    #[must_use]
    pub fn new(page: &Page) -> Self {
        Self {
            base: BasePage::new(page.clone()),
            okta_sign_in_btn: page.get_by_role(AriaRole::Button, "Sign In"),
            pictor_labs_banner: page.locator(r#"img[src*="pictorlabs_logo"]"#),
            virtual_stain_hub_heading: page
                .get_by_role(AriaRole::Heading, "Welcome to Virtual Stain Hub"),
            by_pictor_labs_text: page.get_by_text_exact("by Pictor Labs"),
        }
    }

    /// Navigate to the base URL
    ///
    /// # Errors
    ///
    /// Returns error if navigation fails
    pub async fn open(&self) -> ProbeResult<()> {
        self.base.goto("/").await
    }

    /// Click "Sign In", moving on to the Okta login page
    ///
    /// # Errors
    ///
    /// Returns error if the button never becomes clickable
    pub async fn click_okta_sign_in(&self) -> ProbeResult<()> {
        self.base.click(&self.okta_sign_in_btn).await
    }
}

impl PageObject for LandingPage {
    fn page(&self) -> &Page {
        self.base.page()
    }

    fn anchor(&self) -> &Locator {
        &self.virtual_stain_hub_heading
    }

    fn name(&self) -> &str {
        "LandingPage"
    }
}
