//! Top bar present on every authenticated screen.

use vsh_probe::{BasePage, Locator, Page, PageObject};

/// Support, profile and organization controls
#[derive(Debug, Clone)]
pub struct TopBar {
    base: BasePage,
    /// Support icon, opens the support popup
    pub support_button: Locator,
    /// Profile icon; its alt text is the signed-in email
    pub profile_icon: Locator,
    /// Organization switcher
    pub hiring_org_button: Locator,
    /// Profile menu: "My Organization"
    pub profile_menu_my_org: Locator,
    /// Profile menu: "Log out"
    pub profile_menu_logout: Locator,
    /// Organization entry inside the opened switcher
    pub hiring_org_dropdown_item: Locator,
}

impl TopBar {
    /// Build the locators for `page`
    #[must_use]
    pub fn new(page: &Page) -> Self {
        Self {
            base: BasePage::new(page.clone()),
            support_button: page.locator(r#"img[class*="cursor-pointer"][alt="Support"]"#),
            profile_icon: page.locator(r#"img[class*="cursor-pointer"][alt*="@"]"#),
            hiring_org_button: page.get_by_text("PictorLabs Hiring Org").first(),
            profile_menu_my_org: page.get_by_text_exact("My Organization"),
            profile_menu_logout: page.get_by_text_exact("Log out"),
            hiring_org_dropdown_item: page.get_by_text("PictorLabs Hiring Org").nth(1),
        }
    }
}

impl PageObject for TopBar {
    fn page(&self) -> &Page {
        self.base.page()
    }

    fn anchor(&self) -> &Locator {
        &self.support_button
    }

    fn name(&self) -> &str {
        "TopBar"
    }
}
