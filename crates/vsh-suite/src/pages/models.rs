//! Organization models (stain management).

use vsh_probe::{AriaRole, BasePage, Locator, Page, PageObject};

use super::SLOW_PAGE_TIMEOUT_MS;

const CARD_ANCESTOR: &str = "xpath=ancestor::div[contains(@class,'border')][1]";

/// Models screen reached from the left nav
#[derive(Debug, Clone)]
pub struct ModelsPage {
    base: BasePage,
    /// "Organization Models"
    pub org_models_heading: Locator,
    /// "Organization Stain Management"
    pub org_models_sub_heading: Locator,
    /// Stain Management tab
    pub stain_management_tab: Locator,
    /// "Total Stainers Available"
    pub total_stainers_label: Locator,
    /// Count next to the label
    pub total_stainers_value: Locator,
    /// "Auto Deep Stainer"
    pub auto_deep_stainer_heading: Locator,
    /// "Auto Restainer"
    pub auto_restainer_heading: Locator,
    /// H&E v0.1.0 model card
    pub he_card_v010: Locator,
    /// PanCK-MG-TRT model card
    pub panck_card: Locator,
}

impl ModelsPage {
    /// Build the locators for `page`
    #[must_use]
    pub fn new(page: &Page) -> Self {
        let total_stainers_label = page.get_by_text_exact("Total Stainers Available");
        Self {
            base: BasePage::new(page.clone()),
            org_models_heading: page.get_by_role_exact(AriaRole::Heading, "Organization Models"),
            org_models_sub_heading: page.get_by_text_exact("Organization Stain Management"),
            stain_management_tab: page.get_by_role_exact(AriaRole::Tab, "Stain Management"),
            total_stainers_value: total_stainers_label
                .clone()
                .locator("xpath=following-sibling::div[1]"),
            total_stainers_label,
            auto_deep_stainer_heading: page
                .get_by_role_exact(AriaRole::Heading, "Auto Deep Stainer"),
            auto_restainer_heading: page.get_by_role_exact(AriaRole::Heading, "Auto Restainer"),
            he_card_v010: page.get_by_text("Version: v0.1.0").locator(CARD_ANCESTOR),
            panck_card: page.get_by_text("PanCK-MG-TRT").locator(CARD_ANCESTOR),
        }
    }
}

impl PageObject for ModelsPage {
    fn page(&self) -> &Page {
        self.base.page()
    }

    fn anchor(&self) -> &Locator {
        &self.org_models_heading
    }

    fn load_timeout_ms(&self) -> Option<u64> {
        Some(SLOW_PAGE_TIMEOUT_MS)
    }

    fn name(&self) -> &str {
        "ModelsPage"
    }
}
