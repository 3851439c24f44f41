//! Support request popup opened from the top bar.

use crate::log;
use crate::test_data::ISSUE_CATEGORIES;
use rand::seq::SliceRandom;
use std::time::Duration;
use vsh_probe::{AriaRole, BasePage, Locator, Page, PageObject, ProbeResult, WaitState};

use super::SLOW_PAGE_TIMEOUT_MS;

/// Delay between keystrokes when typing the title
const TYPING_DELAY_MS: u64 = 20;

/// Support request form and its success dialog
#[derive(Debug, Clone)]
pub struct SupportPopup {
    base: BasePage,
    /// "# Order ID:" header
    pub order_id_label: Locator,
    /// Email label
    pub email_label: Locator,
    /// Pre-filled, disabled email input
    pub email_input: Locator,
    /// Title label
    pub title_label: Locator,
    /// Title input
    pub title_input: Locator,
    /// Issue category combobox
    pub issue_category_input: Locator,
    /// "Problem Description" label
    pub problem_description_label: Locator,
    /// Submit button
    pub request_support_btn: Locator,
    /// Shown when no category is picked on submit
    pub issue_category_error: Locator,
    /// Success dialog icon
    pub success_icon: Locator,
    /// "Your request has been ..."
    pub success_message: Locator,
    /// Success dialog close button
    pub close_success_btn: Locator,
    /// Title field by accessible name
    pub issue_title_textbox: Locator,
    /// Description field by accessible name
    pub problem_description_textbox: Locator,
}

impl SupportPopup {
    /// Build the locators for `page`
    #[must_use]
    pub fn new(page: &Page) -> Self {
        Self {
            base: BasePage::new(page.clone()),
            order_id_label: page.locator(r##"div[style*="bold"]:has-text("# Order ID:")"##),
            email_label: page.locator(r#"label[data-shrink="true"]:has-text("Email")"#),
            email_input: page.locator(r#"input[disabled][name="email"]"#),
            title_label: page.locator(r#"label[data-shrink="true"]:has-text("Title")"#),
            title_input: page.locator(r#"input[name="title"]"#),
            issue_category_input: page.get_by_role(AriaRole::Combobox, "Issue Category"),
            problem_description_label: page
                .locator(r#"label:has-text("Problem Description")"#)
                .first(),
            request_support_btn: page.locator(r#"button:has-text("Request Support")"#),
            issue_category_error: page
                .locator(r#"span[class*="text-red"]:has-text("Please select a issue category")"#),
            success_icon: page.get_by_test_id("SuccessOutlinedIcon"),
            success_message: page.get_by_text("Your request has been"),
            close_success_btn: page.get_by_role(AriaRole::Button, "Close"),
            issue_title_textbox: page.get_by_role(AriaRole::Textbox, "Issue title"),
            problem_description_textbox: page
                .get_by_role(AriaRole::Textbox, "Problem Description"),
        }
    }

    /// Field-level validation message with the given text
    #[must_use]
    pub fn error_text(&self, text: &str) -> Locator {
        self.base
            .page()
            .locator_with_text(r#"p[class*="Mui-error"]"#, text)
    }

    /// Option of the opened category dropdown
    #[must_use]
    pub fn dropdown_option(&self, name: &str) -> Locator {
        self.base.page().get_by_role(AriaRole::Option, name)
    }

    /// Open the category dropdown and pick `name`
    ///
    /// # Errors
    ///
    /// Returns error if the dropdown or the option is not clickable
    pub async fn select_category(&self, name: &str) -> ProbeResult<()> {
        self.base.click(&self.issue_category_input).await?;
        self.base.click(&self.dropdown_option(name)).await
    }

    /// Pick one of [`ISSUE_CATEGORIES`] at random and return it
    ///
    /// # Errors
    ///
    /// Returns error if the dropdown or the option is not clickable
    pub async fn select_random_category(&self) -> ProbeResult<&'static str> {
        let category = ISSUE_CATEGORIES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(ISSUE_CATEGORIES[0]);
        log::info(&format!("Selecting issue category: {category}"));
        self.select_category(category).await?;
        Ok(category)
    }

    /// Click the title field and type `title` key by key
    ///
    /// # Errors
    ///
    /// Returns error if the field is not clickable
    pub async fn fill_title_by_keyboard(&self, title: &str) -> ProbeResult<()> {
        self.base.click(&self.issue_title_textbox).await?;
        self.base.page().keyboard_type(title, TYPING_DELAY_MS).await
    }

    /// Wait until the popup header is shown
    ///
    /// # Errors
    ///
    /// Returns a timeout if the popup does not open within ten seconds
    pub async fn is_visible(&self) -> ProbeResult<()> {
        let header = self
            .order_id_label
            .clone()
            .with_timeout(Duration::from_millis(SLOW_PAGE_TIMEOUT_MS));
        self.base.page().wait_for(&header, WaitState::Visible).await
    }
}

impl PageObject for SupportPopup {
    fn page(&self) -> &Page {
        self.base.page()
    }

    fn anchor(&self) -> &Locator {
        &self.order_id_label
    }

    fn load_timeout_ms(&self) -> Option<u64> {
        Some(SLOW_PAGE_TIMEOUT_MS)
    }

    fn name(&self) -> &str {
        "SupportPopup"
    }
}
