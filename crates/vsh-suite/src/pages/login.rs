//! Okta login page (email and password).

use vsh_probe::{AriaRole, BasePage, Locator, Page, PageObject, ProbeResult};

/// Okta hosted sign-in form
#[derive(Debug, Clone)]
pub struct LoginPage {
    base: BasePage,
    /// Logo above the form
    pub pictor_labs_banner: Locator,
    /// "Welcome" heading
    pub welcome_heading: Locator,
    /// "Log in to ... to continue"
    pub login_description: Locator,
    /// Email label
    pub email_label: Locator,
    /// Email input
    pub email_input: Locator,
    /// Password label
    pub password_label: Locator,
    /// Password input in either state
    pub password_input: Locator,
    /// Password input while masked
    pub password_input_hidden: Locator,
    /// Password input while revealed
    pub password_input_visible: Locator,
    /// Show/hide password switch
    pub password_toggle_btn: Locator,
    /// "Forgot password?" link
    pub forgot_password_link: Locator,
    /// Submit button
    pub continue_btn: Locator,
    /// Shown when the email is empty on submit
    pub email_required_error: Locator,
    /// Shown when the password is empty on submit
    pub password_required_error: Locator,
    /// Email input flagged `aria-invalid`
    pub email_invalid: Locator,
    /// Password input flagged `aria-invalid`
    pub password_invalid: Locator,
    /// Tooltip while the password is masked
    pub show_password_tooltip: Locator,
    /// Tooltip while the password is revealed
    pub hide_password_tooltip: Locator,
}

impl LoginPage {
    /// Build the locators for `page`
    #[must_use]
    pub fn new(page: &Page) -> Self {
        Self {
            base: BasePage::new(page.clone()),
            pictor_labs_banner: page.locator("img#prompt-logo-center"),
            welcome_heading: page.get_by_role(AriaRole::Heading, "Welcome"),
            login_description: page.get_by_text_regex("Log in to .* to continue", true),
            email_label: page.locator("#username-label"),
            email_input: page.locator("input#username"),
            password_label: page.locator("#password-label"),
            password_input: page.locator("input#password"),
            password_input_hidden: page.locator(r#"input#password[type="password"]"#),
            password_input_visible: page.locator(r#"input#password[type="text"]"#),
            password_toggle_btn: page
                .locator(r#"button[role="switch"][aria-label="Show password"]"#),
            forgot_password_link: page.get_by_role(AriaRole::Link, "Forgot password?"),
            continue_btn: page
                .locator(r#"button[type="submit"][name="action"][value="default"]"#),
            email_required_error: page.locator("#error-cs-username-required"),
            password_required_error: page.locator("#error-cs-password-required"),
            email_invalid: page.locator(r#"input#username[aria-invalid="true"]"#),
            password_invalid: page.locator(r#"input#password[aria-invalid="true"]"#),
            show_password_tooltip: page.get_by_text_exact("Show password"),
            hide_password_tooltip: page.get_by_text_exact("Hide password"),
        }
    }

    /// Click a locator on this page
    ///
    /// # Errors
    ///
    /// Returns error if the element never becomes clickable
    pub async fn click(&self, locator: &Locator) -> ProbeResult<()> {
        self.base.click(locator).await
    }

    /// Fill both fields and submit
    ///
    /// # Errors
    ///
    /// Returns error if any field or the submit button is not actionable
    pub async fn login(&self, email: &str, password: &str) -> ProbeResult<()> {
        self.base.type_text(&self.email_input, email).await?;
        self.base.type_text(&self.password_input, password).await?;
        self.base.click(&self.continue_btn).await
    }

    /// Flip the show/hide password switch
    ///
    /// # Errors
    ///
    /// Returns error if the switch is not clickable
    pub async fn toggle_password_visibility(&self) -> ProbeResult<()> {
        self.base.click(&self.password_toggle_btn).await
    }
}

impl PageObject for LoginPage {
    fn page(&self) -> &Page {
        self.base.page()
    }

    fn anchor(&self) -> &Locator {
        &self.welcome_heading
    }

    fn name(&self) -> &str {
        "LoginPage"
    }
}
