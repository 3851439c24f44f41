//! Organization reports: stains and users tabs.

use vsh_probe::{AriaRole, BasePage, Locator, Page, PageObject, ProbeResult, TextMatch};

const COMBOBOX_VALUE: &str = r#"input[role="combobox"][class*="MuiInputBase-input"]"#;

/// Reports screen reached from the left nav
#[derive(Debug, Clone)]
pub struct OrganizationReportsPage {
    base: BasePage,
    /// "Organization Reports"
    pub org_reports_heading: Locator,
    /// Subheading under the title
    pub org_reports_sub_heading: Locator,
    /// STAINS tab
    pub stains_tab: Locator,
    /// USERS tab
    pub users_tab: Locator,
    /// Info text on the stains tab
    pub stains_info_text: Locator,
    /// Year dropdown
    pub year_label: Locator,
    /// Permission wrapper around the usage report download
    pub download_wrapper: Locator,
    /// "Download Usage Report"
    pub download_btn: Locator,
    /// "Stain Type Details"
    pub stain_type_details_header: Locator,
    /// Immunohistochemistry panel header
    pub panel_ihc: Locator,
    /// Hematoxylin and Eosin panel header
    pub panel_he: Locator,
    /// Special Stain panel header
    pub panel_special: Locator,
    /// Quarter dropdown label inside the IHC panel
    pub ihc_quarter_label: Locator,
    /// "Download IHC Usage Report"
    pub ihc_download_btn: Locator,
    /// "Monthly Distribution"
    pub monthly_distribution_heading: Locator,
    /// "Monthly Breakdown"
    pub monthly_breakdown_heading: Locator,
    /// Users tab search input
    pub users_search_field: Locator,
    /// Every user email rendered in the users list
    pub user_email_list: Locator,
    /// "No data available"
    pub no_data_message: Locator,
}

impl OrganizationReportsPage {
    /// Build the locators for `page`
    #[must_use]
    pub fn new(page: &Page) -> Self {
        let download_wrapper =
            page.locator("div[data-testid='permission-wrapper'] >> text=Download Usage Report");
        Self {
            base: BasePage::new(page.clone()),
            org_reports_heading: page.get_by_role_exact(AriaRole::Heading, "Organization Reports"),
            org_reports_sub_heading: page
                .get_by_text_exact("Entire organization's Detailed Documents"),
            stains_tab: page.get_by_role(AriaRole::Tab, "STAINS"),
            users_tab: page.get_by_role(AriaRole::Tab, "USERS"),
            stains_info_text: page
                .get_by_text_exact("Number of stains Organization completed over the past 365 days"),
            year_label: page.get_by_label("Year"),
            download_btn: download_wrapper
                .clone()
                .get_by_text(TextMatch::exact("Download Usage Report")),
            download_wrapper,
            stain_type_details_header: page
                .get_by_role_exact(AriaRole::Heading, "Stain Type Details"),
            panel_ihc: page.locator_with_text("h6", "Immunohistochemistry"),
            panel_he: page.locator_with_text("h6", "Hematoxylin and Eosin"),
            panel_special: page.locator_with_text("h6", "Special Stain"),
            ihc_quarter_label: page
                .locator_with_text(r#"label[class^="MuiFormLabel-root MuiInputLabel"]"#, "Quarter")
                .nth(0),
            ihc_download_btn: page.get_by_text_exact("Download IHC Usage Report"),
            monthly_distribution_heading: page.get_by_text_exact("Monthly Distribution").nth(0),
            monthly_breakdown_heading: page.get_by_text_exact("Monthly Breakdown").nth(0),
            users_search_field: page.locator(r#"input[placeholder="Search by name or email"]"#),
            user_email_list: page
                .locator(r#"[class*="MuiTypography-root MuiTypography-body1"][class*="font-medium"]"#)
                .filter_has_text(TextMatch::contains("@")),
            no_data_message: page.get_by_text_exact("No data available"),
        }
    }

    /// Year dropdown showing `year`
    #[must_use]
    pub fn year_value_display(&self, year: &str) -> Locator {
        self.base
            .page()
            .locator(&format!(r#"{COMBOBOX_VALUE}[value="{year}"]"#))
    }

    /// IHC quarter dropdown showing `quarter`
    #[must_use]
    pub fn ihc_quarter_value(&self, quarter: &str) -> Locator {
        self.base
            .page()
            .locator(&format!(r#"{COMBOBOX_VALUE}[value="{quarter}"]"#))
    }

    /// Card of the user with `email`
    #[must_use]
    pub fn logged_in_user_card(&self, email: &str) -> Locator {
        self.base
            .page()
            .locator_with_text(r#"[class*="MuiTypography-body1"]"#, email)
            .first()
    }

    /// "View User" button next to the user with `email`
    #[must_use]
    pub fn view_user_button(&self, email: &str) -> Locator {
        self.logged_in_user_card(email).locator(
            "xpath=ancestor::div[contains(@class,'MuiBox-root')][1]//button[text()='View User']",
        )
    }

    /// Any users-list entry containing `email`
    #[must_use]
    pub fn user_email_text(&self, email: &str) -> Locator {
        self.base.page().locator_with_text(
            r#"[class*="MuiTypography-root"][class*="MuiTypography-body1"]"#,
            email,
        )
    }

    /// Number of users currently listed
    ///
    /// # Errors
    ///
    /// Returns error if the page cannot be queried
    pub async fn users_count(&self) -> ProbeResult<usize> {
        self.base.page().count(&self.user_email_list).await
    }
}

impl PageObject for OrganizationReportsPage {
    fn page(&self) -> &Page {
        self.base.page()
    }

    fn anchor(&self) -> &Locator {
        &self.org_reports_heading
    }

    fn name(&self) -> &str {
        "OrganizationReportsPage"
    }
}
