//! Organization account page ("My Organization").

use vsh_probe::{AriaRole, BasePage, Locator, Page, PageObject, ProbeResult};

use super::SLOW_PAGE_TIMEOUT_MS;

/// Account management with GENERAL and ORGANIZATION tabs
#[derive(Debug, Clone)]
pub struct OrgAccountPage {
    base: BasePage,
    /// "Your Account"
    pub account_heading: Locator,
    /// "Organization Account Management"
    pub account_sub_heading: Locator,
    /// "Total Users"
    pub total_users_label: Locator,
    /// "Total Projects"
    pub total_projects_label: Locator,
    /// GENERAL tab
    pub general_tab: Locator,
    /// ORGANIZATION tab
    pub organization_tab: Locator,
    /// "PROFILE INFORMATION"
    pub profile_info_heading: Locator,
    /// Avatar image
    pub profile_avatar: Locator,
    /// "Full Name"
    pub full_name_label: Locator,
    /// "Email Address"
    pub email_address_label: Locator,
    /// Settings icon
    pub settings_icon: Locator,
    /// "Organization Settings"
    pub org_settings_heading: Locator,
    /// Business icon
    pub business_icon: Locator,
    /// "Organization Name"
    pub org_name_label: Locator,
    /// Organization name value
    pub org_name_value: Locator,
    /// Retention timer icon
    pub timer_icon: Locator,
    /// Retention period
    pub retention_value: Locator,
    /// Every check-circle icon
    pub check_circle_icons: Locator,
    /// "QC Enabled"
    pub qc_enabled_label: Locator,
    /// Value next to "QC Enabled"
    pub qc_enabled_value: Locator,
    /// "Stain Enabled"
    pub stain_enabled_label: Locator,
    /// Value next to "Stain Enabled"
    pub stain_enabled_value: Locator,
    /// Second people-outline icon (members section)
    pub people_outline_icon_second: Locator,
    /// "Organization Members"
    pub org_members_heading: Locator,
    /// Primary-coloured icon paths
    pub primary_svg_paths: Locator,
    /// Members search box
    pub members_search_box: Locator,
    /// Rows of the members table
    pub org_members_rows: Locator,
}

impl OrgAccountPage {
    /// Build the locators for `page`
    #[must_use]
    pub fn new(page: &Page) -> Self {
        Self {
            base: BasePage::new(page.clone()),
            account_heading: page.locator(r#"h2[class*="text-2xl"]:has-text("Your Account")"#),
            account_sub_heading: page.locator(
                r#"div[class*="text-neutral-500"]:has-text("Organization Account Management")"#,
            ),
            total_users_label: page.locator(r#"p:has-text("Total Users")"#),
            total_projects_label: page.locator(r#"p:has-text("Total Projects")"#),
            general_tab: page.get_by_role(AriaRole::Tab, "GENERAL"),
            organization_tab: page.get_by_role(AriaRole::Tab, "ORGANIZATION"),
            profile_info_heading: page
                .locator(r#"h6[class*="text-primary"]:has-text("PROFILE INFORMATION")"#),
            profile_avatar: page.locator(r#"img[class^="MuiAvatar-img"]"#),
            full_name_label: page.locator(r#"h6[class*="text-xs"]:has-text("Full Name")"#),
            email_address_label: page
                .locator(r#"h6[class*="text-xs"]:has-text("Email Address")"#),
            settings_icon: page.get_by_test_id("SettingsIcon"),
            org_settings_heading: page.locator(r#"h6:has-text("Organization Settings")"#),
            business_icon: page.get_by_test_id("BusinessIcon"),
            org_name_label: page.locator(r#"h6:has-text("Organization Name")"#),
            org_name_value: page.locator(r#"h6:has-text("pictorlabs-hiring-org")"#),
            timer_icon: page.get_by_test_id("TimerIcon"),
            retention_value: page.locator(r#"h6:has-text("14 days")"#),
            check_circle_icons: page.get_by_test_id("CheckCircleIcon"),
            qc_enabled_label: page.locator(r#"h6:has-text("QC Enabled")"#),
            qc_enabled_value: page
                .locator(r#"xpath=//h6[contains(.,"QC Enabled")]/following-sibling::h6[1]"#),
            stain_enabled_label: page.locator(r#"h6:has-text("Stain Enabled")"#),
            stain_enabled_value: page
                .locator(r#"xpath=//h6[contains(.,"Stain Enabled")]/following-sibling::h6[1]"#),
            people_outline_icon_second: page.get_by_test_id("PeopleOutlineIcon").nth(1),
            org_members_heading: page.locator(r#"h6:has-text("Organization Members")"#),
            primary_svg_paths: page.locator(".MuiSvgIcon-root.MuiSvgIcon-colorPrimary > path"),
            members_search_box: page.get_by_role(AriaRole::Textbox, "Search by name or email"),
            org_members_rows: page.locator(".MuiTableBody-root .MuiTableRow-root"),
        }
    }

    /// Header showing the signed-in `email`
    #[must_use]
    pub fn profile_email_header(&self, email: &str) -> Locator {
        self.base
            .page()
            .locator_with_text(r#"h6[class*="text-lg"]"#, email)
    }

    /// Number displayed under "Total Users"
    #[must_use]
    pub fn total_users_number(&self) -> Locator {
        self.base
            .page()
            .locator(r#"h5[class*="MuiTypography-h5"][class*="text-primary-600"]"#)
            .nth(0)
    }

    /// Number of check-circle icons on the organization tab
    ///
    /// # Errors
    ///
    /// Returns error if the page cannot be queried
    pub async fn check_circle_count(&self) -> ProbeResult<usize> {
        self.base.page().count(&self.check_circle_icons).await
    }

    /// Rendered organization name
    ///
    /// # Errors
    ///
    /// Returns error if the name element is missing or ambiguous
    pub async fn org_name_text(&self) -> ProbeResult<String> {
        self.base.page().inner_text(&self.org_name_value).await
    }

    /// Number of member rows currently loaded
    ///
    /// # Errors
    ///
    /// Returns error if the page cannot be queried
    pub async fn org_members_count(&self) -> ProbeResult<usize> {
        self.base.page().count(&self.org_members_rows).await
    }
}

impl PageObject for OrgAccountPage {
    fn page(&self) -> &Page {
        self.base.page()
    }

    fn anchor(&self) -> &Locator {
        &self.account_heading
    }

    fn load_timeout_ms(&self) -> Option<u64> {
        Some(SLOW_PAGE_TIMEOUT_MS)
    }

    fn name(&self) -> &str {
        "OrgAccountPage"
    }
}
