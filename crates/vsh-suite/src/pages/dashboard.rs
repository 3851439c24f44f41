//! Organization dashboard, the landing screen after sign-in.

use crate::log;
use std::time::Duration;
use vsh_probe::{AriaRole, BasePage, Locator, Page, PageObject, ProbeResult, WaitState};

use super::SLOW_PAGE_TIMEOUT_MS;

const SLIDE_VALUE: &str = "[class*='MuiTypography-h6 text-gray']";
const ROW_ANCESTOR: &str = "xpath=ancestor::div[contains(@class,'flex')][1]";
const METRIC_VALUE: &str = "span.font-semibold";
const METRIC_COLUMN: &str = "span.text-xs.text-right";

/// Processing/completed/failed cells of one staining usage row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StainMetrics {
    /// Jobs in progress
    pub processing: Locator,
    /// Jobs completed
    pub completed: Locator,
    /// Jobs failed
    pub failed: Locator,
}

/// Organization activity dashboard
#[derive(Debug, Clone)]
pub struct OrgDashboardPage {
    base: BasePage,
    /// Left nav: Dashboard
    pub nav_dashboard: Locator,
    /// Left nav: Model
    pub nav_model: Locator,
    /// Left nav: Reports
    pub nav_reports: Locator,
    /// Left nav: Uploads
    pub nav_uploads: Locator,
    /// Chevron that expands the left nav
    pub expand_nav_btn: Locator,
    /// "Organization Activity"
    pub org_activity_heading: Locator,
    /// "Slide Overview"
    pub slide_overview_heading: Locator,
    /// "Total WSI Slides Scanned"
    pub total_scanning_label: Locator,
    /// Value under the scanning label
    pub total_scanning_value: Locator,
    /// "Total VSI Slides Stained"
    pub total_staining_label: Locator,
    /// Value under the staining label
    pub total_staining_value: Locator,
    /// "Total Downloads"
    pub total_downloads_label: Locator,
    /// Value under the downloads label
    pub total_downloads_value: Locator,
    /// Staining usage row: IHC
    pub ihc_row: Locator,
    /// Staining usage row: Special
    pub special_row: Locator,
    /// Staining usage row: H&E
    pub he_row: Locator,
    /// Staining usage row: Total
    pub total_row: Locator,
}

fn usage_row(page: &Page, label: &str) -> Locator {
    page.get_by_text_exact(label).locator("xpath=../..")
}

impl OrgDashboardPage {
    /// Build the locators for `page`
    #[must_use]
    pub fn new(page: &Page) -> Self {
        Self {
            base: BasePage::new(page.clone()),
            nav_dashboard: page.get_by_role(AriaRole::Button, "Dashboard"),
            nav_model: page.get_by_role(AriaRole::Button, "Model"),
            nav_reports: page.get_by_role(AriaRole::Button, "Reports"),
            nav_uploads: page.get_by_role(AriaRole::Button, "Uploads"),
            expand_nav_btn: page.get_by_test_id("ChevronRightIcon"),
            org_activity_heading: page.get_by_role(AriaRole::Heading, "Organization Activity"),
            slide_overview_heading: page.get_by_role(AriaRole::Heading, "Slide Overview"),
            total_scanning_label: page.get_by_text("Total WSI Slides Scanned"),
            total_scanning_value: page.locator(SLIDE_VALUE).nth(0),
            total_staining_label: page.get_by_text("Total VSI Slides Stained"),
            total_staining_value: page.locator(SLIDE_VALUE).nth(1),
            total_downloads_label: page.get_by_text("Total Downloads"),
            total_downloads_value: page.locator(SLIDE_VALUE).nth(2),
            ihc_row: usage_row(page, "IHC"),
            special_row: usage_row(page, "Special"),
            he_row: usage_row(page, "H&E"),
            total_row: usage_row(page, "Total"),
        }
    }

    /// Open the collapsed left navigation
    ///
    /// # Errors
    ///
    /// Returns error if the chevron is not clickable
    pub async fn expand_navigation(&self) -> ProbeResult<()> {
        self.base.click(&self.expand_nav_btn).await
    }

    /// Staining usage row containing the exact `label`
    #[must_use]
    pub fn row(&self, label: &str) -> Locator {
        self.base.page().get_by_text_exact(label).locator(ROW_ANCESTOR)
    }

    /// Processing/completed/failed values of the row labelled `label`
    #[must_use]
    pub fn metrics(&self, label: &str) -> StainMetrics {
        let values = self.row(label).locator(METRIC_VALUE);
        StainMetrics {
            processing: values.clone().nth(0),
            completed: values.clone().nth(1),
            failed: values.nth(2),
        }
    }

    /// Processing column of `row`
    #[must_use]
    pub fn processing(row: &Locator) -> Locator {
        row.clone().locator(METRIC_COLUMN).first()
    }

    /// Completed column of `row`
    #[must_use]
    pub fn completed(row: &Locator) -> Locator {
        row.clone().locator(METRIC_COLUMN).nth(1)
    }

    /// Failed column of `row`
    #[must_use]
    pub fn failed(row: &Locator) -> Locator {
        row.clone().locator(METRIC_COLUMN).nth(2)
    }

    /// Wait for the staining usage table; the Total row renders last
    ///
    /// # Errors
    ///
    /// Returns a timeout if the table is not shown within ten seconds
    pub async fn wait_for_staining_usage_to_load(&self) -> ProbeResult<()> {
        log::info("Waiting for Staining Usage Overview Table data to load");
        let total = self
            .base
            .page()
            .get_by_text_exact("Total")
            .with_timeout(Duration::from_millis(SLOW_PAGE_TIMEOUT_MS));
        self.base.page().wait_for(&total, WaitState::Visible).await
    }
}

impl PageObject for OrgDashboardPage {
    fn page(&self) -> &Page {
        self.base.page()
    }

    fn anchor(&self) -> &Locator {
        &self.org_activity_heading
    }

    fn name(&self) -> &str {
        "OrgDashboardPage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vsh_probe::MockDriver;

    fn dashboard() -> OrgDashboardPage {
        OrgDashboardPage::new(&Page::new(Arc::new(MockDriver::new())))
    }

    #[test]
    fn test_metrics_share_the_row() {
        let page = dashboard();
        let metrics = page.metrics("IHC");
        let row = page.row("IHC").to_string();
        assert!(metrics.processing.to_string().starts_with(&row));
        assert!(metrics.failed.to_string().ends_with("nth=2"));
        assert_ne!(metrics.processing, metrics.completed);
    }

    #[test]
    fn test_column_helpers_index_columns() {
        let page = dashboard();
        let first = OrgDashboardPage::processing(&page.total_row).to_string();
        assert!(first.contains(METRIC_COLUMN));
        assert!(first.ends_with("nth=0"));
        assert!(OrgDashboardPage::failed(&page.total_row)
            .to_string()
            .ends_with("nth=2"));
    }

    #[test]
    fn test_slide_values_are_indexed() {
        let page = dashboard();
        assert!(page.total_downloads_value.to_string().ends_with("nth=2"));
    }
}
