//! Slide upload dashboard with Upload, In Progress and Completed tabs.

use vsh_probe::{AriaRole, BasePage, Locator, Page, PageObject, Selector, TextMatch};

use super::SLOW_PAGE_TIMEOUT_MS;

fn heading_matching(pattern: &str) -> Locator {
    Locator::from_selector(Selector::Role {
        role: AriaRole::Heading,
        name: Some(TextMatch::regex(pattern, false)),
    })
}

/// Uploads screen reached from the left nav
#[derive(Debug, Clone)]
pub struct UploadsPage {
    base: BasePage,
    /// "Slide Upload Dashboard"
    pub uploads_heading: Locator,
    /// "Slide Management Dashboard"
    pub uploads_sub_heading: Locator,
    /// Upload tab
    pub upload_tab: Locator,
    /// In Progress tab
    pub in_progress_tab: Locator,
    /// Completed tab
    pub completed_tab: Locator,
    /// "Upload Slides"
    pub upload_slides_heading: Locator,
    /// Upload tab description
    pub upload_description: Locator,
    /// "Upload Guidelines:"
    pub upload_guidelines_heading: Locator,
    /// Labelling guideline
    pub guideline1: Locator,
    /// Auto-processing guideline
    pub guideline2: Locator,
    /// Large batch guideline
    pub guideline3: Locator,
    /// Drop zone text
    pub drag_drop_text: Locator,
    /// "Supported formats ..."
    pub supported_formats_heading: Locator,
    /// "Maximum file size ..."
    pub max_file_size_heading: Locator,
    /// Upload submit button
    pub upload_button: Locator,
    /// In Progress tab heading
    pub in_progress_heading: Locator,
    /// In Progress tab description
    pub in_progress_description: Locator,
    /// Empty state of the In Progress tab
    pub no_files_uploading_text: Locator,
    /// Empty state of the Completed tab
    pub no_completed_uploads_text: Locator,
    /// "Loading uploads..."
    pub loading_uploads: Locator,
    /// "Loading completed uploads..."
    pub loading_completed_uploads: Locator,
}

impl UploadsPage {
    /// Build the locators for `page`
    #[must_use]
    pub fn new(page: &Page) -> Self {
        Self {
            base: BasePage::new(page.clone()),
            uploads_heading: page
                .locator(r#"h2[class*="text-2xl"]:has-text("Slide Upload Dashboard")"#),
            uploads_sub_heading: page
                .locator_with_text(r#"div[class*="text-neutral-500"]"#, "Slide Management Dashboard"),
            upload_tab: page.get_by_role(AriaRole::Tab, "Upload"),
            in_progress_tab: page.get_by_role(AriaRole::Tab, "In Progress"),
            completed_tab: page.get_by_role(AriaRole::Tab, "Completed"),
            upload_slides_heading: page.locator_with_text("h2[class*='font-bold']", "Upload Slides"),
            upload_description: page
                .get_by_text("Select and upload slide files to begin applying virtual stains"),
            upload_guidelines_heading: page
                .get_by_role_exact(AriaRole::Heading, "Upload Guidelines:"),
            guideline1: page.get_by_text_exact("Ensure slides are properly labeled before upload"),
            guideline2: page.get_by_text_exact(
                "Uploaded slides may be auto-processed based on your organization's staining rules",
            ),
            guideline3: page.get_by_text_exact(
                "For large batches, please allow a few minutes for processing to begin",
            ),
            drag_drop_text: page.get_by_text_exact("Choose files or drag and drop files here"),
            supported_formats_heading: heading_matching("Supported formats"),
            max_file_size_heading: heading_matching("Maximum file size"),
            upload_button: page.locator("button[class^='bg-primary-600']:has-text('Upload')"),
            in_progress_heading: page.locator_with_text("h2", "Uploads In Progress"),
            in_progress_description: page.locator_with_text("p", "View slide(s) currently uploading"),
            no_files_uploading_text: page.get_by_text("No files currently uploading"),
            no_completed_uploads_text: page.get_by_text("No completed uploads"),
            loading_uploads: page.get_by_text("Loading uploads..."),
            loading_completed_uploads: page.get_by_text("Loading completed uploads..."),
        }
    }

    /// `h2` containing `text`
    #[must_use]
    pub fn tab_heading(&self, text: &str) -> Locator {
        self.base.page().locator_with_text("h2", text)
    }

    /// Paragraph containing `text`
    #[must_use]
    pub fn paragraph(&self, text: &str) -> Locator {
        self.base.page().locator_with_text("p", text)
    }
}

impl PageObject for UploadsPage {
    fn page(&self) -> &Page {
        self.base.page()
    }

    fn anchor(&self) -> &Locator {
        &self.uploads_heading
    }

    fn load_timeout_ms(&self) -> Option<u64> {
        Some(SLOW_PAGE_TIMEOUT_MS)
    }

    fn name(&self) -> &str {
        "UploadsPage"
    }
}
