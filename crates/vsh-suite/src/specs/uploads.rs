//! Slide uploads: tabs and their content.

use super::sign_in;
use crate::log;
use crate::pages::{OrgDashboardPage, UploadsPage};
use vsh_probe::prelude::*;

/// Uploads suite
#[must_use]
pub fn suite() -> TestSuite {
    TestSuite::new("Uploads Page Tests")
        .with_before_each(open_uploads)
        .test(TestCase::new(
            "Uploads Page - headings and tabs visibility",
            headings_and_tabs,
        ))
        .test(TestCase::new(
            "Uploads Page - verify Upload tab content is visible",
            upload_tab_content,
        ))
        .test(TestCase::new(
            "Uploads: In Progress tab shows expected content",
            in_progress_tab_content,
        ))
        .test(TestCase::new(
            "Uploads: Completed tab shows expected content",
            completed_tab_content,
        ))
}

fn open_uploads(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        sign_in(ctx).await?;
        log::step("Navigate to Uploads from Dashboard");
        let dashboard = OrgDashboardPage::new(&ctx.page);
        dashboard.is_loaded().await?;
        dashboard.expand_navigation().await?;
        ctx.page.click(&dashboard.nav_uploads).await?;
        log::step("Load Uploads Page");
        Ok(())
    })
}

async fn loaded_uploads(page: &Page) -> ProbeResult<UploadsPage> {
    let uploads = UploadsPage::new(page);
    uploads.is_loaded().await?;
    Ok(uploads)
}

fn headings_and_tabs(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let uploads = loaded_uploads(page).await?;

        log::step("Validate main headings");
        expect(page, &uploads.tab_heading("Slide Upload Dashboard"))
            .to_be_visible()
            .await?;
        expect(page, &uploads.uploads_sub_heading).to_be_visible().await?;

        log::step("Validate tabs");
        expect(page, &uploads.upload_tab).to_be_visible().await?;
        expect(page, &uploads.upload_tab)
            .to_have_attribute("aria-selected", "true")
            .await?;
        expect(page, &uploads.in_progress_tab).to_be_visible().await?;
        expect(page, &uploads.completed_tab).to_be_visible().await
    })
}

fn upload_tab_content(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let uploads = loaded_uploads(page).await?;

        log::step("Validate Upload tab is active");
        expect(page, &uploads.upload_tab)
            .to_have_attribute("aria-selected", "true")
            .await?;

        log::step("Validate Upload tab main heading");
        expect(page, &uploads.tab_heading("Upload Slides")).to_be_visible().await?;

        log::step("Validate description paragraph");
        expect(page, &uploads.paragraph("Select and upload slide files"))
            .to_be_visible()
            .await?;

        log::step("Validate Upload Guidelines heading");
        expect(page, &uploads.upload_guidelines_heading).to_be_visible().await?;

        log::step("Validate guidelines");
        expect(page, &uploads.guideline1).to_be_visible().await?;
        expect(page, &uploads.guideline2).to_be_visible().await?;
        expect(page, &uploads.guideline3).to_be_visible().await?;

        log::step("Validate drag/drop text");
        expect(page, &uploads.drag_drop_text).to_be_visible().await?;

        log::step("Validate supported formats & max size headings");
        expect(page, &uploads.supported_formats_heading).to_be_visible().await?;
        expect(page, &uploads.max_file_size_heading).to_be_visible().await?;

        log::step("Validate Upload button is visible");
        expect(page, &uploads.upload_button).to_be_visible().await
    })
}

fn in_progress_tab_content(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let uploads = loaded_uploads(page).await?;

        log::step("Validate loading uploads indicator is visible");
        expect(page, &uploads.loading_uploads).to_be_visible().await?;

        log::step("Click In Progress tab");
        page.click(&uploads.in_progress_tab).await?;

        log::step("Validate In Progress tab heading");
        expect(page, &uploads.in_progress_heading).to_be_visible().await?;

        log::step("Validate In Progress description text");
        expect(page, &uploads.in_progress_description).to_be_visible().await?;

        log::step("Validate 'No files currently uploading' message");
        expect(page, &uploads.no_files_uploading_text).to_be_visible().await
    })
}

fn completed_tab_content(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let uploads = loaded_uploads(page).await?;

        log::step("Click Completed tab");
        page.click(&uploads.completed_tab).await?;

        log::step("Validate loading completed uploads indicator is visible");
        expect(page, &uploads.loading_completed_uploads).to_be_visible().await?;

        log::step("Validate Completed tab heading");
        expect(page, &uploads.tab_heading("Slide Upload History"))
            .to_be_visible()
            .await?;

        log::step("Validate Completed tab description text");
        expect(page, &uploads.paragraph("View slide(s) upload history"))
            .to_be_visible()
            .await?;

        log::step("Validate 'No completed uploads' message");
        expect(page, &uploads.no_completed_uploads_text).to_be_visible().await
    })
}
