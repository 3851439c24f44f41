//! Organization dashboard: navigation, slide overview and staining usage.

use super::sign_in;
use crate::log;
use crate::pages::OrgDashboardPage;
use crate::test_data::{SLIDE_OVERVIEW, STAINING_ROWS};
use vsh_probe::prelude::*;

const INTENTIONAL_FAIL: &str = "Intentional fail demo";

/// Dashboard suite
#[must_use]
pub fn suite() -> TestSuite {
    TestSuite::new("Dashboard Tests")
        .with_before_each(sign_in)
        .test(TestCase::new("Dashboard loads correctly", loads_correctly).with_tag("smoke"))
        .test(TestCase::new("Left nav expands", left_nav_expands))
        .test(TestCase::new("Navigation works", navigation_works))
        .test(
            TestCase::new(
                "Slide Overview section shows correct default counts",
                slide_overview_defaults,
            )
            .with_tag("demo"),
        )
        .test(
            TestCase::new("Slide Overview intentional fail demo", intentional_fail_demo)
                .expect_failure(INTENTIONAL_FAIL)
                .with_tag("demo"),
        )
        .test(TestCase::new(
            "Staining Usage: validate IHC, Special, H&E, Total rows",
            staining_usage_rows,
        ))
}

fn loads_correctly(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let dashboard = OrgDashboardPage::new(&ctx.page);
        dashboard.is_loaded().await?;
        expect(&ctx.page, &dashboard.org_activity_heading)
            .to_be_visible()
            .await
    })
}

fn left_nav_expands(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let dashboard = OrgDashboardPage::new(page);

        dashboard.expand_navigation().await?;

        for nav in [
            &dashboard.nav_dashboard,
            &dashboard.nav_model,
            &dashboard.nav_reports,
            &dashboard.nav_uploads,
        ] {
            expect(page, nav).to_be_visible().await?;
        }
        Ok(())
    })
}

fn navigation_works(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let dashboard = OrgDashboardPage::new(page);

        log::step("Clicking on Expand Navigation");
        dashboard.expand_navigation().await?;
        log::step("Clicking Left Nav Dashboard");
        page.click(&dashboard.nav_dashboard).await?;
        log::step("Asserting Dashboard loaded");
        expect(page, &dashboard.org_activity_heading).to_be_visible().await?;
        log::step("Clicking Left Nav Model");
        page.click(&dashboard.nav_model).await
    })
}

fn slide_overview_defaults(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let dashboard = OrgDashboardPage::new(page);
        log::step("Asserting Dashboard loaded");
        dashboard.is_loaded().await?;

        log::step("Asserting Slide Overview heading is visible");
        expect(page, &dashboard.slide_overview_heading).to_be_visible().await?;

        log::step("Asserting Slide Overview labels are visible");
        expect(page, &dashboard.total_scanning_label).to_be_visible().await?;
        expect(page, &dashboard.total_staining_label).to_be_visible().await?;
        expect(page, &dashboard.total_downloads_label).to_be_visible().await?;

        log::step("Asserting Slide Overview values match test data");
        expect(page, &dashboard.total_scanning_value)
            .to_have_text(SLIDE_OVERVIEW.scanning)
            .await?;
        expect(page, &dashboard.total_staining_value)
            .to_have_text(SLIDE_OVERVIEW.staining)
            .await?;
        expect(page, &dashboard.total_downloads_value)
            .to_have_text(SLIDE_OVERVIEW.downloads)
            .await?;

        log::step("Intentional fail demo");
        ctx.mark_expected_failure(INTENTIONAL_FAIL);
        expect_value(10).to_be(20)
    })
}

fn intentional_fail_demo(_ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async { expect_value(5).to_be(6) })
}

fn staining_usage_rows(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let dashboard = OrgDashboardPage::new(page);
        dashboard.is_loaded().await?;

        dashboard.wait_for_staining_usage_to_load().await?;

        for row in STAINING_ROWS {
            log::step(&format!("Asserting {} row metrics", row.label));
            let metrics = dashboard.metrics(row.label);
            expect(page, &metrics.processing)
                .to_have_text(&row.counts.processing.to_string())
                .await?;
            expect(page, &metrics.completed)
                .to_have_text(&row.counts.completed.to_string())
                .await?;
            expect(page, &metrics.failed)
                .to_have_text(&row.counts.failed.to_string())
                .await?;
        }
        Ok(())
    })
}
