//! Organization models (stain management).

use super::sign_in;
use crate::log;
use crate::pages::{ModelsPage, OrgDashboardPage};
use vsh_probe::prelude::*;

/// Models suite
#[must_use]
pub fn suite() -> TestSuite {
    TestSuite::new("Models Page Tests")
        .with_before_each(sign_in)
        .test(TestCase::new(
            "Models Page: essential elements visibility",
            essential_elements_visible,
        ))
}

fn essential_elements_visible(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;

        log::step("Navigate to Models from Dashboard");
        let dashboard = OrgDashboardPage::new(page);
        dashboard.is_loaded().await?;
        log::step("Expand navigation menu");
        dashboard.expand_navigation().await?;
        log::step("Click Models nav item");
        page.click(&dashboard.nav_model).await?;

        log::step("Load Models Page");
        let models = ModelsPage::new(page);
        models.is_loaded().await?;

        log::step("Validate main heading");
        expect(page, &models.org_models_heading).to_be_visible().await?;
        log::step("Validate sub heading");
        expect(page, &models.org_models_sub_heading).to_be_visible().await?;

        log::step("Validate Stain Management tab exists");
        expect(page, &models.stain_management_tab).to_be_visible().await?;
        log::step("Assert Stain Management tab is selected by default");
        expect(page, &models.stain_management_tab)
            .to_have_attribute("aria-selected", "true")
            .await?;

        log::step("Validate Total Stainers summary section");
        expect(page, &models.total_stainers_label).to_be_visible().await?;
        expect(page, &models.total_stainers_value).to_be_visible().await?;

        log::step("Validate section headings");
        expect(page, &models.auto_deep_stainer_heading).to_be_visible().await?;
        expect(page, &models.auto_restainer_heading).to_be_visible().await?;

        log::step("Validate H&E 0.1.0 card");
        expect(page, &models.he_card_v010).to_be_visible().await?;
        log::step("Validate PanCK-MG-TRT card");
        expect(page, &models.panck_card).to_be_visible().await
    })
}
