//! Landing page before authentication.

use crate::pages::LandingPage;
use vsh_probe::prelude::*;

/// Landing page suite
#[must_use]
pub fn suite() -> TestSuite {
    TestSuite::new("Landing Page")
        .with_before_each(open_landing)
        .test(TestCase::new("verify landing page UI", verify_landing_page_ui).with_tag("smoke"))
}

fn open_landing(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let landing = LandingPage::new(&ctx.page);
        landing.open().await?;
        landing.is_loaded().await
    })
}

fn verify_landing_page_ui(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let landing = LandingPage::new(page);

        expect(page, &landing.pictor_labs_banner).to_be_visible().await?;
        expect(page, &landing.virtual_stain_hub_heading).to_be_visible().await?;
        expect(page, &landing.by_pictor_labs_text).to_be_visible().await?;
        expect(page, &landing.okta_sign_in_btn).to_be_visible().await
    })
}
