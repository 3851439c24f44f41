//! Landing to Okta login navigation and the login form.
//!
//! Every test starts on the login page via [`LoginFixture`]. Bodies reach
//! the page through the fixture so the boxed body only borrows the fixture.

use crate::fixtures::LoginFixture;
use vsh_probe::prelude::*;
use vsh_probe::with_fixture;

/// Login page suite
#[must_use]
pub fn suite() -> TestSuite {
    TestSuite::new("Navigation: Landing → Login")
        .test(
            TestCase::new(
                "should navigate to Okta login page from landing page",
                navigates_to_okta_login,
            )
            .with_tag("smoke"),
        )
        .test(TestCase::new(
            "should show validation errors when clicking Continue with empty fields",
            shows_validation_errors,
        ))
        .test(TestCase::new(
            "should show correct tooltip on hover before and after toggling password visibility",
            shows_toggle_tooltips,
        ))
        .test(TestCase::new(
            "password field should switch between hidden and visible types",
            switches_password_type,
        ))
}

fn navigates_to_okta_login(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(with_fixture::<LoginFixture, _, _>(&ctx.page, |f| {
        Box::pin(async move {
            let login = &f.login;
            let page = login.page();
            expect(page, &login.pictor_labs_banner).to_be_visible().await?;
            expect(page, &login.welcome_heading).to_be_visible().await?;
            expect(page, &login.login_description).to_be_visible().await?;
            expect(page, &login.email_input).to_be_visible().await?;
            expect(page, &login.password_input).to_be_visible().await?;
            expect(page, &login.continue_btn).to_be_visible().await
        })
    }))
}

fn shows_validation_errors(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(with_fixture::<LoginFixture, _, _>(&ctx.page, |f| {
        Box::pin(async move {
            let login = &f.login;
            let page = login.page();
            login.click(&login.continue_btn).await?;

            expect(page, &login.email_required_error).to_be_visible().await?;
            expect(page, &login.password_required_error).to_be_visible().await?;

            expect(page, &login.email_invalid).to_be_visible().await?;
            expect(page, &login.password_invalid).to_be_visible().await
        })
    }))
}

fn shows_toggle_tooltips(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(with_fixture::<LoginFixture, _, _>(&ctx.page, |f| {
        Box::pin(async move {
            let login = &f.login;
            let page = login.page();

            page.hover(&login.password_toggle_btn).await?;
            expect(page, &login.show_password_tooltip).to_be_visible().await?;

            login.toggle_password_visibility().await?;

            page.hover(&login.password_toggle_btn).await?;
            expect(page, &login.hide_password_tooltip).to_be_visible().await
        })
    }))
}

fn switches_password_type(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(with_fixture::<LoginFixture, _, _>(&ctx.page, |f| {
        Box::pin(async move {
            let login = &f.login;
            let page = login.page();
            expect(page, &login.password_input_hidden).to_be_visible().await?;

            login.toggle_password_visibility().await?;
            expect(page, &login.password_input_visible).to_be_visible().await?;
            expect(page, &login.password_toggle_btn)
                .to_have_attribute("aria-checked", "true")
                .await?;

            login.toggle_password_visibility().await?;
            expect(page, &login.password_input_hidden).to_be_visible().await?;
            expect(page, &login.password_toggle_btn)
                .to_have_attribute("aria-checked", "false")
                .await
        })
    }))
}
