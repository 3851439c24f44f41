//! Top bar controls and the support request popup.

use super::sign_in;
use crate::dates::timestamp_string;
use crate::log;
use crate::pages::{SupportPopup, TopBar};
use crate::test_data::ISSUE_CATEGORIES;
use vsh_probe::prelude::*;

/// Top bar suite
#[must_use]
pub fn suite() -> TestSuite {
    TestSuite::new("Topbar Tests")
        .with_before_each(sign_in)
        .test(
            TestCase::new(
                "Topbar: Support, Profile, and Hiring Org buttons are visible",
                buttons_visible,
            )
            .with_tag("smoke"),
        )
        .test(TestCase::new("Support Popup - all core fields visible", popup_fields_visible).with_tag("support"))
        .test(
            TestCase::new(
                "Support Popup - validation errors appear when submitting empty form",
                popup_validation_errors,
            )
            .with_tag("support"),
        )
        .test(
            TestCase::new(
                "Support Popup – Issue Category dropdown options visible",
                popup_category_options,
            )
            .with_tag("support"),
        )
        .test(TestCase::new("Submit Support Request successfully", submit_support_request).with_tag("support"))
        .test(TestCase::new(
            "Topbar: Profile menu shows My Organization & Log out",
            profile_menu_options,
        ))
        .test(TestCase::new(
            "Topbar: Hiring Org dropdown displays second option",
            hiring_org_dropdown,
        ))
}

async fn open_support(page: &Page) -> ProbeResult<SupportPopup> {
    let topbar = TopBar::new(page);
    log::step("Open Support popup");
    page.click(&topbar.support_button).await?;
    let support = SupportPopup::new(page);
    support.is_visible().await?;
    Ok(support)
}

fn buttons_visible(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let topbar = TopBar::new(page);

        log::step("Validate Support button is visible");
        expect(page, &topbar.support_button).to_be_visible().await?;

        log::step("Validate Profile icon is visible");
        expect(page, &topbar.profile_icon).to_be_visible().await?;

        log::step("Validate Hiring Org button is visible");
        expect(page, &topbar.hiring_org_button).to_be_visible().await
    })
}

fn popup_fields_visible(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let support = open_support(page).await?;

        log::step("Validate Order ID label");
        expect(page, &support.order_id_label).to_be_visible().await?;

        log::step("Validate Email field + label");
        expect(page, &support.email_label).to_be_visible().await?;
        expect(page, &support.email_input).to_be_visible().await?;
        expect(page, &support.email_input).to_be_disabled().await?;

        log::step("Validate Title field");
        expect(page, &support.title_input).to_be_visible().await?;

        log::step("Validate Issue Category dropdown field");
        expect(page, &support.issue_category_input).to_be_visible().await?;

        log::step("Validate Problem Description label");
        expect(page, &support.problem_description_label).to_be_visible().await?;

        log::step("Validate Request Support button");
        expect(page, &support.request_support_btn).to_be_visible().await
    })
}

fn popup_validation_errors(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let support = open_support(page).await?;

        log::step("Click Request Support without entering anything");
        page.click(&support.request_support_btn).await?;

        log::step("Validate Title required error");
        expect(page, &support.error_text("Please add a title")).to_be_visible().await?;

        log::step("Validate Description required error");
        expect(page, &support.error_text("Please add a description"))
            .to_be_visible()
            .await?;

        log::step("Validate Issue Category required error");
        expect(page, &support.issue_category_error).to_be_visible().await
    })
}

fn popup_category_options(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let support = open_support(page).await?;

        log::step("Click Issue Category dropdown");
        page.click(&support.issue_category_input).await?;

        log::step("Validate all dropdown options");
        for option in ISSUE_CATEGORIES {
            log::info(&format!("Checking option: {option}"));
            expect(page, &support.dropdown_option(option)).to_be_visible().await?;
        }
        Ok(())
    })
}

fn submit_support_request(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let support = open_support(page).await?;

        let title = format!("Issue-{}", timestamp_string());
        let description = format!("{title} description");

        log::step("Typing Issue Title using keyboard");
        support.fill_title_by_keyboard(&title).await?;

        log::step("Selecting random Issue Category");
        support.select_random_category().await?;

        log::step("Filling Problem Description");
        page.fill(&support.problem_description_textbox, &description).await?;

        log::step("Submitting Support Request");
        page.click(&support.request_support_btn).await?;

        log::step("Validating Success Popup");
        expect(page, &support.success_icon).to_be_visible().await?;
        expect(page, &support.success_message).to_be_visible().await?;
        expect(page, &support.close_success_btn).to_be_visible().await?;

        log::step("Closing success popup");
        page.click(&support.close_success_btn).await?;

        log::step("Validating popup disappeared");
        expect(page, &support.success_icon).not().to_be_visible().await
    })
}

fn profile_menu_options(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let topbar = TopBar::new(page);

        log::step("Click profile icon");
        page.click(&topbar.profile_icon).await?;

        log::step("Validate 'My Organization' option is visible");
        expect(page, &topbar.profile_menu_my_org).to_be_visible().await?;

        log::step("Validate 'Log out' option is visible");
        expect(page, &topbar.profile_menu_logout).to_be_visible().await
    })
}

fn hiring_org_dropdown(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let page = &ctx.page;
        let topbar = TopBar::new(page);

        log::step("Click Hiring Org button in top bar");
        page.click(&topbar.hiring_org_button).await?;

        log::step("Validate the second Hiring Org dropdown item is visible");
        expect(page, &topbar.hiring_org_dropdown_item).to_be_visible().await
    })
}
