//! Scripted Virtual Stain Hub used by the integration tests.
//!
//! Elements are registered under the locators the page objects build, so
//! the real specs run unchanged against [`MockDriver`].

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use vsh_probe::{
    AriaRole, Cookie, ElementSnapshot, Locator, MockAction, MockDriver, Page, PageFactory,
    Reaction, StorageState, SuiteConfig, Timeouts,
};
use vsh_suite::dates::{current_quarter_text, current_year};
use vsh_suite::pages::{
    LandingPage, LoginPage, ModelsPage, OrgAccountPage, OrgDashboardPage,
    OrganizationReportsPage, SupportPopup, TopBar, UploadsPage,
};
use vsh_suite::test_data::{ISSUE_CATEGORIES, STAINING_ROWS};

pub const BASE_URL: &str = "https://hub.test";
pub const EMAIL: &str = "qa@pictorlabs.ai";

pub const fn fast_timeouts() -> Timeouts {
    Timeouts {
        action_ms: 300,
        expect_ms: 300,
        navigation_ms: 300,
        poll_interval_ms: 10,
    }
}

pub fn config(output_dir: &Path) -> Arc<SuiteConfig> {
    Arc::new(
        SuiteConfig::default()
            .with_base_url(BASE_URL)
            .with_credentials(EMAIL, "correct horse")
            .with_output_dir(output_dir),
    )
}

/// Same as [`config`] with room for tests that sleep
pub fn parallel_config(output_dir: &Path) -> Arc<SuiteConfig> {
    Arc::new(
        SuiteConfig::default()
            .with_base_url(BASE_URL)
            .with_credentials(EMAIL, "correct horse")
            .with_output_dir(output_dir)
            .with_workers(4),
    )
}

fn blank() -> Page {
    Page::new(Arc::new(MockDriver::new()))
}

fn shown(tag: &str) -> ElementSnapshot {
    ElementSnapshot::new(tag)
}

fn hidden(tag: &str) -> ElementSnapshot {
    ElementSnapshot::new(tag).hidden()
}

fn on_click(driver: MockDriver, target: &Locator, reactions: Vec<Reaction>) -> MockDriver {
    reactions
        .into_iter()
        .fold(driver, |d, r| d.on(target, MockAction::Click, r))
}

/// Landing page plus the hidden Okta form it reveals
pub fn signed_out_app() -> MockDriver {
    let page = blank();
    let landing = LandingPage::new(&page);
    let login = LoginPage::new(&page);

    let driver = MockDriver::new()
        .with_element(&landing.virtual_stain_hub_heading, shown("h1"))
        .with_element(&landing.pictor_labs_banner, shown("img"))
        .with_element(&landing.by_pictor_labs_text, shown("span"))
        .with_element(&landing.okta_sign_in_btn, shown("button"))
        .with_element(&login.pictor_labs_banner, hidden("img"))
        .with_element(&login.welcome_heading, hidden("h1"))
        .with_element(&login.login_description, hidden("p"))
        .with_element(&login.email_input, hidden("input"))
        .with_element(&login.password_input, hidden("input"))
        .with_element(&login.password_input_hidden, hidden("input"))
        .with_element(&login.password_input_visible, hidden("input"))
        .with_element(&login.continue_btn, hidden("button"))
        .with_element(
            &login.password_toggle_btn,
            hidden("button").with_attribute("aria-checked", "false"),
        )
        .with_element(&login.email_required_error, hidden("span"))
        .with_element(&login.password_required_error, hidden("span"))
        .with_element(&login.email_invalid, hidden("input"))
        .with_element(&login.password_invalid, hidden("input"))
        .with_element(&login.show_password_tooltip, hidden("span"))
        .with_element(&login.hide_password_tooltip, hidden("span"));

    let driver = on_click(
        driver,
        &landing.okta_sign_in_btn,
        [
            &login.pictor_labs_banner,
            &login.welcome_heading,
            &login.login_description,
            &login.email_input,
            &login.password_input,
            &login.password_input_hidden,
            &login.continue_btn,
            &login.password_toggle_btn,
        ]
        .into_iter()
        .map(|l| Reaction::Show(l.clone()))
        .collect(),
    );
    let driver = on_click(
        driver,
        &login.continue_btn,
        [
            &login.email_required_error,
            &login.password_required_error,
            &login.email_invalid,
            &login.password_invalid,
        ]
        .into_iter()
        .map(|l| Reaction::Show(l.clone()))
        .collect(),
    );
    let driver = on_click(
        driver,
        &login.password_toggle_btn,
        vec![
            Reaction::Toggle(login.password_input_hidden.clone()),
            Reaction::Toggle(login.password_input_visible.clone()),
            Reaction::Toggle(login.hide_password_tooltip.clone()),
            Reaction::ToggleAttribute(login.password_toggle_btn.clone(), "aria-checked".into()),
        ],
    );
    driver.on(
        &login.password_toggle_btn,
        MockAction::Hover,
        Reaction::Show(login.show_password_tooltip.clone()),
    )
}

/// Signed-out app whose Continue button reveals the dashboard
pub fn dashboard_app() -> MockDriver {
    let page = blank();
    let login = LoginPage::new(&page);
    let dashboard = OrgDashboardPage::new(&page);

    let mut driver = signed_out_app()
        .with_element(&dashboard.org_activity_heading, hidden("h2"))
        .with_element(&dashboard.expand_nav_btn, hidden("svg"))
        .with_element(&dashboard.slide_overview_heading, hidden("h3"))
        .with_element(&dashboard.total_scanning_label, hidden("span"))
        .with_element(&dashboard.total_staining_label, hidden("span"))
        .with_element(&dashboard.total_downloads_label, hidden("span"))
        .with_element(&dashboard.total_scanning_value, hidden("h6").with_text("0"))
        .with_element(&dashboard.total_staining_value, hidden("h6").with_text("0"))
        .with_element(&dashboard.total_downloads_value, hidden("h6").with_text("0"))
        .with_element(&page.get_by_text_exact("Total"), hidden("span"));
    for nav in [
        &dashboard.nav_dashboard,
        &dashboard.nav_model,
        &dashboard.nav_reports,
        &dashboard.nav_uploads,
    ] {
        driver.add_element(nav, hidden("button"));
    }

    let mut revealed = vec![
        dashboard.org_activity_heading.clone(),
        dashboard.expand_nav_btn.clone(),
        dashboard.slide_overview_heading.clone(),
        dashboard.total_scanning_label.clone(),
        dashboard.total_staining_label.clone(),
        dashboard.total_downloads_label.clone(),
        dashboard.total_scanning_value.clone(),
        dashboard.total_staining_value.clone(),
        dashboard.total_downloads_value.clone(),
        page.get_by_text_exact("Total"),
    ];
    for row in STAINING_ROWS {
        let metrics = dashboard.metrics(row.label);
        for (cell, value) in [
            (metrics.processing, row.counts.processing),
            (metrics.completed, row.counts.completed),
            (metrics.failed, row.counts.failed),
        ] {
            driver.add_element(&cell, hidden("span").with_text(value.to_string()));
            revealed.push(cell);
        }
    }

    let driver = on_click(
        driver,
        &login.continue_btn,
        revealed.into_iter().map(Reaction::Show).collect(),
    );
    on_click(
        driver,
        &dashboard.expand_nav_btn,
        [
            &dashboard.nav_dashboard,
            &dashboard.nav_model,
            &dashboard.nav_reports,
            &dashboard.nav_uploads,
        ]
        .into_iter()
        .map(|l| Reaction::Show(l.clone()))
        .collect(),
    )
    .with_storage_state(StorageState::new().with_cookie(Cookie::new("appSession", "s3", "hub.test")))
}

/// Register `elements` hidden and show them when `trigger` is clicked
fn revealed_by(
    mut driver: MockDriver,
    trigger: &Locator,
    elements: Vec<(Locator, ElementSnapshot)>,
) -> MockDriver {
    let mut reactions = Vec::with_capacity(elements.len());
    for (locator, element) in elements {
        driver.add_element(&locator, element.hidden());
        reactions.push(Reaction::Show(locator));
    }
    on_click(driver, trigger, reactions)
}

fn selected_tab() -> ElementSnapshot {
    shown("button").with_attribute("aria-selected", "true")
}

fn tab() -> ElementSnapshot {
    shown("button").with_attribute("aria-selected", "false")
}

/// The whole signed-in app: top bar, support popup and every left-nav screen
pub fn hub_app() -> MockDriver {
    let page = blank();
    let landing = LandingPage::new(&page);
    let login = LoginPage::new(&page);
    let dashboard = OrgDashboardPage::new(&page);
    let topbar = TopBar::new(&page);
    let support = SupportPopup::new(&page);

    let landing_welcome = page.get_by_text("Welcome to Virtual Stain Hub");
    let driver = dashboard_app().with_element(&landing_welcome, hidden("h1"));
    let driver = on_click(
        driver,
        &login.continue_btn,
        vec![
            Reaction::Hide(landing.okta_sign_in_btn.clone()),
            Reaction::Hide(landing.virtual_stain_hub_heading.clone()),
        ],
    );

    let driver = revealed_by(
        driver,
        &login.continue_btn,
        vec![
            (topbar.support_button.clone(), shown("img")),
            (
                topbar.profile_icon.clone(),
                shown("img").with_attribute("alt", EMAIL),
            ),
            (topbar.hiring_org_button.clone(), shown("button")),
        ],
    );
    let driver = revealed_by(
        driver,
        &topbar.hiring_org_button,
        vec![(topbar.hiring_org_dropdown_item.clone(), shown("li"))],
    );
    let driver = revealed_by(
        driver,
        &topbar.profile_icon,
        vec![
            (topbar.profile_menu_my_org.clone(), shown("li")),
            (topbar.profile_menu_logout.clone(), shown("li")),
        ],
    );
    let driver = on_click(
        driver,
        &topbar.profile_menu_logout,
        vec![
            Reaction::Show(landing.okta_sign_in_btn.clone()),
            Reaction::Show(landing.virtual_stain_hub_heading.clone()),
            Reaction::Show(landing_welcome),
            Reaction::Hide(topbar.support_button.clone()),
            Reaction::Hide(topbar.profile_icon.clone()),
        ],
    );

    let driver = support_popup(driver, &topbar, &support);
    let driver = account_screen(driver, &page, &topbar);
    let driver = reports_screen(driver, &page, &dashboard);
    let driver = uploads_screen(driver, &page, &dashboard);
    models_screen(driver, &page, &dashboard)
}

fn support_popup(driver: MockDriver, topbar: &TopBar, support: &SupportPopup) -> MockDriver {
    let driver = revealed_by(
        driver,
        &topbar.support_button,
        vec![
            (support.order_id_label.clone(), shown("div")),
            (support.email_label.clone(), shown("label")),
            (
                support.email_input.clone(),
                shown("input").with_value(EMAIL).disabled(),
            ),
            (support.title_label.clone(), shown("label")),
            (support.title_input.clone(), shown("input")),
            (support.issue_title_textbox.clone(), shown("input")),
            (support.issue_category_input.clone(), shown("input")),
            (support.problem_description_label.clone(), shown("label")),
            (support.problem_description_textbox.clone(), shown("textarea")),
            (support.request_support_btn.clone(), shown("button")),
        ],
    );
    let driver = revealed_by(
        driver,
        &support.issue_category_input,
        ISSUE_CATEGORIES
            .iter()
            .map(|c| (support.dropdown_option(c), shown("li").with_text(*c)))
            .collect(),
    );
    let driver = revealed_by(
        driver,
        &support.request_support_btn,
        vec![
            (support.error_text("Please add a title"), shown("p")),
            (support.error_text("Please add a description"), shown("p")),
            (support.issue_category_error.clone(), shown("span")),
            (support.success_icon.clone(), shown("svg")),
            (
                support.success_message.clone(),
                shown("p").with_text("Your request has been submitted"),
            ),
            (support.close_success_btn.clone(), shown("button")),
        ],
    );
    on_click(
        driver,
        &support.close_success_btn,
        vec![
            Reaction::Hide(support.success_icon.clone()),
            Reaction::Hide(support.success_message.clone()),
            Reaction::Hide(support.close_success_btn.clone()),
        ],
    )
}

fn account_screen(driver: MockDriver, page: &Page, topbar: &TopBar) -> MockDriver {
    let account = OrgAccountPage::new(page);
    let driver = revealed_by(
        driver,
        &topbar.profile_menu_my_org,
        vec![
            (account.account_heading.clone(), shown("h2")),
            (account.account_sub_heading.clone(), shown("div")),
            (account.total_users_label.clone(), shown("p")),
            (account.total_projects_label.clone(), shown("p")),
            (account.total_users_number(), shown("h5").with_text("2")),
            (account.general_tab.clone(), selected_tab()),
            (account.organization_tab.clone(), tab()),
            (account.profile_info_heading.clone(), shown("h6")),
            (account.profile_avatar.clone(), shown("img")),
            (account.profile_email_header(EMAIL), shown("h6").with_text(EMAIL)),
            (account.full_name_label.clone(), shown("h6")),
            (account.email_address_label.clone(), shown("h6")),
        ],
    );
    revealed_by(
        driver,
        &account.organization_tab,
        vec![
            (account.settings_icon.clone(), shown("svg")),
            (account.org_settings_heading.clone(), shown("h6")),
            (account.business_icon.clone(), shown("svg")),
            (account.org_name_label.clone(), shown("h6")),
            (
                account.org_name_value.clone(),
                shown("h6").with_text("pictorlabs-hiring-org"),
            ),
            (account.timer_icon.clone(), shown("svg")),
            (account.retention_value.clone(), shown("h6").with_text("14 days")),
            (account.check_circle_icons.clone(), shown("svg")),
            (account.check_circle_icons.clone(), shown("svg")),
            (account.qc_enabled_label.clone(), shown("h6")),
            (account.qc_enabled_value.clone(), shown("h6").with_text("Yes")),
            (account.stain_enabled_label.clone(), shown("h6")),
            (account.stain_enabled_value.clone(), shown("h6").with_text("Yes")),
            (account.people_outline_icon_second.clone(), shown("svg")),
            (account.org_members_heading.clone(), shown("h6")),
            (account.primary_svg_paths.clone().first(), shown("path")),
            (account.members_search_box.clone(), shown("input")),
        ],
    )
}

fn reports_screen(driver: MockDriver, page: &Page, dashboard: &OrgDashboardPage) -> MockDriver {
    let reports = OrganizationReportsPage::new(page);
    let mut driver = revealed_by(
        driver,
        &dashboard.nav_reports,
        vec![
            (reports.org_reports_heading.clone(), shown("h1")),
            (reports.org_reports_sub_heading.clone(), shown("p")),
            (reports.stains_tab.clone(), selected_tab()),
            (reports.users_tab.clone(), tab()),
            (reports.stains_info_text.clone(), shown("p")),
            (reports.year_label.clone(), shown("label")),
            (
                reports.year_value_display(&current_year()),
                shown("input").with_value(current_year()),
            ),
            (reports.download_btn.clone(), shown("button")),
            (reports.stain_type_details_header.clone(), shown("h5")),
            (reports.panel_ihc.clone(), shown("h6")),
            (reports.panel_he.clone(), shown("h6")),
            (reports.panel_special.clone(), shown("h6")),
        ],
    );

    let quarter = reports.ihc_quarter_value(&current_quarter_text()).nth(0);
    // The IHC panel opens and closes on the same header click
    let panel_content = [
        reports.ihc_quarter_label.clone(),
        quarter,
        reports.ihc_download_btn.clone(),
        reports.monthly_distribution_heading.clone(),
        reports.monthly_breakdown_heading.clone(),
    ];
    for locator in &panel_content {
        driver.add_element(locator, hidden("div"));
    }
    let driver = on_click(
        driver,
        &reports.panel_ihc,
        panel_content.into_iter().map(Reaction::Toggle).collect(),
    );

    let driver = revealed_by(
        driver,
        &reports.users_tab,
        vec![
            (reports.users_search_field.clone(), shown("input")),
            (
                reports.user_email_list.clone(),
                shown("p").with_text("ops@pictorlabs.ai"),
            ),
            (
                reports.user_email_list.clone(),
                shown("p").with_text("lab@pictorlabs.ai"),
            ),
            (page.get_by_role_exact(AriaRole::Button, "1"), shown("button")),
        ],
    );
    driver
        .with_element(&reports.no_data_message, hidden("p"))
        .on(
            &reports.users_search_field,
            MockAction::Fill,
            Reaction::Show(reports.no_data_message.clone()),
        )
}

fn uploads_screen(driver: MockDriver, page: &Page, dashboard: &OrgDashboardPage) -> MockDriver {
    let uploads = UploadsPage::new(page);
    let driver = revealed_by(
        driver,
        &dashboard.nav_uploads,
        vec![
            (uploads.uploads_heading.clone(), shown("h2")),
            (uploads.tab_heading("Slide Upload Dashboard"), shown("h2")),
            (uploads.uploads_sub_heading.clone(), shown("div")),
            (uploads.upload_tab.clone(), selected_tab()),
            (uploads.in_progress_tab.clone(), tab()),
            (uploads.completed_tab.clone(), tab()),
            (uploads.tab_heading("Upload Slides"), shown("h2")),
            (uploads.paragraph("Select and upload slide files"), shown("p")),
            (uploads.upload_guidelines_heading.clone(), shown("h3")),
            (uploads.guideline1.clone(), shown("li")),
            (uploads.guideline2.clone(), shown("li")),
            (uploads.guideline3.clone(), shown("li")),
            (uploads.drag_drop_text.clone(), shown("p")),
            (uploads.supported_formats_heading.clone(), shown("h6")),
            (uploads.max_file_size_heading.clone(), shown("h6")),
            (uploads.upload_button.clone(), shown("button")),
            (uploads.loading_uploads.clone(), shown("p")),
        ],
    );
    let driver = revealed_by(
        driver,
        &uploads.in_progress_tab,
        vec![
            (uploads.in_progress_heading.clone(), shown("h2")),
            (uploads.in_progress_description.clone(), shown("p")),
            (uploads.no_files_uploading_text.clone(), shown("p")),
        ],
    );
    revealed_by(
        driver,
        &uploads.completed_tab,
        vec![
            (uploads.loading_completed_uploads.clone(), shown("p")),
            (uploads.tab_heading("Slide Upload History"), shown("h2")),
            (uploads.paragraph("View slide(s) upload history"), shown("p")),
            (uploads.no_completed_uploads_text.clone(), shown("p")),
        ],
    )
}

fn models_screen(driver: MockDriver, page: &Page, dashboard: &OrgDashboardPage) -> MockDriver {
    let models = ModelsPage::new(page);
    revealed_by(
        driver,
        &dashboard.nav_model,
        vec![
            (models.org_models_heading.clone(), shown("h1")),
            (models.org_models_sub_heading.clone(), shown("p")),
            (models.stain_management_tab.clone(), selected_tab()),
            (models.total_stainers_label.clone(), shown("p")),
            (models.total_stainers_value.clone(), shown("div").with_text("2")),
            (models.auto_deep_stainer_heading.clone(), shown("h5")),
            (models.auto_restainer_heading.clone(), shown("h5")),
            (models.he_card_v010.clone(), shown("div")),
            (models.panck_card.clone(), shown("div")),
        ],
    )
}

/// Factory handing out a fresh scripted page per test
pub fn factory(build: fn() -> MockDriver) -> Arc<dyn PageFactory> {
    Arc::new(move || {
        Ok(Page::new(Arc::new(build()))
            .with_base_url(BASE_URL)
            .with_timeouts(fast_timeouts()))
    })
}
