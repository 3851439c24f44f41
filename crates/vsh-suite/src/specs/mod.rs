//! Test suites, one per screen.

use crate::helpers::login_to_dashboard;
use vsh_probe::{TestContext, TestFuture, TestSuite};

pub mod account;
pub mod dashboard;
pub mod landing;
pub mod login;
pub mod models;
pub mod reports;
pub mod topbar;
pub mod uploads;

/// Every suite, in run order
#[must_use]
pub fn all() -> Vec<TestSuite> {
    vec![
        landing::suite(),
        login::suite(),
        topbar::suite(),
        dashboard::suite(),
        reports::suite(),
        account::suite(),
        uploads::suite(),
        models::suite(),
    ]
}

/// `before_each` hook that signs in with the configured account
pub(crate) fn sign_in(ctx: &TestContext) -> TestFuture<'_> {
    Box::pin(login_to_dashboard(&ctx.page, &ctx.config))
}
