//! Page objects, one per application screen.
//!
//! Each page object holds a [`BasePage`](vsh_probe::BasePage) plus a flat set
//! of [`Locator`](vsh_probe::Locator)s built once in `new()`. Locators that
//! depend on runtime values are methods instead of fields.

mod account;
mod dashboard;
mod landing;
mod login;
mod models;
mod reports;
mod support;
mod topbar;
mod uploads;

pub use account::OrgAccountPage;
pub use dashboard::{OrgDashboardPage, StainMetrics};
pub use landing::LandingPage;
pub use login::LoginPage;
pub use models::ModelsPage;
pub use reports::OrganizationReportsPage;
pub use support::SupportPopup;
pub use topbar::TopBar;
pub use uploads::UploadsPage;

/// Timeout used by the slower screens' `is_loaded` checks
pub const SLOW_PAGE_TIMEOUT_MS: u64 = 10_000;
