//! vsh-probe: locators, auto-waiting actions and web-first assertions for
//! end-to-end UI suites.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ Suite specs  │───►│ Page objects │───►│ Page + expect│───►│ Driver       │
//! │ (TestSuite)  │    │ (PageObject) │    │ (auto-wait)  │    │ CDP or Mock  │
//! └──────────────┘    └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! [`Page`] turns declarative [`Locator`]s into actions that wait for the
//! target to be unique and actionable. [`expect`] re-queries the page until
//! a condition holds. The [`Driver`] seam is implemented over the Chrome
//! DevTools Protocol ([`Browser`], feature `browser`) and by [`MockDriver`]
//! for tests that need no browser.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod browser;
mod config;
mod context;
mod driver;
mod expect;
mod fixture;
mod harness;
mod locator;
mod page;
mod page_object;
#[cfg_attr(not(feature = "browser"), allow(dead_code))]
mod resolver;
mod result;
mod runner;
mod wait;

#[cfg(feature = "browser")]
pub use browser::ChromiumDriver;
pub use browser::Browser;
pub use config::{
    ScreenshotMode, SuiteConfig, Viewport, DEFAULT_TEST_TIMEOUT_MS, DESKTOP_CHROME_USER_AGENT,
};
pub use context::{Cookie, NameValue, OriginState, SameSite, StorageState};
pub use driver::{
    Driver, DriverConfig, ElementSnapshot, MockAction, MockDriver, Reaction, Screenshot,
};
pub use expect::{expect, expect_value, Expect, ValueExpect};
pub use fixture::{with_fixture, Fixture};
pub use harness::{
    run_body, Expectation, TestCase, TestContext, TestFn, TestFuture, TestStatus, TestSuite,
};
pub use locator::{
    normalize_whitespace, AriaRole, BoundingBox, Locator, Selector, TextMatch, CHAIN_SEPARATOR,
};
pub use page::{
    Page, Timeouts, DEFAULT_ACTION_TIMEOUT_MS, DEFAULT_EXPECT_TIMEOUT_MS,
    DEFAULT_NAVIGATION_TIMEOUT_MS,
};
pub use page_object::{BasePage, PageObject};
pub use result::{ProbeError, ProbeResult};
pub use runner::{
    select, BrowserPageFactory, PageFactory, RecordObserver, RunReport, SuiteRunner, Summary,
    TestRecord, RESULTS_FILE,
};
pub use wait::{
    poll_until, wait_timeout, LoadState, WaitOptions, WaitState, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_WAIT_TIMEOUT_MS,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        expect, expect_value, AriaRole, BasePage, Expectation, Fixture, Locator, Page, PageObject,
        ProbeError, ProbeResult, SuiteConfig, TestCase, TestContext, TestFuture, TestSuite,
        WaitState,
    };
}
