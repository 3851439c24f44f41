//! Page handle.
//!
//! [`Page`] is the surface page objects and specs program against. It owns
//! a shared [`Driver`] plus the base URL and timeouts, and layers the
//! Playwright behaviours on top of the raw driver calls:
//!
//! - **Auto-wait**: actions retry until the target is attached, visible and
//!   enabled, or the action timeout elapses.
//! - **Strict mode**: an action whose locator matches more than one element
//!   fails immediately with [`ProbeError::StrictModeViolation`].
//! - **Relative navigation**: `goto("/dashboard")` resolves against the base
//!   URL.

use crate::context::StorageState;
use crate::driver::{Driver, ElementSnapshot, Screenshot};
use crate::locator::{AriaRole, Locator, Selector, TextMatch};
use crate::result::{ProbeError, ProbeResult};
use crate::wait::{poll_until, wait_timeout, LoadState, WaitOptions, WaitState};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Default action timeout (15 seconds)
pub const DEFAULT_ACTION_TIMEOUT_MS: u64 = 15_000;

/// Default expectation timeout (30 seconds)
pub const DEFAULT_EXPECT_TIMEOUT_MS: u64 = 30_000;

/// Default navigation timeout (30 seconds)
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// Timeouts applied by a [`Page`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Actions and explicit waits
    pub action_ms: u64,
    /// Web-first assertions
    pub expect_ms: u64,
    /// Navigation and load states
    pub navigation_ms: u64,
    /// Interval between retries
    pub poll_interval_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            action_ms: DEFAULT_ACTION_TIMEOUT_MS,
            expect_ms: DEFAULT_EXPECT_TIMEOUT_MS,
            navigation_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            poll_interval_ms: crate::wait::DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Handle to one browser page
#[derive(Clone)]
pub struct Page {
    driver: Arc<dyn Driver>,
    base_url: String,
    timeouts: Timeouts,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("base_url", &self.base_url)
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

/// Decide whether the current matches allow an action.
///
/// `Ok(None)` means "not attached yet, keep waiting".
fn check_actionable(
    locator: &Locator,
    matches: &[ElementSnapshot],
    needs_editable: bool,
) -> ProbeResult<Option<usize>> {
    let not_actionable = |reason: &str| ProbeError::NotActionable {
        locator: locator.to_string(),
        reason: reason.to_string(),
    };
    match matches {
        [] => Ok(None),
        [el] if !el.visible => Err(not_actionable("element is not visible")),
        [el] if !el.enabled => Err(not_actionable("element is disabled")),
        [el] if needs_editable && !el.editable => Err(not_actionable("element is not editable")),
        [_] => Ok(Some(0)),
        many => Err(ProbeError::StrictModeViolation {
            locator: locator.to_string(),
            count: many.len(),
        }),
    }
}

impl Page {
    /// Wrap a driver with default timeouts and no base URL
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self {
            driver,
            base_url: String::new(),
            timeouts: Timeouts::default(),
        }
    }

    /// Set the base URL relative paths resolve against
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeouts
    #[must_use]
    pub const fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Underlying driver
    #[must_use]
    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    /// Base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Timeouts
    #[must_use]
    pub const fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Resolve `path` against the base URL; absolute URLs pass through
    #[must_use]
    pub fn resolve_url(&self, path: &str) -> String {
        if path.contains("://") || path.starts_with("about:") || self.base_url.is_empty() {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        let rel = path.trim_start_matches('/');
        if rel.is_empty() {
            format!("{base}/")
        } else {
            format!("{base}/{rel}")
        }
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Navigate and wait for the `load` state
    ///
    /// # Errors
    ///
    /// Returns error if navigation fails or times out
    pub async fn goto(&self, path: &str) -> ProbeResult<()> {
        let url = self.resolve_url(path);
        tracing::debug!(%url, "goto");
        self.driver.navigate(&url).await?;
        self.wait_for_load_state(LoadState::Load).await
    }

    /// Wait for the document to reach `state`
    ///
    /// # Errors
    ///
    /// Returns error on timeout
    pub async fn wait_for_load_state(&self, state: LoadState) -> ProbeResult<()> {
        self.driver
            .wait_for_load_state(state, Duration::from_millis(self.timeouts.navigation_ms))
            .await
    }

    /// Current URL
    ///
    /// # Errors
    ///
    /// Returns error if the driver cannot report it
    pub async fn url(&self) -> ProbeResult<String> {
        self.driver.current_url().await
    }

    // =========================================================================
    // LOCATOR FACTORIES
    // =========================================================================

    /// Locator from a Playwright selector string
    #[must_use]
    pub fn locator(&self, selector: &str) -> Locator {
        Locator::new(selector)
    }

    /// CSS locator filtered by contained text (`{ hasText }` option)
    #[must_use]
    pub fn locator_with_text(&self, css: &str, text: &str) -> Locator {
        Locator::from_selector(Selector::HasText {
            css: css.to_string(),
            text: TextMatch::contains(text),
        })
    }

    /// Locate by role and accessible-name substring
    #[must_use]
    pub fn get_by_role(&self, role: AriaRole, name: &str) -> Locator {
        Locator::role(role, name)
    }

    /// Locate by role and exact accessible name
    #[must_use]
    pub fn get_by_role_exact(&self, role: AriaRole, name: &str) -> Locator {
        Locator::role_exact(role, name)
    }

    /// Locate by role only
    #[must_use]
    pub fn get_by_any_role(&self, role: AriaRole) -> Locator {
        Locator::from_selector(Selector::Role { role, name: None })
    }

    /// Locate by text substring
    #[must_use]
    pub fn get_by_text(&self, text: &str) -> Locator {
        Locator::text(text)
    }

    /// Locate by exact text
    #[must_use]
    pub fn get_by_text_exact(&self, text: &str) -> Locator {
        Locator::text_exact(text)
    }

    /// Locate by text regex
    #[must_use]
    pub fn get_by_text_regex(&self, pattern: &str, case_insensitive: bool) -> Locator {
        Locator::from_selector(Selector::Text {
            text: TextMatch::regex(pattern, case_insensitive),
        })
    }

    /// Locate a form control by label substring
    #[must_use]
    pub fn get_by_label(&self, text: &str) -> Locator {
        Locator::from_selector(Selector::Label {
            text: TextMatch::contains(text),
        })
    }

    /// Locate a form control by exact label
    #[must_use]
    pub fn get_by_label_exact(&self, text: &str) -> Locator {
        Locator::from_selector(Selector::Label {
            text: TextMatch::exact(text),
        })
    }

    /// Locate by `data-testid`
    #[must_use]
    pub fn get_by_test_id(&self, id: &str) -> Locator {
        Locator::from_selector(Selector::test_id(id))
    }

    /// Locate an input by placeholder substring
    #[must_use]
    pub fn get_by_placeholder(&self, text: &str) -> Locator {
        Locator::from_selector(Selector::Placeholder {
            text: TextMatch::contains(text),
        })
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    fn options_for(&self, locator: &Locator, default_ms: u64) -> WaitOptions {
        let timeout_ms = locator
            .timeout()
            .map_or(default_ms, |t| t.as_millis() as u64);
        WaitOptions::new()
            .with_timeout(timeout_ms)
            .with_poll_interval(self.timeouts.poll_interval_ms)
    }

    async fn act<F, Fut>(
        &self,
        locator: &Locator,
        action: &str,
        needs_editable: bool,
        perform: F,
    ) -> ProbeResult<()>
    where
        F: Fn(usize) -> Fut,
        Fut: Future<Output = ProbeResult<()>>,
    {
        tracing::debug!(%locator, action, "action");
        let waiting_for = format!("{locator} to be actionable ({action})");
        let perform = &perform;
        poll_until(
            self.options_for(locator, self.timeouts.action_ms),
            &waiting_for,
            || async move {
                let matches = self.driver.query_all(locator).await?;
                let Some(index) = check_actionable(locator, &matches, needs_editable)? else {
                    return Ok(None);
                };
                perform(index).await?;
                Ok(Some(()))
            },
        )
        .await
    }

    /// Click the element once it is actionable
    ///
    /// # Errors
    ///
    /// Returns error on strict-mode violation or timeout
    pub async fn click(&self, locator: &Locator) -> ProbeResult<()> {
        self.act(locator, "click", false, |i| self.driver.click(locator, i))
            .await
    }

    /// Hover the element once it is actionable
    ///
    /// # Errors
    ///
    /// Returns error on strict-mode violation or timeout
    pub async fn hover(&self, locator: &Locator) -> ProbeResult<()> {
        self.act(locator, "hover", false, |i| self.driver.hover(locator, i))
            .await
    }

    /// Replace the value of an editable element
    ///
    /// # Errors
    ///
    /// Returns error on strict-mode violation or timeout
    pub async fn fill(&self, locator: &Locator, value: &str) -> ProbeResult<()> {
        self.act(locator, "fill", true, |i| self.driver.fill(locator, i, value))
            .await
    }

    /// Focus the element once it is actionable
    ///
    /// # Errors
    ///
    /// Returns error on strict-mode violation or timeout
    pub async fn focus(&self, locator: &Locator) -> ProbeResult<()> {
        self.act(locator, "focus", false, |i| self.driver.focus(locator, i))
            .await
    }

    /// Type into the focused element with `delay_ms` between characters
    ///
    /// # Errors
    ///
    /// Returns error if nothing has focus or input fails
    pub async fn keyboard_type(&self, text: &str, delay_ms: u64) -> ProbeResult<()> {
        tracing::debug!(chars = text.chars().count(), delay_ms, "keyboard type");
        self.driver
            .keyboard_type(text, Duration::from_millis(delay_ms))
            .await
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Snapshot every current match, without waiting
    ///
    /// # Errors
    ///
    /// Returns error if the driver query fails
    pub async fn query_all(&self, locator: &Locator) -> ProbeResult<Vec<ElementSnapshot>> {
        self.driver.query_all(locator).await
    }

    /// Number of current matches, without waiting
    ///
    /// # Errors
    ///
    /// Returns error if the driver query fails
    pub async fn count(&self, locator: &Locator) -> ProbeResult<usize> {
        Ok(self.query_all(locator).await?.len())
    }

    /// Whether any current match is visible, without waiting
    ///
    /// # Errors
    ///
    /// Returns error if the driver query fails
    pub async fn is_visible(&self, locator: &Locator) -> ProbeResult<bool> {
        Ok(WaitState::Visible.is_satisfied(&self.query_all(locator).await?))
    }

    async fn single(&self, locator: &Locator) -> ProbeResult<ElementSnapshot> {
        let waiting_for = format!("{locator} to be attached");
        poll_until(
            self.options_for(locator, self.timeouts.action_ms),
            &waiting_for,
            || async move {
                let mut matches = self.driver.query_all(locator).await?;
                match matches.len() {
                    0 => Ok(None),
                    1 => Ok(matches.pop()),
                    count => Err(ProbeError::StrictModeViolation {
                        locator: locator.to_string(),
                        count,
                    }),
                }
            },
        )
        .await
    }

    /// Rendered text of the single match
    ///
    /// # Errors
    ///
    /// Returns error on strict-mode violation or timeout
    pub async fn inner_text(&self, locator: &Locator) -> ProbeResult<String> {
        Ok(self.single(locator).await?.inner_text)
    }

    /// `textContent` of the single match
    ///
    /// # Errors
    ///
    /// Returns error on strict-mode violation or timeout
    pub async fn text_content(&self, locator: &Locator) -> ProbeResult<String> {
        Ok(self.single(locator).await?.text)
    }

    /// Attribute of the single match
    ///
    /// # Errors
    ///
    /// Returns error on strict-mode violation or timeout
    pub async fn get_attribute(&self, locator: &Locator, name: &str) -> ProbeResult<Option<String>> {
        Ok(self.single(locator).await?.attributes.remove(name))
    }

    /// Value of the single matching form control
    ///
    /// # Errors
    ///
    /// Returns error on strict-mode violation or timeout
    pub async fn input_value(&self, locator: &Locator) -> ProbeResult<String> {
        Ok(self.single(locator).await?.value.unwrap_or_default())
    }

    // =========================================================================
    // WAITS
    // =========================================================================

    /// Wait until the locator reaches `state`.
    ///
    /// Uses the locator's own timeout when set, the action timeout otherwise.
    ///
    /// # Errors
    ///
    /// Returns error on timeout
    pub async fn wait_for(&self, locator: &Locator, state: WaitState) -> ProbeResult<()> {
        let waiting_for = format!("{locator} to be {state}");
        poll_until(
            self.options_for(locator, self.timeouts.action_ms),
            &waiting_for,
            || async move {
                let matches = self.driver.query_all(locator).await?;
                Ok(state.is_satisfied(&matches).then_some(()))
            },
        )
        .await
    }

    /// Sleep for `ms` milliseconds
    pub async fn wait_for_timeout(&self, ms: u64) {
        wait_timeout(ms).await;
    }

    // =========================================================================
    // PAGE-LEVEL
    // =========================================================================

    /// Capture the viewport
    ///
    /// # Errors
    ///
    /// Returns error if capture fails
    pub async fn screenshot(&self) -> ProbeResult<Screenshot> {
        self.driver.screenshot().await
    }

    /// Evaluate a JavaScript expression
    ///
    /// # Errors
    ///
    /// Returns error if evaluation throws
    pub async fn evaluate(&self, script: &str) -> ProbeResult<serde_json::Value> {
        self.driver.evaluate(script).await
    }

    /// Export cookies and local storage
    ///
    /// # Errors
    ///
    /// Returns error if the driver cannot read them
    pub async fn storage_state(&self) -> ProbeResult<StorageState> {
        self.driver.storage_state().await
    }

    /// Import cookies and local storage
    ///
    /// # Errors
    ///
    /// Returns error if the driver rejects them
    pub async fn apply_storage_state(&self, state: &StorageState) -> ProbeResult<()> {
        self.driver.apply_storage_state(state).await
    }

    /// Close the page
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails to close
    pub async fn close(&self) -> ProbeResult<()> {
        self.driver.close().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::driver::{MockAction, MockDriver, Reaction};

    fn fast() -> Timeouts {
        Timeouts {
            action_ms: 50,
            expect_ms: 50,
            navigation_ms: 50,
            poll_interval_ms: 5,
        }
    }

    fn page_with(driver: MockDriver) -> (Page, Arc<MockDriver>) {
        let driver = Arc::new(driver);
        let page = Page::new(driver.clone())
            .with_base_url("https://vsh.example.com")
            .with_timeouts(fast());
        (page, driver)
    }

    mod url_tests {
        use super::*;

        #[test]
        fn test_relative_paths_join_base() {
            let (page, _) = page_with(MockDriver::new());
            assert_eq!(page.resolve_url("/"), "https://vsh.example.com/");
            assert_eq!(page.resolve_url("dashboard"), "https://vsh.example.com/dashboard");
            assert_eq!(page.resolve_url("/reports"), "https://vsh.example.com/reports");
        }

        #[test]
        fn test_absolute_urls_pass_through() {
            let (page, _) = page_with(MockDriver::new());
            assert_eq!(page.resolve_url("https://okta.example/x"), "https://okta.example/x");
            assert_eq!(page.resolve_url("about:blank"), "about:blank");
        }

        #[test]
        fn test_no_base_url() {
            let page = Page::new(Arc::new(MockDriver::new()));
            assert_eq!(page.resolve_url("/x"), "/x");
        }

        #[tokio::test]
        async fn test_goto_navigates_and_waits_for_load() {
            let (page, driver) = page_with(MockDriver::new());
            page.goto("/").await.unwrap();
            assert_eq!(page.url().await.unwrap(), "https://vsh.example.com/");
            assert!(driver.was_called("wait_for_load_state:load"));
        }

        #[test]
        fn test_debug_hides_driver() {
            let (page, _) = page_with(MockDriver::new());
            let dbg = format!("{page:?}");
            assert!(dbg.contains("vsh.example.com"));
            assert!(dbg.contains(".."));
        }
    }

    mod action_tests {
        use super::*;

        #[tokio::test]
        async fn test_click_visible_element() {
            let button = Locator::role(AriaRole::Button, "Sign In");
            let (page, driver) =
                page_with(MockDriver::new().with_element(&button, ElementSnapshot::new("button")));
            page.click(&button).await.unwrap();
            assert!(driver.was_called("click:role=button"));
        }

        #[tokio::test]
        async fn test_click_waits_for_element() {
            let button = Locator::css("button#late");
            let (page, driver) = page_with(
                MockDriver::new()
                    .with_element(&button, ElementSnapshot::new("button"))
                    .appear_after(&button, 3),
            );
            page.click(&button).await.unwrap();
            assert!(driver.was_called("click:button#late"));
        }

        #[tokio::test]
        async fn test_click_missing_times_out() {
            let (page, _) = page_with(MockDriver::new());
            let err = page.click(&Locator::css("nope")).await.unwrap_err();
            assert!(matches!(err, ProbeError::Timeout { ms: 50, .. }));
            assert!(err.to_string().contains("nope"));
        }

        #[tokio::test]
        async fn test_locator_timeout_overrides_action_timeout() {
            let (page, _) = page_with(MockDriver::new());
            let loc = Locator::css("nope").with_timeout(Duration::from_millis(10));
            let err = page.click(&loc).await.unwrap_err();
            assert!(matches!(err, ProbeError::Timeout { ms: 10, .. }));
        }

        #[tokio::test]
        async fn test_strict_mode_violation() {
            let items = Locator::css("li");
            let (page, driver) = page_with(MockDriver::new().with_elements(
                &items,
                vec![ElementSnapshot::new("li"), ElementSnapshot::new("li")],
            ));
            let err = page.click(&items).await.unwrap_err();
            assert!(matches!(err, ProbeError::StrictModeViolation { count: 2, .. }));
            assert!(!driver.was_called("click"));
        }

        #[tokio::test]
        async fn test_hidden_element_is_not_actionable() {
            let button = Locator::css("button");
            let (page, _) =
                page_with(MockDriver::new().with_element(&button, ElementSnapshot::new("button").hidden()));
            let err = page.click(&button).await.unwrap_err();
            assert!(err.to_string().contains("not visible"));
        }

        #[tokio::test]
        async fn test_fill_requires_editable() {
            let div = Locator::css("div");
            let input = Locator::css("input#username");
            let (page, driver) = page_with(
                MockDriver::new()
                    .with_element(&div, ElementSnapshot::new("div"))
                    .with_element(&input, ElementSnapshot::new("input")),
            );
            assert!(page.fill(&div, "x").await.is_err());
            page.fill(&input, "qa@example.com").await.unwrap();
            assert_eq!(driver.value_of(&input, 0).as_deref(), Some("qa@example.com"));
        }

        #[tokio::test]
        async fn test_disabled_input_rejects_fill() {
            let input = Locator::css("input[name='email']");
            let (page, _) = page_with(
                MockDriver::new().with_element(&input, ElementSnapshot::new("input").disabled()),
            );
            let err = page.fill(&input, "x").await.unwrap_err();
            assert!(err.to_string().contains("disabled"));
        }

        #[tokio::test]
        async fn test_keyboard_type_after_click() {
            let input = Locator::css("input[name='title']");
            let (page, driver) =
                page_with(MockDriver::new().with_element(&input, ElementSnapshot::new("input")));
            page.click(&input).await.unwrap();
            page.keyboard_type("Title 1", 0).await.unwrap();
            assert_eq!(driver.value_of(&input, 0).as_deref(), Some("Title 1"));
        }

        #[tokio::test]
        async fn test_hover_triggers_reaction() {
            let icon = Locator::css("svg.help");
            let tip = Locator::text_exact("Show password");
            let (page, _) = page_with(
                MockDriver::new()
                    .with_element(&icon, ElementSnapshot::new("svg"))
                    .with_element(&tip, ElementSnapshot::new("span").hidden())
                    .on(&icon, MockAction::Hover, Reaction::Show(tip.clone())),
            );
            page.hover(&icon).await.unwrap();
            assert!(page.is_visible(&tip).await.unwrap());
        }
    }

    mod query_tests {
        use super::*;

        #[tokio::test]
        async fn test_count_and_visibility_do_not_wait() {
            let rows = Locator::css("tr");
            let (page, _) = page_with(MockDriver::new().with_elements(
                &rows,
                vec![ElementSnapshot::new("tr"), ElementSnapshot::new("tr").hidden()],
            ));
            assert_eq!(page.count(&rows).await.unwrap(), 2);
            assert!(page.is_visible(&rows).await.unwrap());
            assert_eq!(page.count(&Locator::css("x")).await.unwrap(), 0);
        }

        #[tokio::test]
        async fn test_text_and_attributes() {
            let link = Locator::css("a.docs");
            let (page, _) = page_with(MockDriver::new().with_element(
                &link,
                ElementSnapshot::new("a")
                    .with_text("Docs")
                    .with_attribute("href", "/docs"),
            ));
            assert_eq!(page.inner_text(&link).await.unwrap(), "Docs");
            assert_eq!(page.text_content(&link).await.unwrap(), "Docs");
            assert_eq!(
                page.get_attribute(&link, "href").await.unwrap().as_deref(),
                Some("/docs")
            );
            assert_eq!(page.get_attribute(&link, "target").await.unwrap(), None);
        }

        #[tokio::test]
        async fn test_input_value() {
            let input = Locator::css("input");
            let (page, _) = page_with(
                MockDriver::new().with_element(&input, ElementSnapshot::new("input").with_value("a@b.c")),
            );
            assert_eq!(page.input_value(&input).await.unwrap(), "a@b.c");
        }
    }

    mod wait_tests {
        use super::*;

        #[tokio::test]
        async fn test_wait_for_hidden_accepts_missing() {
            let (page, _) = page_with(MockDriver::new());
            page.wait_for(&Locator::css("spinner"), WaitState::Hidden)
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn test_wait_for_visible_times_out() {
            let loc = Locator::css("h1");
            let (page, _) =
                page_with(MockDriver::new().with_element(&loc, ElementSnapshot::new("h1").hidden()));
            let err = page.wait_for(&loc, WaitState::Visible).await.unwrap_err();
            assert!(err.to_string().contains("h1 to be visible"));
        }

        #[tokio::test]
        async fn test_wait_for_attached_hidden_element() {
            let loc = Locator::css("input[type='password']");
            let (page, _) =
                page_with(MockDriver::new().with_element(&loc, ElementSnapshot::new("input").hidden()));
            page.wait_for(&loc, WaitState::Attached).await.unwrap();
        }
    }

    mod storage_tests {
        use super::*;
        use crate::context::Cookie;

        #[tokio::test]
        async fn test_storage_state_passthrough() {
            let (page, driver) = page_with(MockDriver::new());
            let state = StorageState::new().with_cookie(Cookie::new("sid", "1", "vsh.example.com"));
            page.apply_storage_state(&state).await.unwrap();
            assert_eq!(page.storage_state().await.unwrap(), state);
            assert!(driver.was_called("apply_storage_state"));
        }
    }
}
