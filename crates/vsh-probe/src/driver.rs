//! Driver - Abstract Browser Automation Trait
//!
//! [`crate::Page`] talks to the browser only through the [`Driver`] trait,
//! which keeps auto-waiting, strictness and assertions independent of the
//! transport.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Page (auto-wait, strict mode, timeouts)                      │
//! ├───────────────────────────────────────────────────────────────┤
//! │  Driver (trait)                                               │
//! │  ┌───────────────────────────┐  ┌───────────────────────────┐ │
//! │  │  ChromiumDriver           │  │  MockDriver               │ │
//! │  │  CDP via chromiumoxide    │  │  scripted DOM, in-memory  │ │
//! │  │  (feature = "browser")    │  │  (unit/integration tests) │ │
//! │  └───────────────────────────┘  └───────────────────────────┘ │
//! └───────────────────────────────────────────────────────────────┘
//! ```

use crate::context::StorageState;
use crate::locator::{BoundingBox, Locator};
use crate::result::{ProbeError, ProbeResult};
use crate::wait::LoadState;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

// =============================================================================
// ELEMENT SNAPSHOT
// =============================================================================

/// Point-in-time view of one element matched by a locator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSnapshot {
    /// Lower-case tag name
    pub tag: String,
    /// Rendered with a non-empty box and not `visibility: hidden`
    pub visible: bool,
    /// Not `disabled` and not `aria-disabled="true"`
    pub enabled: bool,
    /// Accepts text input
    pub editable: bool,
    /// `textContent`
    pub text: String,
    /// `innerText` (rendered text)
    pub inner_text: String,
    /// Current value of form controls
    pub value: Option<String>,
    /// Attributes
    pub attributes: HashMap<String, String>,
    /// Bounding box in CSS pixels
    pub bbox: Option<BoundingBox>,
}

impl Default for ElementSnapshot {
    fn default() -> Self {
        Self {
            tag: "div".to_string(),
            visible: false,
            enabled: true,
            editable: false,
            text: String::new(),
            inner_text: String::new(),
            value: None,
            attributes: HashMap::new(),
            bbox: None,
        }
    }
}

impl ElementSnapshot {
    /// A visible, enabled element
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let editable = matches!(tag.as_str(), "input" | "textarea");
        Self {
            value: editable.then(String::new),
            tag,
            visible: true,
            editable,
            bbox: Some(BoundingBox::new(0.0, 0.0, 100.0, 20.0)),
            ..Self::default()
        }
    }

    /// Set text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self.inner_text.clone_from(&self.text);
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Set the form value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Mark hidden
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self.bbox = None;
        self
    }

    /// Mark disabled
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Attribute value
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Rendered text, falling back to `textContent` for hidden elements
    #[must_use]
    pub fn rendered_text(&self) -> &str {
        if self.visible && !self.inner_text.is_empty() {
            &self.inner_text
        } else {
            &self.text
        }
    }
}

// =============================================================================
// SCREENSHOT / CONFIG
// =============================================================================

/// Screenshot data with metadata
#[derive(Debug, Clone)]
pub struct Screenshot {
    /// Raw PNG data
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Timestamp when screenshot was taken
    pub timestamp: std::time::SystemTime,
}

impl Screenshot {
    /// Create a new screenshot
    #[must_use]
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp: std::time::SystemTime::now(),
        }
    }

    /// Get the size in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if screenshot is valid (has data)
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.data.is_empty() && self.width > 0 && self.height > 0
    }

    /// Write the PNG to `path`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written
    pub fn save(&self, path: &std::path::Path) -> ProbeResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &self.data)?;
        Ok(())
    }
}

/// Browser configuration for a driver
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// User agent string
    pub user_agent: Option<String>,
    /// Timeout for navigation
    pub navigation_timeout: Duration,
    /// Executable path override
    pub executable_path: Option<String>,
    /// Chromium sandbox (disable for containers)
    pub sandbox: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            user_agent: None,
            navigation_timeout: Duration::from_secs(30),
            executable_path: None,
            sandbox: true,
        }
    }
}

impl DriverConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode
    #[must_use]
    pub const fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set navigation timeout
    #[must_use]
    pub const fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Set the browser executable
    #[must_use]
    pub fn executable_path(mut self, path: impl Into<String>) -> Self {
        self.executable_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

// =============================================================================
// DRIVER TRAIT
// =============================================================================

/// Browser automation backend.
///
/// Element operations take the locator plus the index of the targeted match;
/// the caller has already checked that the match exists and is actionable.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to an absolute URL
    async fn navigate(&self, url: &str) -> ProbeResult<()>;

    /// Current URL
    async fn current_url(&self) -> ProbeResult<String>;

    /// Wait until the document reaches `state`
    async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> ProbeResult<()>;

    /// Snapshot every element matching `locator`
    async fn query_all(&self, locator: &Locator) -> ProbeResult<Vec<ElementSnapshot>>;

    /// Scroll into view and click the centre of a match
    async fn click(&self, locator: &Locator, index: usize) -> ProbeResult<()>;

    /// Move the mouse over a match
    async fn hover(&self, locator: &Locator, index: usize) -> ProbeResult<()>;

    /// Replace the value of an input
    async fn fill(&self, locator: &Locator, index: usize, value: &str) -> ProbeResult<()>;

    /// Focus a match
    async fn focus(&self, locator: &Locator, index: usize) -> ProbeResult<()>;

    /// Type into the focused element, one character at a time
    async fn keyboard_type(&self, text: &str, delay: Duration) -> ProbeResult<()>;

    /// Evaluate a JavaScript expression
    async fn evaluate(&self, script: &str) -> ProbeResult<serde_json::Value>;

    /// Capture the viewport as PNG
    async fn screenshot(&self) -> ProbeResult<Screenshot>;

    /// Export cookies and local storage
    async fn storage_state(&self) -> ProbeResult<StorageState>;

    /// Import cookies and local storage
    async fn apply_storage_state(&self, state: &StorageState) -> ProbeResult<()>;

    /// Close the page
    async fn close(&self) -> ProbeResult<()>;
}

// =============================================================================
// MOCK DRIVER
// =============================================================================

/// Element interaction a [`MockDriver`] can react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockAction {
    /// Click
    Click,
    /// Hover
    Hover,
    /// Fill or type
    Fill,
}

/// DOM change applied by a [`MockDriver`] when an action fires
#[derive(Debug, Clone)]
pub enum Reaction {
    /// Make every match visible
    Show(Locator),
    /// Make every match hidden
    Hide(Locator),
    /// Flip the visibility of every match
    Toggle(Locator),
    /// Remove every match
    Remove(Locator),
    /// Add elements under a locator
    Insert(Locator, Vec<ElementSnapshot>),
    /// Replace the text of every match
    SetText(Locator, String),
    /// Set an attribute on every match
    SetAttribute(Locator, String, String),
    /// Flip a boolean attribute (`"true"`/`"false"`) on every match
    ToggleAttribute(Locator, String),
    /// Change the current URL
    Navigate(String),
}

#[derive(Debug, Default)]
struct MockState {
    url: String,
    elements: HashMap<String, Vec<ElementSnapshot>>,
    reactions: HashMap<(String, MockAction), Vec<Reaction>>,
    appear_after: HashMap<String, u32>,
    focused: Option<(String, usize)>,
    scripts: Vec<(String, serde_json::Value)>,
    storage: StorageState,
    call_history: Vec<String>,
    closed: bool,
}

impl MockState {
    fn apply(&mut self, reaction: &Reaction) {
        match reaction {
            Reaction::Show(loc) => self.each(loc, |el| {
                el.visible = true;
                if el.bbox.is_none() {
                    el.bbox = Some(BoundingBox::new(0.0, 0.0, 100.0, 20.0));
                }
            }),
            Reaction::Hide(loc) => self.each(loc, |el| {
                el.visible = false;
                el.bbox = None;
            }),
            Reaction::Toggle(loc) => self.each(loc, |el| {
                el.visible = !el.visible;
                el.bbox = el
                    .visible
                    .then(|| BoundingBox::new(0.0, 0.0, 100.0, 20.0));
            }),
            Reaction::Remove(loc) => {
                self.elements.remove(&loc.to_string());
            }
            Reaction::Insert(loc, els) => self
                .elements
                .entry(loc.to_string())
                .or_default()
                .extend(els.iter().cloned()),
            Reaction::SetText(loc, text) => self.each(loc, |el| {
                el.text.clone_from(text);
                el.inner_text.clone_from(text);
            }),
            Reaction::SetAttribute(loc, name, value) => self.each(loc, |el| {
                el.attributes.insert(name.clone(), value.clone());
            }),
            Reaction::ToggleAttribute(loc, name) => self.each(loc, |el| {
                let on = el.attribute(name) == Some("true");
                el.attributes
                    .insert(name.clone(), if on { "false" } else { "true" }.to_string());
            }),
            Reaction::Navigate(url) => self.url.clone_from(url),
        }
    }

    fn each(&mut self, loc: &Locator, mut f: impl FnMut(&mut ElementSnapshot)) {
        if let Some(els) = self.elements.get_mut(&loc.to_string()) {
            els.iter_mut().for_each(&mut f);
        }
    }

    fn react(&mut self, key: &str, action: MockAction) {
        let reactions = self
            .reactions
            .get(&(key.to_string(), action))
            .cloned()
            .unwrap_or_default();
        for reaction in &reactions {
            self.apply(reaction);
        }
    }

    fn target(&mut self, key: &str, index: usize) -> ProbeResult<&mut ElementSnapshot> {
        self.elements
            .get_mut(key)
            .and_then(|els| els.get_mut(index))
            .ok_or_else(|| ProbeError::ElementNotFound {
                locator: key.to_string(),
            })
    }
}

/// In-memory driver with a scripted DOM.
///
/// Elements are registered under the rendered form of the locator that
/// should find them, so page objects can be exercised without a browser.
/// Interactions are recorded in a call history and can trigger
/// [`Reaction`]s that mutate the DOM.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

/// Placeholder image returned by [`MockDriver::screenshot`] (PNG signature)
const MOCK_PNG: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&mut self) -> &mut MockState {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an element under `locator`
    #[must_use]
    pub fn with_element(mut self, locator: &Locator, element: ElementSnapshot) -> Self {
        self.add_element(locator, element);
        self
    }

    /// Register several elements under `locator`
    #[must_use]
    pub fn with_elements(mut self, locator: &Locator, elements: Vec<ElementSnapshot>) -> Self {
        self.state_mut()
            .elements
            .entry(locator.to_string())
            .or_default()
            .extend(elements);
        self
    }

    /// Register an element under `locator`
    pub fn add_element(&mut self, locator: &Locator, element: ElementSnapshot) {
        self.state_mut()
            .elements
            .entry(locator.to_string())
            .or_default()
            .push(element);
    }

    /// Apply `reaction` whenever `action` targets `locator`
    #[must_use]
    pub fn on(mut self, locator: &Locator, action: MockAction, reaction: Reaction) -> Self {
        self.state_mut()
            .reactions
            .entry((locator.to_string(), action))
            .or_default()
            .push(reaction);
        self
    }

    /// Report no match for the first `queries` lookups of `locator`
    #[must_use]
    pub fn appear_after(mut self, locator: &Locator, queries: u32) -> Self {
        self.state_mut()
            .appear_after
            .insert(locator.to_string(), queries);
        self
    }

    /// Return `value` from `evaluate` for scripts containing `fragment`
    #[must_use]
    pub fn with_script_result(mut self, fragment: &str, value: serde_json::Value) -> Self {
        self.state_mut().scripts.push((fragment.to_string(), value));
        self
    }

    /// Seed the storage state
    #[must_use]
    pub fn with_storage_state(mut self, state: StorageState) -> Self {
        self.state_mut().storage = state;
        self
    }

    /// Current URL
    #[must_use]
    pub fn url(&self) -> String {
        self.state().url.clone()
    }

    /// Current value of a registered input
    #[must_use]
    pub fn value_of(&self, locator: &Locator, index: usize) -> Option<String> {
        self.state()
            .elements
            .get(&locator.to_string())
            .and_then(|els| els.get(index))
            .and_then(|el| el.value.clone())
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state().call_history.clone()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.state()
            .call_history
            .iter()
            .any(|c| c.starts_with(method))
    }

    /// Whether `close` was called
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    fn record(state: &mut MockState, call: String) {
        tracing::trace!(%call, "mock driver call");
        state.call_history.push(call);
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn navigate(&self, url: &str) -> ProbeResult<()> {
        let mut state = self.state();
        Self::record(&mut state, format!("navigate:{url}"));
        state.url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> ProbeResult<String> {
        Ok(self.url())
    }

    async fn wait_for_load_state(&self, state: LoadState, _timeout: Duration) -> ProbeResult<()> {
        Self::record(&mut self.state(), format!("wait_for_load_state:{state}"));
        Ok(())
    }

    async fn query_all(&self, locator: &Locator) -> ProbeResult<Vec<ElementSnapshot>> {
        let key = locator.to_string();
        let mut state = self.state();
        if let Some(remaining) = state.appear_after.get_mut(&key) {
            if *remaining > 0 {
                *remaining -= 1;
                return Ok(Vec::new());
            }
        }
        Ok(state.elements.get(&key).cloned().unwrap_or_default())
    }

    async fn click(&self, locator: &Locator, index: usize) -> ProbeResult<()> {
        let key = locator.to_string();
        let mut state = self.state();
        Self::record(&mut state, format!("click:{key}"));
        state.target(&key, index)?;
        state.focused = Some((key.clone(), index));
        state.react(&key, MockAction::Click);
        Ok(())
    }

    async fn hover(&self, locator: &Locator, index: usize) -> ProbeResult<()> {
        let key = locator.to_string();
        let mut state = self.state();
        Self::record(&mut state, format!("hover:{key}"));
        state.target(&key, index)?;
        state.react(&key, MockAction::Hover);
        Ok(())
    }

    async fn fill(&self, locator: &Locator, index: usize, value: &str) -> ProbeResult<()> {
        let key = locator.to_string();
        let mut state = self.state();
        Self::record(&mut state, format!("fill:{key}={value}"));
        state.target(&key, index)?.value = Some(value.to_string());
        state.focused = Some((key.clone(), index));
        state.react(&key, MockAction::Fill);
        Ok(())
    }

    async fn focus(&self, locator: &Locator, index: usize) -> ProbeResult<()> {
        let key = locator.to_string();
        let mut state = self.state();
        Self::record(&mut state, format!("focus:{key}"));
        state.target(&key, index)?;
        state.focused = Some((key, index));
        Ok(())
    }

    async fn keyboard_type(&self, text: &str, _delay: Duration) -> ProbeResult<()> {
        let mut state = self.state();
        Self::record(&mut state, format!("type:{text}"));
        let Some((key, index)) = state.focused.clone() else {
            return Err(ProbeError::InputError {
                message: "no element has focus".to_string(),
            });
        };
        let el = state.target(&key, index)?;
        el.value.get_or_insert_with(String::new).push_str(text);
        state.react(&key, MockAction::Fill);
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> ProbeResult<serde_json::Value> {
        let mut state = self.state();
        Self::record(&mut state, format!("evaluate:{script}"));
        Ok(state
            .scripts
            .iter()
            .find(|(fragment, _)| script.contains(fragment.as_str()))
            .map_or(serde_json::Value::Null, |(_, value)| value.clone()))
    }

    async fn screenshot(&self) -> ProbeResult<Screenshot> {
        Self::record(&mut self.state(), "screenshot".to_string());
        Ok(Screenshot::new(MOCK_PNG.to_vec(), 1, 1))
    }

    async fn storage_state(&self) -> ProbeResult<StorageState> {
        let mut state = self.state();
        Self::record(&mut state, "storage_state".to_string());
        Ok(state.storage.clone())
    }

    async fn apply_storage_state(&self, storage: &StorageState) -> ProbeResult<()> {
        let mut state = self.state();
        Self::record(&mut state, "apply_storage_state".to_string());
        state.storage = storage.clone();
        Ok(())
    }

    async fn close(&self) -> ProbeResult<()> {
        let mut state = self.state();
        Self::record(&mut state, "close".to_string());
        state.closed = true;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::context::Cookie;

    mod snapshot_tests {
        use super::*;

        #[test]
        fn test_new_is_visible_and_enabled() {
            let el = ElementSnapshot::new("button").with_text("Sign In");
            assert!(el.visible);
            assert!(el.enabled);
            assert!(!el.editable);
            assert_eq!(el.rendered_text(), "Sign In");
        }

        #[test]
        fn test_input_is_editable() {
            let el = ElementSnapshot::new("input");
            assert!(el.editable);
            assert_eq!(el.value.as_deref(), Some(""));
        }

        #[test]
        fn test_hidden_uses_text_content() {
            let mut el = ElementSnapshot::new("span").with_text("Total").hidden();
            el.inner_text.clear();
            assert_eq!(el.rendered_text(), "Total");
            assert!(el.bbox.is_none());
        }

        #[test]
        fn test_deserialize_resolver_output() {
            let raw = r#"{
                "tag": "a", "visible": true, "enabled": true, "editable": false,
                "text": "Docs", "inner_text": "Docs", "value": null,
                "attributes": {"href": "https://docs.example.com"},
                "bbox": {"x": 1, "y": 2, "width": 30, "height": 10}
            }"#;
            let el: ElementSnapshot = serde_json::from_str(raw).unwrap();
            assert_eq!(el.attribute("href"), Some("https://docs.example.com"));
            assert!(el.bbox.unwrap().has_area());
        }
    }

    mod screenshot_tests {
        use super::*;

        #[test]
        fn test_validity() {
            assert!(Screenshot::new(vec![1], 1, 1).is_valid());
            assert!(!Screenshot::new(vec![], 1, 1).is_valid());
        }

        #[test]
        fn test_save_creates_dirs() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("a").join("shot.png");
            Screenshot::new(MOCK_PNG.to_vec(), 1, 1).save(&path).unwrap();
            assert_eq!(std::fs::read(&path).unwrap().len(), 8);
        }
    }

    mod driver_config_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = DriverConfig::default();
            assert!(config.headless);
            assert_eq!((config.viewport_width, config.viewport_height), (1280, 720));
        }

        #[test]
        fn test_builder() {
            let config = DriverConfig::new()
                .headless(false)
                .viewport(1920, 1080)
                .user_agent("probe")
                .executable_path("/usr/bin/chromium");
            assert!(!config.headless);
            assert_eq!(config.viewport_width, 1920);
            assert_eq!(config.user_agent.as_deref(), Some("probe"));
            assert!(config.executable_path.is_some());
        }
    }

    mod mock_driver_tests {
        use super::*;

        #[tokio::test]
        async fn test_navigate_records_history() {
            let driver = MockDriver::new();
            driver.navigate("https://example.com").await.unwrap();
            assert_eq!(driver.current_url().await.unwrap(), "https://example.com");
            assert!(driver.was_called("navigate:https://example.com"));
        }

        #[tokio::test]
        async fn test_query_registered_elements() {
            let loc = Locator::css("li");
            let driver = MockDriver::new().with_elements(
                &loc,
                vec![ElementSnapshot::new("li"), ElementSnapshot::new("li")],
            );
            assert_eq!(driver.query_all(&loc).await.unwrap().len(), 2);
            assert!(driver
                .query_all(&Locator::css("ul"))
                .await
                .unwrap()
                .is_empty());
        }

        #[tokio::test]
        async fn test_click_triggers_reactions() {
            let button = Locator::css("button.help");
            let popup = Locator::css("div.popup");
            let driver = MockDriver::new()
                .with_element(&button, ElementSnapshot::new("button"))
                .with_element(&popup, ElementSnapshot::new("div").hidden())
                .on(&button, MockAction::Click, Reaction::Show(popup.clone()))
                .on(&button, MockAction::Click, Reaction::Navigate("/help".into()));
            driver.click(&button, 0).await.unwrap();
            assert!(driver.query_all(&popup).await.unwrap()[0].visible);
            assert_eq!(driver.url(), "/help");
        }

        #[tokio::test]
        async fn test_toggle_flips_visibility() {
            let switch = Locator::css("button[role='switch']");
            let shown = Locator::css("input[type='text']");
            let driver = MockDriver::new()
                .with_element(&switch, ElementSnapshot::new("button"))
                .with_element(&shown, ElementSnapshot::new("input").hidden())
                .on(&switch, MockAction::Click, Reaction::Toggle(shown.clone()));
            driver.click(&switch, 0).await.unwrap();
            assert!(driver.query_all(&shown).await.unwrap()[0].visible);
            driver.click(&switch, 0).await.unwrap();
            assert!(!driver.query_all(&shown).await.unwrap()[0].visible);
        }

        #[tokio::test]
        async fn test_toggle_attribute_flips_switch_state() {
            let switch = Locator::css("button[role='switch']");
            let driver = MockDriver::new()
                .with_element(
                    &switch,
                    ElementSnapshot::new("button").with_attribute("aria-checked", "false"),
                )
                .on(
                    &switch,
                    MockAction::Click,
                    Reaction::ToggleAttribute(switch.clone(), "aria-checked".into()),
                );
            driver.click(&switch, 0).await.unwrap();
            let state = driver.query_all(&switch).await.unwrap();
            assert_eq!(state[0].attribute("aria-checked"), Some("true"));
            driver.click(&switch, 0).await.unwrap();
            let state = driver.query_all(&switch).await.unwrap();
            assert_eq!(state[0].attribute("aria-checked"), Some("false"));
        }

        #[tokio::test]
        async fn test_click_missing_element() {
            let driver = MockDriver::new();
            let err = driver.click(&Locator::css("x"), 0).await.unwrap_err();
            assert!(matches!(err, ProbeError::ElementNotFound { .. }));
        }

        #[tokio::test]
        async fn test_fill_then_type_appends() {
            let input = Locator::css("textarea");
            let driver = MockDriver::new().with_element(&input, ElementSnapshot::new("textarea"));
            driver.fill(&input, 0, "Hello").await.unwrap();
            driver
                .keyboard_type(" world", Duration::ZERO)
                .await
                .unwrap();
            assert_eq!(driver.value_of(&input, 0).as_deref(), Some("Hello world"));
        }

        #[tokio::test]
        async fn test_type_without_focus_fails() {
            let driver = MockDriver::new();
            let err = driver.keyboard_type("x", Duration::ZERO).await.unwrap_err();
            assert!(matches!(err, ProbeError::InputError { .. }));
        }

        #[tokio::test]
        async fn test_appear_after() {
            let loc = Locator::css("h1");
            let driver = MockDriver::new()
                .with_element(&loc, ElementSnapshot::new("h1"))
                .appear_after(&loc, 2);
            assert!(driver.query_all(&loc).await.unwrap().is_empty());
            assert!(driver.query_all(&loc).await.unwrap().is_empty());
            assert_eq!(driver.query_all(&loc).await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn test_storage_state_roundtrip() {
            let driver = MockDriver::new();
            let state = StorageState::new().with_cookie(Cookie::new("sid", "1", "a"));
            driver.apply_storage_state(&state).await.unwrap();
            assert_eq!(driver.storage_state().await.unwrap(), state);
        }

        #[tokio::test]
        async fn test_script_results() {
            let driver = MockDriver::new()
                .with_script_result("document.title", serde_json::json!("Dashboard"));
            let value = driver.evaluate("return document.title").await.unwrap();
            assert_eq!(value, "Dashboard");
            assert!(driver.evaluate("1 + 1").await.unwrap().is_null());
        }

        #[tokio::test]
        async fn test_close() {
            let driver = MockDriver::new();
            driver.close().await.unwrap();
            assert!(driver.is_closed());
        }
    }
}
