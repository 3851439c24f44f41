//! Page Object Model support.
//!
//! Page objects hold a [`BasePage`] and a flat set of [`Locator`]s built
//! once at construction. [`PageObject::is_loaded`] checks page identity by
//! waiting for an anchor element.

use crate::expect::expect;
use crate::locator::Locator;
use crate::page::Page;
use crate::result::ProbeResult;
use async_trait::async_trait;

/// Trait for page objects representing a page or component in the UI.
///
/// # Example
///
/// ```ignore
/// struct ModelsPage { base: BasePage, heading: Locator }
///
/// impl PageObject for ModelsPage {
///     fn page(&self) -> &Page { self.base.page() }
///     fn anchor(&self) -> &Locator { &self.heading }
///     fn load_timeout_ms(&self) -> Option<u64> { Some(10_000) }
/// }
/// ```
#[async_trait]
pub trait PageObject: Send + Sync {
    /// The page this object drives
    fn page(&self) -> &Page;

    /// Element whose visibility identifies the page
    fn anchor(&self) -> &Locator;

    /// Override for the expect timeout used by [`Self::is_loaded`]
    fn load_timeout_ms(&self) -> Option<u64> {
        None
    }

    /// Page name for logging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Wait until the anchor element is visible.
    ///
    /// # Errors
    ///
    /// Returns an assertion failure if the anchor does not appear in time.
    async fn is_loaded(&self) -> ProbeResult<()> {
        let check = expect(self.page(), self.anchor());
        let check = match self.load_timeout_ms() {
            Some(ms) => check.with_timeout(ms),
            None => check,
        };
        check.to_be_visible().await?;
        tracing::debug!(page = self.name(), "page loaded");
        Ok(())
    }
}

/// Shared actions page objects compose
#[derive(Debug, Clone)]
pub struct BasePage {
    page: Page,
}

impl BasePage {
    /// Wrap a page
    #[must_use]
    pub const fn new(page: Page) -> Self {
        Self { page }
    }

    /// The underlying page
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// Click a locator
    ///
    /// # Errors
    ///
    /// Returns error if the element never becomes actionable
    pub async fn click(&self, locator: &Locator) -> ProbeResult<()> {
        self.page.click(locator).await
    }

    /// Replace a field's value
    ///
    /// # Errors
    ///
    /// Returns error if the element never becomes editable
    pub async fn type_text(&self, locator: &Locator, value: &str) -> ProbeResult<()> {
        self.page.fill(locator, value).await
    }

    /// Navigate relative to the base URL (`"/"` for the root)
    ///
    /// # Errors
    ///
    /// Returns error if navigation fails
    pub async fn goto(&self, path: &str) -> ProbeResult<()> {
        self.page.goto(if path.is_empty() { "/" } else { path }).await
    }
}
