//! Web-first assertions.
//!
//! `expect(&page, &locator).to_be_visible().await?` re-queries the page
//! until the condition holds or the expect timeout elapses, so specs never
//! sleep before asserting. Single-element assertions are strict: a locator
//! that matches several elements fails immediately.

use crate::driver::ElementSnapshot;
use crate::locator::{normalize_whitespace, Locator};
use crate::page::Page;
use crate::result::{ProbeError, ProbeResult};
use std::fmt::Debug;
use std::time::{Duration, Instant};

/// Assertion builder for a locator (Playwright's `expect()`)
#[derive(Debug, Clone)]
pub struct Expect<'a> {
    page: &'a Page,
    locator: &'a Locator,
    negated: bool,
    timeout_ms: Option<u64>,
}

/// Create an expectation for a locator on `page`
#[must_use]
pub fn expect<'a>(page: &'a Page, locator: &'a Locator) -> Expect<'a> {
    Expect {
        page,
        locator,
        negated: false,
        timeout_ms: None,
    }
}

fn single<'s>(
    locator: &Locator,
    matches: &'s [ElementSnapshot],
) -> ProbeResult<Option<&'s ElementSnapshot>> {
    match matches {
        [] => Ok(None),
        [el] => Ok(Some(el)),
        many => Err(ProbeError::StrictModeViolation {
            locator: locator.to_string(),
            count: many.len(),
        }),
    }
}

impl Expect<'_> {
    /// Negate the assertion
    #[must_use]
    pub const fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Override the timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout_ms
            .or_else(|| self.locator.timeout().map(|t| t.as_millis() as u64))
            .unwrap_or(self.page.timeouts().expect_ms)
    }

    /// Poll until `check` reports the expected outcome.
    ///
    /// `check` returns whether the positive condition holds plus a rendering
    /// of what was observed, used in the failure message.
    async fn satisfy<F>(&self, expectation: &str, check: F) -> ProbeResult<()>
    where
        F: Fn(&[ElementSnapshot]) -> ProbeResult<(bool, String)>,
    {
        let timeout_ms = self.timeout_ms();
        let poll = Duration::from_millis(self.page.timeouts().poll_interval_ms);
        let start = Instant::now();
        loop {
            let matches = self.page.query_all(self.locator).await?;
            let (holds, observed) = check(&matches)?;
            if holds != self.negated {
                return Ok(());
            }
            if start.elapsed() >= Duration::from_millis(timeout_ms) {
                let not = if self.negated { "not." } else { "" };
                tracing::debug!(locator = %self.locator, expectation, %observed, "expectation failed");
                return Err(ProbeError::assertion(format!(
                    "expect({}).{not}{expectation} failed after {timeout_ms}ms; received: {observed}",
                    self.locator
                )));
            }
            tokio::time::sleep(poll).await;
        }
    }

    fn visibility(&self, matches: &[ElementSnapshot]) -> ProbeResult<(bool, String)> {
        Ok(match single(self.locator, matches)? {
            None => (false, "<no element>".to_string()),
            Some(el) if el.visible => (true, "visible".to_string()),
            Some(_) => (false, "hidden".to_string()),
        })
    }

    /// The single match is visible
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] on timeout
    pub async fn to_be_visible(&self) -> ProbeResult<()> {
        self.satisfy("to_be_visible()", |m| self.visibility(m)).await
    }

    /// There is no visible match (a missing element counts as hidden)
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] on timeout
    pub async fn to_be_hidden(&self) -> ProbeResult<()> {
        self.satisfy("to_be_hidden()", |m| {
            let (visible, observed) = self.visibility(m)?;
            Ok((!visible, observed))
        })
        .await
    }

    /// The single match is enabled
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] on timeout
    pub async fn to_be_enabled(&self) -> ProbeResult<()> {
        self.satisfy("to_be_enabled()", |m| {
            Ok(match single(self.locator, m)? {
                None => (false, "<no element>".to_string()),
                Some(el) => (el.enabled, if el.enabled { "enabled" } else { "disabled" }.to_string()),
            })
        })
        .await
    }

    /// The single match is disabled
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] on timeout
    pub async fn to_be_disabled(&self) -> ProbeResult<()> {
        self.satisfy("to_be_disabled()", |m| {
            Ok(match single(self.locator, m)? {
                None => (false, "<no element>".to_string()),
                Some(el) => (!el.enabled, if el.enabled { "enabled" } else { "disabled" }.to_string()),
            })
        })
        .await
    }

    /// The single match's text equals `expected` (whitespace-normalized)
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] on timeout
    pub async fn to_have_text(&self, expected: &str) -> ProbeResult<()> {
        let expected = normalize_whitespace(expected);
        self.satisfy(&format!("to_have_text({expected:?})"), |m| {
            Ok(match single(self.locator, m)? {
                None => (false, "<no element>".to_string()),
                Some(el) => {
                    let actual = normalize_whitespace(el.rendered_text());
                    (actual == expected, format!("{actual:?}"))
                }
            })
        })
        .await
    }

    /// The single match's text contains `expected`
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] on timeout
    pub async fn to_contain_text(&self, expected: &str) -> ProbeResult<()> {
        let expected = normalize_whitespace(expected);
        self.satisfy(&format!("to_contain_text({expected:?})"), |m| {
            Ok(match single(self.locator, m)? {
                None => (false, "<no element>".to_string()),
                Some(el) => {
                    let actual = normalize_whitespace(el.rendered_text());
                    (actual.contains(&expected), format!("{actual:?}"))
                }
            })
        })
        .await
    }

    /// The single match has attribute `name` equal to `value`
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] on timeout
    pub async fn to_have_attribute(&self, name: &str, value: &str) -> ProbeResult<()> {
        self.satisfy(&format!("to_have_attribute({name:?}, {value:?})"), |m| {
            Ok(match single(self.locator, m)? {
                None => (false, "<no element>".to_string()),
                Some(el) => match el.attribute(name) {
                    Some(actual) => (actual == value, format!("{actual:?}")),
                    None => (false, format!("<no {name} attribute>")),
                },
            })
        })
        .await
    }

    /// The locator matches exactly `expected` elements
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] on timeout
    pub async fn to_have_count(&self, expected: usize) -> ProbeResult<()> {
        self.satisfy(&format!("to_have_count({expected})"), |m| {
            Ok((m.len() == expected, m.len().to_string()))
        })
        .await
    }
}

/// Assertion on a plain value
#[derive(Debug, Clone)]
pub struct ValueExpect<T> {
    actual: T,
    negated: bool,
}

/// Create an expectation on a plain value
#[must_use]
pub const fn expect_value<T>(actual: T) -> ValueExpect<T> {
    ValueExpect {
        actual,
        negated: false,
    }
}

impl<T: Debug> ValueExpect<T> {
    /// Negate the assertion
    #[must_use]
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    fn verdict(&self, holds: bool, expectation: String) -> ProbeResult<()> {
        if holds == self.negated {
            let not = if self.negated { "not." } else { "" };
            Err(ProbeError::assertion(format!(
                "expect({:?}).{not}{expectation} failed",
                self.actual
            )))
        } else {
            Ok(())
        }
    }

    /// Equality
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] when the values differ
    pub fn to_be<U>(&self, expected: U) -> ProbeResult<()>
    where
        T: PartialEq<U>,
        U: Debug,
    {
        self.verdict(self.actual == expected, format!("to_be({expected:?})"))
    }

    /// Strictly greater
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] when not greater
    pub fn to_be_greater_than<U>(&self, bound: U) -> ProbeResult<()>
    where
        T: PartialOrd<U>,
        U: Debug,
    {
        self.verdict(self.actual > bound, format!("to_be_greater_than({bound:?})"))
    }
}
