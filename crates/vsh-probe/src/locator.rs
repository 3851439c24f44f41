//! Locator abstraction for element selection.
//!
//! A [`Locator`] is an ordered chain of [`Selector`] steps. Each step is
//! applied to every element matched by the previous step, so
//! `page.get_by_text_exact("IHC").locator("xpath=../..")` walks from the
//! text node's element up two levels.
//!
//! # Design
//!
//! - **Pure values**: building a locator never touches the browser. Page
//!   objects construct them once and hand them to [`crate::Page`].
//! - **Canonical rendering**: `Display` produces a Playwright-like selector
//!   string (`role=button[name="Sign In"i] >> nth=1`) used in error messages
//!   and as the lookup key of [`crate::MockDriver`].
//! - **Serializable**: the step list is serialized to JSON and consumed by
//!   the in-page resolver script.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

/// Separator between chained selector steps
pub const CHAIN_SEPARATOR: &str = " >> ";

/// How a piece of text is matched against element content.
///
/// Matching always normalizes whitespace first (runs collapse to a single
/// space, ends trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TextMatch {
    /// Case-insensitive substring
    Contains {
        /// Needle
        value: String,
    },
    /// Case-sensitive full-text equality
    Exact {
        /// Expected text
        value: String,
    },
    /// Regular expression search
    Regex {
        /// Pattern source
        value: String,
        /// `i` flag
        case_insensitive: bool,
    },
}

impl TextMatch {
    /// Substring match
    #[must_use]
    pub fn contains(value: impl Into<String>) -> Self {
        Self::Contains {
            value: value.into(),
        }
    }

    /// Exact match
    #[must_use]
    pub fn exact(value: impl Into<String>) -> Self {
        Self::Exact {
            value: value.into(),
        }
    }

    /// Regex match
    #[must_use]
    pub fn regex(value: impl Into<String>, case_insensitive: bool) -> Self {
        Self::Regex {
            value: value.into(),
            case_insensitive,
        }
    }

    /// Build a substring or exact match from a Playwright-style `exact` flag
    #[must_use]
    pub fn with_exact(value: impl Into<String>, exact: bool) -> Self {
        if exact {
            Self::exact(value)
        } else {
            Self::contains(value)
        }
    }

    /// Test a piece of element text against this matcher
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        let text = normalize_whitespace(text);
        match self {
            Self::Contains { value } => text
                .to_lowercase()
                .contains(&normalize_whitespace(value).to_lowercase()),
            Self::Exact { value } => text == normalize_whitespace(value),
            Self::Regex {
                value,
                case_insensitive,
            } => RegexBuilder::new(value)
                .case_insensitive(*case_insensitive)
                .build()
                .is_ok_and(|re| re.is_match(&text)),
        }
    }

    /// The raw value or pattern
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Contains { value } | Self::Exact { value } | Self::Regex { value, .. } => value,
        }
    }
}

impl From<&str> for TextMatch {
    fn from(value: &str) -> Self {
        Self::exact(value)
    }
}

impl From<String> for TextMatch {
    fn from(value: String) -> Self {
        Self::exact(value)
    }
}

impl fmt::Display for TextMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains { value } => write!(f, "{value:?}i"),
            Self::Exact { value } => write!(f, "{value:?}s"),
            Self::Regex {
                value,
                case_insensitive,
            } => {
                write!(f, "/{value}/")?;
                if *case_insensitive {
                    write!(f, "i")?;
                }
                Ok(())
            }
        }
    }
}

/// Collapse whitespace runs and trim, the way rendered text is compared
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// ARIA roles the suite queries by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AriaRole {
    /// `<button>` or `role="button"`
    Button,
    /// `<h1>`..`<h6>` or `role="heading"`
    Heading,
    /// `<a href>` or `role="link"`
    Link,
    /// `role="tab"`
    Tab,
    /// Text inputs and textareas
    Textbox,
    /// `<select>` or `role="combobox"`
    Combobox,
    /// `<option>` or `role="option"`
    Option,
    /// `role="switch"`
    Switch,
    /// `<img alt>`
    Img,
    /// `<input type=checkbox>`
    Checkbox,
    /// `<dialog>` or `role="dialog"`
    Dialog,
}

impl AriaRole {
    /// Role name as used in `role="..."`
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Heading => "heading",
            Self::Link => "link",
            Self::Tab => "tab",
            Self::Textbox => "textbox",
            Self::Combobox => "combobox",
            Self::Option => "option",
            Self::Switch => "switch",
            Self::Img => "img",
            Self::Checkbox => "checkbox",
            Self::Dialog => "dialog",
        }
    }
}

impl fmt::Display for AriaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single step of a locator chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selector {
    /// CSS selector (e.g. `input#username`)
    Css {
        /// Selector source
        css: String,
    },
    /// CSS selector whose matches must contain text (`:has-text(...)`)
    HasText {
        /// Base CSS selector
        css: String,
        /// Text filter
        text: TextMatch,
    },
    /// XPath expression, evaluated relative to each current match
    #[serde(rename = "xpath")]
    XPath {
        /// Expression source
        xpath: String,
    },
    /// Smallest element whose rendered text matches
    Text {
        /// Text matcher
        text: TextMatch,
    },
    /// ARIA role with an optional accessible name
    Role {
        /// Role
        role: AriaRole,
        /// Accessible name filter
        name: Option<TextMatch>,
    },
    /// Form control by label text
    Label {
        /// Label matcher
        text: TextMatch,
    },
    /// `data-testid` attribute
    TestId {
        /// Test id value
        id: String,
    },
    /// Input placeholder text
    Placeholder {
        /// Placeholder matcher
        text: TextMatch,
    },
    /// Pick one match by index (negative counts from the end)
    Nth {
        /// Index
        index: i32,
    },
    /// Keep matches whose text matches
    Filter {
        /// Text matcher
        has_text: TextMatch,
    },
}

fn has_text_pattern() -> Option<&'static regex::Regex> {
    static PATTERN: OnceLock<Option<regex::Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            regex::Regex::new(r#"^(?s)(.*?):has-text\((?:"([^"]*)"|'([^']*)')\)$"#).ok()
        })
        .as_ref()
}

impl Selector {
    /// Create a CSS step
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css {
            css: selector.into(),
        }
    }

    /// Create an XPath step
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath { xpath: expr.into() }
    }

    /// Create a test id step
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId { id: id.into() }
    }

    /// Parse one Playwright selector segment.
    ///
    /// Understands the `xpath=`, `text=` and `css=` engine prefixes and a
    /// trailing `:has-text("...")` pseudo-class, which `querySelectorAll`
    /// cannot evaluate on its own.
    #[must_use]
    pub fn parse(segment: &str) -> Self {
        let segment = segment.trim();
        if let Some(expr) = segment.strip_prefix("xpath=") {
            return Self::xpath(expr);
        }
        if segment.starts_with("//") || segment.starts_with("..") {
            return Self::xpath(segment);
        }
        if let Some(text) = segment.strip_prefix("text=") {
            let text = text.trim();
            let quoted = text
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .or_else(|| text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')));
            return match quoted {
                Some(exact) => Self::Text {
                    text: TextMatch::exact(exact),
                },
                None => Self::Text {
                    text: TextMatch::contains(text),
                },
            };
        }
        let css = segment.strip_prefix("css=").unwrap_or(segment);
        if let Some(caps) = has_text_pattern().and_then(|re| re.captures(css)) {
            let base = caps.get(1).map_or("", |m| m.as_str()).trim();
            let text = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map_or("", |m| m.as_str());
            return Self::HasText {
                css: if base.is_empty() { "*" } else { base }.to_string(),
                text: TextMatch::contains(text),
            };
        }
        Self::css(css)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css { css } => f.write_str(css),
            Self::HasText { css, text } => write!(f, "{css}:has-text({:?})", text.value()),
            Self::XPath { xpath } => write!(f, "xpath={xpath}"),
            Self::Text { text } => write!(f, "text={text}"),
            Self::Role { role, name: None } => write!(f, "role={role}"),
            Self::Role {
                role,
                name: Some(name),
            } => write!(f, "role={role}[name={name}]"),
            Self::Label { text } => write!(f, "internal:label={text}"),
            Self::TestId { id } => write!(f, "internal:testid=[data-testid={id:?}s]"),
            Self::Placeholder { text } => write!(f, "internal:attr=[placeholder={text}]"),
            Self::Nth { index } => write!(f, "nth={index}"),
            Self::Filter { has_text } => write!(f, "internal:has-text={has_text}"),
        }
    }
}

/// A chain of selector steps plus an optional per-locator timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    steps: Vec<Selector>,
    timeout: Option<Duration>,
}

impl Locator {
    /// Create a locator from a Playwright selector string.
    ///
    /// `" >> "` separates chained segments.
    #[must_use]
    pub fn new(selector: &str) -> Self {
        Self {
            steps: selector.split(CHAIN_SEPARATOR).map(Selector::parse).collect(),
            timeout: None,
        }
    }

    /// Create a locator from a single step
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            steps: vec![selector],
            timeout: None,
        }
    }

    /// CSS (or engine-prefixed) locator
    #[must_use]
    pub fn css(selector: &str) -> Self {
        Self::new(selector)
    }

    /// Locate by ARIA role and accessible-name substring
    #[must_use]
    pub fn role(role: AriaRole, name: &str) -> Self {
        Self::from_selector(Selector::Role {
            role,
            name: Some(TextMatch::contains(name)),
        })
    }

    /// Locate by ARIA role and exact accessible name
    #[must_use]
    pub fn role_exact(role: AriaRole, name: &str) -> Self {
        Self::from_selector(Selector::Role {
            role,
            name: Some(TextMatch::exact(name)),
        })
    }

    /// Locate by text substring
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self::from_selector(Selector::Text {
            text: TextMatch::contains(text),
        })
    }

    /// Locate by exact text
    #[must_use]
    pub fn text_exact(text: &str) -> Self {
        Self::from_selector(Selector::Text {
            text: TextMatch::exact(text),
        })
    }

    fn push(mut self, step: Selector) -> Self {
        self.steps.push(step);
        self
    }

    /// Chain a selector string scoped to the current matches
    #[must_use]
    pub fn locator(self, selector: &str) -> Self {
        let mut out = self;
        for segment in selector.split(CHAIN_SEPARATOR) {
            out = out.push(Selector::parse(segment));
        }
        out
    }

    /// Chain a CSS step filtered by contained text (`{ hasText }` option)
    #[must_use]
    pub fn locator_with_text(self, css: &str, text: &str) -> Self {
        self.push(Selector::HasText {
            css: css.to_string(),
            text: TextMatch::contains(text),
        })
    }

    /// Chain a text step
    #[must_use]
    pub fn get_by_text(self, text: TextMatch) -> Self {
        self.push(Selector::Text { text })
    }

    /// Chain a role step
    #[must_use]
    pub fn get_by_role(self, role: AriaRole, name: Option<TextMatch>) -> Self {
        self.push(Selector::Role { role, name })
    }

    /// Chain a test id step
    #[must_use]
    pub fn get_by_test_id(self, id: &str) -> Self {
        self.push(Selector::test_id(id))
    }

    /// Pick the match at `index` (negative counts from the end)
    #[must_use]
    pub fn nth(self, index: i32) -> Self {
        self.push(Selector::Nth { index })
    }

    /// First match
    #[must_use]
    pub fn first(self) -> Self {
        self.nth(0)
    }

    /// Last match
    #[must_use]
    pub fn last(self) -> Self {
        self.nth(-1)
    }

    /// Keep matches containing `text`
    #[must_use]
    pub fn filter_has_text(self, text: TextMatch) -> Self {
        self.push(Selector::Filter { has_text: text })
    }

    /// Override the wait timeout for actions and expectations on this locator
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The per-locator timeout, if any
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The selector steps
    #[must_use]
    pub fn steps(&self) -> &[Selector] {
        &self.steps
    }

    /// Serialize the steps for the in-page resolver
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.steps)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(CHAIN_SEPARATOR)?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// Bounding box for an element, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Centre point
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the box has a visible area
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}
