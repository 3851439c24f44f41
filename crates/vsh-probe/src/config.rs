//! Suite configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! environment variables. Credentials come from the environment in practice
//! and are never printed.

use crate::driver::DriverConfig;
use crate::page::{
    Timeouts, DEFAULT_ACTION_TIMEOUT_MS, DEFAULT_EXPECT_TIMEOUT_MS, DEFAULT_NAVIGATION_TIMEOUT_MS,
};
use crate::result::{ProbeError, ProbeResult};
use crate::wait::DEFAULT_POLL_INTERVAL_MS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default per-test timeout (2 minutes)
pub const DEFAULT_TEST_TIMEOUT_MS: u64 = 120_000;

/// User agent of the "Desktop Chrome" device profile
pub const DESKTOP_CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// When to capture a screenshot of the page after a test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenshotMode {
    /// Never
    Off,
    /// Only when the test failed
    #[default]
    OnlyOnFailure,
    /// After every test
    On,
}

impl ScreenshotMode {
    /// Whether a test with this outcome gets a screenshot
    #[must_use]
    pub const fn should_capture(self, failed: bool) -> bool {
        match self {
            Self::Off => false,
            Self::OnlyOnFailure => failed,
            Self::On => true,
        }
    }
}

impl std::str::FromStr for ScreenshotMode {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "only-on-failure" => Ok(Self::OnlyOnFailure),
            "on" => Ok(Self::On),
            other => Err(ProbeError::config(format!(
                "unknown screenshot mode '{other}' (expected off, only-on-failure or on)"
            ))),
        }
    }
}

/// Browser viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels
    pub width: u32,
    /// Height in CSS pixels
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Configuration shared by every test in a run
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Application under test
    pub base_url: String,
    /// Identity-provider login
    pub username: String,
    /// Identity-provider password
    #[serde(skip_serializing)]
    pub password: String,
    /// Email shown for the signed-in user, when it differs from `username`
    pub user_email: Option<String>,
    /// Web-first assertion timeout
    pub expect_timeout_ms: u64,
    /// Actionability timeout for clicks, fills and hovers
    pub action_timeout_ms: u64,
    /// Whole-test timeout
    pub test_timeout_ms: u64,
    /// Navigation timeout
    pub navigation_timeout_ms: u64,
    /// Run the browser without a window
    pub headless: bool,
    /// Browser viewport
    pub viewport: Viewport,
    /// Browser user agent
    pub user_agent: String,
    /// Browser executable override
    pub chromium_path: Option<String>,
    /// Chromium sandbox (disable in containers)
    pub sandbox: bool,
    /// Tests run concurrently
    pub workers: usize,
    /// Screenshot capture policy
    pub screenshot: ScreenshotMode,
    /// Session to prime each page with
    pub storage_state: Option<PathBuf>,
    /// Directory for screenshots and `results.json`
    pub output_dir: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            user_email: None,
            expect_timeout_ms: DEFAULT_EXPECT_TIMEOUT_MS,
            action_timeout_ms: DEFAULT_ACTION_TIMEOUT_MS,
            test_timeout_ms: DEFAULT_TEST_TIMEOUT_MS,
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            headless: true,
            viewport: Viewport::default(),
            user_agent: DESKTOP_CHROME_USER_AGENT.to_string(),
            chromium_path: None,
            sandbox: true,
            workers: 1,
            screenshot: ScreenshotMode::default(),
            storage_state: None,
            output_dir: PathBuf::from("test-results"),
        }
    }
}

impl std::fmt::Debug for SuiteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("user_email", &self.user_email)
            .field("expect_timeout_ms", &self.expect_timeout_ms)
            .field("action_timeout_ms", &self.action_timeout_ms)
            .field("test_timeout_ms", &self.test_timeout_ms)
            .field("navigation_timeout_ms", &self.navigation_timeout_ms)
            .field("headless", &self.headless)
            .field("viewport", &self.viewport)
            .field("workers", &self.workers)
            .field("screenshot", &self.screenshot)
            .field("storage_state", &self.storage_state)
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}

impl SuiteConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, then `path` if given, then the process environment
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: Option<&Path>) -> ProbeResult<Self> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Parse a YAML file; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn from_yaml_file(path: &Path) -> ProbeResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            ProbeError::config(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_yaml(&text)
    }

    /// Parse YAML text
    ///
    /// # Errors
    ///
    /// Returns error if the text is not a valid configuration
    pub fn from_yaml(text: &str) -> ProbeResult<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Overlay environment variables read through `lookup`
    #[must_use]
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("VSH_BASE_URL").or_else(|| lookup("BASE_URL")) {
            self.base_url = url;
        }
        if let Some(username) = lookup("VSH_USERNAME") {
            self.username = username;
        }
        if let Some(password) = lookup("VSH_PASSWORD") {
            self.password = password;
        }
        if let Some(email) = lookup("USER_EMAIL") {
            self.user_email = Some(email);
        }
        if let Some(headless) = lookup("VSH_HEADLESS") {
            self.headless = !matches!(headless.as_str(), "0" | "false" | "no");
        }
        if let Some(workers) = lookup("VSH_WORKERS").and_then(|w| w.parse().ok()) {
            self.workers = workers;
        }
        if let Some(path) = lookup("CHROMIUM_PATH") {
            self.chromium_path = Some(path);
        }
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set credentials
    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set worker count
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the storage state file
    #[must_use]
    pub fn with_storage_state(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_state = Some(path.into());
        self
    }

    /// Email expected in the profile header
    #[must_use]
    pub fn profile_email(&self) -> &str {
        self.user_email.as_deref().unwrap_or(&self.username)
    }

    /// Reject unusable configurations
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Config`] naming the offending key
    pub fn validate(&self) -> ProbeResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ProbeError::config(
                "base_url is empty (set VSH_BASE_URL or base_url in the config file)",
            ));
        }
        for (key, value) in [
            ("expect_timeout_ms", self.expect_timeout_ms),
            ("action_timeout_ms", self.action_timeout_ms),
            ("test_timeout_ms", self.test_timeout_ms),
            ("navigation_timeout_ms", self.navigation_timeout_ms),
        ] {
            if value == 0 {
                return Err(ProbeError::config(format!("{key} must be greater than zero")));
            }
        }
        if self.workers == 0 {
            return Err(ProbeError::config("workers must be at least 1"));
        }
        Ok(())
    }

    /// Timeouts for pages created under this configuration
    #[must_use]
    pub const fn timeouts(&self) -> Timeouts {
        Timeouts {
            action_ms: self.action_timeout_ms,
            expect_ms: self.expect_timeout_ms,
            navigation_ms: self.navigation_timeout_ms,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Browser launch settings
    #[must_use]
    pub fn to_driver_config(&self) -> DriverConfig {
        let mut config = DriverConfig::new()
            .headless(self.headless)
            .viewport(self.viewport.width, self.viewport.height)
            .user_agent(&self.user_agent)
            .navigation_timeout(Duration::from_millis(self.navigation_timeout_ms));
        if let Some(path) = &self.chromium_path {
            config = config.executable_path(path);
        }
        if !self.sandbox {
            config = config.no_sandbox();
        }
        config
    }
}
