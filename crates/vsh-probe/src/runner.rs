//! Suite runner.
//!
//! Every test gets a fresh page from a [`PageFactory`], optionally primed
//! with a saved session. Up to `workers` tests run at once; records come
//! back in declaration order and are written to `results.json`.

use crate::browser::Browser;
use crate::config::SuiteConfig;
use crate::context::StorageState;
use crate::harness::{run_body, Expectation, TestCase, TestContext, TestStatus, TestSuite};
use crate::page::Page;
use crate::result::{ProbeError, ProbeResult};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Report file name inside the output directory
pub const RESULTS_FILE: &str = "results.json";

// =============================================================================
// PAGE FACTORY
// =============================================================================

/// Source of fresh, isolated pages
#[async_trait]
pub trait PageFactory: Send + Sync {
    /// Open a new page
    ///
    /// # Errors
    ///
    /// Returns error if no page can be created
    async fn new_page(&self) -> ProbeResult<Page>;
}

#[async_trait]
impl<F> PageFactory for F
where
    F: Fn() -> ProbeResult<Page> + Send + Sync,
{
    async fn new_page(&self) -> ProbeResult<Page> {
        self()
    }
}

/// Pages backed by one launched browser, one context per page
#[derive(Debug)]
pub struct BrowserPageFactory {
    browser: Browser,
    config: Arc<SuiteConfig>,
}

impl BrowserPageFactory {
    /// Launch a browser for `config`
    ///
    /// # Errors
    ///
    /// Returns error if the browser cannot be launched
    pub async fn launch(config: Arc<SuiteConfig>) -> ProbeResult<Self> {
        let browser = Browser::launch(config.to_driver_config()).await?;
        Ok(Self { browser, config })
    }

    /// Close the browser
    ///
    /// # Errors
    ///
    /// Returns error if the browser refuses to close
    pub async fn close(self) -> ProbeResult<()> {
        self.browser.close().await
    }
}

#[async_trait]
impl PageFactory for BrowserPageFactory {
    async fn new_page(&self) -> ProbeResult<Page> {
        self.browser
            .new_page(&self.config.base_url, self.config.timeouts())
            .await
    }
}

// =============================================================================
// REPORT
// =============================================================================

/// Outcome of one test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    /// Suite name
    pub suite: String,
    /// Test name
    pub title: String,
    /// Final status
    pub status: TestStatus,
    /// Wall time in milliseconds
    pub duration_ms: u64,
    /// Error message for failures and expected failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Reason given for `Fail`/`Skip` expectations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Screenshot captured after the test
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
}

impl TestRecord {
    /// `suite > test` title
    #[must_use]
    pub fn full_title(&self) -> String {
        format!("{} > {}", self.suite, self.title)
    }
}

/// Counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Tests considered
    pub total: usize,
    /// Passed
    pub passed: usize,
    /// Failed
    pub failed: usize,
    /// Skipped
    pub skipped: usize,
    /// Failed as expected
    pub expected_failures: usize,
}

/// Results of a whole run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique run identifier
    pub run_id: String,
    /// RFC 3339 start time
    pub started_at: String,
    /// Wall time in milliseconds
    pub duration_ms: u64,
    /// Status counts
    pub summary: Summary,
    /// Per-test records in declaration order
    pub records: Vec<TestRecord>,
}

impl RunReport {
    /// Build a report, computing the summary
    #[must_use]
    pub fn new(records: Vec<TestRecord>, started_at: String, duration: Duration) -> Self {
        let mut summary = Summary {
            total: records.len(),
            ..Summary::default()
        };
        for record in &records {
            match record.status {
                TestStatus::Passed => summary.passed += 1,
                TestStatus::Failed => summary.failed += 1,
                TestStatus::Skipped => summary.skipped += 1,
                TestStatus::ExpectedFailure => summary.expected_failures += 1,
            }
        }
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            started_at,
            duration_ms: millis(duration),
            summary,
            records,
        }
    }

    /// No test failed
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.summary.failed == 0
    }

    /// Failed records
    #[must_use]
    pub fn failures(&self) -> Vec<&TestRecord> {
        self.records
            .iter()
            .filter(|r| r.status.is_failure())
            .collect()
    }

    /// Write `results.json` into `dir`, returning its path
    ///
    /// # Errors
    ///
    /// Returns error if the directory or file cannot be written
    pub fn save(&self, dir: &Path) -> ProbeResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(RESULTS_FILE);
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }

    /// Read a saved report
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> ProbeResult<Self> {
        Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn artifact_name(title: &str) -> String {
    let mut name: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    while name.contains("--") {
        name = name.replace("--", "-");
    }
    format!("{}.png", name.trim_matches('-'))
}

// =============================================================================
// RUNNER
// =============================================================================

/// Callback invoked as each test finishes
pub type RecordObserver = Arc<dyn Fn(&TestRecord) + Send + Sync>;

/// Runs suites against pages from a [`PageFactory`]
#[derive(Clone)]
pub struct SuiteRunner {
    config: Arc<SuiteConfig>,
    factory: Arc<dyn PageFactory>,
    filter: Option<String>,
    observer: Option<RecordObserver>,
}

impl std::fmt::Debug for SuiteRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteRunner")
            .field("config", &self.config)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl SuiteRunner {
    /// Create a runner
    #[must_use]
    pub fn new(config: Arc<SuiteConfig>, factory: Arc<dyn PageFactory>) -> Self {
        Self {
            config,
            factory,
            filter: None,
            observer: None,
        }
    }

    /// Only run tests whose `suite > test` title or tags contain `pattern`
    /// (case-insensitive)
    #[must_use]
    pub fn with_filter(mut self, pattern: impl Into<String>) -> Self {
        self.filter = Some(pattern.into());
        self
    }

    /// Call `observer` as each test finishes
    #[must_use]
    pub fn with_observer(mut self, observer: RecordObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Tests selected by the filter, in declaration order
    #[must_use]
    pub fn selected<'s>(&self, suites: &'s [TestSuite]) -> Vec<(&'s TestSuite, &'s TestCase)> {
        select(suites, self.filter.as_deref())
    }

    /// Run every selected test and write the report
    ///
    /// # Errors
    ///
    /// Returns error only for runner problems (unreadable storage state,
    /// unwritable output directory); test failures are in the report.
    pub async fn run(&self, suites: &[TestSuite]) -> ProbeResult<RunReport> {
        let started_at = chrono::Utc::now().to_rfc3339();
        let start = Instant::now();
        let storage = match &self.config.storage_state {
            Some(path) => Some(StorageState::load(path)?),
            None => None,
        };
        std::fs::create_dir_all(&self.config.output_dir)?;

        let selected = self.selected(suites);
        tracing::info!(
            tests = selected.len(),
            workers = self.config.workers,
            "starting run"
        );

        let storage = storage.as_ref();
        let mut indexed: Vec<(usize, TestRecord)> = stream::iter(selected.into_iter().enumerate())
            .map(|(index, (suite, case))| async move {
                let record = self.run_test(suite, case, storage).await;
                if let Some(observer) = &self.observer {
                    observer(&record);
                }
                (index, record)
            })
            .buffer_unordered(self.config.workers.max(1))
            .collect()
            .await;
        indexed.sort_by_key(|(index, _)| *index);

        let records = indexed.into_iter().map(|(_, record)| record).collect();
        let report = RunReport::new(records, started_at, start.elapsed());
        let path = report.save(&self.config.output_dir)?;
        tracing::info!(
            passed = report.summary.passed,
            failed = report.summary.failed,
            skipped = report.summary.skipped,
            expected_failures = report.summary.expected_failures,
            report = %path.display(),
            "run finished"
        );
        Ok(report)
    }

    async fn open_page(&self, storage: Option<&StorageState>) -> ProbeResult<Page> {
        let page = self.factory.new_page().await?;
        if let Some(state) = storage {
            page.apply_storage_state(state).await?;
        }
        Ok(page)
    }

    async fn run_test(
        &self,
        suite: &TestSuite,
        case: &TestCase,
        storage: Option<&StorageState>,
    ) -> TestRecord {
        let title = suite.title_of(case);
        let mut record = TestRecord {
            suite: suite.name.clone(),
            title: case.name.clone(),
            status: TestStatus::Skipped,
            duration_ms: 0,
            error: None,
            note: case.expectation.reason().map(str::to_string),
            artifact: None,
        };
        if matches!(case.expectation, Expectation::Skip { .. }) {
            tracing::info!(test = %title, "skipped");
            return record;
        }

        let start = Instant::now();
        let page = match self.open_page(storage).await {
            Ok(page) => page,
            Err(err) => {
                tracing::error!(test = %title, error = %err, "cannot open page");
                record.status = TestStatus::Failed;
                record.error = Some(err.to_string());
                return record;
            }
        };

        let ctx = TestContext::new(page, Arc::clone(&self.config), title.clone());
        let timeout_ms = case.timeout_ms.unwrap_or(self.config.test_timeout_ms);
        let outcome = tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            run_body(&ctx, suite.before_each, case.body),
        )
        .await
        .unwrap_or_else(|_| Err(ProbeError::timeout(format!("test '{title}'"), timeout_ms)));

        let expectation = ctx.effective_expectation(&case.expectation);
        let (status, error) = expectation.judge(&outcome);
        record.note = expectation.reason().map(str::to_string);
        if self.config.screenshot.should_capture(status.is_failure()) {
            record.artifact = self.capture(&ctx.page, &title).await;
        }
        if let Err(err) = ctx.page.close().await {
            tracing::warn!(test = %title, error = %err, "page did not close cleanly");
        }

        record.status = status;
        record.error = error;
        record.duration_ms = millis(start.elapsed());
        match status {
            TestStatus::Failed => tracing::error!(
                test = %title,
                error = record.error.as_deref().unwrap_or_default(),
                "failed"
            ),
            _ => tracing::info!(test = %title, %status, duration_ms = record.duration_ms, "finished"),
        }
        record
    }

    async fn capture(&self, page: &Page, title: &str) -> Option<PathBuf> {
        let path = self.config.output_dir.join(artifact_name(title));
        let saved = match page.screenshot().await {
            Ok(shot) => shot.save(&path),
            Err(err) => Err(err),
        };
        match saved {
            Ok(()) => Some(path),
            Err(err) => {
                tracing::warn!(test = %title, error = %err, "screenshot failed");
                None
            }
        }
    }
}

/// Tests matching `filter`, in declaration order
#[must_use]
pub fn select<'s>(suites: &'s [TestSuite], filter: Option<&str>) -> Vec<(&'s TestSuite, &'s TestCase)> {
    let needle = filter.map(str::to_lowercase);
    suites
        .iter()
        .flat_map(|suite| suite.tests.iter().map(move |case| (suite, case)))
        .filter(|(suite, case)| {
            needle.as_deref().map_or(true, |needle| {
                suite.title_of(case).to_lowercase().contains(needle)
                    || case.tags.iter().any(|t| t.to_lowercase().contains(needle))
            })
        })
        .collect()
}
