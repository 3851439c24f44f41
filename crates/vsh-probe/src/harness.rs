//! Test suite definitions.
//!
//! A [`TestSuite`] is a named list of [`TestCase`]s plus an optional
//! `before_each` hook. Bodies are plain `fn` items taking a [`TestContext`]
//! so suites can be declared as data and listed without a browser.

use crate::config::SuiteConfig;
use crate::page::Page;
use crate::result::{ProbeError, ProbeResult};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Future returned by test bodies and hooks
pub type TestFuture<'a> = BoxFuture<'a, ProbeResult<()>>;

/// Test body or hook
pub type TestFn = for<'a> fn(&'a TestContext) -> TestFuture<'a>;

/// Everything a test body gets
#[derive(Debug, Clone)]
pub struct TestContext {
    /// Fresh page for this test
    pub page: Page,
    /// Run configuration
    pub config: Arc<SuiteConfig>,
    /// `suite > test` title
    pub title: String,
    progress: Arc<Mutex<Progress>>,
}

/// What a running test has reached so far
#[derive(Debug, Default)]
struct Progress {
    body_started: bool,
    marked_failure: Option<String>,
}

impl TestContext {
    /// Context for one test run
    #[must_use]
    pub fn new(page: Page, config: Arc<SuiteConfig>, title: impl Into<String>) -> Self {
        Self {
            page,
            config,
            title: title.into(),
            progress: Arc::new(Mutex::new(Progress::default())),
        }
    }

    fn progress(&self) -> MutexGuard<'_, Progress> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Expect the rest of the test to fail.
    ///
    /// Checks that already ran keep their normal meaning: a failure before
    /// this call fails the test. After it, a failure is reported as an
    /// expected failure and a clean finish as a failure.
    pub fn mark_expected_failure(&self, reason: impl Into<String>) {
        self.progress().marked_failure = Some(reason.into());
    }

    /// Reason given to [`Self::mark_expected_failure`], if it was called
    #[must_use]
    pub fn marked_failure(&self) -> Option<String> {
        self.progress().marked_failure.clone()
    }

    /// Whether `before_each` finished and the body was entered
    #[must_use]
    pub fn body_started(&self) -> bool {
        self.progress().body_started
    }

    /// Expectation to judge the outcome against.
    ///
    /// A failure marked at run time overrides `declared`. A declared
    /// `Fail` only covers the body, so a test whose `before_each` failed
    /// is judged as `Pass`.
    #[must_use]
    pub fn effective_expectation(&self, declared: &Expectation) -> Expectation {
        let progress = self.progress();
        match (&progress.marked_failure, declared) {
            (Some(reason), _) => Expectation::Fail {
                reason: reason.clone(),
            },
            (None, Expectation::Fail { .. }) if !progress.body_started => Expectation::Pass,
            (None, _) => declared.clone(),
        }
    }
}

/// What the author expects a test to do
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expectation {
    /// The body should succeed
    #[default]
    Pass,
    /// The body is known to fail; success is reported as a failure
    Fail {
        /// Why the failure is expected
        reason: String,
    },
    /// Do not run the body
    Skip {
        /// Why the test is skipped
        reason: String,
    },
}

/// Final status of one test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    /// Body succeeded as expected
    Passed,
    /// Body failed, or an expected failure passed
    Failed,
    /// Body not run
    Skipped,
    /// Body failed as expected
    ExpectedFailure,
}

impl TestStatus {
    /// Whether this status fails the run
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::ExpectedFailure => "expected failure",
        };
        f.write_str(s)
    }
}

impl Expectation {
    /// Combine the body's outcome with the expectation.
    ///
    /// Returns the status plus the error to report, if any.
    #[must_use]
    pub fn judge(&self, outcome: &ProbeResult<()>) -> (TestStatus, Option<String>) {
        match (self, outcome) {
            (Self::Skip { .. }, _) => (TestStatus::Skipped, None),
            (Self::Pass, Ok(())) => (TestStatus::Passed, None),
            (Self::Pass, Err(err)) => (TestStatus::Failed, Some(err.to_string())),
            (Self::Fail { .. }, Err(err)) => (TestStatus::ExpectedFailure, Some(err.to_string())),
            (Self::Fail { reason }, Ok(())) => (
                TestStatus::Failed,
                Some(format!("expected to fail but passed ({reason})")),
            ),
        }
    }

    /// Reason attached to a `Fail` or `Skip`
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Pass => None,
            Self::Fail { reason } | Self::Skip { reason } => Some(reason),
        }
    }
}

/// A single test case
#[derive(Clone)]
pub struct TestCase {
    /// Test name
    pub name: String,
    /// Test body
    pub body: TestFn,
    /// Expected outcome
    pub expectation: Expectation,
    /// Override for the run's test timeout
    pub timeout_ms: Option<u64>,
    /// Free-form tags, matched by filters
    pub tags: Vec<String>,
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("expectation", &self.expectation)
            .field("timeout_ms", &self.timeout_ms)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

impl TestCase {
    /// Create a new test case
    #[must_use]
    pub fn new(name: impl Into<String>, body: TestFn) -> Self {
        Self {
            name: name.into(),
            body,
            expectation: Expectation::Pass,
            timeout_ms: None,
            tags: Vec::new(),
        }
    }

    /// Mark as expected to fail
    #[must_use]
    pub fn expect_failure(mut self, reason: impl Into<String>) -> Self {
        self.expectation = Expectation::Fail {
            reason: reason.into(),
        };
        self
    }

    /// Mark as skipped
    #[must_use]
    pub fn skip(mut self, reason: impl Into<String>) -> Self {
        self.expectation = Expectation::Skip {
            reason: reason.into(),
        };
        self
    }

    /// Set timeout
    #[must_use]
    pub const fn with_timeout(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    /// Add a tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// A test suite containing multiple tests
#[derive(Clone)]
pub struct TestSuite {
    /// Suite name
    pub name: String,
    /// Runs before every test body, on the same page
    pub before_each: Option<TestFn>,
    /// Tests in this suite
    pub tests: Vec<TestCase>,
}

impl std::fmt::Debug for TestSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestSuite")
            .field("name", &self.name)
            .field("before_each", &self.before_each.is_some())
            .field("tests", &self.tests)
            .finish()
    }
}

impl TestSuite {
    /// Create a new test suite
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            before_each: None,
            tests: Vec::new(),
        }
    }

    /// Set the `before_each` hook
    #[must_use]
    pub fn with_before_each(mut self, hook: TestFn) -> Self {
        self.before_each = Some(hook);
        self
    }

    /// Append a test
    #[must_use]
    pub fn test(mut self, test: TestCase) -> Self {
        self.tests.push(test);
        self
    }

    /// Add a test case
    pub fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    /// Get the number of tests
    #[must_use]
    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    /// `suite > test` title
    #[must_use]
    pub fn title_of(&self, test: &TestCase) -> String {
        format!("{} > {}", self.name, test.name)
    }
}

/// Run `hook` (if any) then `body` on one context
///
/// # Errors
///
/// Returns the first error from the hook or the body
pub async fn run_body(
    ctx: &TestContext,
    before_each: Option<TestFn>,
    body: TestFn,
) -> ProbeResult<()> {
    if let Some(hook) = before_each {
        hook(ctx).await.map_err(|err| match err {
            ProbeError::AssertionFailed { message } => {
                ProbeError::assertion(format!("before_each: {message}"))
            }
            other => other,
        })?;
    }
    ctx.progress().body_started = true;
    body(ctx).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;

    fn ok_body(_ctx: &TestContext) -> TestFuture<'_> {
        Box::pin(async { Ok(()) })
    }

    fn failing_body(_ctx: &TestContext) -> TestFuture<'_> {
        Box::pin(async { Err(ProbeError::assertion("expect(10).to_be(20) failed")) })
    }

    fn visit_root(ctx: &TestContext) -> TestFuture<'_> {
        Box::pin(async move { ctx.page.goto("/").await })
    }

    fn needs_visit(ctx: &TestContext) -> TestFuture<'_> {
        Box::pin(async move {
            let url = ctx.page.url().await?;
            if url == "https://hub.test/" {
                Ok(())
            } else {
                Err(ProbeError::assertion(format!("unexpected url {url}")))
            }
        })
    }

    fn context() -> TestContext {
        TestContext::new(
            Page::new(Arc::new(MockDriver::new())).with_base_url("https://hub.test"),
            Arc::new(SuiteConfig::default()),
            "suite > test",
        )
    }

    fn marks_then_fails(ctx: &TestContext) -> TestFuture<'_> {
        Box::pin(async move {
            ctx.mark_expected_failure("demo");
            Err(ProbeError::assertion("expect(10).to_be(20) failed"))
        })
    }

    mod expectation_tests {
        use super::*;

        #[test]
        fn test_pass() {
            let (status, error) = Expectation::Pass.judge(&Ok(()));
            assert_eq!(status, TestStatus::Passed);
            assert!(error.is_none());
        }

        #[test]
        fn test_pass_failing() {
            let (status, error) = Expectation::Pass.judge(&Err(ProbeError::assertion("x")));
            assert_eq!(status, TestStatus::Failed);
            assert!(error.unwrap().contains('x'));
        }

        #[test]
        fn test_expected_failure() {
            let e = Expectation::Fail {
                reason: "known issue".into(),
            };
            let (status, _) = e.judge(&Err(ProbeError::assertion("x")));
            assert_eq!(status, TestStatus::ExpectedFailure);
            assert!(!status.is_failure());
        }

        #[test]
        fn test_expected_failure_that_passes() {
            let e = Expectation::Fail {
                reason: "known issue".into(),
            };
            let (status, error) = e.judge(&Ok(()));
            assert_eq!(status, TestStatus::Failed);
            assert!(error.unwrap().contains("expected to fail but passed"));
        }

        #[test]
        fn test_skip() {
            let e = Expectation::Skip { reason: "wip".into() };
            assert_eq!(e.judge(&Ok(())).0, TestStatus::Skipped);
            assert_eq!(e.reason(), Some("wip"));
        }

        #[test]
        fn test_status_display() {
            assert_eq!(TestStatus::ExpectedFailure.to_string(), "expected failure");
        }
    }

    mod suite_tests {
        use super::*;

        #[test]
        fn test_builder() {
            let suite = TestSuite::new("Dashboard")
                .test(TestCase::new("loads", ok_body))
                .test(TestCase::new("demo", failing_body).expect_failure("demo").with_tag("demo"));
            assert_eq!(suite.test_count(), 2);
            assert_eq!(suite.title_of(&suite.tests[1]), "Dashboard > demo");
            assert_eq!(suite.tests[1].tags, vec!["demo".to_string()]);
            assert!(matches!(suite.tests[1].expectation, Expectation::Fail { .. }));
        }

        #[test]
        fn test_debug_omits_fn_pointers() {
            let suite = TestSuite::new("s").with_before_each(ok_body);
            let printed = format!("{suite:?}");
            assert!(printed.contains("before_each: true"));
        }

        #[tokio::test]
        async fn test_run_body_runs_hook_first() {
            let ctx = context();
            run_body(&ctx, Some(visit_root), needs_visit).await.unwrap();
            assert!(run_body(&context(), None, needs_visit).await.is_err());
        }

        #[tokio::test]
        async fn test_failure_before_mark_is_real() {
            let ctx = context();
            let outcome = run_body(&ctx, Some(failing_body), marks_then_fails).await;
            let expectation = ctx.effective_expectation(&Expectation::Pass);
            assert_eq!(expectation, Expectation::Pass);
            assert_eq!(expectation.judge(&outcome).0, TestStatus::Failed);
        }

        #[tokio::test]
        async fn test_declared_failure_covers_body_only() {
            let declared = Expectation::Fail { reason: "known issue".into() };

            let ctx = context();
            let outcome = run_body(&ctx, Some(failing_body), ok_body).await;
            assert!(!ctx.body_started());
            assert_eq!(ctx.effective_expectation(&declared), Expectation::Pass);
            assert_eq!(
                ctx.effective_expectation(&declared).judge(&outcome).0,
                TestStatus::Failed
            );

            let ctx = context();
            let outcome = run_body(&ctx, Some(ok_body), failing_body).await;
            assert!(ctx.body_started());
            assert_eq!(
                ctx.effective_expectation(&declared).judge(&outcome).0,
                TestStatus::ExpectedFailure
            );
        }

        #[tokio::test]
        async fn test_failure_after_mark_is_expected() {
            let ctx = context();
            let outcome = run_body(&ctx, Some(ok_body), marks_then_fails).await;
            assert_eq!(ctx.marked_failure().as_deref(), Some("demo"));
            let expectation = ctx.effective_expectation(&Expectation::Pass);
            assert_eq!(expectation.judge(&outcome).0, TestStatus::ExpectedFailure);
        }

        #[test]
        fn test_mark_shared_between_clones() {
            let ctx = context();
            ctx.clone().mark_expected_failure("later");
            let declared = Expectation::Skip { reason: "wip".into() };
            assert_eq!(
                ctx.effective_expectation(&declared),
                Expectation::Fail { reason: "later".into() }
            );
            assert_eq!(context().effective_expectation(&declared), declared);
        }

        #[tokio::test]
        async fn test_hook_failure_is_labelled() {
            let err = run_body(&context(), Some(failing_body), ok_body)
                .await
                .unwrap_err();
            assert!(err.to_string().contains("before_each"));
        }
    }
}
