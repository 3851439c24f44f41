//! Wait mechanisms.
//!
//! Every action and assertion in this crate is retried until it succeeds
//! or its timeout elapses. This module holds the polling loop and the
//! element states a wait can target.

use crate::driver::ElementSnapshot;
use crate::result::{ProbeError, ProbeResult};
use std::future::Future;
use std::time::{Duration, Instant};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for wait operations (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

// =============================================================================
// LOAD STATE
// =============================================================================

/// Page load states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadState {
    /// Wait for the `load` event to fire
    #[default]
    Load,
    /// Wait for `DOMContentLoaded` event
    DomContentLoaded,
}

impl LoadState {
    /// `document.readyState` values that satisfy this state
    #[must_use]
    pub const fn ready_states(&self) -> &'static [&'static str] {
        match self {
            Self::Load => &["complete"],
            Self::DomContentLoaded => &["interactive", "complete"],
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load => f.write_str("load"),
            Self::DomContentLoaded => f.write_str("DOMContentLoaded"),
        }
    }
}

// =============================================================================
// ELEMENT STATE
// =============================================================================

/// Element state targeted by [`crate::Page::wait_for`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaitState {
    /// At least one match is visible
    #[default]
    Visible,
    /// No match is visible (including no match at all)
    Hidden,
    /// At least one match exists in the DOM
    Attached,
    /// No match exists in the DOM
    Detached,
}

impl WaitState {
    /// Whether the current set of matches satisfies this state
    #[must_use]
    pub fn is_satisfied(&self, matches: &[ElementSnapshot]) -> bool {
        match self {
            Self::Visible => matches.iter().any(|m| m.visible),
            Self::Hidden => matches.iter().all(|m| !m.visible),
            Self::Attached => !matches.is_empty(),
            Self::Detached => matches.is_empty(),
        }
    }
}

impl std::fmt::Display for WaitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::Attached => "attached",
            Self::Detached => "detached",
        };
        f.write_str(s)
    }
}

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// POLLING
// =============================================================================

/// Poll `probe` until it yields `Some`, or fail with [`ProbeError::Timeout`].
///
/// `probe` runs at least once even with a zero timeout. Strict-mode
/// violations and errors other than test failures (see
/// [`ProbeError::is_test_failure`]) abort immediately. Other test failures
/// are retried; on timeout a trailing [`ProbeError::NotActionable`] is
/// reported as is, since it says more than a bare timeout.
pub async fn poll_until<T, F, Fut>(
    options: WaitOptions,
    waiting_for: &str,
    mut probe: F,
) -> ProbeResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ProbeResult<Option<T>>>,
{
    let start = Instant::now();
    let mut last_failure: Option<ProbeError> = None;
    loop {
        match probe().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => last_failure = None,
            Err(err @ ProbeError::StrictModeViolation { .. }) => return Err(err),
            Err(err) if err.is_test_failure() => last_failure = Some(err),
            Err(err) => return Err(err),
        }
        if start.elapsed() >= options.timeout() {
            tracing::debug!(waiting_for, timeout_ms = options.timeout_ms, "wait timed out");
            return Err(match last_failure {
                Some(err @ ProbeError::NotActionable { .. }) => err,
                _ => ProbeError::timeout(waiting_for, options.timeout_ms),
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

/// Sleep for a fixed duration (`page.waitForTimeout`)
pub async fn wait_timeout(duration_ms: u64) {
    tokio::time::sleep(Duration::from_millis(duration_ms)).await;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn snapshot(visible: bool) -> ElementSnapshot {
        ElementSnapshot {
            visible,
            ..ElementSnapshot::default()
        }
    }

    mod wait_state_tests {
        use super::*;

        #[test]
        fn test_visible_needs_one_visible_match() {
            assert!(!WaitState::Visible.is_satisfied(&[]));
            assert!(!WaitState::Visible.is_satisfied(&[snapshot(false)]));
            assert!(WaitState::Visible.is_satisfied(&[snapshot(false), snapshot(true)]));
        }

        #[test]
        fn test_hidden_accepts_missing() {
            assert!(WaitState::Hidden.is_satisfied(&[]));
            assert!(WaitState::Hidden.is_satisfied(&[snapshot(false)]));
            assert!(!WaitState::Hidden.is_satisfied(&[snapshot(true)]));
        }

        #[test]
        fn test_attached_and_detached() {
            assert!(WaitState::Attached.is_satisfied(&[snapshot(false)]));
            assert!(!WaitState::Detached.is_satisfied(&[snapshot(false)]));
            assert!(WaitState::Detached.is_satisfied(&[]));
        }

        #[test]
        fn test_display() {
            assert_eq!(WaitState::Visible.to_string(), "visible");
            assert_eq!(LoadState::DomContentLoaded.to_string(), "DOMContentLoaded");
        }
    }

    mod wait_options_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let opts = WaitOptions::default();
            assert_eq!(opts.timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
            assert_eq!(opts.poll_interval(), Duration::from_millis(100));
        }

        #[test]
        fn test_builder() {
            let opts = WaitOptions::new().with_timeout(500).with_poll_interval(5);
            assert_eq!(opts.timeout(), Duration::from_millis(500));
            assert_eq!(opts.poll_interval_ms, 5);
        }
    }

    mod poll_tests {
        use super::*;

        #[tokio::test]
        async fn test_returns_once_condition_holds() {
            let calls = AtomicU32::new(0);
            let opts = WaitOptions::new().with_timeout(1_000).with_poll_interval(1);
            let value = poll_until(opts, "third call", || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok((n >= 2).then_some(n)) }
            })
            .await
            .unwrap();
            assert_eq!(value, 2);
        }

        #[tokio::test]
        async fn test_times_out() {
            let opts = WaitOptions::new().with_timeout(20).with_poll_interval(5);
            let err = poll_until(opts, "never", || async { Ok(None::<()>) })
                .await
                .unwrap_err();
            assert!(matches!(err, ProbeError::Timeout { ms: 20, .. }));
        }

        #[tokio::test]
        async fn test_zero_timeout_checks_once() {
            let calls = AtomicU32::new(0);
            let opts = WaitOptions::new().with_timeout(0);
            let _ = poll_until(opts, "once", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(None::<()>) }
            })
            .await;
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }

        #[tokio::test]
        async fn test_infrastructure_error_aborts() {
            let calls = AtomicU32::new(0);
            let opts = WaitOptions::new().with_timeout(1_000).with_poll_interval(1);
            let err = poll_until(opts, "x", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<Option<()>, _>(ProbeError::BrowserNotFound) }
            })
            .await
            .unwrap_err();
            assert!(matches!(err, ProbeError::BrowserNotFound));
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }

        #[tokio::test]
        async fn test_strict_violation_aborts() {
            let calls = AtomicU32::new(0);
            let opts = WaitOptions::new().with_timeout(1_000).with_poll_interval(1);
            let err = poll_until(opts, "click", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err::<Option<()>, _>(ProbeError::StrictModeViolation {
                        locator: "li".to_string(),
                        count: 3,
                    })
                }
            })
            .await
            .unwrap_err();
            assert!(matches!(err, ProbeError::StrictModeViolation { count: 3, .. }));
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }

        #[tokio::test]
        async fn test_not_actionable_surfaces_on_timeout() {
            let opts = WaitOptions::new().with_timeout(10).with_poll_interval(2);
            let err = poll_until(opts, "click", || async {
                Err::<Option<()>, _>(ProbeError::NotActionable {
                    locator: "button".to_string(),
                    reason: "element is disabled".to_string(),
                })
            })
            .await
            .unwrap_err();
            assert!(err.to_string().contains("disabled"));
        }
    }
}
