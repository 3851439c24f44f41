//! Step logger for test scripts.
//!
//! Each call emits a `tracing` event tagged with a `kind` field so
//! subscribers can render steps differently from plain information.

/// A user-visible test step
pub fn step(message: &str) {
    tracing::info!(kind = "step", "{message}");
}

/// Extra detail inside a step
pub fn info(message: &str) {
    tracing::info!(kind = "info", "{message}");
}

/// Something unexpected that does not fail the test
pub fn warn(message: &str) {
    tracing::warn!(kind = "warn", "{message}");
}

/// A problem worth surfacing before the assertion fails
pub fn error(message: &str) {
    tracing::error!(kind = "error", "{message}");
}
