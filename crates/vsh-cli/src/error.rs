//! Error types for the CLI

use thiserror::Error;
use vsh_probe::ProbeError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Exit code when every test passed
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code when at least one test failed
pub const EXIT_TEST_FAILURES: u8 = 1;
/// Exit code for configuration and runner errors
pub const EXIT_ERROR: u8 = 2;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Run finished with failing tests
    #[error("{failed} test(s) failed")]
    TestsFailed {
        /// Number of failed tests
        failed: usize,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Async runtime could not start
    #[error("Failed to create runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Browser, page or runner error
    #[error(transparent)]
    Probe(#[from] ProbeError),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Process exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::TestsFailed { .. } => EXIT_TEST_FAILURES,
            _ => EXIT_ERROR,
        }
    }
}
