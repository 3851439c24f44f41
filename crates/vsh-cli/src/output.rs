//! Output formatting and progress reporting

use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use vsh_probe::{Summary, TestRecord, TestStatus};

/// Progress reporter for test execution
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar for `total` tests
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Print one finished test and advance the bar
    pub fn record(&self, record: &TestRecord) {
        let title = record.full_title();
        let line = match record.status {
            TestStatus::Passed => self.line("✓", "PASS", Style::new().green(), &title),
            TestStatus::Failed => {
                let detail = record.error.as_deref().unwrap_or("failed");
                self.line("✗", "FAIL", Style::new().red(), &format!("{title}\n    {detail}"))
            }
            TestStatus::Skipped => self.line("-", "SKIP", Style::new().yellow(), &title),
            TestStatus::ExpectedFailure => {
                let note = record.note.as_deref().unwrap_or("expected");
                self.line("✗", "XFAIL", Style::new().yellow(), &format!("{title} ({note})"))
            }
        };

        if !self.quiet || record.status.is_failure() {
            self.write(&line);
        }
        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }
    }

    /// Finish progress bar
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        self.write(&self.line("✗", "FAIL", Style::new().red(), message));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.write(&self.line("ℹ", "INFO", Style::new().blue(), message));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        self.write("");
        self.write(&styled);
    }

    /// Print test summary
    pub fn summary(&self, summary: &Summary, duration: Duration) {
        if self.quiet && summary.failed == 0 {
            return;
        }

        self.write("");
        let duration_secs = duration.as_secs_f64();
        let status = if summary.failed > 0 { "FAILED" } else { "PASSED" };
        let counts = format!(
            "({} passed, {} failed, {} skipped, {} expected failures)",
            summary.passed, summary.failed, summary.skipped, summary.expected_failures
        );

        if self.use_color {
            let status_style = if summary.failed > 0 {
                Style::new().red().bold()
            } else {
                Style::new().green().bold()
            };
            self.write(&format!(
                "{} {} tests in {duration_secs:.2}s {counts}",
                status_style.apply_to(status),
                summary.total,
            ));
        } else {
            self.write(&format!(
                "{status} {} tests in {duration_secs:.2}s {counts}",
                summary.total
            ));
        }
    }

    fn line(&self, symbol: &str, word: &str, colour: Style, message: &str) -> String {
        let prefix = if self.use_color {
            colour.bold().apply_to(symbol).to_string()
        } else {
            word.to_string()
        };
        format!("{prefix} {message}")
    }

    fn write(&self, line: &str) {
        match self.progress_bar {
            Some(ref pb) if !pb.is_finished() && !pb.is_hidden() => pb.println(line),
            _ => {
                let _ = self.term.write_line(line);
            }
        }
    }
}
