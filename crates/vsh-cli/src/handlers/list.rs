//! List command handler

use crate::commands::ListArgs;
use crate::error::CliResult;
use std::fmt::Write as _;
use vsh_probe::{select, Expectation, TestSuite};
use vsh_suite::specs;

/// Execute the list command
///
/// # Errors
///
/// Never fails today; kept fallible like the other handlers
pub fn execute_list(args: &ListArgs) -> CliResult<()> {
    print!("{}", render_list(&specs::all(), args.filter.as_deref()));
    Ok(())
}

/// Selected tests grouped by suite, then a count line
#[must_use]
pub fn render_list(suites: &[TestSuite], filter: Option<&str>) -> String {
    let selected = select(suites, filter);
    let mut out = String::new();
    let mut current: Option<&str> = None;
    let mut suite_count = 0;

    for (suite, case) in &selected {
        if current != Some(suite.name.as_str()) {
            current = Some(suite.name.as_str());
            suite_count += 1;
            let _ = writeln!(out, "{}", suite.name);
        }
        let _ = write!(out, "  {}", case.name);
        for tag in &case.tags {
            let _ = write!(out, " @{tag}");
        }
        match &case.expectation {
            Expectation::Pass => {}
            Expectation::Fail { reason } => {
                let _ = write!(out, " (expected to fail: {reason})");
            }
            Expectation::Skip { reason } => {
                let _ = write!(out, " (skipped: {reason})");
            }
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "\n{} in {}",
        plural(selected.len(), "test"),
        plural(suite_count, "suite")
    );
    out
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("1 {word}")
    } else {
        format!("{n} {word}s")
    }
}
