//! Date and unique-string helpers.

use chrono::{Datelike, Local, NaiveDate};
use std::sync::atomic::{AtomicU64, Ordering};

/// Quarter label shown by the reports quarter dropdown for `date`.
///
/// The application words Q1 and Q4 with a dash but Q2 and Q3 with "to";
/// the labels must match exactly.
#[must_use]
pub fn quarter_text(date: NaiveDate) -> String {
    let year = date.year();
    match date.month() {
        1..=3 => format!("Q1 January - March {year}"),
        4..=6 => format!("Q2 April to June {year}"),
        7..=9 => format!("Q3 July to September {year}"),
        _ => format!("Q4 October - December {year}"),
    }
}

/// Quarter label for today
#[must_use]
pub fn current_quarter_text() -> String {
    quarter_text(Local::now().date_naive())
}

/// Current year as shown in the year dropdown
#[must_use]
pub fn current_year() -> String {
    Local::now().year().to_string()
}

/// Digits-only timestamp (`YYYYMMDDHHMMSSmmm`), unique within the process
#[must_use]
pub fn timestamp_string() -> String {
    static LAST: AtomicU64 = AtomicU64::new(0);
    let now: u64 = Local::now()
        .format("%Y%m%d%H%M%S%3f")
        .to_string()
        .parse()
        .unwrap_or_default();
    let mut prev = LAST.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next.to_string(),
            Err(actual) => prev = actual,
        }
    }
}
