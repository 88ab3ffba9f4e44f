//! Test report model and the log parser that produces it.
//!
//! The report sits between the two halves of the pipeline:
//! `log lines → LogParser → TestReport → HtmlRenderer`.

mod formatter;
mod parser;

pub use formatter::ResultFormatter;
pub use parser::{
    DEFAULT_TIMESTAMP_FORMAT, ENTRY_MARKER, FAILED_MARKER, LogParser, SEPARATOR, SKIPPED_MARKER,
    SUMMARIZING_MARKER,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// No failure or skip marker was seen.
    #[default]
    Pass,
    /// A `[FAILED]` marker was seen.
    Fail,
    /// A `[SKIPPED]` marker was seen.
    Skip,
}

impl TestStatus {
    /// Lowercase name used in markup, CSS classes and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            TestStatus::Pass => "pass",
            TestStatus::Fail => "fail",
            TestStatus::Skip => "skip",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One segment of the log between two separator lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Title candidate lines joined with `", "`.
    pub title: String,
    pub status: TestStatus,
    /// Every line of the segment, each newline-terminated.
    pub log_content: String,
    /// Whether the entry marker appeared in this segment.
    pub has_enter: bool,
}

/// Aggregated result of parsing one log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestReport {
    /// Timestamp captured when parsing started.
    pub generated_at: String,
    /// Test cases in order of appearance.
    pub test_cases: Vec<TestCase>,
    /// Always `passed_tests + failed_tests + skipped_tests`.
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub skipped_tests: usize,
}

impl TestReport {
    /// Create an empty report stamped with `generated_at`.
    pub fn new(generated_at: impl Into<String>) -> Self {
        Self {
            generated_at: generated_at.into(),
            ..Default::default()
        }
    }

    /// Whether any test case failed.
    pub fn has_failures(&self) -> bool {
        self.failed_tests > 0
    }

    /// Number of cases with the given status, counted from the case list.
    pub fn count(&self, status: TestStatus) -> usize {
        self.test_cases.iter().filter(|c| c.status == status).count()
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub(crate) fn record(&mut self, status: TestStatus) {
        match status {
            TestStatus::Pass => self.passed_tests += 1,
            TestStatus::Fail => self.failed_tests += 1,
            TestStatus::Skip => self.skipped_tests += 1,
        }
    }

    /// Recompute the total from the subtotals.
    pub(crate) fn reconcile(&mut self) {
        self.total_tests = self.passed_tests + self.failed_tests + self.skipped_tests;
    }
}
