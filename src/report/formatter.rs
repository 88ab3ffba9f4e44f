//! Terminal output formatting for a converted report.

use std::path::Path;

use super::{TestReport, TestStatus};

/// Formats and prints the conversion result to the terminal.
pub struct ResultFormatter {
    list_cases: bool,
}

impl ResultFormatter {
    /// Create a new formatter. With `list_cases`, every case gets its own line.
    pub fn new(list_cases: bool) -> Self {
        Self { list_cases }
    }

    /// Print the full result: optional case list, confirmation and summary.
    pub fn report(&self, report: &TestReport, output: &Path) {
        print!("{}", self.format(report, output));
    }

    /// Render the terminal output as a string.
    pub fn format(&self, report: &TestReport, output: &Path) -> String {
        let mut out = String::new();
        if self.list_cases {
            out.push_str(&Self::format_cases(report));
        }
        out.push_str(&format!(
            "Test report successfully converted to HTML: {}\n",
            output.display()
        ));
        out.push_str(&Self::format_summary(report));
        out.push('\n');
        out
    }

    /// The one-line count summary.
    pub fn format_summary(report: &TestReport) -> String {
        format!(
            "Total: {}, Passed: {}, Failed: {}, Skipped: {}",
            report.total_tests, report.passed_tests, report.failed_tests, report.skipped_tests
        )
    }

    fn format_cases(report: &TestReport) -> String {
        let mut out = String::new();
        for case in &report.test_cases {
            let marker = match case.status {
                TestStatus::Pass => "PASS",
                TestStatus::Fail => "FAIL",
                TestStatus::Skip => "SKIP",
            };
            out.push_str(&format!("[{marker}] {}\n", case.title));
        }
        out
    }
}
