//! ginkgo-log-html: convert a plain-text Ginkgo test-run log into a single
//! self-contained HTML report.
//!
//! The log is split into test cases at separator lines (a run of dashes).
//! Each case gets a title from the lines before its `> Enter` marker and a
//! status from `[FAILED]` / `[SKIPPED]` markers. Everything after the
//! `Summarizing` line is ignored.
//!
//! # Quick Start
//!
//! ## Using the Builder API
//!
//! ```no_run
//! use ginkgo_log_html::builder;
//!
//! # fn main() -> ginkgo_log_html::Result<()> {
//! let report = builder()
//!     .input("ginkgo.log")
//!     .output("report.html")
//!     .run()?;
//! println!("{} tests, {} failed", report.total_tests, report.failed_tests);
//! # Ok(())
//! # }
//! ```
//!
//! ## Parsing and rendering in memory
//!
//! ```
//! use ginkgo_log_html::{HtmlRenderer, LogParser, TestStatus};
//!
//! let log = "\
//! Running Suite: Demo
//! ------------------------------
//! Demo suite
//! creates a widget
//! > Enter [It] creates a widget
//! [FAILED] expected 1 to equal 2
//! ";
//! let report = LogParser::new().parse_str(log);
//! assert_eq!(report.test_cases[0].title, "Demo suite, creates a widget");
//! assert_eq!(report.test_cases[0].status, TestStatus::Fail);
//!
//! let html = HtmlRenderer::new().render(&report);
//! assert!(html.contains("status-fail"));
//! ```
//!
//! ## Configuration
//!
//! ```toml
//! verbose = false
//!
//! [report]
//! title = "Nightly E2E"
//! footer = "Generated by CI"
//! timestamp-format = "%Y-%m-%d %H:%M:%S"
//!
//! [output]
//! list-cases = true
//! json = "report.json"
//! ```
//!
//! Every value can also be overridden through `GINKGO_LOG_HTML_*`
//! environment variables, see [`config::env`].

pub mod config;
pub mod core;
pub mod render;
pub mod report;
pub mod util;

// Re-export commonly used types
pub use crate::core::{Error, ReportBuilder, ReportGenerator, Result};
pub use config::Config;
pub use render::HtmlRenderer;
pub use report::{LogParser, TestCase, TestReport, TestStatus};

/// Create a new report builder.
///
/// This is the main entry point for the fluent API.
pub fn builder() -> ReportBuilder {
    ReportBuilder::new()
}
