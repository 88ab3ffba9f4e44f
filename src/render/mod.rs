//! HTML rendering of a parsed [`TestReport`].
//!
//! The page layout lives in a static asset (`report.html`) with `{{NAME}}`
//! placeholders. Rendering is a pure function of the report and the renderer
//! settings; all interactive behaviour is inline script operating on the
//! rendered elements.

mod escape;
mod template;

pub use escape::html_escape;
pub use template::TemplateProcessor;

use crate::config::ReportConfig;
use crate::core::error::Result;
use crate::report::{TestCase, TestReport};
use std::collections::HashMap;
use std::path::Path;

/// Version of the page template. Bump when the markup contract changes.
pub const TEMPLATE_VERSION: u32 = 1;

/// The full report page.
pub const REPORT_TEMPLATE: &str = include_str!("report.html");

/// One collapsible test case panel.
pub const CASE_TEMPLATE: &str = r#"        <div class="test-case" data-status="{{STATUS}}">
            <div class="test-header">
                <div class="test-title">{{TITLE}}</div>
                <div class="test-status status-{{STATUS}}">{{STATUS}}</div>
            </div>
            <div class="test-content">{{LOG_CONTENT}}</div>
        </div>
"#;

const FAILED_BADGE: &str = r#" <span class="test-result">Failed</span>"#;

/// Renders a [`TestReport`] into a self-contained HTML document.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    title: String,
    footer: String,
}

impl HtmlRenderer {
    /// Create a renderer with the default title and footer.
    pub fn new() -> Self {
        Self::from_config(&ReportConfig::default())
    }

    /// Create a renderer using the `[report]` settings.
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            title: config.title.clone(),
            footer: config.footer.clone(),
        }
    }

    /// Render the report page.
    pub fn render(&self, report: &TestReport) -> String {
        let cases: String = report.test_cases.iter().map(render_case).collect();

        let failed_badge = if report.has_failures() {
            FAILED_BADGE.to_string()
        } else {
            String::new()
        };

        let mut vars: HashMap<&str, String> = HashMap::new();
        vars.insert(
            "GENERATOR",
            format!(
                "{} {} (template v{TEMPLATE_VERSION})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ),
        );
        vars.insert("REPORT_TITLE", html_escape(&self.title));
        vars.insert("FAILED_BADGE", failed_badge);
        vars.insert("GENERATED_AT", html_escape(&report.generated_at));
        vars.insert("TOTAL", report.total_tests.to_string());
        vars.insert("PASSED", report.passed_tests.to_string());
        vars.insert("FAILED", report.failed_tests.to_string());
        vars.insert("SKIPPED", report.skipped_tests.to_string());
        vars.insert("TEST_CASES", cases);
        vars.insert("FOOTER", html_escape(&self.footer));

        TemplateProcessor::process(REPORT_TEMPLATE, &vars)
    }

    /// Render the report and write it to `path`.
    pub fn write_to(&self, report: &TestReport, path: &Path) -> Result<()> {
        let html = self.render(report);
        crate::util::fs::write_output(path, html.as_bytes())
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_case(case: &TestCase) -> String {
    let mut vars: HashMap<&str, String> = HashMap::new();
    vars.insert("STATUS", html_escape(case.status.as_str()));
    vars.insert("TITLE", html_escape(&case.title));
    vars.insert("LOG_CONTENT", html_escape(&case.log_content));
    TemplateProcessor::process(CASE_TEMPLATE, &vars)
}
