use crate::config::{Config, ConfigLoader};
use crate::core::error::{Error, Result};
use crate::render::HtmlRenderer;
use crate::report::{LogParser, TestReport};
use crate::util::fs::{open_input, write_output};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Builder for converting a log file into an HTML report.
pub struct ReportBuilder {
    config: Option<Config>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    json_output: Option<PathBuf>,
}

impl ReportBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: None,
            input: None,
            output: None,
            json_output: None,
        }
    }

    /// Set the configuration directly.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from a standalone TOML file (plus env overrides).
    pub fn from_config_file(mut self, path: impl Into<PathBuf>) -> Result<Self> {
        let config = ConfigLoader::new().config_file(path).load()?;
        self.config = Some(config);
        Ok(self)
    }

    /// Set the input log path.
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = Some(path.into());
        self
    }

    /// Set the HTML output path.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Also write the parsed report as JSON. Overrides `[output] json`.
    pub fn json_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.json_output = Some(path.into());
        self
    }

    // --- Build and Execute ---

    /// Build the report generator.
    pub fn build(self) -> Result<ReportGenerator> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let input = self.input.ok_or_else(|| Error::missing("input"))?;
        let output = self.output.ok_or_else(|| Error::missing("output"))?;
        let json_output = self.json_output.or_else(|| config.output.json.clone());

        Ok(ReportGenerator {
            parser: LogParser::new().with_timestamp_format(&config.report.timestamp_format),
            renderer: HtmlRenderer::from_config(&config.report),
            config,
            input,
            output,
            json_output,
        })
    }

    /// Build and immediately run.
    pub fn run(self) -> Result<TestReport> {
        self.build()?.run()
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Orchestrates reading the log, parsing, rendering and writing.
pub struct ReportGenerator {
    config: Config,
    input: PathBuf,
    output: PathBuf,
    json_output: Option<PathBuf>,
    parser: LogParser,
    renderer: HtmlRenderer,
}

impl ReportGenerator {
    /// Effective configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the input log.
    pub fn input_path(&self) -> &Path {
        &self.input
    }

    /// Path of the HTML report.
    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Path of the JSON export, if enabled.
    pub fn json_path(&self) -> Option<&Path> {
        self.json_output.as_deref()
    }

    /// Parse the input log without writing anything.
    pub fn parse(&self) -> Result<TestReport> {
        let reader = open_input(&self.input)?;
        let report = self
            .parser
            .parse_reader(reader)
            .map_err(|e| Error::input_read(&self.input, e))?;
        info!(
            input = %self.input.display(),
            cases = report.test_cases.len(),
            "parsed test log"
        );
        Ok(report)
    }

    /// Run the full pipeline: parse, render HTML, optionally export JSON.
    pub fn run(&self) -> Result<TestReport> {
        let report = self.parse()?;

        self.renderer.write_to(&report, &self.output)?;
        info!(output = %self.output.display(), "wrote HTML report");

        if let Some(ref json_path) = self.json_output {
            let json = report.to_json()?;
            write_output(json_path, json.as_bytes())?;
            debug!(path = %json_path.display(), "wrote JSON report");
        }

        Ok(report)
    }
}
