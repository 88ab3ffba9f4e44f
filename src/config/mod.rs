//! Configuration types and loading from a standalone TOML file.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::{Error, Result};
use crate::report::DEFAULT_TIMESTAMP_FORMAT;

pub mod env;
mod loader;
pub use loader::ConfigLoader;

/// Complete configuration for report generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Page presentation settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_timestamp_format(&self.report.timestamp_format) {
            return Err(Error::InvalidConfig {
                field: "report.timestamp-format".to_string(),
                value: self.report.timestamp_format.clone(),
            });
        }
        Ok(())
    }
}

/// Page presentation settings (`[report]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReportConfig {
    /// Heading and `<title>` of the page.
    pub title: String,

    /// Footer text.
    pub footer: String,

    /// `strftime` format of the "Generated at" timestamp.
    pub timestamp_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Test Report".to_string(),
            footer: format!("Generated by {}", env!("CARGO_PKG_NAME")),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

/// Output settings (`[output]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Print one line per test case after converting.
    pub list_cases: bool,

    /// Also write the parsed report as JSON to this path.
    pub json: Option<PathBuf>,
}

/// Whether `format` is a `strftime` string chrono can render.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
