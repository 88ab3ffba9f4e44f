use super::Config;
use crate::core::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader that supports multiple sources.
pub struct ConfigLoader {
    /// Path to standalone config file.
    config_file: Option<PathBuf>,
    /// Whether to apply `GINKGO_LOG_HTML_*` overrides.
    use_env: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self {
            config_file: None,
            use_env: true,
        }
    }

    /// Set a standalone configuration file path.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Set the configuration file path if one is given.
    pub fn maybe_config_file(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.config_file = path.map(Into::into);
        self
    }

    /// Ignore environment overrides.
    pub fn no_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Load configuration from all enabled sources.
    ///
    /// Priority (later sources override earlier):
    /// 1. Default values
    /// 2. Standalone TOML file
    /// 3. Individual env var overrides (`GINKGO_LOG_HTML_*`)
    pub fn load(self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(ref config_path) = self.config_file {
            config = self.load_toml_file(config_path)?;
            debug!(path = %config_path.display(), "loaded config file");
        }

        if self.use_env {
            for (key, value) in super::env::detect_active_overrides() {
                debug!(%key, %value, "applying env override");
            }
            super::env::apply_env_overrides(&mut config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a standalone TOML file.
    fn load_toml_file(&self, path: &Path) -> Result<Config> {
        Config::from_toml_file(path)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
