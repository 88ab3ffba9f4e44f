use std::path::PathBuf;

/// Result type alias for ginkgo-log-html operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ginkgo-log-html.
///
/// Parsing never produces an error; every variant here comes from
/// configuration or from touching the filesystem.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing required configuration field or path.
    #[error("Missing required configuration field: {0}")]
    MissingConfig(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {field}: {value}")]
    InvalidConfig { field: String, value: String },

    /// The input log could not be opened.
    #[error("open {}: {source}", path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input log was opened but reading it failed partway.
    #[error("read {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be created or written.
    #[error("write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("TOML parsing error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a missing configuration error.
    pub fn missing(field: impl Into<String>) -> Self {
        Error::MissingConfig(field.into())
    }

    /// Create an input-open error for `path`.
    pub fn input_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::InputOpen {
            path: path.into(),
            source,
        }
    }

    /// Create an input-read error for `path`.
    pub fn input_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::InputRead {
            path: path.into(),
            source,
        }
    }

    /// Create an output error for `path`.
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Output {
            path: path.into(),
            source,
        }
    }

    /// Whether the error came from reading the input log.
    pub fn is_input(&self) -> bool {
        matches!(self, Error::InputOpen { .. } | Error::InputRead { .. })
    }
}
