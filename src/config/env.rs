//! Environment variable processing for runtime configuration overrides.
//!
//! Env var prefix: `GINKGO_LOG_HTML_`
//!
//! - `GINKGO_LOG_HTML_REPORT_TITLE`: override the page title
//! - `GINKGO_LOG_HTML_FOOTER`: override the footer text
//! - `GINKGO_LOG_HTML_TIMESTAMP_FORMAT`: override the timestamp format
//! - `GINKGO_LOG_HTML_VERBOSE`: enable verbose logging (1/true/yes or 0/false/no)
//! - `GINKGO_LOG_HTML_LIST_CASES`: list cases after converting (1/true/yes or 0/false/no)
//! - `GINKGO_LOG_HTML_JSON`: also write the report as JSON to this path

use super::Config;
use std::path::PathBuf;

const PREFIX: &str = "GINKGO_LOG_HTML_";

/// Apply individual env var overrides to a config.
///
/// Each override is applied only if the env var is set and parses correctly.
/// Invalid values are silently ignored.
pub fn apply_env_overrides(config: &mut Config) {
    if let Some(val) = env_str("REPORT_TITLE") {
        config.report.title = val;
    }

    if let Some(val) = env_str("FOOTER") {
        config.report.footer = val;
    }

    if let Some(val) = env_str("TIMESTAMP_FORMAT") {
        if super::is_valid_timestamp_format(&val) {
            config.report.timestamp_format = val;
        }
    }

    if let Some(val) = env_bool("VERBOSE") {
        config.verbose = val;
    }

    if let Some(val) = env_bool("LIST_CASES") {
        config.output.list_cases = val;
    }

    if let Some(val) = env_str("JSON") {
        config.output.json = Some(PathBuf::from(val));
    }
}

/// Summarize which env var overrides are currently active.
///
/// Returns a list of `(env_var_name, value)` pairs for debug logging.
pub fn detect_active_overrides() -> Vec<(String, String)> {
    let keys = [
        "REPORT_TITLE",
        "FOOTER",
        "TIMESTAMP_FORMAT",
        "VERBOSE",
        "LIST_CASES",
        "JSON",
    ];

    let mut active = Vec::new();
    for key in keys {
        let full = format!("{PREFIX}{key}");
        if let Ok(val) = std::env::var(&full) {
            if !val.is_empty() {
                active.push((full, val));
            }
        }
    }
    active
}

// --- helpers ---

fn env_str(suffix: &str) -> Option<String> {
    std::env::var(format!("{PREFIX}{suffix}"))
        .ok()
        .filter(|s| !s.is_empty())
}

fn env_bool(suffix: &str) -> Option<bool> {
    match env_str(suffix)?.to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env vars are process-global, so serialize tests that mutate them.
    pub(crate) static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ALL_VARS: [&str; 6] = [
        "GINKGO_LOG_HTML_REPORT_TITLE",
        "GINKGO_LOG_HTML_FOOTER",
        "GINKGO_LOG_HTML_TIMESTAMP_FORMAT",
        "GINKGO_LOG_HTML_VERBOSE",
        "GINKGO_LOG_HTML_LIST_CASES",
        "GINKGO_LOG_HTML_JSON",
    ];

    /// Helper: run a closure with only the given env vars set, then restore.
    pub(crate) fn with_env_vars<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let old: Vec<(&str, Option<String>)> =
            ALL_VARS.iter().map(|&k| (k, std::env::var(k).ok())).collect();
        for k in ALL_VARS {
            // SAFETY: tests are serialized via ENV_LOCK
            unsafe { std::env::remove_var(k) };
        }
        for &(k, v) in vars {
            // SAFETY: tests are serialized via ENV_LOCK
            unsafe { std::env::set_var(k, v) };
        }
        f();
        for (k, prev) in old {
            // SAFETY: tests are serialized via ENV_LOCK
            match prev {
                Some(v) => unsafe { std::env::set_var(k, v) },
                None => unsafe { std::env::remove_var(k) },
            }
        }
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        with_env_vars(&[], || {
            let mut config = Config::default();
            apply_env_overrides(&mut config);
            assert_eq!(config, Config::default());
            assert!(detect_active_overrides().is_empty());
        });
    }

    #[test]
    fn test_string_overrides() {
        with_env_vars(
            &[
                ("GINKGO_LOG_HTML_REPORT_TITLE", "Nightly"),
                ("GINKGO_LOG_HTML_FOOTER", "from env"),
                ("GINKGO_LOG_HTML_JSON", "out.json"),
            ],
            || {
                let mut config = Config::default();
                apply_env_overrides(&mut config);
                assert_eq!(config.report.title, "Nightly");
                assert_eq!(config.report.footer, "from env");
                assert_eq!(config.output.json, Some(PathBuf::from("out.json")));
            },
        );
    }

    #[test]
    fn test_empty_value_ignored() {
        with_env_vars(&[("GINKGO_LOG_HTML_REPORT_TITLE", "")], || {
            let mut config = Config::default();
            apply_env_overrides(&mut config);
            assert_eq!(config.report.title, "Test Report");
        });
    }

    #[test]
    fn test_bool_overrides() {
        with_env_vars(
            &[
                ("GINKGO_LOG_HTML_VERBOSE", "YES"),
                ("GINKGO_LOG_HTML_LIST_CASES", "1"),
            ],
            || {
                let mut config = Config::default();
                apply_env_overrides(&mut config);
                assert!(config.verbose);
                assert!(config.output.list_cases);
            },
        );

        with_env_vars(&[("GINKGO_LOG_HTML_LIST_CASES", "false")], || {
            let mut config = Config::default();
            config.output.list_cases = true;
            apply_env_overrides(&mut config);
            assert!(!config.output.list_cases);
        });
    }

    #[test]
    fn test_unrecognised_bool_ignored() {
        with_env_vars(
            &[
                ("GINKGO_LOG_HTML_VERBOSE", "banana"),
                ("GINKGO_LOG_HTML_LIST_CASES", "maybe"),
            ],
            || {
                let mut config = Config::default();
                config.verbose = true;
                config.output.list_cases = true;
                apply_env_overrides(&mut config);
                assert!(config.verbose);
                assert!(config.output.list_cases);
            },
        );
    }

    #[test]
    fn test_invalid_timestamp_format_ignored() {
        with_env_vars(&[("GINKGO_LOG_HTML_TIMESTAMP_FORMAT", "%Q")], || {
            let mut config = Config::default();
            apply_env_overrides(&mut config);
            assert_eq!(config.report.timestamp_format, "%Y-%m-%d %H:%M:%S");
        });

        with_env_vars(&[("GINKGO_LOG_HTML_TIMESTAMP_FORMAT", "%H:%M")], || {
            let mut config = Config::default();
            apply_env_overrides(&mut config);
            assert_eq!(config.report.timestamp_format, "%H:%M");
        });
    }

    #[test]
    fn test_detect_active_overrides() {
        with_env_vars(&[("GINKGO_LOG_HTML_VERBOSE", "1")], || {
            let active = detect_active_overrides();
            assert_eq!(
                active,
                vec![("GINKGO_LOG_HTML_VERBOSE".to_string(), "1".to_string())]
            );
        });
    }
}
