//! Configuration for the backtest tooling.
//!
//! # Usage
//!
//! ```rust,ignore
//! use xasset_backtest::config::load_config;
//!
//! // Load from default path (xasset-backtest.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//! println!("log level: {}", config.logging.level);
//! ```
//!
//! Values may reference environment variables as `${VAR}` or
//! `${VAR:-default}`.

mod defaults;
mod logging;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::RequestDefaults;
pub use logging::{LogFormat, LoggingConfig};

use crate::tenor::Tenor;

/// Default configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "xasset-backtest.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Defaults applied to requests.
    #[serde(default)]
    pub defaults: RequestDefaults,
}

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    let config = load_config_from_string(&contents)?;
    tracing::debug!(path, "configuration loaded");
    Ok(config)
}

/// Load configuration from a YAML string.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. Unset variables
/// without a default become empty.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.logging.level.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "logging.level must not be empty".to_string(),
        ));
    }

    config
        .defaults
        .frequency
        .parse::<Tenor>()
        .map_err(|e| ConfigError::ValidationError(format!("defaults.frequency: {e}")))?;

    if config
        .defaults
        .holiday_calendar
        .as_deref()
        .is_some_and(|calendar| calendar.trim().is_empty())
    {
        return Err(ConfigError::ValidationError(
            "defaults.holiday_calendar must not be blank".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = load_config_from_string("{}").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.defaults.frequency, "1b");
        assert!(config.defaults.cash_accrual);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r"
logging:
  level: debug
  format: json
defaults:
  frequency: 1w
  holiday_calendar: NYC
  cash_accrual: false
";
        let config = load_config_from_string(yaml).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.defaults.frequency, "1w");
        assert_eq!(config.defaults.holiday_calendar.as_deref(), Some("NYC"));
        assert!(!config.defaults.cash_accrual);
    }

    #[test]
    fn test_env_default_used_when_unset() {
        let yaml = "logging:\n  level: ${XASSET_BACKTEST_TEST_UNSET_LEVEL:-warn}\n";
        let config = load_config_from_string(yaml).unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_env_var_interpolated() {
        let Ok(path) = std::env::var("PATH") else {
            return;
        };
        if path.is_empty() {
            return;
        }
        assert_eq!(interpolate_env_vars("x=${PATH}"), format!("x={path}"));
    }

    #[test]
    fn test_invalid_frequency_rejected() {
        let yaml = "defaults:\n  frequency: 3q\n";
        let err = load_config_from_string(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("defaults.frequency"));
    }

    #[test]
    fn test_blank_level_rejected() {
        let yaml = "logging:\n  level: ${XASSET_BACKTEST_TEST_UNSET_LEVEL}\n";
        assert!(matches!(
            load_config_from_string(yaml),
            Err(ConfigError::ValidationError(_) | ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_unknown_format_is_parse_error() {
        let yaml = "logging:\n  format: xml\n";
        assert!(matches!(
            load_config_from_string(yaml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "defaults:\n  frequency: 1m").unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.defaults.frequency, "1m");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load_config(Some("/nonexistent/xasset-backtest.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
