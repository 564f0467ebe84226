//! TOML configuration loading for exc applications.
//!
//! Applications embed [`SharedConfig`] in their own config struct and load
//! it through the [`ConfigLoader`] trait. Read failures are classified
//! through the [`ErrorCode`] catalogue, so a missing file and a permission
//! problem stay distinguishable at the call site.
//!
//! # Usage
//!
//! ```rust,no_run
//! use exc_common::config::{ConfigError, ConfigLoader, SharedConfig};
//! use serde::Deserialize;
//! use std::path::Path;
//!
//! #[derive(Debug, Deserialize)]
//! struct AppConfig {
//!     shared: SharedConfig,
//!     workdir: String,
//! }
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = AppConfig::load(Path::new("exc.toml"))?;
//!     config.shared.validate()?;
//!     println!("service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use crate::code::ErrorCode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading/validation error.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path that was probed.
        path: String,
    },

    /// Reading the file failed for a reason other than absence.
    #[error("failed to read configuration: {code}")]
    Read {
        /// Classified OS error.
        code: ErrorCode,
    },

    /// TOML parsing failed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// Semantic validation failed.
    #[error("configuration validation failed: {0}")]
    Invalid(String),
}

/// Logging verbosity level, lowercase in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-phase scope tracing.
    Trace,
    /// Raised and propagated codes.
    Debug,
    /// General application operation.
    #[default]
    Info,
    /// Potentially problematic situations.
    Warn,
    /// Serious problems only.
    Error,
}

impl LogLevel {
    /// Directive string for a tracing `EnvFilter`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Base configuration embedded by every exc application.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "exc-demo-01"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier, used as the log service field.
    pub service_name: String,
}

impl SharedConfig {
    /// Semantic validation.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if `service_name` is empty or contains
    /// whitespace (it is used as a log field and a file-name fragment).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::Invalid(
                "service_name cannot be empty".to_string(),
            ));
        }
        if self.service_name.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(format!(
                "service_name {:?} must not contain whitespace",
                self.service_name
            )));
        }
        Ok(())
    }
}

/// Loading a TOML file into any deserializable config struct.
///
/// # Contract
///
/// - [`ConfigError::NotFound`] if the file does not exist
/// - [`ConfigError::Read`] for any other I/O failure, classified via
///   [`ErrorCode::from_io`]
/// - [`ConfigError::Parse`] if the TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file at `path`.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::Read {
                    code: ErrorCode::from_io(&e),
                }
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Debug, Deserialize)]
    struct TestConfig {
        shared: SharedConfig,
        retries: u8,
    }

    #[test]
    fn log_level_default_is_info() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
        assert_eq!(LogLevel::default().as_str(), "info");
    }

    #[test]
    fn log_level_roundtrips_lowercase() {
        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct Wrapper {
            level: LogLevel,
        }

        for (level, text) in [
            (LogLevel::Trace, "trace"),
            (LogLevel::Debug, "debug"),
            (LogLevel::Info, "info"),
            (LogLevel::Warn, "warn"),
            (LogLevel::Error, "error"),
        ] {
            let rendered = toml::to_string(&Wrapper { level }).unwrap();
            assert!(rendered.contains(text), "{rendered} should contain {text}");
            let parsed: Wrapper = toml::from_str(&format!("level = \"{text}\"")).unwrap();
            assert_eq!(parsed.level, level);
        }
    }

    #[test]
    fn validate_accepts_plain_name() {
        let config = SharedConfig {
            log_level: LogLevel::Info,
            service_name: "exc-demo".to_string(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_name() {
        let config = SharedConfig {
            log_level: LogLevel::Info,
            service_name: String::new(),
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn validate_rejects_whitespace_name() {
        let config = SharedConfig {
            log_level: LogLevel::Info,
            service_name: "exc demo".to_string(),
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let result = TestConfig::load(Path::new("/nonexistent/exc.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn load_bad_toml_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "retries = [[[").unwrap();
        let result = TestConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_success() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"retries = 3

[shared]
log_level = "warn"
service_name = "exc-test"
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = TestConfig::load(file.path()).unwrap();
        assert_eq!(config.retries, 3);
        assert_eq!(config.shared.log_level, LogLevel::Warn);
        assert_eq!(config.shared.service_name, "exc-test");
    }

    #[test]
    fn load_defaults_log_level() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"retries = 0

[shared]
service_name = "exc-test"
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = TestConfig::load(file.path()).unwrap();
        assert_eq!(config.shared.log_level, LogLevel::Info);
    }
}
