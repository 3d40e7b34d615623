//! Logging configuration.
//!
//! - `LOG_LEVEL`: default filter when `RUST_LOG` is unset (default: `info`)
//! - `LOG_JSON`: JSON console output (default: `false`)
//! - `LOG_DIR`: directory of the daily-rolling JSON log file (default: `logs`)

use crate::{ConfigError, env_source, parse_bool_or};

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub dir: String,
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(env_source)
    }

    pub fn from_source<F>(source: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            level: source("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            json: parse_bool_or(&source, "LOG_JSON", false)?,
            dir: source("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            dir: "logs".into(),
        }
    }
}
