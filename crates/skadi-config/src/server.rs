//! HTTP server configuration.
//!
//! - `SERVER_HOST` (default: `0.0.0.0`)
//! - `SERVER_PORT` (default: `8080`)
//! - `DEBUG`: mounts the `/example` role-check routes (default: `false`)
//! - `SHUTDOWN_TIMEOUT_SECS`: grace period for in-flight requests (default: `10`)

use std::time::Duration;

use crate::{ConfigError, env_source, parse_bool_or, parse_or};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub shutdown_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(env_source)
    }

    pub fn from_source<F>(source: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: source("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&source, "SERVER_PORT", 8080)?,
            debug: parse_bool_or(&source, "DEBUG", false)?,
            shutdown_timeout: Duration::from_secs(parse_or(&source, "SHUTDOWN_TIMEOUT_SECS", 10)?),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::source;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_source(source(&[])).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert!(!config.debug);
        assert_eq!(config.shutdown_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_port() {
        let result = ServerConfig::from_source(source(&[("SERVER_PORT", "70000")]));
        assert!(matches!(result, Err(ConfigError::Invalid { key: "SERVER_PORT", .. })));
    }
}
