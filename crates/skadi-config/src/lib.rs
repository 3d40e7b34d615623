//! # Skadi Config
//!
//! Configuration types for the Skadi API.
//!
//! Every struct is loaded once at startup from environment variables and
//! then shared read-only:
//!
//! - [`jwt`]: token secrets and lifetimes
//! - [`cookie`]: attributes of the `refresh` cookie
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: bind address, debug mode and shutdown grace period
//! - [`logging`]: log level, format and file directory
//!
//! # Example
//!
//! ```ignore
//! use skadi_config::{CookieConfig, CorsConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let cookie_config = CookieConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! ```
//!
//! Each `from_env` has a `from_source` twin taking a lookup function, so the
//! parsing rules can be exercised without touching the process environment.

pub mod cookie;
pub mod cors;
pub mod jwt;
pub mod logging;
pub mod server;

pub use cookie::{CookieConfig, SameSitePolicy};
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use logging::LoggingConfig;
pub use server::ServerConfig;

use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("{0}")]
    Rejected(&'static str),
}

/// Reads `key` from the process environment.
pub fn env_source(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parses `key` if present, falls back to `default` if absent.
///
/// A present but unparseable value is an error rather than a silent default.
pub fn parse_or<T, F>(source: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match source(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

/// Accepts `true/false`, `1/0`, `yes/no` (case-insensitive).
pub fn parse_bool_or<F>(source: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match source(key) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value: raw }),
        },
        None => Ok(default),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_support::source;

    #[test]
    fn test_parse_or_default_when_absent() {
        let src = source(&[]);
        assert_eq!(parse_or(&src, "PORT", 8080u16).unwrap(), 8080);
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        let src = source(&[("PORT", "eighty")]);
        let err = parse_or(&src, "PORT", 8080u16).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "PORT",
                value: "eighty".into()
            }
        );
    }

    #[test]
    fn test_parse_bool_variants() {
        for (raw, expected) in [("true", true), ("1", true), ("YES", true), ("false", false), ("0", false)] {
            let src = source(&[("FLAG", raw)]);
            assert_eq!(parse_bool_or(&src, "FLAG", !expected).unwrap(), expected);
        }

        let src = source(&[("FLAG", "maybe")]);
        assert!(parse_bool_or(&src, "FLAG", true).is_err());
    }
}
