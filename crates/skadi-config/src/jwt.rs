//! Token signing configuration.
//!
//! # Environment Variables
//!
//! - `JWT_ACCESS_SECRET`: HMAC secret for access tokens (required)
//! - `JWT_REFRESH_SECRET`: HMAC secret for refresh tokens (required)
//! - `JWT_ACCESS_EXPIRY`: access token lifetime in seconds (default: 300)
//! - `JWT_REFRESH_EXPIRY`: refresh token lifetime in seconds (default: 864000)

use std::time::Duration;

use crate::{ConfigError, env_source, parse_or};

pub const DEFAULT_ACCESS_TTL_SECS: u64 = 5 * 60;
pub const DEFAULT_REFRESH_TTL_SECS: u64 = 10 * 24 * 60 * 60;

#[derive(Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

// secrets never reach the logs
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl JwtConfig {
    /// Loads and validates the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails if a secret is missing, a lifetime does not parse, or
    /// [`JwtConfig::validate`] rejects the combination.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(env_source)
    }

    pub fn from_source<F>(source: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_secret = source("JWT_ACCESS_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_ACCESS_SECRET"))?;
        let refresh_secret = source("JWT_REFRESH_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_REFRESH_SECRET"))?;

        let config = Self {
            access_secret,
            refresh_secret,
            access_ttl: Duration::from_secs(parse_or(
                &source,
                "JWT_ACCESS_EXPIRY",
                DEFAULT_ACCESS_TTL_SECS,
            )?),
            refresh_ttl: Duration::from_secs(parse_or(
                &source,
                "JWT_REFRESH_EXPIRY",
                DEFAULT_REFRESH_TTL_SECS,
            )?),
        };

        config.validate()?;
        Ok(config)
    }

    /// Access and refresh tokens must be signed with distinct secrets, and
    /// an access token must never outlive the refresh token that renews it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_secret == self.refresh_secret {
            return Err(ConfigError::Rejected(
                "JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ",
            ));
        }
        if self.access_ttl.is_zero() {
            return Err(ConfigError::Rejected("JWT_ACCESS_EXPIRY must be positive"));
        }
        if self.access_ttl >= self.refresh_ttl {
            return Err(ConfigError::Rejected(
                "JWT_ACCESS_EXPIRY must be shorter than JWT_REFRESH_EXPIRY",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::source;

    #[test]
    fn test_defaults() {
        let config = JwtConfig::from_source(source(&[
            ("JWT_ACCESS_SECRET", "access-secret"),
            ("JWT_REFRESH_SECRET", "refresh-secret"),
        ]))
        .unwrap();

        assert_eq!(config.access_ttl, Duration::from_secs(300));
        assert_eq!(config.refresh_ttl, Duration::from_secs(864_000));
    }

    #[test]
    fn test_custom_expiry() {
        let config = JwtConfig::from_source(source(&[
            ("JWT_ACCESS_SECRET", "a"),
            ("JWT_REFRESH_SECRET", "b"),
            ("JWT_ACCESS_EXPIRY", "60"),
            ("JWT_REFRESH_EXPIRY", "3600"),
        ]))
        .unwrap();

        assert_eq!(config.access_ttl, Duration::from_secs(60));
        assert_eq!(config.refresh_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_missing_secret() {
        let err = JwtConfig::from_source(source(&[("JWT_ACCESS_SECRET", "a")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_REFRESH_SECRET"));

        let err = JwtConfig::from_source(source(&[
            ("JWT_ACCESS_SECRET", ""),
            ("JWT_REFRESH_SECRET", "b"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_ACCESS_SECRET"));
    }

    #[test]
    fn test_rejects_shared_secret() {
        let result = JwtConfig::from_source(source(&[
            ("JWT_ACCESS_SECRET", "same"),
            ("JWT_REFRESH_SECRET", "same"),
        ]));
        assert!(matches!(result, Err(ConfigError::Rejected(_))));
    }

    #[test]
    fn test_rejects_access_outliving_refresh() {
        let result = JwtConfig::from_source(source(&[
            ("JWT_ACCESS_SECRET", "a"),
            ("JWT_REFRESH_SECRET", "b"),
            ("JWT_ACCESS_EXPIRY", "3600"),
            ("JWT_REFRESH_EXPIRY", "3600"),
        ]));
        assert!(matches!(result, Err(ConfigError::Rejected(_))));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = JwtConfig::from_source(source(&[
            ("JWT_ACCESS_SECRET", "top-secret-access"),
            ("JWT_REFRESH_SECRET", "top-secret-refresh"),
        ]))
        .unwrap();

        let printed = format!("{config:?}");
        assert!(!printed.contains("top-secret"));
    }
}
