//! Attributes of the `refresh` cookie.
//!
//! # Environment Variables
//!
//! - `COOKIE_PATH` (default: `/`)
//! - `COOKIE_SECURE` (default: `false`)
//! - `COOKIE_HTTP_ONLY` (default: `true`)
//! - `COOKIE_SAME_SITE`: `strict`, `lax`, `none` or `unset` (default: `strict`)

use std::str::FromStr;

use crate::{ConfigError, env_source, parse_bool_or};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SameSitePolicy {
    #[default]
    Strict,
    Lax,
    None,
    /// Attribute omitted; the browser default applies.
    Unset,
}

impl FromStr for SameSitePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lax" => Ok(Self::Lax),
            "none" => Ok(Self::None),
            "unset" | "default" | "" => Ok(Self::Unset),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieConfig {
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSitePolicy,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            path: "/".into(),
            secure: false,
            http_only: true,
            same_site: SameSitePolicy::Strict,
        }
    }
}

impl CookieConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(env_source)
    }

    pub fn from_source<F>(source: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let same_site = match source("COOKIE_SAME_SITE") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "COOKIE_SAME_SITE",
                value: raw,
            })?,
            None => defaults.same_site,
        };

        let config = Self {
            path: source("COOKIE_PATH").unwrap_or(defaults.path),
            secure: parse_bool_or(&source, "COOKIE_SECURE", defaults.secure)?,
            http_only: parse_bool_or(&source, "COOKIE_HTTP_ONLY", defaults.http_only)?,
            same_site,
        };

        // browsers drop SameSite=None cookies that are not Secure
        if config.same_site == SameSitePolicy::None && !config.secure {
            return Err(ConfigError::Rejected(
                "COOKIE_SAME_SITE=none requires COOKIE_SECURE=true",
            ));
        }

        Ok(config)
    }
}
