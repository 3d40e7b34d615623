use crate::env_source;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_source(env_source)
    }

    pub fn from_source<F>(source: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = source("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000,http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // the refresh cookie only travels cross-origin with credentials
        let allow_credentials = source("CORS_ALLOW_CREDENTIALS")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);

        Self {
            allowed_origins,
            allow_credentials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::source;

    #[test]
    fn test_default_origins() {
        let config = CorsConfig::from_source(source(&[]));
        assert_eq!(config.allowed_origins.len(), 2);
        assert!(config.allow_credentials);
    }

    #[test]
    fn test_origin_list_is_trimmed() {
        let config = CorsConfig::from_source(source(&[
            ("ALLOWED_ORIGINS", " https://school.example , ,https://admin.example"),
            ("CORS_ALLOW_CREDENTIALS", "false"),
        ]));

        assert_eq!(
            config.allowed_origins,
            vec!["https://school.example", "https://admin.example"]
        );
        assert!(!config.allow_credentials);
    }
}
