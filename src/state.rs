use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use skadi_config::{CookieConfig, CorsConfig};

use crate::modules::auth::AuthService;

/// Shared, read-only application state. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub cookie_config: Arc<CookieConfig>,
    pub cors_config: Arc<CorsConfig>,
    /// Mounts the `/example` role-check routes.
    pub debug: bool,
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth", &self.auth)
            .field("cookie_config", &self.cookie_config)
            .field("cors_config", &self.cors_config)
            .field("debug", &self.debug)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl AppState {
    pub fn new(auth: AuthService, cookie_config: CookieConfig, cors_config: CorsConfig) -> Self {
        Self {
            auth: Arc::new(auth),
            cookie_config: Arc::new(cookie_config),
            cors_config: Arc::new(cors_config),
            debug: false,
            metrics: None,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}
