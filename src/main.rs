use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tracing::{info, warn};

use skadi::logging::init_tracing;
use skadi::metrics::init_metrics;
use skadi::modules::auth::AuthService;
use skadi::router::init_router;
use skadi::state::AppState;
use skadi_cache::{CacheConfig, revocation_store};
use skadi_config::{CookieConfig, CorsConfig, JwtConfig, LoggingConfig, ServerConfig};
use skadi_db::{DatabaseConfig, PgUserRepository, init_db_pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let logging_config = LoggingConfig::from_env()?;
    init_tracing(&logging_config)?;

    let server_config = ServerConfig::from_env()?;
    let jwt_config = JwtConfig::from_env()?;
    let cookie_config = CookieConfig::from_env()?;
    let cors_config = CorsConfig::from_env();
    let cache_config = CacheConfig::from_env()?;
    let database_config = DatabaseConfig::from_env()?;

    let pool = init_db_pool(&database_config)
        .await
        .context("failed to connect to the database")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let users = Arc::new(PgUserRepository::new(pool, database_config.query_timeout));
    let blacklist = revocation_store(&cache_config)
        .await
        .context("failed to open the revocation store")?;

    let auth = AuthService::new(users, blacklist, &jwt_config);
    let state = AppState::new(auth, cookie_config, cors_config)
        .with_debug(server_config.debug)
        .with_metrics(init_metrics()?);

    if state.debug {
        warn!("Debug mode: /api/v1/example routes are mounted");
    }

    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(%address, "Server listening");
    info!("Scalar UI available at http://{address}/scalar");

    let draining = Arc::new(Notify::new());
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(draining.clone()))
        .into_future();

    tokio::select! {
        result = server => result.context("server error")?,
        _ = drain_deadline(draining, server_config.shutdown_timeout) => {
            warn!("Shutdown timeout elapsed, dropping in-flight requests");
        }
    }

    info!("Server stopped");
    Ok(())
}

/// Completes once `draining` fires and `timeout` has then elapsed.
async fn drain_deadline(draining: Arc<Notify>, timeout: Duration) {
    draining.notified().await;
    tokio::time::sleep(timeout).await;
}

async fn shutdown_signal(draining: Arc<Notify>) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
    draining.notify_one();
}
