use std::sync::Arc;

use wira_app::{app::AppBus, config::Config};
use wira_db::{establish_connection_pool, uow::PostgresUnitOfWorkProvider};
use wira_types::{ApplicationError, Result};
use wira_web::{AppState, ClientRateLimiter, WebRouter};

mod logs;
use logs::setup_logging;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    let _log_guard = setup_logging();
    let (config, app_bus) = setup_app().await?;

    let rate_limiter = Arc::new(ClientRateLimiter::new(config.rate_limit()));
    let sweeper = rate_limiter.start_sweeper();
    let state = AppState::new(app_bus, rate_limiter, &config)?;

    let listener = WebRouter::bind(config.port).await?;
    let served = WebRouter::serve(state, listener, shutdown_signal()).await;

    sweeper.shutdown().await;
    tracing::info!("Shutdown complete");
    served
}

async fn setup_app() -> Result<(Arc<Config>, Arc<AppBus>), ApplicationError> {
    let config = Arc::new(Config::from_env()?);
    let db_pool = establish_connection_pool().await?;

    sqlx::migrate!("../migrations")
        .run(&db_pool)
        .await
        .map_err(|e| ApplicationError::Unknown(e.to_string()))?;

    let uow_provider = Arc::new(PostgresUnitOfWorkProvider::new(db_pool));
    let app_bus = Arc::new(AppBus::new(config.clone(), uow_provider));

    Ok((config, app_bus))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Ctrl-C received, shutting down"),
        Err(e) => {
            tracing::error!("Unable to listen for shutdown signal: {e}");
            std::future::pending::<()>().await
        }
    }
}
