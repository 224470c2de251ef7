use axum::{
    Router,
    extract::FromRef,
    http::{HeaderValue, Method, header},
    middleware::from_fn_with_state,
    routing::get,
};
use axum_extra::extract::cookie::Key;
use std::{future::Future, io::Error, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use wira_app::{app::AppBus, config::Config};
use wira_limiter::RateLimiter;
use wira_types::errors::{AppError, ApplicationError};

use crate::{
    handlers::{class_stats, health, profile, rankings, search_rankings},
    middleware::rate_limit,
};

/// Per-client rate limiter keyed by client address.
pub type ClientRateLimiter = RateLimiter<String>;

#[derive(Clone)]
pub struct AppState {
    pub app_bus: Arc<AppBus>,
    pub cookie_key: Key,
    pub rate_limiter: Arc<ClientRateLimiter>,
    pub trust_forwarded_for: bool,
}

impl AppState {
    pub fn new(
        app_bus: Arc<AppBus>,
        rate_limiter: Arc<ClientRateLimiter>,
        config: &Config,
    ) -> Result<AppState, ApplicationError> {
        let cookie_key = Key::try_from(config.auth_cookie_secret.as_bytes()).map_err(|e| {
            ApplicationError::App(AppError::InvalidConfig(format!("cookie secret: {e}")))
        })?;

        Ok(AppState {
            app_bus,
            cookie_key,
            rate_limiter,
            trust_forwarded_for: config.trust_forwarded_for,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub struct WebRouter {}

impl WebRouter {
    /// All API routes, each behind the rate limiter.
    pub fn router(state: AppState) -> Router {
        let cors = cors_layer(&state.app_bus.config().cors_origins);

        Router::new()
            .route("/api/health", get(health))
            .route("/api/rankings", get(rankings))
            .route("/api/rankings/search", get(search_rankings))
            .route("/api/rankings/stats", get(class_stats))
            .route("/api/user/profile", get(profile))
            .layer(from_fn_with_state(state.clone(), rate_limit))
            .with_state(state)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn bind(port: u16) -> Result<TcpListener, ApplicationError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        TcpListener::bind(addr).await.map_err(infra_error)
    }

    /// Serves until `shutdown` resolves, then drains in-flight requests.
    pub async fn serve(
        state: AppState,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), ApplicationError> {
        let addr = listener.local_addr().map_err(infra_error)?;
        let router = Self::router(state);

        tracing::info!("HTTP Server started, listening on http://{addr}");
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(infra_error)?;

        tracing::info!("HTTP Server stopped");
        Ok(())
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
}

fn infra_error(e: Error) -> ApplicationError {
    let err = format!("{:#?}", e);
    ApplicationError::Infrastructure(err)
}
