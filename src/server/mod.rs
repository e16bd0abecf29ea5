//! HTTP transport
//!
//! - `state`: shared application state
//! - `routes`: one handler per endpoint
//! - `error`: status codes and body decoding
//!
//! Every route is also served under `/api`, the prefix the device firmware uses.

mod error;
mod routes;
mod state;

pub use error::status_for;
pub use state::AppState;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clock::SystemClock;
use crate::config::{CorsConfig, ServerConfig};
use crate::machine::Laundry;
use crate::notify;

/// Build the router with CORS and request tracing.
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    let routes = Router::new()
        .route("/", get(routes::health))
        .route("/health", get(routes::health))
        .route("/state", get(routes::get_state))
        .route("/status", get(routes::get_state))
        .route("/log", get(routes::get_log))
        .route("/start", post(routes::start))
        .route("/finish", post(routes::finish))
        .route("/scan_out", post(routes::scan_out))
        .route("/heartbeat", post(routes::heartbeat));

    Router::new()
        .nest("/api", routes.clone())
        .merge(routes)
        .layer(build_cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer from configuration. A lone `*` allows any origin.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if config.allowed_origins.is_empty() {
        return cors;
    }
    if config.allowed_origins.iter().any(|origin| origin == "*") {
        if config.allowed_origins.len() > 1 {
            tracing::warn!(origins = ?config.allowed_origins, "'*' mixed with explicit origins; allowing any origin");
        }
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::error!(origin = %origin, "invalid CORS origin; skipping");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        tracing::warn!("all configured CORS origins were invalid; CORS disabled");
        cors
    } else {
        tracing::info!(origins = ?config.allowed_origins, "CORS configured");
        cors.allow_origin(AllowOrigin::list(allowed))
    }
}

/// Serve until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let notifier = notify::from_config(&config.notifier);
    let laundry = Arc::new(Laundry::new(&config.machine, Arc::new(SystemClock), notifier));
    let app = create_router(AppState::new(laundry), &config.cors);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(bind = %listener.local_addr()?, "washline listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
