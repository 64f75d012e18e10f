//! Router setup with the relay routes and middleware.

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, Method};
use axum::routing::{get, post};
use axum::Router;
use bosques_core::config::BosquesConfig;
use bosques_core::error::BosquesError;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::RelayState;

/// Headers browsers may send with a cross-origin chat request.
const ALLOWED_HEADERS: [&str; 4] = ["authorization", "x-client-info", "apikey", "content-type"];

/// Create the axum Router with all routes and middleware.
///
/// CORS allows any origin, since the relay is called from the public site;
/// preflight `OPTIONS` requests are answered by the CORS layer.
pub fn create_router(state: RelayState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static));

    Router::new()
        .route("/chat", post(handlers::chat))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(state.body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind the configured address and serve the relay until the process exits.
pub async fn start_server(config: &BosquesConfig, state: RelayState) -> Result<(), BosquesError> {
    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let router = create_router(state.with_body_limit(config.server.body_limit_bytes));

    tracing::info!("Starting chat relay on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BosquesError::Api(format!("Failed to bind {addr}: {e}")))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| BosquesError::Api(format!("Server error: {e}")))?;

    Ok(())
}
