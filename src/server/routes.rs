//! Router configuration for the web server.

use axum::{routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Query endpoints consumed by the map client
        .route("/searchDescriptions", get(handlers::search_descriptions))
        .route("/redlining", get(handlers::redlining))
        // Service endpoints
        .route("/health", get(handlers::health))
        .route("/api/status", get(handlers::api_status))
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
