//! API route definitions

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/events", get(handlers::events::list_events))
        .route("/api/analytics", get(handlers::analytics::get_analytics))
        // Layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
