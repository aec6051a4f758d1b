// Library crate for hookpeek
// Exports modules for use by the server binary and tests

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{capture_webhook, create_endpoint, get_endpoint, health, list_webhooks};
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);

    Router::new()
        .route("/health", get(health))
        // Endpoint management
        .route("/api/endpoints", post(create_endpoint))
        .route("/api/endpoints/{id}", get(get_endpoint))
        .route("/api/endpoints/{id}/webhooks", get(list_webhooks))
        // Capture (any method)
        .route("/w/{id}", any(capture_webhook).layer(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
