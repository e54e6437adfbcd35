//! Axum router configuration with middleware.
//!
//! Every path and method is served by the codes handler.
//! Middleware: request tracing.

use axum::Router;
use axum::routing::any;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handlers::codes::show_codes))
        .fallback(handlers::codes::show_codes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
