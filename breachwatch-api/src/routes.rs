//! API route configuration.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth;
use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .route("/admin/status", get(handlers::admin_status))
        .route("/admin/metrics", get(handlers::admin_metrics))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin));

    Router::new()
        // Health check
        .route("/api/health", get(handlers::health_check))

        // Lookup
        .route("/api/check-email", post(handlers::check_email))

        // Admin
        .merge(admin)

        .with_state(state)
}
