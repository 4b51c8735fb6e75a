//! # BreachWatch API Server
//!
//! REST API for breach lookups, consumed by the web frontend.
//!
//! ## Endpoints
//!
//! - `GET /api/health` - Liveness plus dataset size
//! - `POST /api/check-email` - Check an address against the breach dataset
//! - `GET /admin/status` - Service, database and cache status (Basic auth)
//! - `GET /admin/metrics` - Lookup counters (Basic auth)
//!
//! ## Example
//!
//! ```rust,ignore
//! use breachwatch_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env()?;
//! let server = ApiServer::new(config).await?;
//! server.run().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod auth;
mod routes;
mod handlers;
mod state;
mod dto;
mod error;

pub use routes::create_router;
pub use state::{AppState, ApiConfig};
pub use error::ApiError;

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use breachwatch_core::error::Result;

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// API server for BreachWatch.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Opens the store and starts the cache for the given configuration.
    pub async fn new(config: ApiConfig) -> Result<Self> {
        let state = AppState::from_config(config).await?;
        Ok(Self::from_state(Arc::new(state)))
    }

    /// Wraps already-built state.
    pub fn from_state(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Creates the router with all routes and layers configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::REFERRER_POLICY,
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server until Ctrl+C, then stops the cache sweeper.
    pub async fn run(self) -> Result<()> {
        let addr = self.state.config.listen_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("BreachWatch API server listening on {}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Shutting down");
        self.state.checker.cache().shutdown().await;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
