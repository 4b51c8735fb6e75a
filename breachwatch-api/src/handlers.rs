//! HTTP request handlers.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{error, info, warn};

use breachwatch_core::error::BreachError;
use breachwatch_core::types::CheckOutcome;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

// ═══════════════════════════════════════════════════════════════════════════════
// HEALTH CHECK
// ═══════════════════════════════════════════════════════════════════════════════

pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    let count = state.checker.store().count().await.map_err(|e| {
        error!(error = %e, "Health check could not reach the database");
        ApiError::database("Database connection failed")
    })?;

    Ok(Json(HealthResponse {
        status: "healthy".into(),
        message: format!("Email checker service is running with {count} compromised emails in database"),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.uptime_seconds(),
        compromised_emails: count,
    }))
}

// ═══════════════════════════════════════════════════════════════════════════════
// EMAIL CHECK
// ═══════════════════════════════════════════════════════════════════════════════

pub async fn check_email(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CheckEmailRequest>, JsonRejection>,
) -> ApiResult<CheckEmailResponse> {
    let Json(req) = payload.map_err(|e| {
        warn!(error = %e, "Rejected check request body");
        ApiError::bad_request("Invalid JSON format")
    })?;

    if req.email.is_empty() {
        return Err(ApiError::email_required());
    }

    let (compromised, cached) = match state.checker.check_key(&req.email).await? {
        CheckOutcome::Rejected => return Err(BreachError::MalformedInput.into()),
        CheckOutcome::Hit { compromised } => (compromised, true),
        CheckOutcome::Miss { compromised } => (compromised, false),
    };

    // Never log the address itself
    info!(compromised, cached, "Email checked");

    Ok(Json(CheckEmailResponse::new(req.email, compromised, cached)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// ADMIN
// ═══════════════════════════════════════════════════════════════════════════════

pub async fn admin_status(State(state): State<Arc<AppState>>) -> ApiResult<AdminStatusResponse> {
    let count = state.checker.store().count().await?;

    Ok(Json(AdminStatusResponse {
        service: "BreachWatch".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.uptime_seconds(),
        database: DatabaseStatsDto {
            compromised_emails: count,
            database_path: state.config.db_path.display().to_string(),
        },
        cache: state.checker.cache().stats(),
        lookups: state.checker.stats().into(),
    }))
}

pub async fn admin_metrics(State(state): State<Arc<AppState>>) -> Json<LookupStatsDto> {
    Json(state.checker.stats().into())
}
