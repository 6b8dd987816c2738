//! Health check handlers
//!
//! Liveness and readiness endpoints.

use axum::{extract::State, http::StatusCode, Json};
use qa_service::{HealthResponse, ReadinessResponse};
use tracing::warn;

use crate::state::AppState;

/// Basic liveness check
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check against the vote store
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let storage_healthy = match state.service_context().vote_repo().health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Vote store health check failed");
            false
        }
    };

    let status = if storage_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ReadinessResponse::ready(storage_healthy)))
}
