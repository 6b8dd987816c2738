//! Route definitions
//!
//! API routes are mounted under /api/v1; health routes sit at the root.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, votes};
use crate::state::AppState;

/// Create the main API router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new().merge(vote_routes())
}

/// Vote routes
fn vote_routes() -> Router<AppState> {
    Router::new()
        .route("/votes", post(votes::submit_vote))
        .route("/votes/:target_type/:target_id", get(votes::get_votes))
}
