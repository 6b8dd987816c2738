//! Response DTOs for API endpoints

use chrono::{DateTime, Utc};
use qa_core::VoteType;
use serde::Serialize;

// ============================================================================
// Vote Responses
// ============================================================================

/// Counts for a target plus the caller's vote after the request
///
/// `userVote` is always present and is `null` when the caller has no vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub upvotes: i64,
    pub downvotes: i64,
    pub user_vote: Option<VoteType>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub storage: String,
}

impl ReadinessResponse {
    pub fn ready(storage_healthy: bool) -> Self {
        Self {
            status: if storage_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                storage: if storage_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
