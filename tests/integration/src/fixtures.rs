//! Test fixtures and data generators

use std::sync::atomic::{AtomicI64, Ordering};

use qa_common::JwtService;
use qa_core::Snowflake;
use serde::{Deserialize, Serialize};

use crate::helpers::TEST_JWT_SECRET;

/// Counter for unique ids
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// A fresh positive id, distinct within this process
pub fn unique_id() -> i64 {
    // Offset by pid so repeated runs against one database do not collide
    i64::from(std::process::id()) * 1_000_000 + COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A user with a valid access token for the test servers
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Snowflake,
    pub token: String,
}

impl TestUser {
    pub fn unique() -> Self {
        let id = Snowflake::new(unique_id());
        let token = JwtService::new(TEST_JWT_SECRET, 900)
            .issue_access_token(id)
            .unwrap_or_default();
        Self { id, token }
    }
}

/// Vote submission body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub target_id: String,
    pub target_type: String,
    pub vote_type: String,
}

impl VoteRequest {
    pub fn new(target_id: i64, target_type: &str, vote_type: &str) -> Self {
        Self {
            target_id: target_id.to_string(),
            target_type: target_type.to_string(),
            vote_type: vote_type.to_string(),
        }
    }

    pub fn upvote_question(question_id: i64) -> Self {
        Self::new(question_id, "question", "upvote")
    }

    pub fn downvote_question(question_id: i64) -> Self {
        Self::new(question_id, "question", "downvote")
    }

    pub fn upvote_answer(answer_id: i64) -> Self {
        Self::new(answer_id, "answer", "upvote")
    }
}

/// Vote counts plus the caller's vote
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub upvotes: i64,
    pub downvotes: i64,
    pub user_vote: Option<String>,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
