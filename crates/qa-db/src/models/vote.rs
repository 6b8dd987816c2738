//! Vote database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the votes table
#[derive(Debug, Clone, FromRow)]
pub struct VoteModel {
    pub id: i64,
    pub author_id: i64,
    pub target_id: i64,
    pub target_type: String,
    pub vote_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
