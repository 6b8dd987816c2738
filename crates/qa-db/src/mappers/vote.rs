//! Vote entity <-> model mapper

use qa_core::{DomainError, Snowflake, Vote, VoteTarget};

use crate::models::VoteModel;

/// Convert a row into a Vote, rejecting values outside the enum domains
impl TryFrom<VoteModel> for Vote {
    type Error = DomainError;

    fn try_from(model: VoteModel) -> Result<Self, Self::Error> {
        let kind = model
            .target_type
            .parse()
            .map_err(|e| {
                DomainError::DatabaseError(format!("corrupt vote row {}: {e}", model.id))
            })?;
        let vote_type = model
            .vote_type
            .parse()
            .map_err(|e| {
                DomainError::DatabaseError(format!("corrupt vote row {}: {e}", model.id))
            })?;

        Ok(Vote {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            target: VoteTarget::new(Snowflake::new(model.target_id), kind),
            vote_type,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Vote entity values for database insertion
pub struct VoteInsert {
    pub id: i64,
    pub author_id: i64,
    pub target_id: i64,
    pub target_type: &'static str,
    pub vote_type: &'static str,
}

impl VoteInsert {
    pub fn new(vote: &Vote) -> Self {
        Self {
            id: vote.id.into_inner(),
            author_id: vote.author_id.into_inner(),
            target_id: vote.target.id.into_inner(),
            target_type: vote.target.kind.as_str(),
            vote_type: vote.vote_type.as_str(),
        }
    }
}
