//! Domain to DTO mappers

use qa_core::VoteOutcome;

use super::responses::VoteResponse;

impl From<VoteOutcome> for VoteResponse {
    fn from(outcome: VoteOutcome) -> Self {
        Self {
            upvotes: outcome.tally.upvotes,
            downvotes: outcome.tally.downvotes,
            user_vote: outcome.user_vote,
        }
    }
}
