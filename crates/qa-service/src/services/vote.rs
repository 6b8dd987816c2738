//! Vote service
//!
//! The vote ledger: applies a user's vote submission to their stored vote and
//! recomputes the target's counts.
//!
//! A submission is a lookup followed by exactly one conditional write. The
//! store rejects writes whose precondition no longer holds (duplicate insert,
//! or a record whose type changed since the lookup), in which case the
//! lookup is repeated, up to `MAX_TRANSITION_ATTEMPTS` times.

use qa_core::{
    DomainError, RepoResult, Snowflake, Vote, VoteIntent, VoteOutcome, VoteTally, VoteTarget,
    VoteTransition, VoteType,
};
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Lookup-then-write rounds before giving up with `VoteConflict`
pub const MAX_TRANSITION_ATTEMPTS: usize = 3;

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Cast, switch or retract the caller's vote on a target.
    ///
    /// Returns the counts after the write together with the caller's
    /// resulting vote (`None` after a retraction).
    #[instrument(skip(self), fields(target = %intent.target, vote_type = %intent.vote_type))]
    pub async fn submit_vote(
        &self,
        caller: Option<Snowflake>,
        intent: VoteIntent,
    ) -> ServiceResult<VoteOutcome> {
        let author_id = authenticated(caller)?;

        let transition = self.apply(author_id, intent).await?;
        let tally = self.tally(intent.target).await?;

        info!(
            author_id = %author_id,
            target_id = %intent.target.id,
            target_type = %intent.target.kind,
            transition = %transition,
            upvotes = tally.upvotes,
            downvotes = tally.downvotes,
            "Vote submitted"
        );

        Ok(VoteOutcome::new(
            tally,
            transition.resulting_vote(intent.vote_type),
        ))
    }

    /// Current counts for a target plus the viewer's own vote, if any
    #[instrument(skip(self))]
    pub async fn get_votes(
        &self,
        viewer: Option<Snowflake>,
        target: VoteTarget,
    ) -> ServiceResult<VoteOutcome> {
        let viewer_vote = async {
            match viewer.filter(|id| !id.is_zero()) {
                Some(user_id) => self
                    .ctx
                    .vote_repo()
                    .find(user_id, target)
                    .await
                    .map(|vote| vote.map(|v| v.vote_type)),
                None => Ok(None),
            }
        };

        let (tally, user_vote) = tokio::try_join!(self.tally(target), viewer_vote)?;

        Ok(VoteOutcome::new(tally, user_vote))
    }

    /// Run lookup-then-write rounds until one write lands
    async fn apply(
        &self,
        author_id: Snowflake,
        intent: VoteIntent,
    ) -> ServiceResult<VoteTransition> {
        let repo = self.ctx.vote_repo();

        for attempt in 1..=MAX_TRANSITION_ATTEMPTS {
            let existing = repo.find(author_id, intent.target).await?;
            let transition =
                VoteTransition::decide(existing.as_ref().map(|v| v.vote_type), intent.vote_type);

            let applied = match (existing, transition) {
                (None, _) => self.create(author_id, intent).await?,
                (Some(vote), VoteTransition::Switched { from }) => repo
                    .update_type(vote.id, from, intent.vote_type)
                    .await?
                    .then_some(transition),
                (Some(vote), _) => repo
                    .delete(vote.id, vote.vote_type)
                    .await?
                    .then_some(VoteTransition::Retracted),
            };

            if let Some(transition) = applied {
                return Ok(transition);
            }

            debug!(
                attempt,
                author_id = %author_id,
                target = %intent.target,
                "Vote changed during submission, retrying"
            );
        }

        warn!(
            author_id = %author_id,
            target = %intent.target,
            attempts = MAX_TRANSITION_ATTEMPTS,
            "Giving up on contended vote"
        );
        Err(DomainError::VoteConflict.into())
    }

    /// Insert a new vote.
    ///
    /// A concurrent insert for the same author and target that already holds
    /// the requested type counts as this call's result (`Kept`). `None` means
    /// the round must be retried.
    async fn create(
        &self,
        author_id: Snowflake,
        intent: VoteIntent,
    ) -> ServiceResult<Option<VoteTransition>> {
        let repo = self.ctx.vote_repo();
        let vote = Vote::new(self.ctx.generate_id(), author_id, intent.target, intent.vote_type);

        match repo.create(&vote).await {
            Ok(()) => Ok(Some(VoteTransition::Created)),
            Err(DomainError::VoteAlreadyExists) => {
                let winner = repo.find(author_id, intent.target).await?;
                Ok(winner
                    .filter(|w| w.vote_type == intent.vote_type)
                    .map(|_| VoteTransition::Kept))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Count both vote types on a target concurrently
    async fn tally(&self, target: VoteTarget) -> RepoResult<VoteTally> {
        let repo = self.ctx.vote_repo();
        let (upvotes, downvotes) = tokio::try_join!(
            repo.count(target, VoteType::Upvote),
            repo.count(target, VoteType::Downvote),
        )?;
        Ok(VoteTally::new(upvotes, downvotes))
    }
}

/// Resolve the caller; an absent or zero id is not a user
fn authenticated(caller: Option<Snowflake>) -> ServiceResult<Snowflake> {
    match caller {
        Some(id) if !id.is_zero() => Ok(id),
        _ => Err(ServiceError::Unauthorized),
    }
}
