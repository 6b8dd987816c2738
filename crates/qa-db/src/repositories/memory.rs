//! In-memory implementation of VoteRepository
//!
//! Votes are keyed by `(author_id, target)` in a `DashMap`, so the shard lock
//! taken by the entry API gives the same uniqueness guarantee as the
//! PostgreSQL constraint. Nothing survives a restart.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::instrument;

use qa_core::{DomainError, RepoResult, Snowflake, Vote, VoteRepository, VoteTarget, VoteType};

type VoteKey = (Snowflake, VoteTarget);

/// Process-local vote store
#[derive(Debug, Default)]
pub struct MemoryVoteRepository {
    votes: DashMap<VoteKey, Vote>,
    // vote id -> owning key, for the id-addressed CAS operations
    index: DashMap<Snowflake, VoteKey>,
}

impl MemoryVoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored votes across all targets
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}

#[async_trait]
impl VoteRepository for MemoryVoteRepository {
    #[instrument(skip(self))]
    async fn find(&self, author_id: Snowflake, target: VoteTarget) -> RepoResult<Option<Vote>> {
        Ok(self.votes.get(&(author_id, target)).map(|v| v.value().clone()))
    }

    #[instrument(skip(self), fields(vote_id = %vote.id))]
    async fn create(&self, vote: &Vote) -> RepoResult<()> {
        let key = (vote.author_id, vote.target);
        match self.votes.entry(key) {
            Entry::Occupied(_) => Err(DomainError::VoteAlreadyExists),
            Entry::Vacant(slot) => {
                self.index.insert(vote.id, key);
                slot.insert(vote.clone());
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    async fn update_type(
        &self,
        id: Snowflake,
        expected: VoteType,
        vote_type: VoteType,
    ) -> RepoResult<bool> {
        let Some(key) = self.index.get(&id).map(|k| *k.value()) else {
            return Ok(false);
        };

        match self.votes.get_mut(&key) {
            Some(mut vote) if vote.id == id && vote.vote_type == expected => {
                vote.vote_type = vote_type;
                vote.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, expected: VoteType) -> RepoResult<bool> {
        let Some(key) = self.index.get(&id).map(|k| *k.value()) else {
            return Ok(false);
        };

        let removed = self
            .votes
            .remove_if(&key, |_, vote| vote.id == id && vote.vote_type == expected)
            .is_some();
        if removed {
            self.index.remove(&id);
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn count(&self, target: VoteTarget, vote_type: VoteType) -> RepoResult<i64> {
        let count = self
            .votes
            .iter()
            .filter(|entry| entry.key().1 == target && entry.value().vote_type == vote_type)
            .count();
        Ok(count as i64)
    }

    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}
