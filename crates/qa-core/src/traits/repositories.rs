//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Vote, VoteTarget, VoteType};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Vote Repository
// ============================================================================

/// Storage for vote records.
///
/// Implementations must enforce uniqueness of `(author_id, target)`, and the
/// mutating methods must be atomic compare-and-swap operations so the ledger
/// can detect that a record changed between its lookup and its write.
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Find the author's vote on a target
    async fn find(&self, author_id: Snowflake, target: VoteTarget) -> RepoResult<Option<Vote>>;

    /// Insert a new vote.
    ///
    /// Returns `DomainError::VoteAlreadyExists` if the author already has a
    /// vote on the target.
    async fn create(&self, vote: &Vote) -> RepoResult<()>;

    /// Flip a vote's type if it still holds `expected`.
    ///
    /// Returns `false` when no record matched (deleted or already changed).
    async fn update_type(
        &self,
        id: Snowflake,
        expected: VoteType,
        vote_type: VoteType,
    ) -> RepoResult<bool>;

    /// Delete a vote if it still holds `expected`.
    ///
    /// Returns `false` when no record matched.
    async fn delete(&self, id: Snowflake, expected: VoteType) -> RepoResult<bool>;

    /// Count votes of one type on a target
    async fn count(&self, target: VoteTarget, vote_type: VoteType) -> RepoResult<i64>;

    /// Check that the backing store is reachable
    async fn health_check(&self) -> RepoResult<()>;
}
