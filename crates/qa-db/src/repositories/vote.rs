//! PostgreSQL implementation of VoteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use qa_core::{DomainError, RepoResult, Snowflake, Vote, VoteRepository, VoteTarget, VoteType};

use crate::mappers::VoteInsert;
use crate::models::VoteModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of VoteRepository
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    /// Create a new PgVoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self))]
    async fn find(&self, author_id: Snowflake, target: VoteTarget) -> RepoResult<Option<Vote>> {
        let result = sqlx::query_as::<_, VoteModel>(
            r#"
            SELECT id, author_id, target_id, target_type, vote_type, created_at, updated_at
            FROM votes
            WHERE author_id = $1 AND target_id = $2 AND target_type = $3
            "#,
        )
        .bind(author_id.into_inner())
        .bind(target.id.into_inner())
        .bind(target.kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Vote::try_from).transpose()
    }

    #[instrument(skip(self), fields(vote_id = %vote.id))]
    async fn create(&self, vote: &Vote) -> RepoResult<()> {
        let insert = VoteInsert::new(vote);

        sqlx::query(
            r#"
            INSERT INTO votes (id, author_id, target_id, target_type, vote_type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(insert.id)
        .bind(insert.author_id)
        .bind(insert.target_id)
        .bind(insert.target_type)
        .bind(insert.vote_type)
        .bind(vote.created_at)
        .bind(vote.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::VoteAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_type(
        &self,
        id: Snowflake,
        expected: VoteType,
        vote_type: VoteType,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE votes
            SET vote_type = $3, updated_at = NOW()
            WHERE id = $1 AND vote_type = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(expected.as_str())
        .bind(vote_type.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, expected: VoteType) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM votes WHERE id = $1 AND vote_type = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn count(&self, target: VoteTarget, vote_type: VoteType) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM votes
            WHERE target_id = $1 AND target_type = $2 AND vote_type = $3
            "#,
        )
        .bind(target.id.into_inner())
        .bind(target.kind.as_str())
        .bind(vote_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn health_check(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
