//! Service context - dependency container for services

use std::sync::Arc;

use qa_common::auth::JwtService;
use qa_core::traits::VoteRepository;
use qa_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every dependency sits behind an `Arc`. The vote store is
/// held as a trait object so the same services run on PostgreSQL or on the
/// in-memory store.
#[derive(Clone)]
pub struct ServiceContext {
    vote_repo: Arc<dyn VoteRepository>,
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    pub fn new(
        vote_repo: Arc<dyn VoteRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            vote_repo,
            jwt_service,
            snowflake_generator,
        }
    }

    /// Get the vote repository
    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("vote_repo", &"dyn VoteRepository")
            .field("jwt_service", &self.jwt_service)
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    vote_repo: Option<Arc<dyn VoteRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vote_repo(mut self, repo: Arc<dyn VoteRepository>) -> Self {
        self.vote_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// The snowflake generator falls back to worker 0 when not set.
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if a required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.vote_repo
                .ok_or_else(|| ServiceError::internal("vote_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::internal("jwt_service is required"))?,
            self.snowflake_generator.unwrap_or_default(),
        ))
    }
}
