//! # qa-db
//!
//! Storage layer implementing the `VoteRepository` port.
//!
//! ## Overview
//!
//! - Connection pool management and migrations for PostgreSQL
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - `PgVoteRepository`, backed by the `votes` table and its
//!   `(author_id, target_id, target_type)` uniqueness constraint
//! - `MemoryVoteRepository`, a process-local store for development and tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qa_db::{create_pool, run_migrations, DatabaseConfig, PgVoteRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool, &config.migrations_dir).await?;
//!     let votes = PgVoteRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{MemoryVoteRepository, PgVoteRepository};
