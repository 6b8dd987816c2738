//! # qa-core
//!
//! Domain layer for Q&A voting: the vote entity, the transition rule that
//! decides how a new submission affects a user's existing vote, the
//! repository port, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    TargetType, Vote, VoteIntent, VoteOutcome, VoteTally, VoteTarget, VoteTransition, VoteType,
    VoteTypeParseError,
};
pub use error::DomainError;
pub use traits::{RepoResult, VoteRepository};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
