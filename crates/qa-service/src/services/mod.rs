//! Business logic services

pub mod context;
pub mod error;
pub mod vote;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use vote::{VoteService, MAX_TRANSITION_ATTEMPTS};
