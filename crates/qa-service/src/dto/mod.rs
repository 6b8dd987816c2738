//! Data transfer objects for API requests and responses
//!
//! - Request DTOs and the validation step that turns them into domain intents
//! - Response DTOs for serializing API outputs
//! - Mappers from domain outcomes to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{SubmitVoteRequest, VoteTargetPath};
pub use responses::{HealthChecks, HealthResponse, ReadinessResponse, VoteResponse};
