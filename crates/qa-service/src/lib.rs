//! # qa-service
//!
//! Application layer: the vote ledger, request validation and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    HealthChecks, HealthResponse, ReadinessResponse, SubmitVoteRequest, VoteResponse,
    VoteTargetPath,
};
pub use services::{
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, VoteService,
    MAX_TRANSITION_ATTEMPTS,
};
