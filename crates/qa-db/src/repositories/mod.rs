//! Repository implementations
//!
//! Implementations of the `VoteRepository` trait defined in qa-core.

mod error;
mod memory;
mod vote;

pub use memory::MemoryVoteRepository;
pub use vote::PgVoteRepository;
