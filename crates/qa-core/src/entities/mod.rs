//! Domain entities - core business objects

mod vote;

pub use vote::{
    TargetType, Vote, VoteIntent, VoteOutcome, VoteTally, VoteTarget, VoteTransition, VoteType,
    VoteTypeParseError,
};
