//! Vote entity - one user's current vote on one question or answer
//!
//! A user holds at most one vote per target. Submitting a vote either
//! creates it, switches its type, or retracts it; [`VoteTransition::decide`]
//! is the single place that rule lives.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Direction of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    /// Storage / wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upvote => "upvote",
            Self::Downvote => "downvote",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = VoteTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upvote" => Ok(Self::Upvote),
            "downvote" => Ok(Self::Downvote),
            other => Err(VoteTypeParseError::UnknownVoteType(other.to_string())),
        }
    }
}

/// Kind of entity a vote points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Question,
    Answer,
}

impl TargetType {
    /// Storage / wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Answer => "answer",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = VoteTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "question" => Ok(Self::Question),
            "answer" => Ok(Self::Answer),
            other => Err(VoteTypeParseError::UnknownTargetType(other.to_string())),
        }
    }
}

/// Error when parsing a vote or target type from its string form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoteTypeParseError {
    #[error("unknown vote type: {0}")]
    UnknownVoteType(String),

    #[error("unknown target type: {0}")]
    UnknownTargetType(String),
}

/// Opaque key of a votable entity.
///
/// The ledger never checks that the target exists; the pair is only used to
/// scope votes and counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoteTarget {
    pub id: Snowflake,
    pub kind: TargetType,
}

impl VoteTarget {
    pub const fn new(id: Snowflake, kind: TargetType) -> Self {
        Self { id, kind }
    }

    pub const fn question(id: Snowflake) -> Self {
        Self::new(id, TargetType::Question)
    }

    pub const fn answer(id: Snowflake) -> Self {
        Self::new(id, TargetType::Answer)
    }
}

impl fmt::Display for VoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Vote entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub target: VoteTarget,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vote {
    /// Create a new Vote
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        target: VoteTarget,
        vote_type: VoteType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            target,
            vote_type,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A validated request to vote on a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteIntent {
    pub target: VoteTarget,
    pub vote_type: VoteType,
}

impl VoteIntent {
    pub const fn new(target: VoteTarget, vote_type: VoteType) -> Self {
        Self { target, vote_type }
    }
}

/// What a vote submission does to the stored vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// No vote existed; one was created
    Created,
    /// The same vote type was submitted again; the vote was deleted
    Retracted,
    /// The opposite vote type was submitted; the vote was flipped in place
    Switched { from: VoteType },
    /// A concurrent submission already created the requested vote
    Kept,
}

impl VoteTransition {
    /// Decide the transition from the currently stored vote type.
    pub fn decide(existing: Option<VoteType>, requested: VoteType) -> Self {
        match existing {
            None => Self::Created,
            Some(current) if current == requested => Self::Retracted,
            Some(current) => Self::Switched { from: current },
        }
    }

    /// The user's vote once this transition has been applied
    pub fn resulting_vote(self, requested: VoteType) -> Option<VoteType> {
        match self {
            Self::Retracted => None,
            Self::Created | Self::Switched { .. } | Self::Kept => Some(requested),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Retracted => "retracted",
            Self::Switched { .. } => "switched",
            Self::Kept => "kept",
        }
    }
}

impl fmt::Display for VoteTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived vote counts for a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteTally {
    pub upvotes: i64,
    pub downvotes: i64,
}

impl VoteTally {
    pub const fn new(upvotes: i64, downvotes: i64) -> Self {
        Self { upvotes, downvotes }
    }
}

/// Result of a vote submission or query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    pub tally: VoteTally,
    pub user_vote: Option<VoteType>,
}

impl VoteOutcome {
    pub const fn new(tally: VoteTally, user_vote: Option<VoteType>) -> Self {
        Self { tally, user_vote }
    }
}
