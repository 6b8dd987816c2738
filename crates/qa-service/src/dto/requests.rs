//! Request DTOs for API endpoints
//!
//! Raw request bodies keep every field optional so that missing and malformed
//! fields are reported together, per field, instead of failing
//! deserialization on the first problem.

use std::borrow::Cow;

use qa_core::{Snowflake, TargetType, VoteIntent, VoteTarget, VoteType};
use serde::Deserialize;
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

// ============================================================================
// Vote Requests
// ============================================================================

/// Vote submission body: `{ targetId, targetType, voteType }`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVoteRequest {
    /// Decimal string or JSON integer
    pub target_id: Option<Value>,
    pub target_type: Option<Value>,
    pub vote_type: Option<Value>,
}

impl SubmitVoteRequest {
    /// Convert into a validated intent, collecting every field error
    pub fn to_intent(&self) -> Result<VoteIntent, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let target_id = required(&mut errors, "targetId", self.target_id.as_ref())
            .and_then(|raw| check(&mut errors, "targetId", parse_target_id(raw)));
        let target_type = required(&mut errors, "targetType", self.target_type.as_ref())
            .and_then(|raw| check(&mut errors, "targetType", parse_target_type(raw.as_str())));
        let vote_type = required(&mut errors, "voteType", self.vote_type.as_ref())
            .and_then(|raw| check(&mut errors, "voteType", parse_vote_type(raw.as_str())));

        match (target_id, target_type, vote_type) {
            (Some(id), Some(kind), Some(vote_type)) if errors.is_empty() => {
                Ok(VoteIntent::new(VoteTarget::new(id, kind), vote_type))
            }
            _ => Err(errors),
        }
    }
}

/// Path parameters of `GET /votes/:target_type/:target_id`
#[derive(Debug, Clone, Deserialize)]
pub struct VoteTargetPath {
    pub target_type: String,
    pub target_id: String,
}

impl VoteTargetPath {
    /// Validate with the same rules as the submission body
    pub fn to_target(&self) -> Result<VoteTarget, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let kind = check(
            &mut errors,
            "targetType",
            parse_target_type(Some(self.target_type.as_str())),
        );
        let id = check(
            &mut errors,
            "targetId",
            parse_target_id(&Value::String(self.target_id.clone())),
        );

        match (id, kind) {
            (Some(id), Some(kind)) => Ok(VoteTarget::new(id, kind)),
            _ => Err(errors),
        }
    }
}

// ============================================================================
// Field rules
// ============================================================================

fn required<T>(errors: &mut ValidationErrors, field: &'static str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errors.add(field, field_error("required", format!("{field} is required")));
    }
    value
}

fn check<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    parsed: Result<T, ValidationError>,
) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(e) => {
            errors.add(field, e);
            None
        }
    }
}

fn parse_target_id(raw: &Value) -> Result<Snowflake, ValidationError> {
    let parsed = match raw {
        Value::String(s) => Snowflake::parse(s).ok(),
        Value::Number(n) => n.as_i64().filter(|v| *v >= 0).map(Snowflake::new),
        _ => None,
    };

    parsed
        .filter(|id| !id.is_zero())
        .ok_or_else(|| field_error("invalid_id", "targetId must be a positive integer id"))
}

/// Non-string values (numbers, booleans, objects) arrive as `None`
fn parse_target_type(raw: Option<&str>) -> Result<TargetType, ValidationError> {
    raw.and_then(|s| s.parse().ok())
        .ok_or_else(|| field_error("invalid_target_type", "targetType must be question or answer"))
}

fn parse_vote_type(raw: Option<&str>) -> Result<VoteType, ValidationError> {
    raw.and_then(|s| s.parse().ok())
        .ok_or_else(|| field_error("invalid_vote_type", "voteType must be upvote or downvote"))
}

fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}
