//! Vote handlers

use axum::{extract::State, Json};
use qa_service::{VoteResponse, VoteService};

use crate::extractors::{OptionalAuthUser, TargetPath, ValidatedVote};
use crate::response::ApiResult;
use crate::state::AppState;

/// Cast, switch or retract a vote
///
/// POST /votes
pub async fn submit_vote(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ValidatedVote(intent): ValidatedVote,
) -> ApiResult<Json<VoteResponse>> {
    let outcome = VoteService::new(state.service_context())
        .submit_vote(auth.user_id(), intent)
        .await?;

    Ok(Json(outcome.into()))
}

/// Current counts for a target, with the caller's vote when authenticated
///
/// GET /votes/:target_type/:target_id
pub async fn get_votes(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    TargetPath(target): TargetPath,
) -> ApiResult<Json<VoteResponse>> {
    let outcome = VoteService::new(state.service_context())
        .get_votes(auth.user_id(), target)
        .await?;

    Ok(Json(outcome.into()))
}
