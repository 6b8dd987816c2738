//! Validated vote body extractor
//!
//! Deserializes the submission body and runs it through the field rules, so
//! handlers receive a ready `VoteIntent`.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use qa_core::VoteIntent;
use qa_service::SubmitVoteRequest;

use crate::response::ApiError;

/// Vote submission whose fields have all been checked
///
/// Syntactically broken JSON is a 400 `INVALID_BODY`; any field problem is a
/// 400 `VALIDATION_ERROR` with per-field details.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedVote(pub VoteIntent);

#[async_trait]
impl<S> FromRequest<S> for ValidatedVote
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<SubmitVoteRequest>::from_request(req, state)
            .await
            .map_err(|e| match e {
                JsonRejection::JsonDataError(e) => ApiError::invalid_body(e.body_text()),
                JsonRejection::JsonSyntaxError(e) => ApiError::invalid_body(e.body_text()),
                JsonRejection::MissingJsonContentType(e) => ApiError::invalid_body(e.body_text()),
                _ => ApiError::invalid_body("Invalid JSON body"),
            })?;

        Ok(Self(body.to_intent()?))
    }
}
