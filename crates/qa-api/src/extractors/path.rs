//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use qa_core::VoteTarget;
use qa_service::VoteTargetPath;
use validator::ValidationErrors;

use crate::response::ApiError;

/// Vote target from `/:target_type/:target_id`
#[derive(Debug, Clone, Copy)]
pub struct TargetPath(pub VoteTarget);

#[async_trait]
impl<S> FromRequestParts<S> for TargetPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<VoteTargetPath>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        raw.to_target()
            .map(TargetPath)
            .map_err(|errors| ApiError::invalid_path(describe(&errors)))
    }
}

/// Flatten field errors into one sorted message
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
