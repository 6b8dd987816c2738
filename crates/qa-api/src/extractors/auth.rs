//! Authentication extractor
//!
//! Resolves the bearer token, if any, into the caller's user id. A request
//! without an `Authorization` header is anonymous; deciding whether an
//! anonymous caller may proceed is left to the service layer.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use qa_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Snowflake,
}

/// Caller identity, `None` for anonymous requests
///
/// A present but unusable token (wrong scheme, bad signature, expired) is
/// rejected rather than treated as anonymous.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<Snowflake> {
        self.0.map(|user| user.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(Self(None));
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InvalidAuthFormat)?;

        let app_state = AppState::from_ref(state);
        let user_id = app_state
            .jwt_service()
            .authenticate(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected access token");
                ApiError::App(e)
            })?;

        Ok(Self(Some(AuthUser { user_id })))
    }
}
