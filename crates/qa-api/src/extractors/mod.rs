//! Axum extractors for request handling

mod auth;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use path::TargetPath;
pub use validated::ValidatedVote;
