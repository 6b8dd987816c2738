//! Integration test utilities for the vote API
//!
//! Spawns the real axum application on a local port and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
