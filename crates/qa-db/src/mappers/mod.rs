//! Entity to model mappers
//!
//! - `TryFrom<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod vote;

pub use vote::VoteInsert;
