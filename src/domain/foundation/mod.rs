//! Foundation module - Shared domain primitives.
//!
//! Contains the identifier and error types that form the vocabulary
//! of the project domain.

mod errors;
mod ids;

pub use errors::ValidationError;
pub use ids::ProjectId;
