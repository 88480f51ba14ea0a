//! Domain layer containing the project types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, validation errors)
//! - `project` - Project entity, draft, patch body and ordered collection

pub mod foundation;
pub mod project;
