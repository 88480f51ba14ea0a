//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProjectApi` - The remote `/projects` collection resource

mod project_api;

pub use project_api::{ApiError, ProjectApi};
