//! In-memory adapters for tests and local wiring.

mod project_api;

pub use project_api::{ApiCall, ApiOperation, InMemoryProjectApi};
