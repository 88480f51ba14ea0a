//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - The remote `/projects` collection over HTTP
//! - `memory` - In-process collection for tests

pub mod http;
pub mod memory;

pub use http::{HttpProjectApi, HttpProjectApiConfig};
pub use memory::{ApiCall, ApiOperation, InMemoryProjectApi};
