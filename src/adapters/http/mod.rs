//! HTTP adapters.
//!
//! - `HttpProjectApi` - ProjectApi over the remote REST collection (reqwest)

mod project_api;

pub use project_api::{HttpProjectApi, HttpProjectApiConfig};
