//! Application layer - The project store.
//!
//! Orchestrates domain operations against the `ProjectApi` port and owns
//! the session's project state.

pub mod project_store;

pub use project_store::{ProjectStore, StoreError, StoreOptions};
