//! Project domain module.
//!
//! The project entity as exchanged with the remote collection, the draft used
//! to create one, the partial-update body, and the ordered collection the
//! store keeps in memory.

mod collection;
mod entity;

pub use collection::{CollectionError, ProjectCollection};
pub use entity::{Project, ProjectDraft, ProjectPatch};
