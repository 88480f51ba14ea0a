//! ProjectStore - Client-side project state synchronized with the remote collection.
//!
//! The store owns the in-memory collection. Every mutation goes through one
//! of its operations:
//!
//! | Operation | Remote call | Local transition |
//! |-----------|-------------|------------------|
//! | `load` | `GET /projects` | replace all, on success only |
//! | `create` | `POST /projects` | append the returned project, on success only |
//! | `update` | `PATCH /projects/{id}` | replace in place, before the call |
//! | `remove` | `DELETE /projects/{id}` | drop the entry, before the call |
//!
//! `update` and `remove` are optimistic: the local change is kept when the
//! remote write fails. The failure is logged and returned, and with
//! `reconcile_on_failure` the store reloads the remote snapshot before
//! returning it.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, warn};

use crate::config::StoreConfig;
use crate::domain::foundation::ProjectId;
use crate::domain::project::{Project, ProjectCollection, ProjectDraft};
use crate::ports::{ApiError, ProjectApi};

/// Behaviour switches for the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Reload from the remote after a failed optimistic write.
    pub reconcile_on_failure: bool,
}

impl StoreOptions {
    /// Enables the reconciling reload.
    pub fn with_reconcile_on_failure(mut self, enabled: bool) -> Self {
        self.reconcile_on_failure = enabled;
        self
    }
}

impl From<&StoreConfig> for StoreOptions {
    fn from(config: &StoreConfig) -> Self {
        Self {
            reconcile_on_failure: config.reconcile_on_failure,
        }
    }
}

/// Outcome errors of store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Fetch failed or returned malformed data; local state untouched.
    #[error("failed to load projects: {0}")]
    LoadFailed(#[source] ApiError),

    /// Create failed or returned malformed data; local state untouched.
    #[error("failed to create project: {0}")]
    CreateFailed(#[source] ApiError),

    /// Remote update failed; the optimistic local replacement was kept.
    #[error("failed to update project {id}: {source}")]
    UpdateFailed {
        id: ProjectId,
        #[source]
        source: ApiError,
    },

    /// Remote delete failed; the optimistic local removal was kept.
    #[error("failed to delete project {id}: {source}")]
    DeleteFailed {
        id: ProjectId,
        #[source]
        source: ApiError,
    },

    /// No local project with this id.
    #[error("project {0} not found")]
    NotFound(ProjectId),
}

/// Session-wide project state.
///
/// Construct once and pass by reference to whatever renders projects.
/// Mutating operations take `&mut self`, so transitions apply one at a time.
pub struct ProjectStore {
    api: Arc<dyn ProjectApi>,
    projects: ProjectCollection,
    options: StoreOptions,
    snapshots: watch::Sender<Vec<Project>>,
}

impl ProjectStore {
    /// Creates an empty store with default options.
    pub fn new(api: Arc<dyn ProjectApi>) -> Self {
        Self::with_options(api, StoreOptions::default())
    }

    /// Creates an empty store.
    pub fn with_options(api: Arc<dyn ProjectApi>, options: StoreOptions) -> Self {
        let (snapshots, _) = watch::channel(Vec::new());
        Self {
            api,
            projects: ProjectCollection::new(),
            options,
            snapshots,
        }
    }

    /// Projects in display order.
    pub fn projects(&self) -> &[Project] {
        self.projects.as_slice()
    }

    /// Lookup for a single project view.
    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.get(id)
    }

    pub fn favorites(&self) -> Vec<&Project> {
        self.projects.favorites()
    }

    /// Case-insensitive title search; a blank query returns everything.
    pub fn search(&self, query: &str) -> Vec<&Project> {
        self.projects.search(query)
    }

    /// Receives a snapshot of the collection after every local transition.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Project>> {
        self.snapshots.subscribe()
    }

    /// Replaces local state with the remote collection.
    ///
    /// # Errors
    ///
    /// `StoreError::LoadFailed` if the request fails, the body is malformed,
    /// or the collection repeats an id. Local state is left unchanged.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        let fetched = self.api.list().await.map_err(|e| {
            error!(error = %e, "Failed to load projects");
            StoreError::LoadFailed(e)
        })?;

        let collection = ProjectCollection::from_vec(fetched).map_err(|e| {
            error!(error = %e, "Remote returned a malformed project collection");
            StoreError::LoadFailed(ApiError::invalid_response(e.to_string()))
        })?;

        debug!(count = collection.len(), "Loaded projects");
        self.projects = collection;
        self.publish();
        Ok(())
    }

    /// Persists a draft and appends what the remote returned.
    ///
    /// # Errors
    ///
    /// `StoreError::CreateFailed` if the request fails, the body is
    /// malformed, or the returned id already exists locally.
    pub async fn create(&mut self, draft: &ProjectDraft) -> Result<Project, StoreError> {
        let created = self.api.create(draft).await.map_err(|e| {
            error!(error = %e, title = %draft.title, "Failed to create project");
            StoreError::CreateFailed(e)
        })?;

        self.projects.push(created.clone()).map_err(|e| {
            error!(error = %e, "Remote returned an id that is already present");
            StoreError::CreateFailed(ApiError::invalid_response(e.to_string()))
        })?;

        debug!(id = %created.id, "Created project");
        self.publish();
        Ok(created)
    }

    /// Replaces the matching local entry, then sends the partial update.
    ///
    /// The local replacement is applied before the remote call and kept
    /// whatever its outcome. An unknown id leaves local state unchanged but
    /// the remote call is still made.
    ///
    /// # Errors
    ///
    /// `StoreError::UpdateFailed` if the remote write fails.
    pub async fn update(&mut self, changed: Project) -> Result<(), StoreError> {
        let id = changed.id.clone();
        let patch = changed.patch();

        if self.projects.replace(changed) {
            self.publish();
        } else {
            warn!(id = %id, "Update for a project not held locally");
        }

        match self.api.patch(&id, &patch).await {
            Ok(()) => {
                debug!(id = %id, "Updated project");
                Ok(())
            }
            Err(e) => {
                warn!(
                    id = %id,
                    error = %e,
                    rejected = e.is_remote_rejection(),
                    "Remote update failed; local state kept"
                );
                self.reconcile().await;
                Err(StoreError::UpdateFailed { id, source: e })
            }
        }
    }

    /// Drops the entry locally, then deletes it remotely.
    ///
    /// # Errors
    ///
    /// `StoreError::DeleteFailed` if the remote delete fails. The local
    /// removal is kept.
    pub async fn remove(&mut self, id: &ProjectId) -> Result<(), StoreError> {
        if self.projects.remove(id).is_some() {
            self.publish();
        }

        match self.api.delete(id).await {
            Ok(()) => {
                debug!(id = %id, "Deleted project");
                Ok(())
            }
            Err(e) => {
                warn!(
                    id = %id,
                    error = %e,
                    rejected = e.is_remote_rejection(),
                    "Remote delete failed; local state kept"
                );
                self.reconcile().await;
                Err(StoreError::DeleteFailed {
                    id: id.clone(),
                    source: e,
                })
            }
        }
    }

    /// Flips the favorite flag of a held project through `update`.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` without any remote call if the id is unknown,
    /// otherwise whatever `update` returns.
    pub async fn toggle_favorite(&mut self, id: &ProjectId) -> Result<(), StoreError> {
        let current = self
            .projects
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let favorite = !current.is_favorite();
        self.update(current.with_favorite(favorite)).await
    }

    async fn reconcile(&mut self) {
        if !self.options.reconcile_on_failure {
            return;
        }
        if let Err(e) = self.load().await {
            warn!(error = %e, "Reconciling reload failed");
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.projects.as_slice().to_vec());
    }
}
