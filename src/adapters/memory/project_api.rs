//! In-memory ProjectApi for testing.
//!
//! Behaves like a REST mock server: assigns ascending numeric ids on create,
//! answers 404 for unknown ids, and keeps the collection in insertion order.
//!
//! # Features
//!
//! - Seeded collection
//! - Error injection per operation (consumed in order)
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let api = InMemoryProjectApi::new()
//!     .with_projects(vec![project])
//!     .with_failure(ApiOperation::Patch, ApiError::status(500, "boom"));
//!
//! let store = ProjectStore::new(Arc::new(api.clone()));
//! // ...
//! assert_eq!(api.calls(), vec![ApiCall::List]);
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::foundation::ProjectId;
use crate::domain::project::{Project, ProjectDraft, ProjectPatch};
use crate::ports::{ApiError, ProjectApi};

/// Operations of the remote collection, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    List,
    Create,
    Patch,
    Delete,
}

/// A recorded call, including the payload it carried.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List,
    Create(ProjectDraft),
    Patch(ProjectId, ProjectPatch),
    Delete(ProjectId),
}

#[derive(Debug, Default)]
struct RemoteState {
    projects: Vec<Project>,
    next_id: u64,
    failures: HashMap<ApiOperation, VecDeque<ApiError>>,
    calls: Vec<ApiCall>,
}

impl RemoteState {
    fn take_failure(&mut self, operation: ApiOperation) -> Option<ApiError> {
        self.failures.get_mut(&operation)?.pop_front()
    }

    fn allocate_id(&mut self) -> ProjectId {
        let highest = self
            .projects
            .iter()
            .filter_map(|p| p.id.as_number())
            .max()
            .unwrap_or(0);
        self.next_id = self.next_id.max(highest) + 1;
        ProjectId::number(self.next_id)
    }

    fn position(&self, id: &ProjectId) -> Result<usize, ApiError> {
        self.projects
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| ApiError::status(404, "Not Found"))
    }
}

/// In-process stand-in for the remote project collection.
///
/// Clones share state, so a test can hand one clone to the store and keep
/// another for assertions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectApi {
    state: Arc<Mutex<RemoteState>>,
}

impl InMemoryProjectApi {
    /// Creates an empty remote collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the remote collection as-is (no id checks, so malformed
    /// collections can be simulated).
    pub fn with_projects(self, projects: Vec<Project>) -> Self {
        self.lock().projects = projects;
        self
    }

    /// Queues an error for the next call of `operation`.
    pub fn with_failure(self, operation: ApiOperation, error: ApiError) -> Self {
        self.fail_next(operation, error);
        self
    }

    /// Queues an error for the next call of `operation` on a shared handle.
    pub fn fail_next(&self, operation: ApiOperation, error: ApiError) {
        self.lock()
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// Current remote collection.
    pub fn projects(&self) -> Vec<Project> {
        self.lock().projects.clone()
    }

    /// Replaces the remote collection, as another client would.
    pub fn set_projects(&self, projects: Vec<Project>) {
        self.lock().projects = projects;
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, RemoteState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ProjectApi for InMemoryProjectApi {
    async fn list(&self) -> Result<Vec<Project>, ApiError> {
        let mut state = self.lock();
        state.calls.push(ApiCall::List);
        if let Some(err) = state.take_failure(ApiOperation::List) {
            return Err(err);
        }
        Ok(state.projects.clone())
    }

    async fn create(&self, draft: &ProjectDraft) -> Result<Project, ApiError> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Create(draft.clone()));
        if let Some(err) = state.take_failure(ApiOperation::Create) {
            return Err(err);
        }
        let id = state.allocate_id();
        let project = Project::from_draft(id, draft.clone());
        state.projects.push(project.clone());
        Ok(project)
    }

    async fn patch(&self, id: &ProjectId, patch: &ProjectPatch) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Patch(id.clone(), patch.clone()));
        if let Some(err) = state.take_failure(ApiOperation::Patch) {
            return Err(err);
        }
        let pos = state.position(id)?;
        patch.apply_to(&mut state.projects[pos]);
        Ok(())
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Delete(id.clone()));
        if let Some(err) = state.take_failure(ApiOperation::Delete) {
            return Err(err);
        }
        let pos = state.position(id)?;
        state.projects.remove(pos);
        Ok(())
    }
}
