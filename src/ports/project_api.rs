//! ProjectApi port - Interface to the remote project collection.
//!
//! The remote collaborator owns the authoritative list of projects and
//! exposes it as a REST collection resource:
//!
//! ```text
//! GET    /projects        -> [Project]
//! POST   /projects        -> Project      (body: ProjectDraft)
//! PATCH  /projects/{id}   -> (ignored)    (body: ProjectPatch)
//! DELETE /projects/{id}   -> (ignored)
//! ```
//!
//! Each call is attempted exactly once; retries and reconciliation are the
//! caller's decision.

use async_trait::async_trait;

use crate::domain::foundation::ProjectId;
use crate::domain::project::{Project, ProjectDraft, ProjectPatch};

/// Port for the remote project collection.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// Fetch the full collection, in the collaborator's order.
    async fn list(&self) -> Result<Vec<Project>, ApiError>;

    /// Persist a draft and return the stored project with its assigned id.
    async fn create(&self, draft: &ProjectDraft) -> Result<Project, ApiError>;

    /// Send a partial update of the editable fields.
    async fn patch(&self, id: &ProjectId, patch: &ProjectPatch) -> Result<(), ApiError>;

    /// Delete a project.
    async fn delete(&self, id: &ProjectId) -> Result<(), ApiError>;
}

/// Remote collection errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Collaborator answered with a non-2xx status.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// Response body was not the expected JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// Response parsed but violates a collection invariant.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// HTTP client could not be built.
    #[error("client error: {0}")]
    Client(String),
}

impl ApiError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Whether the collaborator was reached but rejected or garbled the exchange.
    pub fn is_remote_rejection(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::Parse(_) | Self::InvalidResponse(_)
        )
    }
}
