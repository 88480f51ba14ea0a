//! HTTP Project API - Implementation of ProjectApi over reqwest.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpProjectApiConfig::new("http://127.0.0.1:9393")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let api = HttpProjectApi::new(config)?;
//! let projects = api.list().await?;
//! ```
//!
//! No timeout is applied unless one is configured.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::domain::foundation::ProjectId;
use crate::domain::project::{Project, ProjectDraft, ProjectPatch};
use crate::ports::{ApiError, ProjectApi};

/// Configuration for the HTTP project API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpProjectApiConfig {
    /// Base address of the collaborator (the `/projects` path is appended).
    pub base_url: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl HttpProjectApiConfig {
    /// Creates a configuration for the given base address.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl From<&ApiConfig> for HttpProjectApiConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
        }
    }
}

/// ProjectApi backed by a REST collection resource.
pub struct HttpProjectApi {
    base_url: Url,
    timeout: Option<Duration>,
    client: Client,
}

impl HttpProjectApi {
    /// Creates the adapter, validating the base address.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the base URL does not parse, cannot
    /// carry a path, or the HTTP client cannot be built.
    pub fn new(config: HttpProjectApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Client(format!("invalid base URL '{}': {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Client(format!(
                "base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            base_url,
            timeout: config.timeout,
            client,
        })
    }

    /// `{base}/projects`
    fn collection_url(&self) -> Result<Url, ApiError> {
        self.build_url(None)
    }

    /// `{base}/projects/{id}`, id percent-encoded.
    fn item_url(&self, id: &ProjectId) -> Result<Url, ApiError> {
        self.build_url(Some(id))
    }

    fn build_url(&self, id: Option<&ProjectId>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::Client("base URL cannot carry a path".to_string()))?;
            segments.pop_if_empty().push("projects");
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        Ok(url)
    }

    /// Sends a request, translating transport failures.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        Self::check_status(response).await
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout {
                timeout_secs: self.timeout.map(|t| t.as_secs()).unwrap_or_default(),
            }
        } else if e.is_connect() {
            ApiError::network(format!("Connection failed: {}", e))
        } else {
            ApiError::network(e.to_string())
        }
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "Project API returned error status");
        Err(ApiError::status(status.as_u16(), body))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(format!("Failed to read body: {}", e)))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::parse(e.to_string()))
    }
}

#[async_trait]
impl ProjectApi for HttpProjectApi {
    async fn list(&self) -> Result<Vec<Project>, ApiError> {
        let url = self.collection_url()?;
        tracing::debug!(%url, "GET projects");

        let response = self.send(self.client.get(url)).await?;
        let projects: Vec<Project> = Self::read_json(response).await?;

        tracing::debug!(count = projects.len(), "Fetched projects");
        Ok(projects)
    }

    async fn create(&self, draft: &ProjectDraft) -> Result<Project, ApiError> {
        let url = self.collection_url()?;
        tracing::debug!(%url, title = %draft.title, "POST project");

        let response = self.send(self.client.post(url).json(draft)).await?;
        Self::read_json(response).await
    }

    async fn patch(&self, id: &ProjectId, patch: &ProjectPatch) -> Result<(), ApiError> {
        let url = self.item_url(id)?;
        tracing::debug!(%url, "PATCH project");

        self.send(self.client.patch(url).json(patch)).await?;
        Ok(())
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), ApiError> {
        let url = self.item_url(id)?;
        tracing::debug!(%url, "DELETE project");

        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
