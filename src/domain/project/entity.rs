//! Project entity, creation draft, and partial-update body.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{ProjectId, ValidationError};

/// Keys owned by the typed fields; never allowed in the opaque bag.
const RESERVED_KEYS: [&str; 4] = ["id", "title", "color", "favorite"];

fn check_extra_key(key: &str) -> Result<(), ValidationError> {
    if RESERVED_KEYS.contains(&key) {
        return Err(ValidationError::invalid_format(
            "extra",
            format!("reserved key '{}'", key),
        ));
    }
    Ok(())
}

/// A persisted project as held by the remote collection.
///
/// Fields the client does not know about are kept in `extra` and written
/// back verbatim, so a round-trip through the client never drops data.
/// Backends may leave `title`, `color` or `favorite` unset (missing or
/// `null`); such a field reads as empty or `false` and is written back as
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,

    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    color: Option<String>,

    #[serde(default)]
    favorite: Option<bool>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Project {
    /// Materializes a draft under an assigned id.
    pub fn from_draft(id: ProjectId, draft: ProjectDraft) -> Self {
        Self {
            id,
            title: Some(draft.title),
            color: Some(draft.color),
            favorite: Some(draft.favorite),
            extra: draft.extra,
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or_default()
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite.unwrap_or(false)
    }

    /// Fields outside the typed model, in wire order.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Returns a copy with a new title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns a copy with a new accent color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Returns a copy with the favorite flag set.
    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = Some(favorite);
        self
    }

    /// Returns a copy carrying an additional opaque field.
    ///
    /// Keys that collide with the typed fields are rejected.
    pub fn with_extra(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ValidationError> {
        let key = key.into();
        check_extra_key(&key)?;
        self.extra.insert(key, value.into());
        Ok(self)
    }

    /// The partial update body for this project's user-editable fields.
    pub fn patch(&self) -> ProjectPatch {
        ProjectPatch {
            favorite: self.favorite,
            title: self.title.clone(),
            color: self.color.clone(),
        }
    }
}

/// A project that has not been persisted yet (no id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub title: String,
    pub color: String,
    #[serde(default)]
    pub favorite: bool,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ProjectDraft {
    /// Creates a draft, rejecting a blank title.
    pub fn new(title: impl Into<String>, color: impl Into<String>) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        Ok(Self {
            title,
            color: color.into(),
            favorite: false,
            extra: Map::new(),
        })
    }

    /// Sets the favorite flag.
    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Adds an opaque field sent along with the draft.
    ///
    /// Keys that collide with the typed fields are rejected.
    pub fn with_extra(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ValidationError> {
        let key = key.into();
        check_extra_key(&key)?;
        self.extra.insert(key, value.into());
        Ok(self)
    }
}

/// Body of `PATCH /projects/{id}`.
///
/// Only the user-editable fields travel; key order is `favorite`, `title`,
/// `color`. An unset field is sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPatch {
    pub favorite: Option<bool>,
    pub title: Option<String>,
    pub color: Option<String>,
}

impl ProjectPatch {
    /// Applies the patch to a project, leaving id and extras untouched.
    pub fn apply_to(&self, project: &mut Project) {
        project.favorite = self.favorite;
        project.title = self.title.clone();
        project.color = self.color.clone();
    }
}
