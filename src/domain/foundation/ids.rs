//! Strongly-typed identifier value objects.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Identifier of a persisted project, assigned by the remote collection.
///
/// REST backends hand out either numeric (`7`) or textual (`"a1b2"`) ids.
/// Both are accepted and a numeric id is written back as a number, so the
/// value round-trips through the collaborator unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectId(RawId);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl ProjectId {
    /// Creates a numeric ProjectId.
    pub fn number(id: u64) -> Self {
        Self(RawId::Number(id))
    }

    /// Creates a textual ProjectId, returning error if blank.
    pub fn text(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("id"));
        }
        Ok(Self(RawId::Text(id)))
    }

    /// Returns the numeric value, if this id is numeric.
    pub fn as_number(&self) -> Option<u64> {
        match self.0 {
            RawId::Number(n) => Some(n),
            RawId::Text(_) => None,
        }
    }
}

impl From<u64> for ProjectId {
    fn from(id: u64) -> Self {
        Self::number(id)
    }
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(Self::number(n)),
            RawId::Text(s) => Self::text(s).map_err(serde::de::Error::custom),
        }
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            RawId::Number(n) => write!(f, "{}", n),
            RawId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Parses an id as it appears in a `/projects/{id}` path segment.
///
/// All-digit input parses as a numeric id, anything else as text.
impl FromStr for ProjectId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = s.parse::<u64>() {
                return Ok(Self::number(n));
            }
        }
        Self::text(s)
    }
}
