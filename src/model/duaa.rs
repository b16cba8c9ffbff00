use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PersonId;

/// Opaque identifier of a duaa row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DuaaId(Uuid);

impl DuaaId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for DuaaId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DuaaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single checklist item owned by a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duaa {
    pub id: DuaaId,
    pub person_id: PersonId,
    pub text: String,
    #[serde(default)]
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
}

impl Duaa {
    /// Case-insensitive substring match against the text.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.text.to_lowercase().contains(needle)
    }
}

/// Fields changed by an update. Absent fields are left untouched remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuaaPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
}

impl DuaaPatch {
    pub fn done(done: bool) -> Self {
        Self {
            is_done: Some(done),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.is_done.is_none()
    }
}
