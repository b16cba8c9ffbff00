use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Duaa, DuaaId};

/// Opaque identifier of a person row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(Uuid);

impl PersonId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A tracked person and their checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    /// Embedded child rows. Absent when the row came from a plain insert.
    #[serde(default)]
    pub duaas: Vec<Duaa>,
}

impl Person {
    pub fn duaa(&self, id: DuaaId) -> Option<&Duaa> {
        self.duaas.iter().find(|d| d.id == id)
    }

    /// Completion summary of this person's checklist.
    pub fn progress(&self) -> Progress {
        Progress::of(&self.duaas)
    }

    /// True when the name or any duaa text contains `needle`.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.duaas.iter().any(|d| d.matches_lowercase(needle))
    }
}

/// Done/total counts for a list of duaas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
}

impl Progress {
    pub fn of<'a>(duaas: impl IntoIterator<Item = &'a Duaa>) -> Self {
        duaas.into_iter().fold(Self::default(), |acc, d| Self {
            total: acc.total + 1,
            completed: acc.completed + usize::from(d.is_done),
        })
    }

    pub fn remaining(&self) -> usize {
        self.total - self.completed
    }

    /// Rounded completion percentage; 0 for an empty list.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed as f64 / self.total as f64) * 100.0).round() as u8
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}
