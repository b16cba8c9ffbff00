//! User-facing outcome messages.
//!
//! Store operations return values; the presentation layer turns those into
//! notices. Nothing in the store emits notices itself.

use std::fmt;

use crate::model::{Duaa, Person};
use crate::store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

impl NoticeLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        }
    }
}

/// A short message describing the outcome of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn person_added(person: &Person) -> Self {
        Self::success(format!("Added {}", person.name))
    }

    pub fn person_removed() -> Self {
        Self::success("Person removed")
    }

    pub fn duaa_added() -> Self {
        Self::success("Duaa added")
    }

    /// Only completing a duaa is announced; un-marking is silent.
    pub fn duaa_toggled(duaa: &Duaa) -> Option<Self> {
        duaa.is_done.then(|| Self::success("Duaa marked as complete"))
    }

    pub fn duaa_edited() -> Self {
        Self::success("Duaa updated")
    }

    pub fn duaa_removed() -> Self {
        Self::success("Duaa removed")
    }

    pub fn duaas_reset(count: usize) -> Self {
        if count == 0 {
            Self::info("No duaas to reset")
        } else {
            Self::success("All duaas reset")
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl From<&StoreError> for Notice {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::Remote { action, .. } => {
                Notice::error(format!("Failed to {}", action.verb()))
            }
            other => Notice::error(capitalize(&other.to_string())),
        }
    }
}

impl From<StoreError> for Notice {
    fn from(err: StoreError) -> Self {
        Notice::from(&err)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level.label(), self.message)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
