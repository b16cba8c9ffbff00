use thiserror::Error;

use crate::remote::RemoteError;

/// The user-level action a store operation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    CreatePerson,
    RemovePerson,
    CreateDuaa,
    ToggleDuaa,
    EditDuaa,
    RemoveDuaa,
    ResetAll,
    CheckConnection,
}

impl Action {
    /// Short verb phrase, e.g. "add person".
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Load => "load data",
            Action::CreatePerson => "add person",
            Action::RemovePerson => "remove person",
            Action::CreateDuaa => "add duaa",
            Action::ToggleDuaa => "update duaa",
            Action::EditDuaa => "edit duaa",
            Action::RemoveDuaa => "remove duaa",
            Action::ResetAll => "reset duaas",
            Action::CheckConnection => "reach the remote store",
        }
    }
}

/// Failure of a synchronized store operation.
///
/// The snapshot is never modified when one of these is returned.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input rejected before any remote call
    #[error("{field} must not be empty")]
    EmptyInput { action: Action, field: &'static str },

    /// The remote call failed
    #[error("Failed to {}: {source}", .action.verb())]
    Remote {
        action: Action,
        #[source]
        source: RemoteError,
    },

    /// The store was closed before the operation started
    #[error("Store is closed")]
    Closed { action: Action },
}

impl StoreError {
    pub fn action(&self) -> Action {
        match self {
            StoreError::EmptyInput { action, .. }
            | StoreError::Remote { action, .. }
            | StoreError::Closed { action } => *action,
        }
    }

    /// The underlying remote failure, if any.
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            StoreError::Remote { source, .. } => Some(source),
            _ => None,
        }
    }
}
