//! The seam between the synchronized store and the hosted backend.

use async_trait::async_trait;

use super::error::RemoteError;
use crate::model::{Duaa, DuaaId, DuaaPatch, Person, PersonId};

/// Remote access functions.
///
/// Each method performs one remote operation and returns the affected
/// record(s). Implementations never touch local state and never retry.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Load every person with their duaas embedded.
    async fn fetch_all(&self) -> Result<Vec<Person>, RemoteError>;

    /// Insert a person. The returned person has an empty `duaas` list.
    async fn create_person(&self, name: &str) -> Result<Person, RemoteError>;

    /// Delete a person. The person's duaas are removed with it.
    ///
    /// `CascadeIncomplete` means the duaas are gone but the person is not.
    async fn delete_person(&self, id: PersonId) -> Result<PersonId, RemoteError>;

    /// Insert a duaa with `is_done = false`.
    async fn create_duaa(&self, person_id: PersonId, text: &str) -> Result<Duaa, RemoteError>;

    /// Apply `patch` and return the full updated row.
    async fn update_duaa(&self, id: DuaaId, patch: &DuaaPatch) -> Result<Duaa, RemoteError>;

    async fn delete_duaa(&self, id: DuaaId) -> Result<DuaaId, RemoteError>;

    /// Mark every done duaa as not done. Returns the ids of the rows that
    /// changed.
    async fn reset_duaas(&self) -> Result<Vec<DuaaId>, RemoteError>;

    /// Check that the store is reachable and accepts the access key.
    async fn ping(&self) -> Result<(), RemoteError>;
}
