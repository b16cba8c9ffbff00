//! The synchronized people/duaas store.
//!
//! Owns the canonical snapshot and keeps it consistent with the remote
//! store. Every mutation is confirm-then-apply: the remote call completes
//! first, and only a successful result is folded into the snapshot.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;

use crate::model::{Duaa, DuaaId, DuaaPatch, Person, PersonId};
use crate::remote::{RemoteError, RemoteStore};

use super::error::{Action, StoreError};
use super::intent::SnapshotIntent;
use super::locks::EntityLocks;
use super::mvi::Reducer;
use super::reducer::SnapshotReducer;
use super::snapshot::Snapshot;

/// Shared handle to the synchronized store.
///
/// Cloning is cheap; all clones refer to the same snapshot. Construct one
/// per application instance and pass it to whatever needs it.
#[derive(Clone)]
pub struct PeopleStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    remote: Arc<dyn RemoteStore>,
    /// Holds the current snapshot; replaced atomically on every change.
    snapshot: watch::Sender<Arc<Snapshot>>,
    search_term: RwLock<String>,
    /// Number of loads in flight.
    loading: AtomicUsize,
    closed: AtomicBool,
    /// Bumped by every applied mutation; a load fetched under an older
    /// value is stale.
    generation: AtomicU64,
    duaa_locks: EntityLocks<DuaaId>,
}

/// Decrements the in-flight load counter even if the load future is dropped.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl PeopleStore {
    /// Create an empty store backed by `remote`.
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Snapshot::default()));
        Self {
            inner: Arc::new(StoreInner {
                remote,
                snapshot,
                search_term: RwLock::new(String::new()),
                loading: AtomicUsize::new(0),
                closed: AtomicBool::new(false),
                generation: AtomicU64::new(0),
                duaa_locks: EntityLocks::new(),
            }),
        }
    }

    // ==================== READS ====================

    /// The current snapshot. Never observes a half-applied mutation.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.snapshot.borrow().clone()
    }

    /// People in snapshot order.
    pub fn people(&self) -> Vec<Person> {
        self.snapshot().people().to_vec()
    }

    /// Receive every newly published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.inner.snapshot.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst) > 0
    }

    pub fn search_term(&self) -> String {
        self.inner.search_term.read().clone()
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        *self.inner.search_term.write() = term.into();
    }

    /// People matching the current search term, recomputed on every call.
    pub fn filtered_people(&self) -> Vec<Person> {
        let term = self.search_term();
        self.snapshot().filtered(&term)
    }

    // ==================== LIFECYCLE ====================

    /// Stop applying results. Calls still in flight complete, but their
    /// results are discarded; new operations fail with `Closed`.
    pub fn close(&self) {
        if !self.inner.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!("People store closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    // ==================== OPERATIONS ====================

    /// Replace the snapshot with a full fetch. Returns the number of people.
    ///
    /// A fetch overtaken by a mutation confirmed while it was in flight is
    /// dropped, and the current snapshot is kept.
    pub async fn load(&self) -> Result<usize, StoreError> {
        let action = Action::Load;
        self.ensure_open(action)?;

        let started = self.inner.generation.load(Ordering::SeqCst);
        let people = {
            let _loading = LoadingGuard::enter(&self.inner.loading);
            self.inner.remote.fetch_all().await
        }
        .map_err(|e| remote_failure(action, e))?;

        let fetched = people.len();
        if self.commit(SnapshotIntent::Loaded(people), Some(started)) {
            tracing::info!(people = fetched, "Snapshot loaded");
        } else {
            tracing::debug!(people = fetched, "Discarding stale load");
        }
        Ok(self.snapshot().len())
    }

    /// Add a person; on success it becomes the first entry.
    pub async fn create_person(&self, name: &str) -> Result<Person, StoreError> {
        let action = Action::CreatePerson;
        self.ensure_open(action)?;
        let name = require_text(action, "name", name)?;

        let person = self
            .inner
            .remote
            .create_person(name)
            .await
            .map_err(|e| remote_failure(action, e))?;

        self.apply(SnapshotIntent::PersonCreated(person.clone()));
        tracing::info!(person_id = %person.id, "Person created");
        Ok(person)
    }

    /// Delete a person and, with it, every duaa it owns.
    ///
    /// The remote call is made even if the person is not in the snapshot.
    /// If only the duaas could be deleted, the person stays with an empty
    /// list and the error is returned.
    pub async fn remove_person(&self, id: PersonId) -> Result<PersonId, StoreError> {
        let action = Action::RemovePerson;
        self.ensure_open(action)?;

        let id = match self.inner.remote.delete_person(id).await {
            Ok(id) => id,
            Err(err) => {
                if let RemoteError::CascadeIncomplete { person_id, .. } = &err {
                    self.apply(SnapshotIntent::PersonDuaasCleared(*person_id));
                }
                return Err(remote_failure(action, err));
            }
        };

        self.apply(SnapshotIntent::PersonRemoved(id));
        tracing::info!(person_id = %id, "Person removed");
        Ok(id)
    }

    /// Add a duaa; on success it becomes the person's last entry.
    pub async fn create_duaa(&self, person_id: PersonId, text: &str) -> Result<Duaa, StoreError> {
        let action = Action::CreateDuaa;
        self.ensure_open(action)?;
        let text = require_text(action, "text", text)?;

        let duaa = self
            .inner
            .remote
            .create_duaa(person_id, text)
            .await
            .map_err(|e| remote_failure(action, e))?;

        self.apply(SnapshotIntent::DuaaCreated {
            person_id,
            duaa: duaa.clone(),
        });
        tracing::info!(person_id = %person_id, duaa_id = %duaa.id, "Duaa created");
        Ok(duaa)
    }

    /// Mark a duaa done or not done.
    pub async fn toggle_duaa(
        &self,
        person_id: PersonId,
        duaa_id: DuaaId,
        done: bool,
    ) -> Result<Duaa, StoreError> {
        self.update_duaa(Action::ToggleDuaa, person_id, duaa_id, DuaaPatch::done(done))
            .await
    }

    /// Replace a duaa's text.
    pub async fn edit_duaa(
        &self,
        person_id: PersonId,
        duaa_id: DuaaId,
        new_text: &str,
    ) -> Result<Duaa, StoreError> {
        let action = Action::EditDuaa;
        let text = require_text(action, "text", new_text)?;
        self.update_duaa(action, person_id, duaa_id, DuaaPatch::text(text))
            .await
    }

    pub async fn remove_duaa(&self, person_id: PersonId, duaa_id: DuaaId) -> Result<DuaaId, StoreError> {
        let action = Action::RemoveDuaa;
        self.ensure_open(action)?;
        let _entity = self.inner.duaa_locks.acquire(duaa_id).await;

        let duaa_id = self
            .inner
            .remote
            .delete_duaa(duaa_id)
            .await
            .map_err(|e| remote_failure(action, e))?;

        self.apply(SnapshotIntent::DuaaRemoved { person_id, duaa_id });
        tracing::info!(person_id = %person_id, duaa_id = %duaa_id, "Duaa removed");
        Ok(duaa_id)
    }

    /// Mark every done duaa as not done. Returns how many were reset.
    ///
    /// The rows the remote reports as changed are updated in place.
    pub async fn reset_all(&self) -> Result<usize, StoreError> {
        let action = Action::ResetAll;
        self.ensure_open(action)?;

        let ids = self
            .inner
            .remote
            .reset_duaas()
            .await
            .map_err(|e| remote_failure(action, e))?;

        let reset = ids.len();
        self.apply(SnapshotIntent::DuaasReset(ids));
        tracing::info!(reset, "Duaas reset");
        Ok(reset)
    }

    /// Check that the remote store is reachable with the configured key.
    pub async fn check_connection(&self) -> Result<(), StoreError> {
        let action = Action::CheckConnection;
        self.ensure_open(action)?;
        self.inner
            .remote
            .ping()
            .await
            .map_err(|e| remote_failure(action, e))
    }

    // ==================== INTERNALS ====================

    async fn update_duaa(
        &self,
        action: Action,
        person_id: PersonId,
        duaa_id: DuaaId,
        patch: DuaaPatch,
    ) -> Result<Duaa, StoreError> {
        self.ensure_open(action)?;
        let _entity = self.inner.duaa_locks.acquire(duaa_id).await;

        let duaa = self
            .inner
            .remote
            .update_duaa(duaa_id, &patch)
            .await
            .map_err(|e| remote_failure(action, e))?;

        // The server record is authoritative for every field, not just the
        // ones in `patch`.
        self.apply(SnapshotIntent::DuaaReplaced {
            person_id,
            duaa: duaa.clone(),
        });
        tracing::info!(person_id = %person_id, duaa_id = %duaa.id, is_done = duaa.is_done, "Duaa updated");
        Ok(duaa)
    }

    fn ensure_open(&self, action: Action) -> Result<(), StoreError> {
        if self.is_closed() {
            return Err(StoreError::Closed { action });
        }
        Ok(())
    }

    /// Fold a confirmed mutation into the snapshot.
    fn apply(&self, intent: SnapshotIntent) {
        self.commit(intent, None);
    }

    /// Fold a confirmed result into the snapshot. Returns false if it was
    /// discarded.
    ///
    /// `fetched_at` is the generation a load started under; the load is
    /// discarded if a mutation has been applied since. Subscribers are only
    /// notified when the snapshot actually changed.
    fn commit(&self, intent: SnapshotIntent, fetched_at: Option<u64>) -> bool {
        if self.is_closed() {
            tracing::debug!(?intent, "Store closed; discarding late result");
            return false;
        }
        let generation = &self.inner.generation;
        let mut committed = true;
        self.inner.snapshot.send_if_modified(|current| {
            match fetched_at {
                Some(started) if started != generation.load(Ordering::SeqCst) => {
                    committed = false;
                    return false;
                }
                Some(_) => {}
                None => {
                    generation.fetch_add(1, Ordering::SeqCst);
                }
            }
            let next = SnapshotReducer::reduce(Snapshot::clone(current), intent);
            if next == **current {
                return false;
            }
            *current = Arc::new(next);
            true
        });
        committed
    }
}

fn remote_failure(action: Action, source: RemoteError) -> StoreError {
    tracing::warn!(
        action = action.verb(),
        error_type = source.error_type(),
        error = %source,
        "Remote operation failed; snapshot unchanged"
    );
    StoreError::Remote { action, source }
}

fn require_text<'a>(action: Action, field: &'static str, value: &'a str) -> Result<&'a str, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyInput { action, field });
    }
    Ok(trimmed)
}
