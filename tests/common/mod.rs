//! Shared test utilities and fakes.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use duaalist::model::{Duaa, DuaaId, DuaaPatch, Person, PersonId};
use duaalist::remote::{RemoteError, RemoteStore};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Remote operations the fake can be scripted around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    FetchAll,
    CreatePerson,
    DeletePerson,
    CreateDuaa,
    UpdateDuaa,
    DeleteDuaa,
    ResetDuaas,
    Ping,
}

#[derive(Default)]
struct FakeState {
    /// Newest first, matching the order the real store is queried in.
    people: Vec<(PersonId, String)>,
    duaas: Vec<Duaa>,
    failures: HashMap<Op, usize>,
    delays: HashMap<Op, Duration>,
    /// Applied after the result is computed, so the reply is stale on arrival.
    reply_delays: HashMap<Op, Duration>,
    /// Person deletes that remove the duaas and then fail.
    partial_cascades: usize,
    calls: Vec<Op>,
    ticks: i64,
}

impl FakeState {
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        DateTime::from_timestamp(1_700_000_000 + self.ticks, 0).unwrap_or_default()
    }

    fn person(&self, id: PersonId) -> Person {
        let name = self
            .people
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, name)| name.clone())
            .unwrap_or_default();
        Person {
            id,
            name,
            duaas: self
                .duaas
                .iter()
                .filter(|d| d.person_id == id)
                .cloned()
                .collect(),
        }
    }
}

/// In-memory remote store with failure injection and delays.
#[derive(Default)]
pub struct FakeRemote {
    state: Mutex<FakeState>,
}

impl FakeRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed_person(&self, name: &str) -> PersonId {
        let id = PersonId::new();
        self.state.lock().people.insert(0, (id, name.to_string()));
        id
    }

    pub fn seed_duaa(&self, person_id: PersonId, text: &str, is_done: bool) -> DuaaId {
        let mut state = self.state.lock();
        let duaa = Duaa {
            id: DuaaId::new(),
            person_id,
            text: text.to_string(),
            is_done,
            created_at: state.next_timestamp(),
        };
        let id = duaa.id;
        state.duaas.push(duaa);
        id
    }

    /// Make the next `times` calls of `op` fail after their delay.
    pub fn fail_next(&self, op: Op, times: usize) {
        *self.state.lock().failures.entry(op).or_default() += times;
    }

    pub fn delay(&self, op: Op, delay: Duration) {
        self.state.lock().delays.insert(op, delay);
    }

    /// Make the next `times` person deletes remove only the duaas.
    pub fn fail_after_cascade(&self, times: usize) {
        self.state.lock().partial_cascades += times;
    }

    /// Hold back the reply to `op` after its result has been taken.
    pub fn respond_after(&self, op: Op, delay: Duration) {
        self.state.lock().reply_delays.insert(op, delay);
    }

    pub fn calls(&self) -> Vec<Op> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self, op: Op) -> usize {
        self.state.lock().calls.iter().filter(|c| **c == op).count()
    }

    pub fn duaa(&self, id: DuaaId) -> Option<Duaa> {
        self.state.lock().duaas.iter().find(|d| d.id == id).cloned()
    }

    pub fn person_count(&self) -> usize {
        self.state.lock().people.len()
    }

    pub fn duaa_count(&self) -> usize {
        self.state.lock().duaas.len()
    }

    /// Change a row behind the store's back, as another client would.
    pub fn set_duaa_text(&self, id: DuaaId, text: &str) {
        if let Some(duaa) = self.state.lock().duaas.iter_mut().find(|d| d.id == id) {
            duaa.text = text.to_string();
        }
    }

    async fn reply<T>(&self, op: Op, value: T) -> T {
        let delay = self.state.lock().reply_delays.get(&op).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        value
    }

    async fn enter(&self, op: Op) -> Result<(), RemoteError> {
        let delay = {
            let mut state = self.state.lock();
            state.calls.push(op);
            state.delays.get(&op).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock();
        match state.failures.get_mut(&op) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                Err(injected_failure())
            }
            _ => Ok(()),
        }
    }
}

pub fn injected_failure() -> RemoteError {
    RemoteError::Upstream {
        status: 503,
        code: None,
        message: "injected failure".to_string(),
        details: None,
        hint: None,
    }
}

#[async_trait]
impl RemoteStore for FakeRemote {
    async fn fetch_all(&self) -> Result<Vec<Person>, RemoteError> {
        self.enter(Op::FetchAll).await?;
        let people: Vec<Person> = {
            let state = self.state.lock();
            state.people.iter().map(|(id, _)| state.person(*id)).collect()
        };
        Ok(self.reply(Op::FetchAll, people).await)
    }

    async fn create_person(&self, name: &str) -> Result<Person, RemoteError> {
        self.enter(Op::CreatePerson).await?;
        let id = self.seed_person(name);
        Ok(self.state.lock().person(id))
    }

    async fn delete_person(&self, id: PersonId) -> Result<PersonId, RemoteError> {
        self.enter(Op::DeletePerson).await?;
        let mut state = self.state.lock();
        state.duaas.retain(|d| d.person_id != id);
        if state.partial_cascades > 0 {
            state.partial_cascades -= 1;
            return Err(RemoteError::CascadeIncomplete {
                person_id: id,
                source: Box::new(injected_failure()),
            });
        }
        state.people.retain(|(pid, _)| *pid != id);
        Ok(id)
    }

    async fn create_duaa(&self, person_id: PersonId, text: &str) -> Result<Duaa, RemoteError> {
        self.enter(Op::CreateDuaa).await?;
        if !self.state.lock().people.iter().any(|(pid, _)| *pid == person_id) {
            return Err(RemoteError::Upstream {
                status: 409,
                code: Some("23503".to_string()),
                message: "violates foreign key constraint".to_string(),
                details: None,
                hint: None,
            });
        }
        let id = self.seed_duaa(person_id, text, false);
        self.duaa(id).ok_or_else(injected_failure)
    }

    async fn update_duaa(&self, id: DuaaId, patch: &DuaaPatch) -> Result<Duaa, RemoteError> {
        self.enter(Op::UpdateDuaa).await?;
        let mut state = self.state.lock();
        let duaa = state
            .duaas
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| RemoteError::NotFound {
                table: "duaas",
                id: id.to_string(),
            })?;
        if let Some(text) = &patch.text {
            duaa.text = text.clone();
        }
        if let Some(is_done) = patch.is_done {
            duaa.is_done = is_done;
        }
        Ok(duaa.clone())
    }

    async fn delete_duaa(&self, id: DuaaId) -> Result<DuaaId, RemoteError> {
        self.enter(Op::DeleteDuaa).await?;
        self.state.lock().duaas.retain(|d| d.id != id);
        Ok(id)
    }

    async fn reset_duaas(&self) -> Result<Vec<DuaaId>, RemoteError> {
        self.enter(Op::ResetDuaas).await?;
        let mut state = self.state.lock();
        let mut ids = Vec::new();
        for duaa in state.duaas.iter_mut().filter(|d| d.is_done) {
            duaa.is_done = false;
            ids.push(duaa.id);
        }
        Ok(ids)
    }

    async fn ping(&self) -> Result<(), RemoteError> {
        self.enter(Op::Ping).await
    }
}

/// Write `content` to a `config.toml` inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
