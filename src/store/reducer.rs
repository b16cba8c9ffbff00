use std::collections::HashSet;

use crate::model::{Person, PersonId};

use super::intent::SnapshotIntent;
use super::mvi::Reducer;
use super::snapshot::Snapshot;

pub struct SnapshotReducer;

impl Reducer for SnapshotReducer {
    type State = Snapshot;
    type Intent = SnapshotIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SnapshotIntent::Loaded(people) => Snapshot::new(people),
            SnapshotIntent::PersonCreated(person) => {
                let mut people = Vec::with_capacity(state.len() + 1);
                people.push(person);
                people.extend(state.into_people());
                Snapshot::new(people)
            }
            SnapshotIntent::PersonRemoved(id) => {
                let mut people = state.into_people();
                people.retain(|p| p.id != id);
                // A duaa whose owner is gone must not survive anywhere.
                for person in &mut people {
                    person.duaas.retain(|d| d.person_id != id);
                }
                Snapshot::new(people)
            }
            SnapshotIntent::PersonDuaasCleared(id) => {
                update_person(state, id, |person| person.duaas.clear())
            }
            SnapshotIntent::DuaaCreated { person_id, duaa } => {
                update_person(state, person_id, |person| person.duaas.push(duaa))
            }
            SnapshotIntent::DuaaReplaced { person_id, duaa } => {
                update_person(state, person_id, |person| {
                    if let Some(slot) = person.duaas.iter_mut().find(|d| d.id == duaa.id) {
                        *slot = duaa;
                    }
                })
            }
            SnapshotIntent::DuaaRemoved { person_id, duaa_id } => {
                update_person(state, person_id, |person| {
                    person.duaas.retain(|d| d.id != duaa_id)
                })
            }
            SnapshotIntent::DuaasReset(ids) => {
                let ids: HashSet<_> = ids.into_iter().collect();
                let mut people = state.into_people();
                for duaa in people.iter_mut().flat_map(|p| p.duaas.iter_mut()) {
                    if ids.contains(&duaa.id) {
                        duaa.is_done = false;
                    }
                }
                Snapshot::new(people)
            }
        }
    }
}

/// Apply `change` to the person with `id`; other people are left as-is.
/// Unknown ids leave the snapshot unchanged.
fn update_person(state: Snapshot, id: PersonId, change: impl FnOnce(&mut Person)) -> Snapshot {
    let mut people = state.into_people();
    if let Some(person) = people.iter_mut().find(|p| p.id == id) {
        change(person);
    }
    Snapshot::new(people)
}
