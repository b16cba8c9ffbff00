use crate::model::{Duaa, DuaaId, Person, PersonId};

use super::mvi::Intent;

/// A confirmed remote outcome to fold into the snapshot.
#[derive(Debug, Clone)]
pub enum SnapshotIntent {
    /// Full reload; replaces everything.
    Loaded(Vec<Person>),
    /// Prepended: most recent first.
    PersonCreated(Person),
    /// Removes the person together with all of its duaas.
    PersonRemoved(PersonId),
    /// The person stays; its duaas are gone.
    PersonDuaasCleared(PersonId),
    /// Appended to the owning person's list.
    DuaaCreated { person_id: PersonId, duaa: Duaa },
    /// Server record replaces the local one in place, matched by id.
    DuaaReplaced { person_id: PersonId, duaa: Duaa },
    DuaaRemoved { person_id: PersonId, duaa_id: DuaaId },
    /// Listed duaas become not done, wherever they are.
    DuaasReset(Vec<DuaaId>),
}

impl Intent for SnapshotIntent {}
