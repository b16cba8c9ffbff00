//! Immutable mirror of the remote people/duaas tables.

use crate::model::{Duaa, DuaaId, Person, PersonId, Progress};

use super::filter::filter_people;
use super::mvi::State;

/// The canonical in-memory snapshot.
///
/// A snapshot is never mutated once published; every confirmed change
/// produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    people: Vec<Person>,
}

impl State for Snapshot {}

impl Snapshot {
    pub fn new(people: Vec<Person>) -> Self {
        Self { people }
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub(crate) fn into_people(self) -> Vec<Person> {
        self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn duaa(&self, person_id: PersonId, duaa_id: DuaaId) -> Option<&Duaa> {
        self.person(person_id).and_then(|p| p.duaa(duaa_id))
    }

    /// Every duaa in the snapshot, in person then list order.
    pub fn duaas(&self) -> impl Iterator<Item = &Duaa> {
        self.people.iter().flat_map(|p| p.duaas.iter())
    }

    /// People matching `term`; see [`filter_people`].
    pub fn filtered(&self, term: &str) -> Vec<Person> {
        filter_people(&self.people, term)
    }

    /// Completion summary across all people.
    pub fn progress(&self) -> Progress {
        Progress::of(self.duaas())
    }

    /// Resolve a user-supplied reference to a person.
    ///
    /// Tries, in order: full id, case-insensitive exact name, unique id
    /// prefix. Ambiguous prefixes resolve to nothing.
    pub fn find_person(&self, reference: &str) -> Option<&Person> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        if let Some(p) = self.people.iter().find(|p| p.id.to_string() == reference) {
            return Some(p);
        }
        let lowered = reference.to_lowercase();
        if let Some(p) = self.people.iter().find(|p| p.name.to_lowercase() == lowered) {
            return Some(p);
        }
        unique(self.people.iter().filter(|p| p.id.to_string().starts_with(&lowered)))
    }
}

/// Resolve a user-supplied reference to one of `person`'s duaas.
///
/// Accepts a full id, a 1-based position, or a unique id prefix. A number
/// outside the list is tried as an id prefix.
pub fn find_duaa<'a>(person: &'a Person, reference: &str) -> Option<&'a Duaa> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    if let Some(d) = person.duaas.iter().find(|d| d.id.to_string() == reference) {
        return Some(d);
    }
    let by_position = reference
        .parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(|i| person.duaas.get(i));
    if by_position.is_some() {
        return by_position;
    }
    let lowered = reference.to_lowercase();
    unique(person.duaas.iter().filter(|d| d.id.to_string().starts_with(&lowered)))
}

fn unique<T>(mut matches: impl Iterator<Item = T>) -> Option<T> {
    let first = matches.next()?;
    match matches.next() {
        Some(_) => None,
        None => Some(first),
    }
}
