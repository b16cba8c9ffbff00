use crate::model::{DuaaId, Person, PersonId};
use crate::notice::Notice;
use crate::store::{find_duaa, PeopleStore};

use super::render::{render_people, render_person, render_status};
use super::Command;

/// What a command produced: text for stdout and at most one notice.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: Option<String>,
    pub notice: Option<Notice>,
}

impl Outcome {
    fn new(output: Option<String>, notice: Option<Notice>) -> Self {
        Self { output, notice }
    }

    fn output(output: String) -> Self {
        Self::new(Some(output), None)
    }

    fn notice(notice: Notice) -> Self {
        Self::new(None, Some(notice))
    }

    pub fn is_failure(&self) -> bool {
        self.notice.as_ref().is_some_and(Notice::is_error)
    }
}

impl From<Notice> for Outcome {
    fn from(notice: Notice) -> Self {
        Self::notice(notice)
    }
}

/// Load the snapshot, then run `command` against it.
pub async fn execute(store: &PeopleStore, command: &Command) -> Outcome {
    match run(store, command).await {
        Ok(outcome) => outcome,
        Err(notice) => notice.into(),
    }
}

async fn run(store: &PeopleStore, command: &Command) -> Result<Outcome, Notice> {
    if let Command::Status = command {
        store.check_connection().await?;
    }
    store.load().await?;

    match command {
        Command::List => {
            let people = store.filtered_people();
            Ok(Outcome::output(render_people(&people, &store.search_term())))
        }
        Command::Show(args) => {
            let person = resolve_person(store, &args.person)?;
            Ok(Outcome::output(render_person(&person)))
        }
        Command::AddPerson(args) => {
            let person = store.create_person(&args.name).await?;
            Ok(Outcome::notice(Notice::person_added(&person)))
        }
        Command::RemovePerson(args) => {
            let person = resolve_person(store, &args.person)?;
            store.remove_person(person.id).await?;
            Ok(Outcome::notice(Notice::person_removed()))
        }
        Command::Add(args) => {
            let person = resolve_person(store, &args.person)?;
            store.create_duaa(person.id, &args.text).await?;
            Ok(Outcome::new(show(store, person.id), Some(Notice::duaa_added())))
        }
        Command::Done(args) | Command::Undo(args) => {
            let done = matches!(command, Command::Done(_));
            let (person_id, duaa_id) = resolve_duaa(store, &args.person, &args.duaa)?;
            let duaa = store.toggle_duaa(person_id, duaa_id, done).await?;
            Ok(Outcome::new(show(store, person_id), Notice::duaa_toggled(&duaa)))
        }
        Command::Edit(args) => {
            let (person_id, duaa_id) = resolve_duaa(store, &args.person, &args.duaa)?;
            store.edit_duaa(person_id, duaa_id, &args.text).await?;
            Ok(Outcome::new(show(store, person_id), Some(Notice::duaa_edited())))
        }
        Command::Remove(args) => {
            let (person_id, duaa_id) = resolve_duaa(store, &args.person, &args.duaa)?;
            store.remove_duaa(person_id, duaa_id).await?;
            Ok(Outcome::new(show(store, person_id), Some(Notice::duaa_removed())))
        }
        Command::Reset => {
            let count = store.reset_all().await?;
            Ok(Outcome::notice(Notice::duaas_reset(count)))
        }
        Command::Status => Ok(Outcome::output(format!(
            "Connected\n{}",
            render_status(&store.snapshot())
        ))),
    }
}

fn show(store: &PeopleStore, person_id: PersonId) -> Option<String> {
    store.snapshot().person(person_id).map(render_person)
}

fn resolve_person(store: &PeopleStore, reference: &str) -> Result<Person, Notice> {
    store
        .snapshot()
        .find_person(reference)
        .cloned()
        .ok_or_else(|| Notice::error(format!("No person matches '{}'", reference)))
}

fn resolve_duaa(
    store: &PeopleStore,
    person_ref: &str,
    duaa_ref: &str,
) -> Result<(PersonId, DuaaId), Notice> {
    let person = resolve_person(store, person_ref)?;
    let duaa = find_duaa(&person, duaa_ref).ok_or_else(|| {
        Notice::error(format!(
            "{} has no duaa matching '{}'",
            person.name, duaa_ref
        ))
    })?;
    Ok((person.id, duaa.id))
}
