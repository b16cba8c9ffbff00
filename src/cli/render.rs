//! Plain-text views of the snapshot.

use std::fmt::Write;

use crate::model::{Person, Progress};
use crate::store::Snapshot;

const SHORT_ID_LEN: usize = 8;

/// One line per person: short id, name, and completion.
pub fn render_people(people: &[Person], search_term: &str) -> String {
    if people.is_empty() {
        return if search_term.is_empty() {
            "No people yet. Add one with `duaalist add-person <name>`.".to_string()
        } else {
            format!("No people match '{}'.", search_term)
        };
    }

    let width = people.iter().map(|p| p.name.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for person in people {
        let _ = writeln!(
            out,
            "{}  {:<width$}  {}",
            short_id(&person.id.to_string()),
            person.name,
            progress_label(&person.progress()),
            width = width
        );
    }
    out
}

/// A person's heading followed by their numbered duaas.
pub fn render_person(person: &Person) -> String {
    let mut out = format!(
        "{} ({})  {}\n",
        person.name,
        short_id(&person.id.to_string()),
        progress_label(&person.progress())
    );
    if person.duaas.is_empty() {
        out.push_str("  (no duaas)\n");
        return out;
    }
    for (index, duaa) in person.duaas.iter().enumerate() {
        let mark = if duaa.is_done { 'x' } else { ' ' };
        let _ = writeln!(out, "  {}. [{}] {}", index + 1, mark, duaa.text);
    }
    out
}

pub fn render_status(snapshot: &Snapshot) -> String {
    let progress = snapshot.progress();
    format!(
        "People: {}\nDuaas:  {}/{} complete ({}%)\n",
        snapshot.len(),
        progress.completed,
        progress.total,
        progress.percent()
    )
}

fn progress_label(progress: &Progress) -> String {
    if progress.total == 0 {
        return "no duaas".to_string();
    }
    format!("{}/{}", progress.completed, progress.total)
}

fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}
