//! Search-term view over the snapshot.

use crate::model::Person;

/// People whose name or any duaa text contains `term`, ignoring case.
///
/// An empty term returns every person. Snapshot order is preserved.
pub fn filter_people(people: &[Person], term: &str) -> Vec<Person> {
    if term.is_empty() {
        return people.to_vec();
    }
    let needle = term.to_lowercase();
    people
        .iter()
        .filter(|p| p.matches_lowercase(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Duaa, DuaaId, PersonId};
    use chrono::Utc;

    fn person(name: &str, texts: &[&str]) -> Person {
        let id = PersonId::new();
        Person {
            id,
            name: name.to_string(),
            duaas: texts
                .iter()
                .map(|t| Duaa {
                    id: DuaaId::new(),
                    person_id: id,
                    text: t.to_string(),
                    is_done: false,
                    created_at: Utc::now(),
                })
                .collect(),
        }
    }

    #[test]
    fn matches_duaa_text() {
        let people = vec![person("Omar", &["health"]), person("Sara", &["exam"])];
        let result = filter_people(&people, "heal");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Omar");
    }

    #[test]
    fn empty_term_returns_all_in_order() {
        let people = vec![person("Omar", &["health"]), person("Sara", &["exam"])];
        let result = filter_people(&people, "");
        assert_eq!(result, people);
    }

    #[test]
    fn match_is_case_insensitive() {
        let people = vec![person("Omar", &[]), person("Sara", &["Exam Success"])];
        assert_eq!(filter_people(&people, "OMAR")[0].name, "Omar");
        assert_eq!(filter_people(&people, "exam s")[0].name, "Sara");
    }

    #[test]
    fn no_match_returns_empty() {
        let people = vec![person("Omar", &["health"])];
        assert!(filter_people(&people, "zzz").is_empty());
    }
}
