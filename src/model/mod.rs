//! Domain records mirrored from the remote store.
//!
//! `Person` owns an ordered list of `Duaa` checklist items. Both carry
//! opaque UUID identifiers assigned by the remote store.

mod duaa;
mod person;

pub use duaa::{Duaa, DuaaId, DuaaPatch};
pub use person::{Person, PersonId, Progress};
