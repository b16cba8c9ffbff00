//! Synchronized state store.
//!
//! [`PeopleStore`] mirrors the remote people/duaas tables. Remote outcomes
//! flow through [`SnapshotReducer`] as [`SnapshotIntent`]s; readers only
//! ever see whole [`Snapshot`] values.

mod error;
mod filter;
mod intent;
mod locks;
pub mod mvi;
mod reducer;
mod snapshot;
mod state;

pub use error::{Action, StoreError};
pub use filter::filter_people;
pub use intent::SnapshotIntent;
pub use reducer::SnapshotReducer;
pub use snapshot::{find_duaa, Snapshot};
pub use state::PeopleStore;
