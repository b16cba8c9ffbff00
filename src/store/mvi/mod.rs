//! Model-View-Intent primitives for the snapshot.
//!
//! ```text
//! remote result ──→ Intent ──→ Reducer ──→ State ──→ subscribers
//! ```
//!
//! - **State**: Immutable value replaced wholesale on every transition
//! - **Intent**: A confirmed remote outcome to fold into the state
//! - **Reducer**: Pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::State;
