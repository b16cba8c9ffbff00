//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents here are only ever built from results the remote store has
/// already confirmed.
pub trait Intent: Send + 'static {}
