//! Remote access functions against the hosted people/duaas store.
//!
//! [`RemoteStore`] is the seam the synchronized store depends on;
//! [`RestClient`] implements it over PostgREST.

mod client;
mod error;
mod traits;

pub use client::RestClient;
pub use error::RemoteError;
pub use traits::RemoteStore;
