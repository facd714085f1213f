//! Remote data store access for the territory tracker.
//!
//! The hosted backend owns all durable state; this crate holds the client
//! side of it: the [`DataStore`] trait, the REST implementation, the
//! password-check auth gate, an in-memory store for tests, and the offline
//! response cache.

pub mod auth;
pub mod cache;
pub mod memory;
pub mod rest;
pub mod snapshot;
pub mod store;

pub use auth::Session;
pub use cache::{CACHE_VERSION, OfflineCache, Partition, Strategy};
pub use memory::MemoryStore;
pub use rest::RestStore;
pub use snapshot::Snapshot;
pub use store::{DataStore, PasswordGate};
