//! Storage layer for the Nexa session core
//!
//! This crate provides the two pieces of local persistence the session core
//! needs: an OS-protected secret store holding the single bearer token, and a
//! plain key-value store for device-level preferences.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod prefs;
pub mod secrets;

pub use kv::{KvConfig, KvError, KvStore};
pub use prefs::Prefs;
pub use secrets::{KeyringStore, MemoryStore, SecretStore, SecretStoreError};
