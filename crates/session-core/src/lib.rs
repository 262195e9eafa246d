//! # session-core
//!
//! Contracts shared by the session storage crates: the key-value client
//! trait, session entries, payload encoders, key derivation and errors.

pub mod client;
pub mod encoder;
pub mod entry;
pub mod error;
pub mod key;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{encode_key, KeyValueClient, TTL_NOT_FOUND, TTL_NO_EXPIRE};
pub use encoder::{JsonStateEncoder, StateEncoder};
pub use entry::SessionEntry;
pub use error::{StoreError, StoreResult};
pub use key::{session_key, SESSION_KEY_PREFIX};
