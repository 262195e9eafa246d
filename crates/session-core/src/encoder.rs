//! Session payload encoders
//!
//! The store moves opaque bytes; how an entry list becomes bytes is decided
//! by a [`StateEncoder`].

use crate::entry::SessionEntry;
use crate::error::StoreResult;

/// Converts an ordered entry list to and from a byte payload
pub trait StateEncoder: Send + Sync {
    fn encode(&self, entries: &[SessionEntry]) -> StoreResult<Vec<u8>>;

    fn decode(&self, payload: &[u8]) -> StoreResult<Vec<SessionEntry>>;
}

/// JSON array encoding, `[{"key":..,"value":..},..]`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStateEncoder;

impl StateEncoder for JsonStateEncoder {
    fn encode(&self, entries: &[SessionEntry]) -> StoreResult<Vec<u8>> {
        Ok(serde_json::to_vec(entries)?)
    }

    fn decode(&self, payload: &[u8]) -> StoreResult<Vec<SessionEntry>> {
        Ok(serde_json::from_slice(payload)?)
    }
}
