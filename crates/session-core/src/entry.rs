//! Session entries

use serde::{Deserialize, Serialize};

/// One named value held by a session.
///
/// A session is an ordered list of entries; stores must hand the list back
/// in the order it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub key: String,
    pub value: serde_json::Value,
}

impl SessionEntry {
    /// Create a new entry
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
