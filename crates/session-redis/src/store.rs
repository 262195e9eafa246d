//! Redis-backed session store.
//!
//! Sessions live under `nablarch.session.<id>` as an encoded entry list with
//! a TTL refreshed on every save.

use std::sync::Arc;

use session_core::{session_key, JsonStateEncoder, SessionEntry, StateEncoder, StoreResult};

use crate::provider::SharedClient;

/// Default store name
pub const DEFAULT_STORE_NAME: &str = "redis";

/// Default session lifetime (30 minutes)
pub const DEFAULT_EXPIRES_SECONDS: u64 = 30 * 60;

/// Session store keeping entry lists in Redis
#[derive(Clone)]
pub struct RedisSessionStore {
    client: SharedClient,
    encoder: Arc<dyn StateEncoder>,
    name: String,
    expires_seconds: u64,
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("client_type", &self.client.client_type())
            .field("name", &self.name)
            .field("expires_seconds", &self.expires_seconds)
            .finish()
    }
}

impl RedisSessionStore {
    /// Create a store with the default name, lifetime and JSON encoding
    #[must_use]
    pub fn new(client: SharedClient) -> Self {
        Self {
            client,
            encoder: Arc::new(JsonStateEncoder),
            name: DEFAULT_STORE_NAME.to_string(),
            expires_seconds: DEFAULT_EXPIRES_SECONDS,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the session lifetime in seconds
    #[must_use]
    pub fn with_expires(mut self, expires_seconds: u64) -> Self {
        self.expires_seconds = expires_seconds;
        self
    }

    #[must_use]
    pub fn with_encoder(mut self, encoder: Arc<dyn StateEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Session lifetime in milliseconds, saturating at `i64::MAX`
    #[must_use]
    pub fn expires_millis(&self) -> i64 {
        i64::try_from(self.expires_seconds.saturating_mul(1000)).unwrap_or(i64::MAX)
    }

    /// Load a session's entries in saved order; empty when the session is absent
    pub async fn load(&self, session_id: &str) -> StoreResult<Vec<SessionEntry>> {
        let payload = self.client.get(&session_key(session_id)).await?;
        let entries = match payload {
            Some(bytes) => self.encoder.decode(&bytes)?,
            None => Vec::new(),
        };

        tracing::debug!(
            session_id = %session_id,
            entries = entries.len(),
            "Loaded session"
        );
        Ok(entries)
    }

    /// Save a session's entries and refresh its TTL.
    ///
    /// An absent or empty list deletes the session instead. The write and the
    /// TTL update are two separate commands: a concurrent save may land in
    /// between, and a crash in between leaves the key without a TTL.
    pub async fn save(&self, session_id: &str, entries: Option<&[SessionEntry]>) -> StoreResult<()> {
        let entries = match entries {
            Some(entries) if !entries.is_empty() => entries,
            _ => return self.delete(session_id).await,
        };

        let payload = self.encoder.encode(entries)?;
        self.client.set(&session_key(session_id), &payload).await?;
        self.client
            .pexpire(&session_key(session_id), self.expires_millis())
            .await?;

        tracing::debug!(
            session_id = %session_id,
            entries = entries.len(),
            bytes = payload.len(),
            "Saved session"
        );
        Ok(())
    }

    /// Remove a session
    pub async fn delete(&self, session_id: &str) -> StoreResult<()> {
        self.client.del(&session_key(session_id)).await?;
        tracing::debug!(session_id = %session_id, "Deleted session");
        Ok(())
    }

    /// Invalidate a session; same effect as [`delete`](Self::delete)
    pub async fn invalidate(&self, session_id: &str) -> StoreResult<()> {
        self.delete(session_id).await
    }
}
