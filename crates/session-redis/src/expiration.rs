//! Session expiration tracked through key presence.
//!
//! A session is alive exactly while its key exists; the payload is never
//! read. When no payload has been stored yet, an empty marker value is
//! written so the key can carry the expiration.

use session_core::{session_key, StoreResult};

use crate::provider::SharedClient;

/// Expiration policy that lets Redis TTLs decide session liveness
#[derive(Clone)]
pub struct RedisManagedExpiration {
    client: SharedClient,
}

impl std::fmt::Debug for RedisManagedExpiration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisManagedExpiration")
            .field("client_type", &self.client.client_type())
            .finish()
    }
}

impl RedisManagedExpiration {
    #[must_use]
    pub fn new(client: SharedClient) -> Self {
        Self { client }
    }

    /// Whether the session has expired, i.e. its key is gone.
    ///
    /// `current_millis` is not consulted; Redis has already applied the TTL.
    pub async fn is_expired(&self, session_id: &str, _current_millis: i64) -> StoreResult<bool> {
        Ok(!self.exists_session(session_id).await?)
    }

    /// Set the session's absolute expiration (Unix epoch milliseconds).
    ///
    /// Writes an empty marker first if the key does not exist. Existence
    /// check, marker write and expiration are separate commands with no
    /// transaction around them.
    pub async fn save_expiration_date_time(
        &self,
        session_id: &str,
        expiration_millis: i64,
    ) -> StoreResult<()> {
        let key = session_key(session_id);
        if !self.exists_session(session_id).await? {
            self.client.set(&key, &[]).await?;
        }
        self.client.pexpireat(&key, expiration_millis).await?;

        tracing::debug!(
            session_id = %session_id,
            expiration_millis,
            "Saved session expiration"
        );
        Ok(())
    }

    /// Whether expiration can be determined, i.e. the key exists
    pub async fn is_determinable(&self, session_id: &str) -> StoreResult<bool> {
        self.exists_session(session_id).await
    }

    async fn exists_session(&self, session_id: &str) -> StoreResult<bool> {
        self.client.exists(&session_key(session_id)).await
    }
}
