//! Key-value client contract
//!
//! The session store, the expiration policy and the health probe only talk to
//! the backing store through this trait. Implementations own exactly one
//! connection (or pool) to one topology.

use async_trait::async_trait;

use crate::error::StoreResult;

/// `pttl` reply for a key that exists but has no expiration
pub const TTL_NO_EXPIRE: i64 = -1;

/// `pttl` reply for a key that does not exist
pub const TTL_NOT_FOUND: i64 = -2;

/// Commands needed to store sessions, keyed by UTF-8 strings with
/// millisecond-resolution TTLs.
///
/// # Lifecycle
///
/// `initialize` must complete before any command is issued; commands on an
/// uninitialized client fail with [`StoreError::NotInitialized`]. `shutdown`
/// is called exactly once during teardown, after callers have stopped issuing
/// commands. Shutting down with requests still in flight is the caller's
/// responsibility to avoid.
///
/// # Errors
///
/// Every command fails with a connectivity error ([`StoreError::is_connectivity`])
/// when the backing store is unreachable or rejects the command. Nothing is
/// retried at this layer.
///
/// [`StoreError::NotInitialized`]: crate::StoreError::NotInitialized
/// [`StoreError::is_connectivity`]: crate::StoreError::is_connectivity
#[async_trait]
pub trait KeyValueClient: Send + Sync {
    /// Tag identifying the implementation, used for client selection
    fn client_type(&self) -> &str;

    /// Open the underlying connection
    async fn initialize(&self) -> StoreResult<()>;

    /// Store a value, overwriting any existing one
    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Set a relative expiration in milliseconds
    async fn pexpire(&self, key: &str, milliseconds: i64) -> StoreResult<()>;

    /// Set an absolute expiration as Unix epoch milliseconds
    async fn pexpireat(&self, key: &str, epoch_milliseconds: i64) -> StoreResult<()>;

    /// Remaining time to live in milliseconds.
    ///
    /// Returns [`TTL_NO_EXPIRE`] when the key has no expiration and
    /// [`TTL_NOT_FOUND`] when the key does not exist.
    async fn pttl(&self, key: &str) -> StoreResult<i64>;

    /// Fetch a value; `None` when the key does not exist
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Remove a key; removing a missing key is not an error
    async fn del(&self, key: &str) -> StoreResult<()>;

    /// Check whether a key exists
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Close the underlying connection
    async fn shutdown(&self) -> StoreResult<()>;
}

impl std::fmt::Debug for dyn KeyValueClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValueClient")
            .field("client_type", &self.client_type())
            .finish()
    }
}

/// Encode a key for the wire
#[must_use]
pub fn encode_key(key: &str) -> &[u8] {
    key.as_bytes()
}
