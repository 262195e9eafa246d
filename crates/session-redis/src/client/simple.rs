//! Single-node client backed by a deadpool-redis pool.

use async_trait::async_trait;
use deadpool_redis::{Config, Connection, Pool, PoolError, Runtime};
use session_core::{KeyValueClient, StoreError, StoreResult};

use super::{commands, redact_uri, ConnectionSlot};

/// Type tag of [`SimpleRedisClient`]
pub const SIMPLE_CLIENT_TYPE: &str = "simple";

const DEFAULT_MAX_CONNECTIONS: usize = 16;

/// Connects directly to one Redis instance
pub struct SimpleRedisClient {
    uri: String,
    max_connections: usize,
    pool: ConnectionSlot<Pool>,
}

impl std::fmt::Debug for SimpleRedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleRedisClient")
            .field("uri", &redact_uri(&self.uri))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl SimpleRedisClient {
    /// Create a client for the given `redis://` URI
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            pool: ConnectionSlot::new(SIMPLE_CLIENT_TYPE),
        }
    }

    /// Set the maximum number of pooled connections
    #[must_use]
    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Current pool status, `None` before `initialize`
    #[must_use]
    pub fn status(&self) -> Option<deadpool_redis::Status> {
        self.pool.get().ok().map(|pool| pool.status())
    }

    async fn connection(&self) -> StoreResult<Connection> {
        let pool = self.pool.get()?;
        pool.get().await.map_err(pool_error)
    }
}

fn pool_error(err: PoolError) -> StoreError {
    match err {
        PoolError::Backend(e) => StoreError::Redis(e),
        other => StoreError::Pool(other.to_string()),
    }
}

#[async_trait]
impl KeyValueClient for SimpleRedisClient {
    fn client_type(&self) -> &str {
        SIMPLE_CLIENT_TYPE
    }

    async fn initialize(&self) -> StoreResult<()> {
        self.pool.ensure_empty()?;

        let pool = Config::from_url(&self.uri)
            .builder()
            .map_err(|e| StoreError::Pool(e.to_string()))?
            .max_size(self.max_connections)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| StoreError::Pool(e.to_string()))?;

        // Open one connection now so a bad URI fails at startup
        drop(pool.get().await.map_err(pool_error)?);

        self.pool.install(pool)?;
        tracing::info!(
            client_type = SIMPLE_CLIENT_TYPE,
            uri = %redact_uri(&self.uri),
            max_connections = self.max_connections,
            "Redis client initialized"
        );
        Ok(())
    }

    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        commands::set(&mut self.connection().await?, key, value).await
    }

    async fn pexpire(&self, key: &str, milliseconds: i64) -> StoreResult<()> {
        commands::pexpire(&mut self.connection().await?, key, milliseconds).await
    }

    async fn pexpireat(&self, key: &str, epoch_milliseconds: i64) -> StoreResult<()> {
        commands::pexpireat(&mut self.connection().await?, key, epoch_milliseconds).await
    }

    async fn pttl(&self, key: &str) -> StoreResult<i64> {
        commands::pttl(&mut self.connection().await?, key).await
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        commands::get(&mut self.connection().await?, key).await
    }

    async fn del(&self, key: &str) -> StoreResult<()> {
        commands::del(&mut self.connection().await?, key).await
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        commands::exists(&mut self.connection().await?, key).await
    }

    async fn shutdown(&self) -> StoreResult<()> {
        let pool = self.pool.take()?;
        pool.close();
        tracing::info!(client_type = SIMPLE_CLIENT_TYPE, "Redis client shut down");
        Ok(())
    }
}
