//! Redis Cluster client.

use async_trait::async_trait;
use redis::cluster::ClusterClient;
use redis::cluster_async::ClusterConnection;
use session_core::{KeyValueClient, StoreError, StoreResult};

use super::{commands, redact_uri, ConnectionSlot};

/// Type tag of [`ClusterRedisClient`]
pub const CLUSTER_CLIENT_TYPE: &str = "cluster";

/// Connects to a Redis Cluster; commands are routed to the node owning
/// the key's slot.
pub struct ClusterRedisClient {
    uri_list: Vec<String>,
    connection: ConnectionSlot<ClusterConnection>,
}

impl std::fmt::Debug for ClusterRedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nodes: Vec<String> = self.uri_list.iter().map(|u| redact_uri(u)).collect();
        f.debug_struct("ClusterRedisClient")
            .field("uri_list", &nodes)
            .finish()
    }
}

impl ClusterRedisClient {
    /// Create a client from the URIs of the cluster's seed nodes
    #[must_use]
    pub fn new(uri_list: Vec<String>) -> Self {
        Self {
            uri_list,
            connection: ConnectionSlot::new(CLUSTER_CLIENT_TYPE),
        }
    }

    fn connection(&self) -> StoreResult<ClusterConnection> {
        self.connection.get()
    }
}

#[async_trait]
impl KeyValueClient for ClusterRedisClient {
    fn client_type(&self) -> &str {
        CLUSTER_CLIENT_TYPE
    }

    async fn initialize(&self) -> StoreResult<()> {
        self.connection.ensure_empty()?;
        if self.uri_list.is_empty() {
            return Err(StoreError::configuration(
                "uriList must contain at least one node",
            ));
        }

        let client = ClusterClient::new(self.uri_list.clone())?;
        let conn = client.get_async_connection().await?;
        self.connection.install(conn)?;

        tracing::info!(
            client_type = CLUSTER_CLIENT_TYPE,
            nodes = self.uri_list.len(),
            "Redis client initialized"
        );
        Ok(())
    }

    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        commands::set(&mut self.connection()?, key, value).await
    }

    async fn pexpire(&self, key: &str, milliseconds: i64) -> StoreResult<()> {
        commands::pexpire(&mut self.connection()?, key, milliseconds).await
    }

    async fn pexpireat(&self, key: &str, epoch_milliseconds: i64) -> StoreResult<()> {
        commands::pexpireat(&mut self.connection()?, key, epoch_milliseconds).await
    }

    async fn pttl(&self, key: &str) -> StoreResult<i64> {
        commands::pttl(&mut self.connection()?, key).await
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        commands::get(&mut self.connection()?, key).await
    }

    async fn del(&self, key: &str) -> StoreResult<()> {
        commands::del(&mut self.connection()?, key).await
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        commands::exists(&mut self.connection()?, key).await
    }

    async fn shutdown(&self) -> StoreResult<()> {
        drop(self.connection.take()?);
        tracing::info!(client_type = CLUSTER_CLIENT_TYPE, "Redis client shut down");
        Ok(())
    }
}
