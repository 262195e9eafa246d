//! Primary/replica client.
//!
//! Given the URI of any node in a replicated setup, the client asks that node
//! for its replication role and, when it is a replica, follows it to the
//! primary. Every command is then sent to the primary over a
//! [`ConnectionManager`], which takes care of reconnecting.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{ConnectionAddr, ErrorKind, RedisError};
use session_core::{KeyValueClient, StoreError, StoreResult};

use super::{commands, redact_uri, ConnectionSlot};

/// Type tag of [`MasterReplicaRedisClient`]
pub const MASTER_REPLICA_CLIENT_TYPE: &str = "masterReplica";

/// Role reported by `INFO replication`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReplicationRole {
    Primary,
    Replica { host: String, port: u16 },
}

/// Parse the `INFO replication` section.
///
/// A reply without a usable role or primary address is a protocol error.
pub(crate) fn parse_replication_info(info: &str) -> StoreResult<ReplicationRole> {
    let field = |name: &str| {
        info.lines()
            .filter_map(|line| line.trim().split_once(':'))
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.trim())
    };

    match field("role") {
        Some("master") => Ok(ReplicationRole::Primary),
        Some("slave") => {
            let host = field("master_host")
                .ok_or_else(|| malformed_reply("replica did not report master_host"))?;
            let port = field("master_port")
                .and_then(|p| p.parse().ok())
                .ok_or_else(|| malformed_reply("replica did not report master_port"))?;
            Ok(ReplicationRole::Replica {
                host: host.to_string(),
                port,
            })
        }
        other => Err(malformed_reply(format!(
            "unexpected replication role: {}",
            other.unwrap_or("<missing>")
        ))),
    }
}

fn malformed_reply(detail: impl Into<String>) -> StoreError {
    StoreError::Redis(RedisError::from((
        ErrorKind::ResponseError,
        "Malformed INFO replication reply",
        detail.into(),
    )))
}

/// Point an address at another host, keeping TLS settings
fn retarget(addr: &mut ConnectionAddr, primary_host: &str, primary_port: u16) {
    match addr {
        ConnectionAddr::Tcp(host, port) | ConnectionAddr::TcpTls { host, port, .. } => {
            *host = primary_host.to_string();
            *port = primary_port;
        }
        other => *other = ConnectionAddr::Tcp(primary_host.to_string(), primary_port),
    }
}

/// Connects to the primary of a primary/replica deployment
pub struct MasterReplicaRedisClient {
    uri: String,
    connection: ConnectionSlot<ConnectionManager>,
}

impl std::fmt::Debug for MasterReplicaRedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterReplicaRedisClient")
            .field("uri", &redact_uri(&self.uri))
            .finish()
    }
}

impl MasterReplicaRedisClient {
    /// Create a client for the URI of any node in the deployment
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            connection: ConnectionSlot::new(MASTER_REPLICA_CLIENT_TYPE),
        }
    }

    async fn discover_primary(&self) -> StoreResult<redis::Client> {
        let seed = redis::Client::open(self.uri.as_str())?;
        let mut conn = seed.get_multiplexed_async_connection().await?;
        let info: String = redis::cmd("INFO")
            .arg("replication")
            .query_async(&mut conn)
            .await?;

        match parse_replication_info(&info)? {
            ReplicationRole::Primary => Ok(seed),
            ReplicationRole::Replica { host, port } => {
                tracing::debug!(
                    primary_host = %host,
                    primary_port = port,
                    "Seed node is a replica, following it to the primary"
                );
                let mut info = seed.get_connection_info().clone();
                retarget(&mut info.addr, &host, port);
                Ok(redis::Client::open(info)?)
            }
        }
    }

    fn connection(&self) -> StoreResult<ConnectionManager> {
        self.connection.get()
    }
}

#[async_trait]
impl KeyValueClient for MasterReplicaRedisClient {
    fn client_type(&self) -> &str {
        MASTER_REPLICA_CLIENT_TYPE
    }

    async fn initialize(&self) -> StoreResult<()> {
        self.connection.ensure_empty()?;

        let primary = self.discover_primary().await?;
        let manager = ConnectionManager::new(primary).await?;
        self.connection.install(manager)?;

        tracing::info!(
            client_type = MASTER_REPLICA_CLIENT_TYPE,
            uri = %redact_uri(&self.uri),
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
        // Dropping the last manager handle closes the connection
        drop(self.connection.take()?);
        tracing::info!(
            client_type = MASTER_REPLICA_CLIENT_TYPE,
            "Redis client shut down"
        );
        Ok(())
    }
}
