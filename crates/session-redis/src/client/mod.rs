//! Redis client variants.
//!
//! Three topologies implement [`KeyValueClient`](session_core::KeyValueClient):
//!
//! | type tag          | struct                        | connection                      |
//! |-------------------|-------------------------------|---------------------------------|
//! | `"simple"`        | [`SimpleRedisClient`]         | deadpool-redis pool on one node |
//! | `"masterReplica"` | [`MasterReplicaRedisClient`]  | connection manager on the primary |
//! | `"cluster"`       | [`ClusterRedisClient`]        | cluster connection over all nodes |
//!
//! Each one opens its connection in `initialize` and releases it in
//! `shutdown`; commands in between are single round trips.

mod cluster;
mod commands;
mod master_replica;
mod simple;

pub use cluster::{ClusterRedisClient, CLUSTER_CLIENT_TYPE};
pub use master_replica::{MasterReplicaRedisClient, MASTER_REPLICA_CLIENT_TYPE};
pub use simple::{SimpleRedisClient, SIMPLE_CLIENT_TYPE};

use parking_lot::RwLock;
use session_core::{StoreError, StoreResult};

/// Holds the live connection between `initialize` and `shutdown`
pub(crate) struct ConnectionSlot<T> {
    client_type: &'static str,
    inner: RwLock<Option<T>>,
}

impl<T: Clone> ConnectionSlot<T> {
    pub(crate) fn new(client_type: &'static str) -> Self {
        Self {
            client_type,
            inner: RwLock::new(None),
        }
    }

    /// Clone the connection handle out; fails before `initialize`
    pub(crate) fn get(&self) -> StoreResult<T> {
        self.inner
            .read()
            .clone()
            .ok_or_else(|| StoreError::not_initialized(self.client_type))
    }

    pub(crate) fn ensure_empty(&self) -> StoreResult<()> {
        if self.inner.read().is_some() {
            return Err(StoreError::already_initialized(self.client_type));
        }
        Ok(())
    }

    pub(crate) fn install(&self, conn: T) -> StoreResult<()> {
        let mut slot = self.inner.write();
        if slot.is_some() {
            return Err(StoreError::already_initialized(self.client_type));
        }
        *slot = Some(conn);
        Ok(())
    }

    pub(crate) fn take(&self) -> StoreResult<T> {
        self.inner
            .write()
            .take()
            .ok_or_else(|| StoreError::not_initialized(self.client_type))
    }
}

/// Strip credentials from a Redis URI before logging it
pub(crate) fn redact_uri(uri: &str) -> String {
    match (uri.find("://"), uri.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}***@{}", &uri[..scheme_end + 3], &uri[at + 1..])
        }
        _ => uri.to_string(),
    }
}
