//! Startup wiring.
//!
//! Builds every client variant from configuration, selects one by
//! `clientType`, opens it, and hands the same client to the store, the
//! expiration policy and the health probe. The result is immutable; the only
//! way to release the client is [`SessionComponents::shutdown`], which
//! consumes it.

use std::sync::Arc;

use session_common::{AppConfig, RedisConfig};
use session_core::StoreResult;

use crate::client::{ClusterRedisClient, MasterReplicaRedisClient, SimpleRedisClient};
use crate::expiration::RedisManagedExpiration;
use crate::health::RedisHealthChecker;
use crate::provider::{ClientProvider, SharedClient};
use crate::store::RedisSessionStore;

/// Session storage components sharing one initialized client
#[derive(Debug)]
pub struct SessionComponents {
    client: SharedClient,
    store: RedisSessionStore,
    expiration: RedisManagedExpiration,
    health: RedisHealthChecker,
}

/// Register all three variants, configured from `config`
pub fn provider_from_config(config: &RedisConfig) -> ClientProvider {
    let provider = ClientProvider::new()
        .register(Arc::new(
            SimpleRedisClient::new(config.uri.clone()).with_max_connections(config.max_connections),
        ))
        .register(Arc::new(MasterReplicaRedisClient::new(config.uri.clone())))
        .register(Arc::new(ClusterRedisClient::new(config.uri_list.clone())));

    match &config.client_type {
        Some(client_type) => provider.with_client_type(client_type.clone()),
        None => provider,
    }
}

impl SessionComponents {
    /// Select, initialize and wire the configured client
    pub async fn start(config: &AppConfig) -> StoreResult<Self> {
        Self::start_with(&provider_from_config(&config.redis), config).await
    }

    /// Same as [`start`](Self::start) with a caller-supplied provider
    pub async fn start_with(provider: &ClientProvider, config: &AppConfig) -> StoreResult<Self> {
        let client = provider.select()?;
        client.initialize().await?;

        let store = RedisSessionStore::new(client.clone())
            .with_name(config.session.name.clone())
            .with_expires(config.session.expires);
        let expiration = RedisManagedExpiration::new(client.clone());
        let health = RedisHealthChecker::new(client.clone())
            .with_name(config.health.name.clone())
            .with_key(config.health.key.clone());

        tracing::info!(
            client_type = %client.client_type(),
            store = %store.name(),
            expires_millis = store.expires_millis(),
            "Session components started"
        );

        Ok(Self {
            client,
            store,
            expiration,
            health,
        })
    }

    #[must_use]
    pub fn client(&self) -> &SharedClient {
        &self.client
    }

    #[must_use]
    pub fn store(&self) -> &RedisSessionStore {
        &self.store
    }

    #[must_use]
    pub fn expiration(&self) -> &RedisManagedExpiration {
        &self.expiration
    }

    #[must_use]
    pub fn health(&self) -> &RedisHealthChecker {
        &self.health
    }

    /// Release the client.
    ///
    /// Callers must stop issuing session operations first; clones of the
    /// store or policies taken earlier fail with `NotInitialized` afterwards.
    pub async fn shutdown(self) -> StoreResult<()> {
        self.client.shutdown().await?;
        tracing::info!("Session components shut down");
        Ok(())
    }
}
