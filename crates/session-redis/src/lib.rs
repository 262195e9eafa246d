//! # session-redis
//!
//! Redis-backed session storage.
//!
//! ## Features
//!
//! - **Client variants**: single node, primary/replica and cluster topologies
//!   behind one [`KeyValueClient`](session_core::KeyValueClient) contract
//! - **Client selection**: pick the configured variant by type tag at startup
//! - **Session store**: ordered entry lists under namespaced keys with a TTL
//! - **Managed expiration**: session liveness decided by key presence
//! - **Health probe**: one `EXISTS` round trip, errors reported as unhealthy
//!
//! ## Example
//!
//! ```ignore
//! use session_common::AppConfig;
//! use session_redis::SessionComponents;
//!
//! let config = AppConfig::from_env()?;
//! let components = SessionComponents::start(&config).await?;
//!
//! components.store().save("s1", Some(&entries)).await?;
//! let loaded = components.store().load("s1").await?;
//! let alive = !components.expiration().is_expired("s1", now_millis).await?;
//!
//! components.shutdown().await?;
//! ```

pub mod client;
pub mod components;
pub mod expiration;
pub mod health;
pub mod provider;
pub mod store;

// Re-export client types
pub use client::{
    ClusterRedisClient, MasterReplicaRedisClient, SimpleRedisClient, CLUSTER_CLIENT_TYPE,
    MASTER_REPLICA_CLIENT_TYPE, SIMPLE_CLIENT_TYPE,
};

// Re-export session types
pub use components::{provider_from_config, SessionComponents};
pub use expiration::RedisManagedExpiration;
pub use health::{
    HealthStatus, RedisHealthChecker, DEFAULT_HEALTH_CHECK_KEY, DEFAULT_HEALTH_CHECK_NAME,
};
pub use provider::{ClientProvider, SharedClient};
pub use store::{RedisSessionStore, DEFAULT_EXPIRES_SECONDS, DEFAULT_STORE_NAME};
