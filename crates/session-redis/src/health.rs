//! Redis health probe.
//!
//! Issues one `EXISTS` against a probe key. The key need not exist; only
//! whether the command completes matters.

use serde::Serialize;

use crate::provider::SharedClient;

/// Default probe name
pub const DEFAULT_HEALTH_CHECK_NAME: &str = "Redis";

/// Default probe key
pub const DEFAULT_HEALTH_CHECK_KEY: &str = "healthcheck";

/// Outcome of one probe, ready to be rendered by a health endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub name: String,
    pub healthy: bool,
}

/// Liveness probe against the backing store
#[derive(Clone)]
pub struct RedisHealthChecker {
    client: SharedClient,
    name: String,
    key: String,
}

impl std::fmt::Debug for RedisHealthChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisHealthChecker")
            .field("name", &self.name)
            .field("key", &self.key)
            .finish()
    }
}

impl RedisHealthChecker {
    #[must_use]
    pub fn new(client: SharedClient) -> Self {
        Self {
            client,
            name: DEFAULT_HEALTH_CHECK_NAME.to_string(),
            key: DEFAULT_HEALTH_CHECK_KEY.to_string(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the key probed with `EXISTS`
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// `true` when the probe command completes, `false` on any error.
    ///
    /// Never returns an error.
    pub async fn check(&self) -> bool {
        match self.client.exists(&self.key).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    name = %self.name,
                    key = %self.key,
                    error = %e,
                    "Health check failed"
                );
                false
            }
        }
    }

    /// Run the probe and wrap the outcome with the probe name
    pub async fn status(&self) -> HealthStatus {
        HealthStatus {
            name: self.name.clone(),
            healthy: self.check().await,
        }
    }
}
