//! Test helpers for integration tests

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use session_common::AppConfig;
use session_core::testing::InMemoryClient;
use session_redis::{ClientProvider, SessionComponents, CLUSTER_CLIENT_TYPE};

/// Tag under which the in-memory client is registered
pub const MEMORY_CLIENT_TYPE: &str = "memory";

/// Build a configuration from explicit variables, ignoring the process env
pub fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    Ok(AppConfig::from_lookup(|name| vars.get(name).cloned())?)
}

/// Start components on top of a fresh in-memory client
pub async fn memory_components(
    vars: &[(&str, &str)],
) -> Result<(Arc<InMemoryClient>, SessionComponents)> {
    let client = Arc::new(InMemoryClient::new(MEMORY_CLIENT_TYPE));
    let provider = ClientProvider::new()
        .with_client_type(MEMORY_CLIENT_TYPE)
        .register(client.clone());

    let components = SessionComponents::start_with(&provider, &config_from(vars)?).await?;
    Ok((client, components))
}

/// Redis URL for live tests, `None` when not configured
pub fn redis_url() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var("REDIS_URL").ok()
}

/// Helper to check if a live Redis is available for tests
pub fn check_test_env() -> bool {
    if redis_url().is_none() {
        eprintln!("Skipping test: REDIS_URL not set");
        return false;
    }
    true
}

/// Comma-separated cluster seed URIs for live cluster tests
pub fn cluster_uris() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var("REDIS_CLUSTER_URIS").ok()
}

/// Helper to check if a live Redis Cluster is available for tests
pub fn check_cluster_env() -> bool {
    if cluster_uris().is_none() {
        eprintln!("Skipping test: REDIS_CLUSTER_URIS not set");
        return false;
    }
    true
}

/// Start components against a live deployment with the given client type.
///
/// `cluster` reads its seed nodes from `REDIS_CLUSTER_URIS`; the other
/// variants connect to `REDIS_URL`.
pub async fn live_components(client_type: &str, expires_seconds: u64) -> Result<SessionComponents> {
    let (uri_var, uri) = if client_type == CLUSTER_CLIENT_TYPE {
        let uris = cluster_uris().ok_or_else(|| anyhow::anyhow!("REDIS_CLUSTER_URIS not set"))?;
        ("REDIS_URI_LIST", uris)
    } else {
        let url = redis_url().ok_or_else(|| anyhow::anyhow!("REDIS_URL not set"))?;
        ("REDIS_URI", url)
    };
    let expires = expires_seconds.to_string();
    let config = config_from(&[
        ("REDIS_CLIENT_TYPE", client_type),
        (uri_var, &uri),
        ("SESSION_EXPIRES", &expires),
    ])?;

    Ok(SessionComponents::start(&config).await?)
}

/// Current time as Unix epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
