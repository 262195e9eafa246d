//! Live Redis tests
//!
//! These tests require:
//! - Running Redis instance
//! - Environment variable: REDIS_URL (simple and masterReplica clients)
//! - Environment variable: REDIS_CLUSTER_URIS (cluster client, comma-separated)
//!
//! A standalone node reports `role:master`, so the masterReplica client runs
//! against REDIS_URL without a replica.
//!
//! Run with: cargo test -p integration-tests --test redis_live

use integration_tests::{
    check_cluster_env, check_test_env, live_components, now_millis, sample_entries,
    unique_session_id,
};
use session_core::{session_key, TTL_NOT_FOUND, TTL_NO_EXPIRE};
use session_redis::{CLUSTER_CLIENT_TYPE, MASTER_REPLICA_CLIENT_TYPE, SIMPLE_CLIENT_TYPE};

// ============================================================================
// Scenarios shared by every client variant
// ============================================================================

async fn pttl_replies(client_type: &str) {
    let components = live_components(client_type, 5)
        .await
        .expect("Failed to start components");
    let client = components.client();
    assert_eq!(client.client_type(), client_type);
    let key = session_key(&unique_session_id());

    assert_eq!(client.pttl(&key).await.unwrap(), TTL_NOT_FOUND);

    client.set(&key, b"value").await.unwrap();
    assert_eq!(client.pttl(&key).await.unwrap(), TTL_NO_EXPIRE);

    let started = std::time::Instant::now();
    client.pexpire(&key, 10_000).await.unwrap();
    let ttl = client.pttl(&key).await.unwrap();
    let elapsed = i64::try_from(started.elapsed().as_millis()).unwrap();
    assert!(ttl >= 10_000 - elapsed - 1 && ttl <= 10_000, "ttl = {ttl}");

    client.del(&key).await.unwrap();
    assert!(client.get(&key).await.unwrap().is_none());
    components.shutdown().await.unwrap();
}

async fn session_scenario(client_type: &str) {
    let components = live_components(client_type, 5)
        .await
        .expect("Failed to start components");
    let store = components.store();
    let session_id = unique_session_id();

    store
        .save(&session_id, Some(sample_entries().as_slice()))
        .await
        .unwrap();
    assert_eq!(store.load(&session_id).await.unwrap(), sample_entries());

    let key = session_key(&session_id);
    let ttl = components.client().pttl(&key).await.unwrap();
    assert!(ttl > 0 && ttl <= 5_000, "ttl = {ttl}");

    store.save(&session_id, Some(&[][..])).await.unwrap();
    assert!(store.load(&session_id).await.unwrap().is_empty());
    assert!(!components.client().exists(&key).await.unwrap());

    components.shutdown().await.unwrap();
}

async fn managed_expiration(client_type: &str) {
    let components = live_components(client_type, 5)
        .await
        .expect("Failed to start components");
    let expiration = components.expiration();
    let session_id = unique_session_id();

    assert!(expiration.is_expired(&session_id, now_millis()).await.unwrap());
    expiration
        .save_expiration_date_time(&session_id, now_millis() + 10_000)
        .await
        .unwrap();
    assert!(expiration.is_determinable(&session_id).await.unwrap());

    let key = session_key(&session_id);
    assert_eq!(components.client().get(&key).await.unwrap(), Some(Vec::new()));
    assert!(components.client().pttl(&key).await.unwrap() > 0);

    components.store().delete(&session_id).await.unwrap();
    components.shutdown().await.unwrap();
}

async fn health_check(client_type: &str) {
    let components = live_components(client_type, 5)
        .await
        .expect("Failed to start components");
    assert!(components.health().check().await);

    let health = components.health().clone();
    components.shutdown().await.unwrap();
    assert!(!health.check().await);
}

async fn run_all(client_type: &str) {
    pttl_replies(client_type).await;
    session_scenario(client_type).await;
    managed_expiration(client_type).await;
    health_check(client_type).await;
}

// ============================================================================
// Simple
// ============================================================================

#[tokio::test]
async fn test_simple_client() {
    if !check_test_env() {
        return;
    }
    run_all(SIMPLE_CLIENT_TYPE).await;
}

// ============================================================================
// Master/replica
// ============================================================================

#[tokio::test]
async fn test_master_replica_client() {
    if !check_test_env() {
        return;
    }
    run_all(MASTER_REPLICA_CLIENT_TYPE).await;
}

#[tokio::test]
async fn test_master_replica_sessions_visible_to_simple_client() {
    if !check_test_env() {
        return;
    }

    let primary = live_components(MASTER_REPLICA_CLIENT_TYPE, 5)
        .await
        .expect("Failed to start components");
    let direct = live_components(SIMPLE_CLIENT_TYPE, 5)
        .await
        .expect("Failed to start components");
    let session_id = unique_session_id();

    primary
        .store()
        .save(&session_id, Some(sample_entries().as_slice()))
        .await
        .unwrap();
    assert_eq!(direct.store().load(&session_id).await.unwrap(), sample_entries());

    direct.store().delete(&session_id).await.unwrap();
    primary.shutdown().await.unwrap();
    direct.shutdown().await.unwrap();
}

// ============================================================================
// Cluster
// ============================================================================

#[tokio::test]
async fn test_cluster_client() {
    if !check_cluster_env() {
        return;
    }
    run_all(CLUSTER_CLIENT_TYPE).await;
}

#[tokio::test]
async fn test_cluster_spreads_sessions_over_slots() {
    if !check_cluster_env() {
        return;
    }

    let components = live_components(CLUSTER_CLIENT_TYPE, 5)
        .await
        .expect("Failed to start components");
    let ids: Vec<String> = (0..16).map(|_| unique_session_id()).collect();

    for id in &ids {
        components
            .store()
            .save(id, Some(sample_entries().as_slice()))
            .await
            .unwrap();
    }
    for id in &ids {
        assert_eq!(components.store().load(id).await.unwrap(), sample_entries());
        components.store().delete(id).await.unwrap();
    }
    components.shutdown().await.unwrap();
}
