//! Session lifecycle scenarios against the in-memory client
//!
//! Run with: cargo test -p integration-tests --test session_flow

use integration_tests::{memory_components, mixed_entries, now_millis, sample_entries};
use session_core::{KeyValueClient, TTL_NOT_FOUND, TTL_NO_EXPIRE};

const KEY: &str = "nablarch.session.s1";

// ============================================================================
// Session Store
// ============================================================================

#[tokio::test]
async fn test_save_load_then_clear() {
    let (client, components) = memory_components(&[]).await.unwrap();
    let store = components.store().clone().with_expires(5);

    store.save("s1", Some(sample_entries().as_slice())).await.unwrap();
    assert_eq!(store.load("s1").await.unwrap(), sample_entries());

    let ttl = client.pttl(KEY).await.unwrap();
    assert!((0..=5_000).contains(&ttl), "ttl = {ttl}");

    store.save("s1", Some(&[][..])).await.unwrap();
    assert!(store.load("s1").await.unwrap().is_empty());
    assert!(!client.exists(KEY).await.unwrap());
}

#[tokio::test]
async fn test_mixed_values_round_trip() {
    let (_, components) = memory_components(&[]).await.unwrap();
    let store = components.store();

    store.save("s1", Some(mixed_entries().as_slice())).await.unwrap();
    assert_eq!(store.load("s1").await.unwrap(), mixed_entries());
}

#[tokio::test]
async fn test_resave_replaces_entries() {
    let (_, components) = memory_components(&[]).await.unwrap();
    let store = components.store();

    store.save("s1", Some(mixed_entries().as_slice())).await.unwrap();
    store.save("s1", Some(sample_entries().as_slice())).await.unwrap();
    assert_eq!(store.load("s1").await.unwrap(), sample_entries());
}

#[tokio::test]
async fn test_configured_expiry_is_applied() {
    let (client, components) = memory_components(&[("SESSION_EXPIRES", "120")])
        .await
        .unwrap();

    components
        .store()
        .save("s1", Some(sample_entries().as_slice()))
        .await
        .unwrap();
    let ttl = client.pttl(KEY).await.unwrap();
    assert!(ttl > 110_000 && ttl <= 120_000, "ttl = {ttl}");
}

// ============================================================================
// Managed Expiration
// ============================================================================

#[tokio::test]
async fn test_expiration_marker_then_store_payload() {
    let (client, components) = memory_components(&[]).await.unwrap();
    let expiration = components.expiration();

    assert!(expiration.is_expired("s1", now_millis()).await.unwrap());
    assert!(!expiration.is_determinable("s1").await.unwrap());

    expiration
        .save_expiration_date_time("s1", now_millis() + 60_000)
        .await
        .unwrap();
    assert_eq!(client.get(KEY).await.unwrap(), Some(Vec::new()));
    assert!(!expiration.is_expired("s1", now_millis()).await.unwrap());
    assert!(expiration.is_determinable("s1").await.unwrap());

    // A later save replaces the marker and the TTL
    components
        .store()
        .save("s1", Some(sample_entries().as_slice()))
        .await
        .unwrap();
    assert_eq!(components.store().load("s1").await.unwrap(), sample_entries());
}

#[tokio::test]
async fn test_expiration_on_existing_session_keeps_payload() {
    let (client, components) = memory_components(&[]).await.unwrap();
    client.set(KEY, b"payload").await.unwrap();
    assert_eq!(client.pttl(KEY).await.unwrap(), TTL_NO_EXPIRE);

    components
        .expiration()
        .save_expiration_date_time("s1", now_millis() + 60_000)
        .await
        .unwrap();

    assert_eq!(client.get(KEY).await.unwrap(), Some(b"payload".to_vec()));
    assert!(client.pttl(KEY).await.unwrap() > 0);
}

#[tokio::test]
async fn test_past_expiration_expires_session() {
    let (client, components) = memory_components(&[]).await.unwrap();
    let expiration = components.expiration();

    expiration
        .save_expiration_date_time("s1", now_millis() - 1)
        .await
        .unwrap();
    assert!(expiration.is_expired("s1", now_millis()).await.unwrap());
    assert_eq!(client.pttl(KEY).await.unwrap(), TTL_NOT_FOUND);
}

#[tokio::test]
async fn test_expired_and_determinable_are_opposites() {
    let (client, components) = memory_components(&[]).await.unwrap();
    let expiration = components.expiration();

    for present in [false, true, false] {
        if present {
            client.set(KEY, b"").await.unwrap();
        } else {
            client.del(KEY).await.unwrap();
        }
        let expired = expiration.is_expired("s1", now_millis()).await.unwrap();
        let determinable = expiration.is_determinable("s1").await.unwrap();
        assert_eq!(expired, !present);
        assert_eq!(determinable, !expired);
    }
}

// ============================================================================
// Health Probe and Shutdown
// ============================================================================

#[tokio::test]
async fn test_health_follows_connectivity() {
    let (client, components) = memory_components(&[("HEALTH_CHECK_NAME", "Sessions")])
        .await
        .unwrap();

    assert!(components.health().check().await);

    client.set_failing(true);
    let status = components.health().status().await;
    assert_eq!(status.name, "Sessions");
    assert!(!status.healthy);

    // Store operations surface the same failure instead of swallowing it
    let err = components.store().load("s1").await.unwrap_err();
    assert!(err.is_connectivity());
}

#[tokio::test]
async fn test_shutdown_releases_client() {
    let (client, components) = memory_components(&[]).await.unwrap();
    let health = components.health().clone();

    components.shutdown().await.unwrap();
    assert!(!client.is_initialized());
    assert!(!health.check().await);
}

#[tokio::test]
async fn test_concurrent_sessions_are_isolated() {
    let (_, components) = memory_components(&[]).await.unwrap();
    let store = components.store().clone();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                let id = format!("s{i}");
                let entries = vec![session_core::SessionEntry::new("n", i)];
                store.save(&id, Some(entries.as_slice())).await.unwrap();
                (id, entries)
            })
        })
        .collect();

    for handle in handles {
        let (id, entries) = handle.await.unwrap();
        assert_eq!(store.load(&id).await.unwrap(), entries);
    }
}
