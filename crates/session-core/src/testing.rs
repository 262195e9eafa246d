//! In-memory [`KeyValueClient`] for tests.
//!
//! Mirrors the Redis semantics the session store relies on: `SET` clears any
//! TTL, expiring a missing key is a no-op, a non-positive or past expiration
//! removes the key. TTLs are tracked against the wall clock so `pttl` counts
//! down like the real thing.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::client::{KeyValueClient, TTL_NOT_FOUND, TTL_NO_EXPIRE};
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone)]
struct StoredValue {
    value: Vec<u8>,
    expire_at_ms: Option<i64>,
}

#[derive(Debug, Default)]
struct State {
    initialized: bool,
    failing: bool,
    values: HashMap<String, StoredValue>,
    commands: Vec<String>,
}

/// Test double backed by a `HashMap`
#[derive(Debug)]
pub struct InMemoryClient {
    client_type: String,
    state: Mutex<State>,
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl InMemoryClient {
    /// Create an uninitialized client with the given tag
    #[must_use]
    pub fn new(client_type: impl Into<String>) -> Self {
        Self {
            client_type: client_type.into(),
            state: Mutex::new(State::default()),
        }
    }

    /// Create a client that is ready to accept commands
    #[must_use]
    pub fn initialized(client_type: impl Into<String>) -> Self {
        let client = Self::new(client_type);
        client.state.lock().initialized = true;
        client
    }

    /// Make every following command fail with an I/O error
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().failing = failing;
    }

    /// Commands received so far, formatted as `NAME key`
    #[must_use]
    pub fn commands(&self) -> Vec<String> {
        self.state.lock().commands.clone()
    }

    /// Forget recorded commands
    pub fn clear_commands(&self) {
        self.state.lock().commands.clear();
    }

    /// Whether `initialize` has run and `shutdown` has not
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.lock().initialized
    }

    fn run<T>(
        &self,
        command: &str,
        key: &str,
        f: impl FnOnce(&mut HashMap<String, StoredValue>) -> T,
    ) -> StoreResult<T> {
        let mut state = self.state.lock();
        if state.failing {
            let err = redis::RedisError::from((redis::ErrorKind::IoError, "connection refused"));
            return Err(err.into());
        }
        if !state.initialized {
            return Err(StoreError::not_initialized(&self.client_type));
        }
        state.commands.push(format!("{command} {key}"));

        let now = now_ms();
        state
            .values
            .retain(|_, stored| !matches!(stored.expire_at_ms, Some(at) if at <= now));

        Ok(f(&mut state.values))
    }

    fn expire_at(values: &mut HashMap<String, StoredValue>, key: &str, at_ms: i64) {
        if at_ms <= now_ms() {
            values.remove(key);
        } else if let Some(stored) = values.get_mut(key) {
            stored.expire_at_ms = Some(at_ms);
        }
    }
}

#[async_trait]
impl KeyValueClient for InMemoryClient {
    fn client_type(&self) -> &str {
        &self.client_type
    }

    async fn initialize(&self) -> StoreResult<()> {
        let mut state = self.state.lock();
        if state.initialized {
            return Err(StoreError::already_initialized(&self.client_type));
        }
        state.initialized = true;
        Ok(())
    }

    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.run("SET", key, |values| {
            values.insert(
                key.to_string(),
                StoredValue {
                    value: value.to_vec(),
                    expire_at_ms: None,
                },
            );
        })
    }

    async fn pexpire(&self, key: &str, milliseconds: i64) -> StoreResult<()> {
        self.run("PEXPIRE", key, |values| {
            Self::expire_at(values, key, now_ms().saturating_add(milliseconds));
        })
    }

    async fn pexpireat(&self, key: &str, epoch_milliseconds: i64) -> StoreResult<()> {
        self.run("PEXPIREAT", key, |values| {
            Self::expire_at(values, key, epoch_milliseconds);
        })
    }

    async fn pttl(&self, key: &str) -> StoreResult<i64> {
        self.run("PTTL", key, |values| match values.get(key) {
            None => TTL_NOT_FOUND,
            Some(StoredValue {
                expire_at_ms: None, ..
            }) => TTL_NO_EXPIRE,
            Some(StoredValue {
                expire_at_ms: Some(at),
                ..
            }) => (at - now_ms()).max(0),
        })
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.run("GET", key, |values| values.get(key).map(|s| s.value.clone()))
    }

    async fn del(&self, key: &str) -> StoreResult<()> {
        self.run("DEL", key, |values| {
            values.remove(key);
        })
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        self.run("EXISTS", key, |values| values.contains_key(key))
    }

    async fn shutdown(&self) -> StoreResult<()> {
        let mut state = self.state.lock();
        if !state.initialized {
            return Err(StoreError::not_initialized(&self.client_type));
        }
        state.initialized = false;
        Ok(())
    }
}
