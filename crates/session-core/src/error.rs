//! Session store error types
//!
//! Two families matter to callers: connectivity failures (the backing store
//! could not be reached or rejected a command) and configuration failures
//! (raised at startup while wiring clients). Neither is retried here.

/// Error type for key-value client and session store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Redis command error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Redis connection pool error: {0}")]
    Pool(String),

    #[error("Client `{client_type}` is not initialized")]
    NotInitialized { client_type: String },

    #[error("Client `{client_type}` is already initialized")]
    AlreadyInitialized { client_type: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Session encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the backing store was unreachable or failed the command
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Redis(_) | Self::Pool(_))
    }

    /// Whether the error comes from missing or inconsistent wiring
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(msg: impl std::fmt::Display) -> Self {
        Self::Configuration(msg.to_string())
    }

    #[must_use]
    pub fn not_initialized(client_type: &str) -> Self {
        Self::NotInitialized {
            client_type: client_type.to_string(),
        }
    }

    #[must_use]
    pub fn already_initialized(client_type: &str) -> Self {
        Self::AlreadyInitialized {
            client_type: client_type.to_string(),
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
