//! Client selection by type tag.
//!
//! The provider is filled once at startup with every client the deployment
//! could use and hands out the one whose tag matches the configured
//! `clientType`.

use std::sync::Arc;

use session_core::{KeyValueClient, StoreError, StoreResult};

/// Client handle shared by the store, the expiration policy and the health probe
pub type SharedClient = Arc<dyn KeyValueClient>;

/// Picks one registered client by its type tag
#[derive(Clone, Default)]
pub struct ClientProvider {
    client_type: Option<String>,
    client_list: Option<Vec<SharedClient>>,
}

impl std::fmt::Debug for ClientProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientProvider")
            .field("client_type", &self.client_type)
            .field("client_list", &self.client_types())
            .finish()
    }
}

impl ClientProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag of the client to hand out
    #[must_use]
    pub fn with_client_type(mut self, client_type: impl Into<String>) -> Self {
        self.client_type = Some(client_type.into());
        self
    }

    /// Replace the candidate list
    #[must_use]
    pub fn with_client_list(mut self, client_list: Vec<SharedClient>) -> Self {
        self.client_list = Some(client_list);
        self
    }

    /// Append one candidate
    #[must_use]
    pub fn register(mut self, client: SharedClient) -> Self {
        self.client_list.get_or_insert_with(Vec::new).push(client);
        self
    }

    /// Tags of the registered clients, in registration order
    pub fn client_types(&self) -> Vec<&str> {
        self.client_list
            .iter()
            .flatten()
            .map(|client| client.client_type())
            .collect()
    }

    /// Return the first registered client whose tag equals the configured one.
    ///
    /// With duplicate tags the earliest registration wins. The returned
    /// handle is the registered `Arc` itself.
    pub fn select(&self) -> StoreResult<SharedClient> {
        let client_type = self
            .client_type
            .as_deref()
            .ok_or_else(|| StoreError::configuration("clientType must not be null."))?;
        let client_list = self
            .client_list
            .as_ref()
            .ok_or_else(|| StoreError::configuration("clientList must not be null."))?;

        let selected = client_list
            .iter()
            .find(|client| client.client_type() == client_type)
            .cloned()
            .ok_or_else(|| {
                StoreError::configuration(format!(
                    "No client matches. clientType={client_type}, clientList=[{}]",
                    self.client_types().join(", ")
                ))
            })?;

        tracing::info!(client_type = %client_type, "Selected Redis client");
        Ok(selected)
    }
}
