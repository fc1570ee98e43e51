use std::sync::Arc;

use dashmap::DashMap;
use starkeeper_core::{ApplicationId, ApplicationStore, ApplicationStoreError, ClientApplication};

/// Client registry seeded at startup.
#[derive(Default, Clone)]
pub struct InMemoryApplicationStore {
    applications: Arc<DashMap<String, ClientApplication>>,
}

impl InMemoryApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `client_id` under a fresh application id, replacing any previous
    /// registration with the same client id.
    pub fn register(&self, client_id: &str) -> ClientApplication {
        let application = ClientApplication::new(ApplicationId::new(), client_id);
        if self
            .applications
            .insert(client_id.to_string(), application.clone())
            .is_some()
        {
            tracing::debug!(client_id, "Replaced existing client registration");
        }
        application
    }
}

#[async_trait::async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn find_by_client_id(
        &self,
        client_id: &str,
    ) -> Result<Option<ClientApplication>, ApplicationStoreError> {
        Ok(self
            .applications
            .get(client_id)
            .map(|entry| entry.value().clone()))
    }
}
