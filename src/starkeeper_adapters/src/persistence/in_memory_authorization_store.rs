use std::sync::Arc;

use dashmap::DashMap;
use starkeeper_core::{
    ApplicationId, AuthorizationRecord, AuthorizationStore, AuthorizationStoreError,
    AuthorizationType, ScopeSet,
};

/// Authorization records grouped by (subject, application), oldest first.
#[derive(Default, Clone)]
pub struct InMemoryAuthorizationStore {
    records: Arc<DashMap<(String, ApplicationId), Vec<AuthorizationRecord>>>,
}

impl InMemoryAuthorizationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held for the pair.
    pub fn count(&self, subject: &str, application_id: &ApplicationId) -> usize {
        self.records
            .get(&(subject.to_string(), *application_id))
            .map_or(0, |records| records.len())
    }
}

#[async_trait::async_trait]
impl AuthorizationStore for InMemoryAuthorizationStore {
    async fn find_permanent(
        &self,
        subject: &str,
        application_id: &ApplicationId,
    ) -> Result<Vec<AuthorizationRecord>, AuthorizationStoreError> {
        Ok(self
            .records
            .get(&(subject.to_string(), *application_id))
            .map(|records| {
                records
                    .iter()
                    .rev()
                    .filter(|r| r.is_permanent())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    #[tracing::instrument(name = "Recording authorization", skip(self, scopes))]
    async fn create(
        &self,
        subject: &str,
        application_id: &ApplicationId,
        authorization_type: AuthorizationType,
        scopes: ScopeSet,
    ) -> Result<AuthorizationRecord, AuthorizationStoreError> {
        let record = AuthorizationRecord::new(*application_id, subject, authorization_type, scopes);
        self.records
            .entry((subject.to_string(), *application_id))
            .or_default()
            .push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_permanent_returns_newest_first_without_ad_hoc() {
        let store = InMemoryAuthorizationStore::new();
        let app = ApplicationId::new();

        let oldest = store
            .create("alice", &app, AuthorizationType::Permanent, ScopeSet::parse("openid"))
            .await
            .unwrap();
        let latest = store
            .create("alice", &app, AuthorizationType::Permanent, ScopeSet::parse("openid email"))
            .await
            .unwrap();
        store
            .create("alice", &app, AuthorizationType::AdHoc, ScopeSet::parse("openid"))
            .await
            .unwrap();

        let found = store.find_permanent("alice", &app).await.unwrap();
        let ids: Vec<_> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, [latest.id, oldest.id]);
        assert_eq!(store.count("alice", &app), 3);
    }

    #[tokio::test]
    async fn test_records_are_scoped_to_subject_and_application() {
        let store = InMemoryAuthorizationStore::new();
        let app = ApplicationId::new();
        store
            .create("alice", &app, AuthorizationType::Permanent, ScopeSet::parse("openid"))
            .await
            .unwrap();

        assert!(store.find_permanent("bob", &app).await.unwrap().is_empty());
        assert!(
            store
                .find_permanent("alice", &ApplicationId::new())
                .await
                .unwrap()
                .is_empty()
        );
    }
}
