use secrecy::ExposeSecret;
use starkeeper_core::{ProfileLookupError, ProfileProvider, SubjectProfile, UserId, UserStore};

/// Resolves subjects against the local identity store.
#[derive(Clone)]
pub struct UserStoreProfileProvider<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> UserStoreProfileProvider<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }
}

#[async_trait::async_trait]
impl<U> ProfileProvider for UserStoreProfileProvider<U>
where
    U: UserStore,
{
    #[tracing::instrument(name = "Fetching profile from identity store", skip(self))]
    async fn fetch_profile(&self, subject: &str) -> Result<SubjectProfile, ProfileLookupError> {
        let id: UserId = subject
            .parse()
            .map_err(|_| ProfileLookupError::NotFound(subject.to_string()))?;

        let account = self
            .user_store
            .find_by_id(&id)
            .await
            .map_err(|e| ProfileLookupError::Unreachable(e.to_string()))?
            .ok_or_else(|| ProfileLookupError::NotFound(subject.to_string()))?;

        Ok(SubjectProfile {
            id: account.id().to_string(),
            email: Some(account.email().as_ref().expose_secret().clone()),
            preferred_username: Some(account.user_name().to_string()),
            ..SubjectProfile::default()
        })
    }
}
