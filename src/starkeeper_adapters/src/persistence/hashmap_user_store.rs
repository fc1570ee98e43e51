use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use secrecy::{ExposeSecret, Secret};
use starkeeper_core::{
    NewAccount, Password, UserAccount, UserId, UserStore, UserStoreError, normalize_email,
};

use super::duplicate_email;
use super::password_hash::compute_password_hash;
use super::password_policy::PasswordPolicy;

#[derive(Clone)]
struct StoredUser {
    account: UserAccount,
    password_hash: Secret<String>,
}

/// In-memory identity store keyed by normalized email.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<String, StoredUser>>>,
    policy: PasswordPolicy,
}

impl HashMapUserStore {
    pub fn new(policy: PasswordPolicy) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            policy,
        }
    }

    /// Stored password hash for `email`, if an account exists.
    pub async fn password_hash(&self, email: &str) -> Option<Secret<String>> {
        let users = self.users.read().await;
        users
            .get(&normalize_email(email))
            .map(|user| user.password_hash.clone())
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .get(&normalize_email(email))
            .map(|user| user.account.clone()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| user.account.id() == *id)
            .map(|user| user.account.clone()))
    }

    #[tracing::instrument(name = "Adding user to HashMap store", skip_all)]
    async fn create(
        &self,
        account: NewAccount,
        password: Password,
    ) -> Result<UserId, UserStoreError> {
        let mut errors = self.policy.violations(password.as_ref().expose_secret());
        if self
            .users
            .read()
            .await
            .contains_key(account.normalized_email())
        {
            errors.push(duplicate_email(&account));
        }
        if !errors.is_empty() {
            return Err(UserStoreError::Rejected(errors));
        }

        let password_hash = compute_password_hash(password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        // Re-checked under the write lock: another registration may have won meanwhile.
        let mut users = self.users.write().await;
        if users.contains_key(account.normalized_email()) {
            return Err(UserStoreError::Rejected(vec![duplicate_email(&account)]));
        }

        let id = UserId::new();
        let key = account.normalized_email().to_string();
        users.insert(
            key,
            StoredUser {
                account: account.into_account(id),
                password_hash,
            },
        );
        Ok(id)
    }
}
