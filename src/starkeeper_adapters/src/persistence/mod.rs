pub mod hashmap_user_store;
pub mod in_memory_application_store;
pub mod in_memory_authorization_store;
pub mod password_hash;
pub mod password_policy;
pub mod postgres_user_store;

pub use hashmap_user_store::HashMapUserStore;
pub use in_memory_application_store::InMemoryApplicationStore;
pub use in_memory_authorization_store::InMemoryAuthorizationStore;
pub use password_policy::PasswordPolicy;
pub use postgres_user_store::{PostgresUserStore, get_postgres_pool};

use starkeeper_core::{IdentityError, NewAccount};

/// Rejection reported when the normalized email already has an account.
pub(crate) fn duplicate_email(account: &NewAccount) -> IdentityError {
    IdentityError::new(
        "DuplicateEmail",
        format!("Email '{}' is already taken.", account.user_name()),
    )
}
