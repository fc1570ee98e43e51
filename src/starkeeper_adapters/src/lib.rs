pub mod config;
pub mod http;
pub mod persistence;
pub mod profile;

pub use persistence::{
    HashMapUserStore, InMemoryApplicationStore, InMemoryAuthorizationStore, PasswordPolicy,
    PostgresUserStore,
};
pub use profile::{HttpProfileClient, UserStoreProfileProvider};
