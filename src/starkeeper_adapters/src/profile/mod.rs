pub mod http_profile_client;
pub mod user_store_profile_provider;

pub use http_profile_client::HttpProfileClient;
pub use user_store_profile_provider::UserStoreProfileProvider;
