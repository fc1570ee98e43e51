pub mod account_error;
pub mod authorization;
pub mod claims;
pub mod client;
pub mod email;
pub mod failure;
pub mod oauth;
pub mod password;
pub mod profile;
pub mod scope;
pub mod user;
