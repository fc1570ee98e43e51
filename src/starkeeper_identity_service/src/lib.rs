pub mod helpers;
pub mod identity_service;
pub mod tracing;

pub use identity_service::{IdentityService, ServiceOptions};
