use async_trait::async_trait;
use thiserror::Error;

use crate::domain::profile::SubjectProfile;

#[derive(Debug, Error)]
pub enum ProfileLookupError {
    #[error("Subject {0} has no profile")]
    NotFound(String),
    #[error("Profile service unreachable: {0}")]
    Unreachable(String),
    #[error("Malformed profile response: {0}")]
    Malformed(String),
}

/// Port trait for fetching the authenticated subject's profile
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn fetch_profile(&self, subject: &str) -> Result<SubjectProfile, ProfileLookupError>;
}
