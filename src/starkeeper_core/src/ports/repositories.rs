use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    authorization::{AuthorizationRecord, AuthorizationType},
    client::{ApplicationId, ClientApplication},
    password::Password,
    scope::ScopeSet,
    user::{NewAccount, UserAccount, UserId},
};

/// One independent reason the identity store refused to create an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityError {
    pub code: String,
    pub description: String,
}

impl IdentityError {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("Account creation rejected ({} error(s))", .0.len())]
    Rejected(Vec<IdentityError>),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rejected(a), Self::Rejected(b)) => a == b,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks an account up by the normalized form of `email`.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, UserStoreError>;
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserStoreError>;
    /// Hashes `password`, persists the account atomically and returns its new id.
    ///
    /// Every reason for refusal is reported in a single `Rejected`.
    async fn create(&self, account: NewAccount, password: Password)
    -> Result<UserId, UserStoreError>;
}

// ApplicationStore port trait and errors
#[derive(Debug, Error)]
pub enum ApplicationStoreError {
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn find_by_client_id(
        &self,
        client_id: &str,
    ) -> Result<Option<ClientApplication>, ApplicationStoreError>;
}

// AuthorizationStore port trait and errors
#[derive(Debug, Error)]
pub enum AuthorizationStoreError {
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait AuthorizationStore: Send + Sync {
    /// Permanent authorizations `subject` granted to `application_id`, newest first.
    async fn find_permanent(
        &self,
        subject: &str,
        application_id: &ApplicationId,
    ) -> Result<Vec<AuthorizationRecord>, AuthorizationStoreError>;

    async fn create(
        &self,
        subject: &str,
        application_id: &ApplicationId,
        authorization_type: AuthorizationType,
        scopes: ScopeSet,
    ) -> Result<AuthorizationRecord, AuthorizationStoreError>;
}
