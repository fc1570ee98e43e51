use std::fmt;
use std::str::FromStr;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::email::Email;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Invalid user id")]
    InvalidUserId,
}

/// Identifier assigned to an account by the identity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for UserId {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| UserError::InvalidUserId)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account data handed to the identity store for creation.
///
/// The email doubles as the login/display name.
#[derive(Debug, Clone)]
pub struct NewAccount {
    email: Email,
    normalized_email: String,
    user_name: String,
}

impl NewAccount {
    pub fn for_email(email: Email) -> Self {
        let normalized_email = email.normalized();
        let user_name = email.as_ref().expose_secret().clone();
        Self {
            email,
            normalized_email,
            user_name,
        }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn normalized_email(&self) -> &str {
        &self.normalized_email
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Attaches the identifier the store assigned on creation.
    pub fn into_account(self, id: UserId) -> UserAccount {
        UserAccount {
            id,
            email: self.email,
            normalized_email: self.normalized_email,
            user_name: self.user_name,
        }
    }
}

/// A persisted account as returned by identity store lookups.
#[derive(Debug, Clone)]
pub struct UserAccount {
    id: UserId,
    email: Email,
    normalized_email: String,
    user_name: String,
}

impl UserAccount {
    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn normalized_email(&self) -> &str {
        &self.normalized_email
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }
}
