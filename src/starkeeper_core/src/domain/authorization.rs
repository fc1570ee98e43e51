use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{client::ApplicationId, scope::ScopeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorizationId(Uuid);

impl AuthorizationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AuthorizationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AuthorizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationType {
    /// Durable consent, reused across sessions for the same subject and client.
    Permanent,
    /// Bound to a single flow.
    AdHoc,
}

/// Durable record of the scopes a subject granted to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRecord {
    pub id: AuthorizationId,
    pub application_id: ApplicationId,
    pub subject: String,
    pub authorization_type: AuthorizationType,
    pub scopes: ScopeSet,
    pub created_at: DateTime<Utc>,
}

impl AuthorizationRecord {
    pub fn new(
        application_id: ApplicationId,
        subject: impl Into<String>,
        authorization_type: AuthorizationType,
        scopes: ScopeSet,
    ) -> Self {
        Self {
            id: AuthorizationId::new(),
            application_id,
            subject: subject.into(),
            authorization_type,
            scopes,
            created_at: Utc::now(),
        }
    }

    pub fn is_permanent(&self) -> bool {
        self.authorization_type == AuthorizationType::Permanent
    }
}
