use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-assigned identifier of a registered client application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(Uuid);

impl ApplicationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ApplicationId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ApplicationId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A client application known to the authorization server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientApplication {
    id: ApplicationId,
    client_id: String,
}

impl ClientApplication {
    pub fn new(id: ApplicationId, client_id: impl Into<String>) -> Self {
        Self {
            id,
            client_id: client_id.into(),
        }
    }

    /// Identifier used to key authorizations, distinct from the public `client_id`.
    pub fn id(&self) -> ApplicationId {
        self.id
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}
