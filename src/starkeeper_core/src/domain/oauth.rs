use serde::{Deserialize, Serialize};

use super::{authorization::AuthorizationId, claims::ClaimsPrincipal, scope::ScopeSet};

/// Authorization request parameters as received from the protocol engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorizationRequest {
    pub client_id: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub response_type: Option<String>,
    #[serde(default)]
    pub redirect_uri: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl AuthorizationRequest {
    pub fn requested_scopes(&self) -> ScopeSet {
        ScopeSet::parse(self.scope.as_deref().unwrap_or_default())
    }
}

/// Data shown on the consent screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsentView {
    pub application_name: String,
    pub scope: String,
}

/// Instruction to the protocol engine to mint tokens for `principal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInDirective {
    pub principal: ClaimsPrincipal,
    pub authorization_id: AuthorizationId,
}
