use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::scope::{ScopeSet, scopes};

/// Type of an assertion about the subject, serialized with its OIDC claim name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClaimType {
    Subject,
    Name,
    Email,
    Role,
    PreferredUsername,
    SecurityStamp,
    Other(String),
}

impl ClaimType {
    pub fn as_str(&self) -> &str {
        match self {
            ClaimType::Subject => "sub",
            ClaimType::Name => "name",
            ClaimType::Email => "email",
            ClaimType::Role => "role",
            ClaimType::PreferredUsername => "preferred_username",
            ClaimType::SecurityStamp => "security_stamp",
            ClaimType::Other(name) => name,
        }
    }
}

impl From<&str> for ClaimType {
    fn from(value: &str) -> Self {
        match value {
            "sub" => ClaimType::Subject,
            "name" => ClaimType::Name,
            "email" => ClaimType::Email,
            "role" => ClaimType::Role,
            "preferred_username" => ClaimType::PreferredUsername,
            "security_stamp" => ClaimType::SecurityStamp,
            other => ClaimType::Other(other.to_string()),
        }
    }
}

impl Serialize for ClaimType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClaimType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ClaimType::from(name.as_str()))
    }
}

/// Class of issued token a claim may be serialized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    AccessToken,
    IdentityToken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "type")]
    claim_type: ClaimType,
    value: String,
    destinations: BTreeSet<Destination>,
}

impl Claim {
    /// A claim starts with no destinations; it is emitted nowhere until routed.
    pub fn new(claim_type: ClaimType, value: impl Into<String>) -> Self {
        Self {
            claim_type,
            value: value.into(),
            destinations: BTreeSet::new(),
        }
    }

    pub fn claim_type(&self) -> &ClaimType {
        &self.claim_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn destinations(&self) -> &BTreeSet<Destination> {
        &self.destinations
    }

    pub fn set_destinations(&mut self, destinations: impl IntoIterator<Item = Destination>) {
        self.destinations = destinations.into_iter().collect();
    }
}

/// Claims describing the authenticated subject plus the scopes granted to the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsPrincipal {
    claims: Vec<Claim>,
    scopes: ScopeSet,
}

impl ClaimsPrincipal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_claim(mut self, claim_type: ClaimType, value: impl Into<String>) -> Self {
        self.add_claim(claim_type, value);
        self
    }

    pub fn add_claim(&mut self, claim_type: ClaimType, value: impl Into<String>) {
        self.claims.push(Claim::new(claim_type, value));
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn find_first(&self, claim_type: &ClaimType) -> Option<&Claim> {
        self.claims.iter().find(|c| c.claim_type() == claim_type)
    }

    pub fn subject(&self) -> Option<&str> {
        self.find_first(&ClaimType::Subject).map(Claim::value)
    }

    pub fn scopes(&self) -> &ScopeSet {
        &self.scopes
    }

    pub fn set_scopes(&mut self, scopes: ScopeSet) {
        self.scopes = scopes;
    }

    /// Routes every claim using `selector`, evaluated against the principal's scopes.
    pub fn set_destinations<F>(&mut self, selector: F)
    where
        F: Fn(&Claim, &ScopeSet) -> BTreeSet<Destination>,
    {
        let scopes = &self.scopes;
        for claim in &mut self.claims {
            let destinations = selector(claim, scopes);
            claim.set_destinations(destinations);
        }
    }
}

/// Default claim routing.
///
/// Identity-related claims always go to the access token and are copied into the
/// identity token only when the matching scope was granted. The security stamp is a
/// secret and is never emitted.
pub fn destinations_for(claim: &Claim, granted: &ScopeSet) -> BTreeSet<Destination> {
    let unlocking_scope = match claim.claim_type() {
        ClaimType::SecurityStamp => return BTreeSet::new(),
        ClaimType::Name | ClaimType::PreferredUsername => Some(scopes::PROFILE),
        ClaimType::Email => Some(scopes::EMAIL),
        ClaimType::Role => Some(scopes::ROLES),
        ClaimType::Subject | ClaimType::Other(_) => None,
    };

    let mut destinations = BTreeSet::from([Destination::AccessToken]);
    if unlocking_scope.is_some_and(|scope| granted.contains(scope)) {
        destinations.insert(Destination::IdentityToken);
    }
    destinations
}
