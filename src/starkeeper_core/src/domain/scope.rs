use std::fmt;

use serde::{Deserialize, Serialize};

/// Standard OpenID Connect scope names.
pub mod scopes {
    pub const OPEN_ID: &str = "openid";
    pub const EMAIL: &str = "email";
    pub const PROFILE: &str = "profile";
    pub const OFFLINE_ACCESS: &str = "offline_access";
    pub const ROLES: &str = "roles";

    /// Scopes a client may be granted through the authorization endpoint, in grant order.
    pub const SUPPORTED: [&str; 4] = [OPEN_ID, EMAIL, PROFILE, OFFLINE_ACCESS];
}

/// Ordered, duplicate-free set of scope names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSet(Vec<String>);

impl ScopeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a space-delimited `scope` parameter (RFC 6749 §3.3).
    ///
    /// A value containing any token outside the scope-token character set is treated
    /// as requesting nothing at all.
    pub fn parse(raw: &str) -> Self {
        let mut set = Self::new();
        for token in raw.split(' ').filter(|token| !token.is_empty()) {
            if !is_scope_token(token) {
                return Self::new();
            }
            set.insert(token);
        }
        set
    }

    /// Adds `scope` unless already present. Returns whether it was added.
    pub fn insert(&mut self, scope: impl Into<String>) -> bool {
        let scope = scope.into();
        if self.contains(&scope) {
            return false;
        }
        self.0.push(scope);
        true
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.0.iter().any(|s| s == scope)
    }

    /// Keeps the entries of `allowed` that were requested, in `allowed` order.
    pub fn intersect_allowed(&self, allowed: &[&str]) -> Self {
        allowed
            .iter()
            .filter(|scope| self.contains(scope))
            .map(|scope| scope.to_string())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        for scope in iter {
            set.insert(scope);
        }
        set
    }
}

impl<'a> FromIterator<&'a str> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

// scope-token = 1*( %x21 / %x23-5B / %x5D-7E )
fn is_scope_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b == 0x21 || (0x23..=0x5B).contains(&b) || (0x5D..=0x7E).contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_parse_splits_on_spaces_and_dedupes() {
        let set = ScopeSet::parse("  openid email  openid profile ");
        assert_eq!(set.iter().collect::<Vec<_>>(), ["openid", "email", "profile"]);
    }

    #[test]
    fn test_only_space_delimits_scopes() {
        assert!(ScopeSet::parse("openid\temail").is_empty());
        assert!(ScopeSet::parse("openid\nemail").is_empty());
        assert!(ScopeSet::parse("openid email\r").is_empty());
    }

    #[test]
    fn test_malformed_scope_string_is_empty() {
        assert!(ScopeSet::parse("openid \"email\"").is_empty());
        assert!(ScopeSet::parse("openid back\\slash").is_empty());
        assert!(ScopeSet::parse("").is_empty());
    }

    #[test]
    fn test_intersection_drops_unsupported_scopes() {
        let requested = ScopeSet::parse("openid email groups");
        let granted = requested.intersect_allowed(&scopes::SUPPORTED);
        assert_eq!(granted, ScopeSet::parse("openid email"));
    }

    #[test]
    fn test_intersection_follows_allowed_order() {
        let requested = ScopeSet::parse("offline_access profile openid");
        let granted = requested.intersect_allowed(&scopes::SUPPORTED);
        assert_eq!(
            granted.iter().collect::<Vec<_>>(),
            ["openid", "profile", "offline_access"]
        );
    }

    #[test]
    fn test_display_is_space_delimited() {
        assert_eq!(ScopeSet::parse("openid email").to_string(), "openid email");
    }

    #[quickcheck]
    fn prop_intersection_is_subset_of_both(requested: Vec<String>) -> bool {
        let requested: ScopeSet = requested.into_iter().collect();
        let granted = requested.intersect_allowed(&scopes::SUPPORTED);
        granted
            .iter()
            .all(|s| requested.contains(s) && scopes::SUPPORTED.contains(&s))
    }

    #[quickcheck]
    fn prop_intersection_is_idempotent(requested: Vec<String>) -> bool {
        let requested: ScopeSet = requested.into_iter().collect();
        let once = requested.intersect_allowed(&scopes::SUPPORTED);
        once.intersect_allowed(&scopes::SUPPORTED) == once
    }

    #[quickcheck]
    fn prop_parsed_sets_have_no_duplicates(raw: String) -> bool {
        let set = ScopeSet::parse(&raw);
        let mut seen = std::collections::HashSet::new();
        set.iter().all(|s| seen.insert(s))
    }
}
