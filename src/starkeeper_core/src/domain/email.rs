use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

// Dot-atom local part, one or more DNS labels with at least one dot in the domain.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
    )
    .expect("email pattern is a valid regex")
});

const MAX_EMAIL_LENGTH: usize = 254;

/// Canonical form used for uniqueness checks across accounts.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// A syntactically valid email address.
///
/// The raw value is kept behind [`Secret`] so it never ends up in logs via `Debug`.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    /// Returns true if `candidate` looks like an RFC 5322 addr-spec.
    pub fn is_well_formed(candidate: &str) -> bool {
        candidate.len() <= MAX_EMAIL_LENGTH && EMAIL_PATTERN.is_match(candidate)
    }

    pub fn normalized(&self) -> String {
        normalize_email(self.0.expose_secret())
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let trimmed = value.expose_secret().trim();
        if !Self::is_well_formed(trimmed) {
            return Err(UserError::InvalidEmail);
        }
        Ok(Self(Secret::new(trimmed.to_string())))
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}
