use secrecy::Secret;

/// Plaintext password on its way to the identity store.
///
/// Strength rules are enforced by the registration validator and the store's own
/// password policy, not by this type. It only guarantees the value stays redacted.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl From<Secret<String>> for Password {
    fn from(value: Secret<String>) -> Self {
        Self(value)
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_debug_output_is_redacted() {
        let password = Password::from(Secret::new("correct horse battery 1".to_string()));
        let debug = format!("{password:?}");
        assert!(!debug.contains("correct horse"));
        assert_eq!(password.as_ref().expose_secret(), "correct horse battery 1");
    }
}
