use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use secrecy::ExposeSecret;
use starkeeper_core::{AccountError, Email, UserStore};

use super::create_user::CreateUserCommand;
use crate::validation::{Check, RuleChain, Validator};

pub const MIN_PASSWORD_LENGTH: usize = 16;

static CONTAINS_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("digit pattern is a valid regex"));

fn email(command: &CreateUserCommand) -> &str {
    command.email()
}

fn password(command: &CreateUserCommand) -> &str {
    command.password().expose_secret()
}

/// Registration rules.
///
/// Malformed and already-registered emails report the same message so the endpoint
/// cannot be used to probe which addresses have accounts.
pub fn create_user_validator<U>(user_store: U) -> Validator<CreateUserCommand>
where
    U: UserStore + 'static,
{
    Validator::new()
        .rule(
            RuleChain::for_field("Email", email)
                .not_empty()
                .satisfies(Email::is_well_formed)
                .check(EmailIsAvailable { user_store })
                .with_message(AccountError::InvalidEmailAddress.message()),
        )
        .rule(
            RuleChain::for_field("Password", password)
                .not_empty()
                .min_length(MIN_PASSWORD_LENGTH)
                .matches(CONTAINS_DIGIT.clone())
                .with_message(AccountError::WeakPassword.message()),
        )
}

/// Passes when no account exists for the normalized address.
struct EmailIsAvailable<U> {
    user_store: U,
}

#[async_trait]
impl<U: UserStore> Check for EmailIsAvailable<U> {
    async fn passes(&self, value: &str) -> bool {
        match self.user_store.find_by_email(value).await {
            Ok(existing) => existing.is_none(),
            Err(e) => {
                // Unknown store state counts as taken.
                tracing::error!(error = %e, "Email availability lookup failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;
    use starkeeper_core::{
        NewAccount, Password, UserAccount, UserId, UserStoreError, normalize_email,
    };
    use std::collections::HashSet;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct MockUserStore {
        registered: Arc<HashSet<String>>,
        broken: bool,
    }

    impl MockUserStore {
        fn with_emails(emails: &[&str]) -> Self {
            Self {
                registered: Arc::new(emails.iter().map(|e| normalize_email(e)).collect()),
                broken: false,
            }
        }
    }

    #[async_trait]
    impl UserStore for MockUserStore {
        async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, UserStoreError> {
            if self.broken {
                return Err(UserStoreError::UnexpectedError("connection reset".to_string()));
            }
            if !self.registered.contains(&normalize_email(email)) {
                return Ok(None);
            }
            let email = Email::try_from(Secret::new(email.to_string())).unwrap();
            Ok(Some(NewAccount::for_email(email).into_account(UserId::new())))
        }

        async fn find_by_id(&self, _id: &UserId) -> Result<Option<UserAccount>, UserStoreError> {
            unimplemented!()
        }

        async fn create(
            &self,
            _account: NewAccount,
            _password: Password,
        ) -> Result<UserId, UserStoreError> {
            unimplemented!()
        }
    }

    fn command(email: &str, password: &str) -> CreateUserCommand {
        CreateUserCommand::new(
            Secret::new(email.to_string()),
            Secret::new(password.to_string()),
        )
    }

    fn messages(failures: &[crate::ValidationFailure]) -> Vec<&str> {
        failures.iter().map(|f| f.message.as_str()).collect()
    }

    const STRONG: &str = "correct horse 42 battery";

    #[tokio::test]
    async fn test_valid_registration_passes() {
        let validator = create_user_validator(MockUserStore::default());
        assert!(validator.validate(&command("new@example.com", STRONG)).await.is_empty());
    }

    #[tokio::test]
    async fn test_every_email_failure_uses_the_same_message() {
        let validator = create_user_validator(MockUserStore::with_emails(&["taken@example.com"]));

        for raw in ["", "not-an-email", "TAKEN@example.com"] {
            let failures = validator.validate(&command(raw, STRONG)).await;
            assert!(!failures.is_empty(), "{raw:?} should be rejected");
            assert!(
                messages(&failures).iter().all(|m| *m == "Invalid email address"),
                "{raw:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_weak_passwords_are_rejected() {
        let validator = create_user_validator(MockUserStore::default());

        for raw in ["", "short1", "sixteen chars no digit", "123456789012345"] {
            let failures = validator.validate(&command("new@example.com", raw)).await;
            assert!(!failures.is_empty(), "{raw:?} should be rejected");
            assert!(messages(&failures).iter().all(|m| *m == "Weak password"));
        }
    }

    #[tokio::test]
    async fn test_password_of_exactly_minimum_length_with_digit_passes() {
        let validator = create_user_validator(MockUserStore::default());
        let password = format!("{}7", "a".repeat(MIN_PASSWORD_LENGTH - 1));

        assert!(validator.validate(&command("new@example.com", &password)).await.is_empty());
    }

    #[tokio::test]
    async fn test_failures_of_both_fields_are_collected() {
        let validator = create_user_validator(MockUserStore::default());
        let failures = validator.validate(&command("nope", "weak")).await;

        let fields: HashSet<&str> = failures.iter().map(|f| f.field).collect();
        assert_eq!(fields, HashSet::from(["Email", "Password"]));
    }

    #[tokio::test]
    async fn test_store_failure_during_lookup_rejects_email() {
        let store = MockUserStore {
            broken: true,
            ..Default::default()
        };
        let validator = create_user_validator(store);

        let failures = validator.validate(&command("new@example.com", STRONG)).await;
        assert_eq!(messages(&failures), ["Invalid email address"]);
    }

    #[tokio::test]
    async fn test_validation_is_repeatable() {
        let validator = create_user_validator(MockUserStore::with_emails(&["taken@example.com"]));
        let command = command("taken@example.com", "weak");

        let first = validator.validate(&command).await;
        let second = validator.validate(&command).await;
        assert_eq!(first, second);
    }
}
