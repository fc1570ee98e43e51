use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use starkeeper_core::{
    AccountError, CommandResult, Email, Failure, NewAccount, Password, UserId, UserStore,
    UserStoreError,
};

use super::create_user_validator::create_user_validator;
use crate::pipeline::{CommandHandler, Pipeline, ValidationStage};

/// Request to register a new account.
pub struct CreateUserCommand {
    email: Secret<String>,
    password: Secret<String>,
}

impl CreateUserCommand {
    pub fn new(email: Secret<String>, password: Secret<String>) -> Self {
        Self { email, password }
    }

    pub fn email(&self) -> &str {
        self.email.expose_secret()
    }

    pub fn password(&self) -> &Secret<String> {
        &self.password
    }
}

/// Creates the account once the command has passed validation.
pub struct CreateUserHandler<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> CreateUserHandler<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }
}

#[async_trait]
impl<U> CommandHandler<CreateUserCommand, UserId> for CreateUserHandler<U>
where
    U: UserStore,
{
    #[tracing::instrument(name = "CreateUserHandler::handle", skip_all)]
    async fn handle(&self, command: CreateUserCommand) -> CommandResult<UserId> {
        let CreateUserCommand { email, password } = command;

        let email = Email::try_from(email).map_err(|_| AccountError::InvalidEmailAddress)?;
        let account = NewAccount::for_email(email);

        match self.user_store.create(account, Password::from(password)).await {
            Ok(id) => {
                tracing::info!(user_id = %id, "Account created");
                Ok(id)
            }
            Err(UserStoreError::Rejected(errors)) => {
                tracing::debug!(count = errors.len(), "Identity store rejected account");
                Err(Failure::from_messages(errors.into_iter().map(|e| e.description))
                    .unwrap_or_else(|| AccountError::Unexpected.into()))
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    code = AccountError::Unexpected.code(),
                    "Account creation failed"
                );
                Err(AccountError::Unexpected.into())
            }
        }
    }
}

/// Registration pipeline: validation in front of [`CreateUserHandler`].
pub fn create_user_pipeline<U>(user_store: U) -> Pipeline<CreateUserCommand, UserId>
where
    U: UserStore + Clone + 'static,
{
    Pipeline::new(CreateUserHandler::new(user_store.clone()))
        .with_stage(ValidationStage::new(create_user_validator(user_store)))
}
