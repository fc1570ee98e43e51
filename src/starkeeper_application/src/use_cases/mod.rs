pub mod authorize;
pub mod create_user;
pub mod create_user_validator;

// Re-export for convenience
pub use authorize::{AuthorizationNegotiator, AuthorizeError};
pub use create_user::{CreateUserCommand, CreateUserHandler, create_user_pipeline};
pub use create_user_validator::{MIN_PASSWORD_LENGTH, create_user_validator};
