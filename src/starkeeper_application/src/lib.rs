pub mod pipeline;
pub mod use_cases;
pub mod validation;

pub use pipeline::{CommandHandler, Next, Pipeline, PipelineStage, ValidationStage};
pub use use_cases::{
    AuthorizationNegotiator, AuthorizeError, CreateUserCommand, CreateUserHandler,
    MIN_PASSWORD_LENGTH, create_user_pipeline, create_user_validator,
};
pub use validation::{Cascade, Check, RuleChain, ValidationFailure, Validator};
