pub mod authorize;
pub mod error;
pub mod registration;

pub use authorize::{AuthorizeState, accept, consent};
pub use error::{ErrorListResponse, ErrorResponse, IdentityApiError};
pub use registration::{
    RegistrationPipeline, RegistrationRequest, RegistrationResponse, register, registration_form,
};
