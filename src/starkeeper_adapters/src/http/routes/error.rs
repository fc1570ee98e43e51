use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use starkeeper_application::AuthorizeError;
use starkeeper_core::Failure;
use thiserror::Error;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Registration refusals, one entry per distinct message.
#[derive(Serialize, Deserialize)]
pub struct ErrorListResponse {
    pub errors: Vec<String>,
}

#[derive(Debug, Error)]
pub enum IdentityApiError {
    #[error("{0}")]
    RegistrationFailed(Failure),

    #[error("Missing authenticated subject")]
    MissingSubject,

    #[error("invalid_client")]
    InvalidClient,

    #[error("Subject lookup failed: {0}")]
    SubjectLookup(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for IdentityApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            IdentityApiError::RegistrationFailed(failure) => {
                let status_code = if failure.is_unexpected() {
                    StatusCode::INTERNAL_SERVER_ERROR
                } else {
                    StatusCode::BAD_REQUEST
                };
                let body = Json(ErrorListResponse {
                    errors: failure.into_messages(),
                });
                return (status_code, body).into_response();
            }

            IdentityApiError::MissingSubject => (StatusCode::UNAUTHORIZED, self.to_string()),

            IdentityApiError::InvalidClient => (StatusCode::BAD_REQUEST, self.to_string()),

            IdentityApiError::SubjectLookup(_) => (StatusCode::BAD_GATEWAY, self.to_string()),

            IdentityApiError::UnexpectedError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<Failure> for IdentityApiError {
    fn from(failure: Failure) -> Self {
        IdentityApiError::RegistrationFailed(failure)
    }
}

impl From<AuthorizeError> for IdentityApiError {
    fn from(error: AuthorizeError) -> Self {
        match error {
            AuthorizeError::ClientNotFound(_) => IdentityApiError::InvalidClient,
            AuthorizeError::SubjectLookup(e) => IdentityApiError::SubjectLookup(e.to_string()),
            AuthorizeError::ApplicationStore(_) | AuthorizeError::AuthorizationStore(_) => {
                IdentityApiError::UnexpectedError(error.to_string())
            }
        }
    }
}
