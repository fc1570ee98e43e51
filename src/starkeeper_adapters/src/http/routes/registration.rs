use std::sync::Arc;

use askama::Template;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use starkeeper_application::{CreateUserCommand, MIN_PASSWORD_LENGTH, Pipeline};
use starkeeper_core::UserId;

use super::error::IdentityApiError;

pub type RegistrationPipeline = Arc<Pipeline<CreateUserCommand, UserId>>;

#[derive(Deserialize)]
pub struct RegistrationRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub id: UserId,
}

#[derive(Template)]
#[template(path = "registration.html")]
struct RegistrationPage {
    min_password_length: usize,
}

pub async fn registration_form() -> Result<Html<String>, IdentityApiError> {
    RegistrationPage {
        min_password_length: MIN_PASSWORD_LENGTH,
    }
    .render()
    .map(Html)
    .map_err(|e| IdentityApiError::UnexpectedError(e.to_string()))
}

#[tracing::instrument(name = "Registration", skip_all)]
pub async fn register(
    State(pipeline): State<RegistrationPipeline>,
    Json(request): Json<RegistrationRequest>,
) -> Result<impl IntoResponse, IdentityApiError> {
    let command = CreateUserCommand::new(request.email, request.password);

    let id = pipeline.dispatch(command).await?;

    Ok((StatusCode::CREATED, Json(RegistrationResponse { id })))
}
