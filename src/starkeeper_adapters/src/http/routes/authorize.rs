use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderName},
    response::Html,
};
use starkeeper_application::{AuthorizationNegotiator, AuthorizeError};
use starkeeper_core::{
    ApplicationStore, AuthorizationRequest, AuthorizationStore, ProfileProvider, SignInDirective,
};

use super::error::IdentityApiError;

/// Shared state of the authorization endpoint.
///
/// The subject is read from `subject_header` as-is. The service must only be reachable
/// through the authenticating proxy that sets this header and strips it from client
/// requests.
pub struct AuthorizeState<A, Z, P>
where
    A: ApplicationStore,
    Z: AuthorizationStore,
    P: ProfileProvider,
{
    negotiator: Arc<AuthorizationNegotiator<A, Z, P>>,
    subject_header: HeaderName,
}

impl<A, Z, P> AuthorizeState<A, Z, P>
where
    A: ApplicationStore,
    Z: AuthorizationStore,
    P: ProfileProvider,
{
    pub fn new(negotiator: AuthorizationNegotiator<A, Z, P>, subject_header: HeaderName) -> Self {
        Self {
            negotiator: Arc::new(negotiator),
            subject_header,
        }
    }
}

impl<A, Z, P> Clone for AuthorizeState<A, Z, P>
where
    A: ApplicationStore,
    Z: AuthorizationStore,
    P: ProfileProvider,
{
    fn clone(&self) -> Self {
        Self {
            negotiator: Arc::clone(&self.negotiator),
            subject_header: self.subject_header.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "consent.html")]
struct ConsentPage {
    application_name: String,
    scope: String,
    parameters: Vec<(&'static str, String)>,
}

// Request parameters echoed back by the consent form.
fn form_parameters(request: &AuthorizationRequest) -> Vec<(&'static str, String)> {
    let mut parameters = vec![("client_id", request.client_id.clone())];
    for (name, value) in [
        ("scope", &request.scope),
        ("response_type", &request.response_type),
        ("redirect_uri", &request.redirect_uri),
        ("state", &request.state),
    ] {
        if let Some(value) = value {
            parameters.push((name, value.clone()));
        }
    }
    parameters
}

#[tracing::instrument(name = "Authorize", skip_all)]
pub async fn consent<A, Z, P>(
    State(state): State<AuthorizeState<A, Z, P>>,
    Query(request): Query<AuthorizationRequest>,
) -> Result<Html<String>, IdentityApiError>
where
    A: ApplicationStore + 'static,
    Z: AuthorizationStore + 'static,
    P: ProfileProvider + 'static,
{
    let view = state.negotiator.present_consent(&request);

    let page = ConsentPage {
        application_name: view.application_name,
        scope: view.scope,
        parameters: form_parameters(&request),
    };

    page.render()
        .map(Html)
        .map_err(|e| IdentityApiError::UnexpectedError(e.to_string()))
}

#[tracing::instrument(name = "Accept", skip_all)]
pub async fn accept<A, Z, P>(
    State(state): State<AuthorizeState<A, Z, P>>,
    headers: HeaderMap,
    Form(request): Form<AuthorizationRequest>,
) -> Result<Json<SignInDirective>, IdentityApiError>
where
    A: ApplicationStore + 'static,
    Z: AuthorizationStore + 'static,
    P: ProfileProvider + 'static,
{
    let subject = headers
        .get(&state.subject_header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|subject| !subject.is_empty())
        .ok_or(IdentityApiError::MissingSubject)?;

    let directive = state
        .negotiator
        .accept(&request, subject)
        .await
        .inspect_err(|e| match e {
            AuthorizeError::ClientNotFound(_) => tracing::debug!(error = %e, "Unknown client"),
            _ => tracing::error!(error = %e, "Authorization request aborted"),
        })?;

    Ok(Json(directive))
}
