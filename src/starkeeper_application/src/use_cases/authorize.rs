use starkeeper_core::{
    ApplicationStore, ApplicationStoreError, AuthorizationRecord, AuthorizationRequest,
    AuthorizationStore, AuthorizationStoreError, AuthorizationType, ClaimType, ClaimsPrincipal,
    ClientApplication, ConsentView, ProfileLookupError, ProfileProvider, ScopeSet,
    SignInDirective, SubjectProfile, destinations_for, scopes,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthorizeError {
    #[error("Client application '{0}' was not found")]
    ClientNotFound(String),
    #[error("Subject lookup failed: {0}")]
    SubjectLookup(#[from] ProfileLookupError),
    #[error("Application store failed: {0}")]
    ApplicationStore(#[from] ApplicationStoreError),
    #[error("Authorization store failed: {0}")]
    AuthorizationStore(#[from] AuthorizationStoreError),
}

/// Authorization endpoint logic: consent display and acceptance.
pub struct AuthorizationNegotiator<A, Z, P>
where
    A: ApplicationStore,
    Z: AuthorizationStore,
    P: ProfileProvider,
{
    applications: A,
    authorizations: Z,
    profiles: P,
    application_name: String,
}

impl<A, Z, P> AuthorizationNegotiator<A, Z, P>
where
    A: ApplicationStore,
    Z: AuthorizationStore,
    P: ProfileProvider,
{
    pub fn new(
        applications: A,
        authorizations: Z,
        profiles: P,
        application_name: impl Into<String>,
    ) -> Self {
        Self {
            applications,
            authorizations,
            profiles,
            application_name: application_name.into(),
        }
    }

    /// Consent screen contents. The scope string is echoed exactly as requested.
    pub fn present_consent(&self, request: &AuthorizationRequest) -> ConsentView {
        ConsentView {
            application_name: self.application_name.clone(),
            scope: request.scope.clone().unwrap_or_default(),
        }
    }

    /// Grants the request on behalf of `subject`.
    ///
    /// Resolves the client and the subject's profile, narrows the requested scopes to
    /// the supported set, reuses or records a permanent authorization and returns the
    /// principal with every claim routed to its token destinations.
    #[tracing::instrument(
        name = "AuthorizationNegotiator::accept",
        skip(self, request),
        fields(client_id = %request.client_id)
    )]
    pub async fn accept(
        &self,
        request: &AuthorizationRequest,
        subject: &str,
    ) -> Result<SignInDirective, AuthorizeError> {
        let application = self
            .applications
            .find_by_client_id(&request.client_id)
            .await?
            .ok_or_else(|| AuthorizeError::ClientNotFound(request.client_id.clone()))?;

        let profile = self.profiles.fetch_profile(subject).await?;
        if profile.id.trim().is_empty() {
            return Err(ProfileLookupError::Malformed("profile has an empty id".to_string()).into());
        }

        let granted = request
            .requested_scopes()
            .intersect_allowed(&scopes::SUPPORTED);

        let authorization = self
            .resolve_authorization(&profile.id, &application, &granted)
            .await?;

        let mut principal = principal_for(&profile);
        principal.set_scopes(granted);
        principal.set_destinations(destinations_for);

        tracing::debug!(authorization_id = %authorization.id, "Authorization accepted");
        Ok(SignInDirective {
            principal,
            authorization_id: authorization.id,
        })
    }

    // Any stored permanent authorization covering every granted scope is reused,
    // newest first; otherwise a new one is recorded.
    async fn resolve_authorization(
        &self,
        subject: &str,
        application: &ClientApplication,
        granted: &ScopeSet,
    ) -> Result<AuthorizationRecord, AuthorizationStoreError> {
        let existing = self
            .authorizations
            .find_permanent(subject, &application.id())
            .await?;

        if let Some(record) = existing.into_iter().find(|r| covers(r, granted)) {
            tracing::debug!(authorization_id = %record.id, "Reusing permanent authorization");
            return Ok(record);
        }

        self.authorizations
            .create(
                subject,
                &application.id(),
                AuthorizationType::Permanent,
                granted.clone(),
            )
            .await
    }
}

fn covers(record: &AuthorizationRecord, granted: &ScopeSet) -> bool {
    record.is_permanent() && granted.iter().all(|scope| record.scopes.contains(scope))
}

fn principal_for(profile: &SubjectProfile) -> ClaimsPrincipal {
    let mut principal = ClaimsPrincipal::new().with_claim(ClaimType::Subject, &profile.id);

    if let Some(email) = &profile.email {
        principal.add_claim(ClaimType::Email, email);
    }
    if let Some(name) = &profile.name {
        principal.add_claim(ClaimType::Name, name);
    }
    if let Some(username) = &profile.preferred_username {
        principal.add_claim(ClaimType::PreferredUsername, username);
    }
    for role in &profile.roles {
        principal.add_claim(ClaimType::Role, role);
    }
    principal
}
