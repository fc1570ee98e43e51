use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, request},
    routing::get,
};
use starkeeper_adapters::{
    config::AllowedOrigins,
    http::routes::{
        AuthorizeState, RegistrationPipeline, accept, consent, register, registration_form,
    },
};
use starkeeper_application::{AuthorizationNegotiator, create_user_pipeline};
use starkeeper_core::{ApplicationStore, AuthorizationStore, ProfileProvider, UserStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::helpers::shutdown_signal;
use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Registration and authorization endpoints of the identity service.
pub struct IdentityService {
    router: Router,
}

/// Presentation options that do not come from a store.
pub struct ServiceOptions {
    /// Display name on the consent screen.
    pub application_name: String,
    /// Header carrying the subject authenticated upstream. It is trusted without
    /// verification, so deploy only behind the proxy that sets it.
    pub subject_header: HeaderName,
}

impl IdentityService {
    /// Builds the router. Each route gets only the state it needs.
    pub fn new<U, A, Z, P>(
        user_store: U,
        applications: A,
        authorizations: Z,
        profiles: P,
        options: ServiceOptions,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        A: ApplicationStore + 'static,
        Z: AuthorizationStore + 'static,
        P: ProfileProvider + 'static,
    {
        let pipeline: RegistrationPipeline = Arc::new(create_user_pipeline(user_store));
        let negotiator = AuthorizationNegotiator::new(
            applications,
            authorizations,
            profiles,
            options.application_name,
        );

        let router = Router::new()
            // Registration only needs the command pipeline
            .route("/registration", get(registration_form).post(register))
            .with_state(pipeline)
            // Authorization needs the negotiator and the subject header
            .route(
                "/connect/authorize",
                get(consent::<A, Z, P>).post(accept::<A, Z, P>),
            )
            .with_state(AuthorizeState::new(negotiator, options.subject_header));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be mounted on another router
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Serves until Ctrl-C, then drains in-flight requests.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Identity service listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
