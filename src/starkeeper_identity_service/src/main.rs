use axum::http::HeaderName;
use color_eyre::eyre::Result;
use starkeeper_adapters::{
    HashMapUserStore, HttpProfileClient, InMemoryApplicationStore, InMemoryAuthorizationStore,
    UserStoreProfileProvider, config::Settings,
};
use starkeeper_core::UserStore;
use starkeeper_identity_service::{
    IdentityService, ServiceOptions,
    helpers::{configure_postgresql, profile_http_client, seed_clients},
    tracing::init_tracing,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load()?;

    match settings.database.clone() {
        Some(database) => {
            let user_store =
                configure_postgresql(&database, settings.password_policy.clone()).await?;
            tracing::info!("Using PostgreSQL identity store");
            serve(settings, user_store).await
        }
        None => {
            let user_store = HashMapUserStore::new(settings.password_policy.clone());
            tracing::warn!("No database configured, accounts are kept in memory");
            serve(settings, user_store).await
        }
    }
}

async fn serve<U>(settings: Settings, user_store: U) -> Result<()>
where
    U: UserStore + Clone + 'static,
{
    let applications = InMemoryApplicationStore::new();
    seed_clients(&applications, &settings.clients);
    let authorizations = InMemoryAuthorizationStore::new();

    let options = ServiceOptions {
        application_name: settings.application.name.clone(),
        subject_header: HeaderName::from_bytes(settings.authentication.subject_header.as_bytes())?,
    };
    let allowed_origins =
        (!settings.allowed_origins.is_empty()).then(|| settings.allowed_origins.clone());

    let listener = TcpListener::bind(&settings.application.address).await?;

    let service = match (&settings.profile_service, settings.profile_service_url()) {
        (Some(profile_settings), Some(base_url)) => {
            let http_client = profile_http_client(profile_settings)?;
            let profiles = HttpProfileClient::new(base_url?, http_client);
            IdentityService::new(user_store, applications, authorizations, profiles, options)
        }
        _ => {
            let profiles = UserStoreProfileProvider::new(user_store.clone());
            IdentityService::new(user_store, applications, authorizations, profiles, options)
        }
    };

    service.run_standalone(listener, allowed_origins).await?;

    Ok(())
}
