use reqwest::Client;
use starkeeper_adapters::{
    InMemoryApplicationStore, PasswordPolicy, PostgresUserStore,
    config::{ClientSettings, DatabaseSettings, ProfileServiceSettings},
    persistence::get_postgres_pool,
};

/// Connects to PostgreSQL and applies pending migrations.
pub async fn configure_postgresql(
    database: &DatabaseSettings,
    policy: PasswordPolicy,
) -> color_eyre::Result<PostgresUserStore> {
    let pool = get_postgres_pool(&database.url).await?;
    let store = PostgresUserStore::new(pool, policy);
    store.migrate().await?;
    Ok(store)
}

/// Registers the configured client applications.
pub fn seed_clients(applications: &InMemoryApplicationStore, clients: &[ClientSettings]) {
    for client in clients {
        let application = applications.register(&client.client_id);
        tracing::info!(
            client_id = %client.client_id,
            application_id = %application.id(),
            "Registered client application"
        );
    }
}

/// HTTP client for the profile service.
pub fn profile_http_client(settings: &ProfileServiceSettings) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(settings.timeout()).build()
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
