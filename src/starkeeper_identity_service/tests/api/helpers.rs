use axum::http::HeaderName;
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use serde_json::Value;
use starkeeper_adapters::config::test;
use starkeeper_adapters::{
    HashMapUserStore, InMemoryApplicationStore, InMemoryAuthorizationStore, PasswordPolicy,
    UserStoreProfileProvider,
};
use starkeeper_core::ApplicationId;
use starkeeper_identity_service::{IdentityService, ServiceOptions};
use tokio::net::TcpListener;

pub const SUBJECT_HEADER: &str = "x-authenticated-subject";
pub const CLIENT_ID: &str = "service-worker";
pub const STRONG_PASSWORD: &str = "Correct horse battery 9 staple!";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub authorizations: InMemoryAuthorizationStore,
    pub application_id: ApplicationId,
}

impl TestApp {
    pub async fn new() -> Self {
        let user_store = HashMapUserStore::new(PasswordPolicy::default());
        let applications = InMemoryApplicationStore::new();
        let application_id = applications.register(CLIENT_ID).id();
        let authorizations = InMemoryAuthorizationStore::new();
        let profiles = UserStoreProfileProvider::new(user_store.clone());

        let options = ServiceOptions {
            application_name: "Starkeeper".to_string(),
            subject_header: HeaderName::from_static(SUBJECT_HEADER),
        };

        let router = IdentityService::new(
            user_store,
            applications,
            authorizations.clone(),
            profiles,
            options,
        )
        .as_nested_router(None);

        let listener = TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            address,
            http_client: reqwest::Client::new(),
            authorizations,
            application_id,
        }
    }

    pub async fn get_registration(&self) -> reqwest::Response {
        self.http_client
            .get(format!("{}/registration", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_registration(&self, body: &Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}/registration", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_authorize(&self, query: &[(&str, &str)]) -> reqwest::Response {
        self.http_client
            .get(format!("{}/connect/authorize", self.address))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_authorize(
        &self,
        subject: Option<&str>,
        form: &[(&str, &str)],
    ) -> reqwest::Response {
        let mut request = self
            .http_client
            .post(format!("{}/connect/authorize", self.address))
            .form(form);
        if let Some(subject) = subject {
            request = request.header(SUBJECT_HEADER, subject);
        }
        request.send().await.expect("Failed to execute request")
    }

    /// Registers a fresh account and returns its id and email.
    pub async fn register_user(&self) -> (String, String) {
        let email: String = SafeEmail().fake();
        let response = self
            .post_registration(&serde_json::json!({
                "email": email,
                "password": STRONG_PASSWORD,
            }))
            .await;
        assert_eq!(response.status().as_u16(), 201);

        let body: Value = response.json().await.unwrap();
        let id = body["id"].as_str().unwrap().to_string();
        (id, email)
    }
}
