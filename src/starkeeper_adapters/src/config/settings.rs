use std::collections::HashSet;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use config::{Config, Environment, File};
use reqwest::Url;
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

use super::constants::{defaults, env};
use crate::persistence::PasswordPolicy;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration build error: {0}")]
    Build(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationSettings,
    #[serde(default)]
    pub database: Option<DatabaseSettings>,
    #[serde(default)]
    pub profile_service: Option<ProfileServiceSettings>,
    #[serde(default)]
    pub authentication: AuthenticationSettings,
    #[serde(default)]
    pub password_policy: PasswordPolicy,
    #[serde(default = "default_clients")]
    pub clients: Vec<ClientSettings>,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApplicationSettings {
    /// Display name shown on the consent screen.
    pub name: String,
    pub address: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            name: defaults::APPLICATION_NAME.to_string(),
            address: defaults::APP_ADDRESS.to_string(),
        }
    }
}

/// When absent, accounts are kept in memory.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
}

/// When absent, profiles are resolved from the local identity store.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileServiceSettings {
    pub base_url: String,
    pub timeout_in_millis: u64,
}

impl ProfileServiceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthenticationSettings {
    /// Request header carrying the subject authenticated upstream.
    pub subject_header: String,
}

impl Default for AuthenticationSettings {
    fn default() -> Self {
        Self {
            subject_header: defaults::SUBJECT_HEADER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub client_id: String,
}

fn default_clients() -> Vec<ClientSettings> {
    vec![ClientSettings {
        client_id: defaults::CLIENT_ID.to_string(),
    }]
}

/// Origins allowed to make cross-origin requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(origins.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.iter().any(|allowed| allowed.as_bytes() == origin.as_bytes())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Settings {
    /// Loads `.env`, the optional settings file and `STARKEEPER__*` overrides, in that
    /// order of increasing precedence.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let path = std::env::var(env::CONFIG_PATH_ENV_VAR)
            .unwrap_or_else(|_| defaults::CONFIG_PATH.to_string());

        let config = Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn profile_service_url(&self) -> Option<Result<Url, SettingsError>> {
        self.profile_service.as_ref().map(|profile| {
            Url::parse(&profile.base_url).map_err(|e| {
                SettingsError::Validation(format!("profile_service.base_url is invalid: {e}"))
            })
        })
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.application.name.trim().is_empty() {
            return Err(SettingsError::Validation(
                "application.name must not be empty".into(),
            ));
        }
        if HeaderName::from_bytes(self.authentication.subject_header.as_bytes()).is_err() {
            return Err(SettingsError::Validation(format!(
                "authentication.subject_header '{}' is not a valid header name",
                self.authentication.subject_header
            )));
        }
        if let Some(profile) = &self.profile_service {
            if profile.timeout_in_millis == 0 {
                return Err(SettingsError::Validation(
                    "profile_service.timeout_in_millis must be > 0".into(),
                ));
            }
        }
        if let Some(Err(e)) = self.profile_service_url() {
            return Err(e);
        }

        let mut seen = HashSet::new();
        for client in &self.clients {
            if client.client_id.trim().is_empty() {
                return Err(SettingsError::Validation(
                    "clients[].client_id must not be empty".into(),
                ));
            }
            if !seen.insert(client.client_id.as_str()) {
                return Err(SettingsError::Validation(format!(
                    "client '{}' is registered more than once",
                    client.client_id
                )));
            }
        }

        Ok(())
    }
}
