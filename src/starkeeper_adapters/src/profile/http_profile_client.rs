use reqwest::{Client, StatusCode, Url};
use starkeeper_core::{ProfileLookupError, ProfileProvider, SubjectProfile};

/// Fetches subject profiles from the user profile service over HTTP.
///
/// Certificate validation stays at the `reqwest` defaults.
#[derive(Clone)]
pub struct HttpProfileClient {
    http_client: Client,
    base_url: Url,
}

impl HttpProfileClient {
    pub fn new(base_url: Url, http_client: Client) -> Self {
        Self {
            http_client,
            base_url,
        }
    }

    fn profile_url(&self, subject: &str) -> Result<Url, ProfileLookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ProfileLookupError::Unreachable(format!("{} cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(["users", subject]);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl ProfileProvider for HttpProfileClient {
    #[tracing::instrument(name = "Fetching profile from profile service", skip(self))]
    async fn fetch_profile(&self, subject: &str) -> Result<SubjectProfile, ProfileLookupError> {
        let url = self.profile_url(subject)?;

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ProfileLookupError::Unreachable(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProfileLookupError::NotFound(subject.to_string()));
        }

        response
            .error_for_status()
            .map_err(|e| ProfileLookupError::Unreachable(e.to_string()))?
            .json::<SubjectProfile>()
            .await
            .map_err(|e| ProfileLookupError::Malformed(e.to_string()))
    }
}
