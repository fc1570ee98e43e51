use serde::Deserialize;

/// Typed profile of the authenticated subject.
///
/// Only `id` is required; the optional fields become extra claims when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubjectProfile {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl SubjectProfile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}
