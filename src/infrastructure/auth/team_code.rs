use serde::Deserialize;

use crate::domain::credentials::validate_team_code;
use crate::domain::{AccessError, TeamCodeStatus};
use crate::infrastructure::http::ApiClient;

/// Team access code lookup
///
/// Read-only: reports whether a code is currently valid and what tier it
/// would grant at signup. Never touches the session store. A non-2xx answer
/// means the code is invalid (expired, revoked, or never issued; the backend
/// does not say which), which is a normal result here, not an error.
#[derive(Debug)]
pub struct TeamCodeValidator<C: ApiClient> {
    client: C,
    base_url: String,
}

impl<C: ApiClient> TeamCodeValidator<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { client, base_url }
    }

    // The code goes in as one path segment; `/`, `?`, `#`, and whitespace
    // inside a code must not change the request target.
    fn lookup_url(&self, code: &str) -> Result<String, AccessError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| AccessError::internal(format!("Invalid backend URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| AccessError::internal("Backend URL cannot carry a path"))?
            .pop_if_empty()
            .extend(["api", "auth", "team-code", code]);

        Ok(url.to_string())
    }

    /// Check a code against the backend.
    ///
    /// An empty code is refused locally. Only transport failures propagate
    /// as errors.
    pub async fn validate(&self, code: &str) -> Result<TeamCodeStatus, AccessError> {
        validate_team_code(code).map_err(|e| AccessError::validation(e.to_string()))?;

        let url = self.lookup_url(code.trim())?;

        match self.client.get_json(&url).await {
            Ok(json) => {
                let response: TeamCodeResponse = serde_json::from_value(json).map_err(|e| {
                    AccessError::internal(format!("Failed to parse team code response: {}", e))
                })?;

                tracing::debug!(tier = %response.team_code.access_level, "team code is valid");
                Ok(TeamCodeStatus::valid(response.team_code.access_level))
            }
            Err(AccessError::Rejected { .. }) => Ok(TeamCodeStatus::invalid()),
            Err(e) => Err(e),
        }
    }
}

// Auth backend wire types

#[derive(Debug, Deserialize)]
struct TeamCodeResponse {
    team_code: TeamCodePayload,
}

#[derive(Debug, Deserialize)]
struct TeamCodePayload {
    #[serde(alias = "accessLevel")]
    access_level: crate::domain::AccessTier,
}
