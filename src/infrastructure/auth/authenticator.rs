use serde::Deserialize;

use crate::domain::{AccessError, AccessTier, AuthMode, Credentials, Session, UserId};
use crate::infrastructure::http::ApiClient;

/// Login/signup producer
///
/// Submits credentials to the auth backend and turns a successful response
/// into a `Session` value. It never writes the session store; the access
/// manager owns that step, so a failure here can never leave a partial
/// record behind.
#[derive(Debug)]
pub struct CredentialAuthenticator<C: ApiClient> {
    client: C,
    base_url: String,
}

impl<C: ApiClient> CredentialAuthenticator<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { client, base_url }
    }

    fn login_url(&self) -> String {
        format!("{}/api/auth/login", self.base_url)
    }

    fn signup_url(&self) -> String {
        format!("{}/api/auth/signup", self.base_url)
    }

    fn build_request(&self, mode: AuthMode, credentials: &Credentials) -> serde_json::Value {
        let mut body = serde_json::json!({
            "email": credentials.email,
            "password": credentials.password,
        });

        if mode == AuthMode::Signup {
            body["name"] = serde_json::json!(credentials.name);

            // Omitted entirely when the user supplied no code; the backend
            // resolves the tier, the client never upgrades itself.
            if let Some(code) = &credentials.team_code {
                body["team_code"] = serde_json::json!(code);
            }
        }

        body
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<Session, AccessError> {
        let response: AuthResponse = serde_json::from_value(json).map_err(|e| {
            AccessError::internal(format!("Failed to parse auth response: {}", e))
        })?;

        let display_name = response
            .user
            .name
            .unwrap_or_else(|| response.user.email.clone());

        Ok(Session::authenticated(
            UserId::new(response.user.id),
            display_name,
            response.user.email,
            response.user.access_tier,
            response.access_token,
        ))
    }

    /// Authenticate against the backend.
    ///
    /// Local validation failures never reach the network; backend rejections
    /// and transport failures come back as distinct error variants.
    pub async fn authenticate(
        &self,
        mode: AuthMode,
        credentials: &Credentials,
    ) -> Result<Session, AccessError> {
        credentials.validate(mode)?;

        let url = match mode {
            AuthMode::Login => self.login_url(),
            AuthMode::Signup => self.signup_url(),
        };

        let body = self.build_request(mode, credentials);

        tracing::debug!(email = %credentials.email, ?mode, "submitting credentials");

        let response = self.client.post_json(&url, &body).await.inspect_err(|e| {
            tracing::warn!(email = %credentials.email, error = %e, "authentication failed");
        })?;

        let session = self.parse_response(response)?;

        tracing::info!(
            user_id = %session.user_id(),
            tier = %session.access_tier(),
            "authenticated"
        );

        Ok(session)
    }
}

// Auth backend wire types

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    user: UserPayload,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    email: String,
    name: Option<String>,
    // The backend emits camelCase here, older deployments snake_case.
    #[serde(alias = "accessTier")]
    access_tier: AccessTier,
}
