use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::AccessError;

/// Trait for auth backend HTTP operations (for mocking)
///
/// Errors already carry the rejected/unreachable distinction: a non-2xx
/// response becomes `AccessError::Rejected` with the backend's `detail`
/// message, while transport failures and timeouts become
/// `AccessError::Unreachable`.
#[async_trait]
pub trait ApiClient: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, AccessError>;

    async fn get_json(&self, url: &str) -> Result<serde_json::Value, AccessError>;
}

#[async_trait]
impl<T: ApiClient + ?Sized> ApiClient for std::sync::Arc<T> {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, AccessError> {
        (**self).post_json(url, body).await
    }

    async fn get_json(&self, url: &str) -> Result<serde_json::Value, AccessError> {
        (**self).get_json(url).await
    }
}

/// Error body shape used by the auth backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    client: reqwest::Client,
}

impl ReqwestApiClient {
    /// Build a client with the given request timeout.
    ///
    /// The backend specifies no timeout of its own; expiry surfaces as the
    /// generic unreachable error.
    pub fn new(timeout: Duration) -> Result<Self, AccessError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AccessError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn handle_response(
        response: reqwest::Response,
    ) -> Result<serde_json::Value, AccessError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            // Prefer the backend's own message; fall back to the status line.
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.detail)
                .unwrap_or_else(|_| format!("Request failed with HTTP {}", status.as_u16()));

            return Err(AccessError::rejected(message));
        }

        response
            .json()
            .await
            .map_err(|e| AccessError::internal(format!("Failed to parse response: {}", e)))
    }

    fn transport_error(e: reqwest::Error) -> AccessError {
        if e.is_timeout() {
            AccessError::unreachable("request timed out")
        } else {
            AccessError::unreachable(e.to_string())
        }
    }
}

#[async_trait]
impl ApiClient for ReqwestApiClient {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, AccessError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::handle_response(response).await
    }

    async fn get_json(&self, url: &str) -> Result<serde_json::Value, AccessError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::handle_response(response).await
    }
}
