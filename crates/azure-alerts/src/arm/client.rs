//! ARM API client implementation.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ProvisionError;

/// Azure Resource Manager endpoint.
pub const ARM_BASE_URL: &str = "https://management.azure.com";

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Authenticated Azure Resource Manager client.
#[derive(Clone)]
pub struct ArmClient {
    /// HTTP client.
    client: Client,
    /// Base URL that resource IDs are appended to.
    base_url: String,
    /// Bearer token.
    access_token: String,
}

impl std::fmt::Debug for ArmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArmClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ArmClient {
    /// Create a client for the public Azure Resource Manager endpoint.
    ///
    /// # Errors
    /// Returns error if HTTP client cannot be created.
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> Result<Self, ProvisionError> {
        Self::with_base_url(ARM_BASE_URL, access_token, timeout)
    }

    /// Create a client against a custom base URL (sovereign clouds, mocks).
    ///
    /// # Errors
    /// Returns error if HTTP client cannot be created.
    pub fn with_base_url(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProvisionError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    /// Full request URL for a resource ID.
    #[must_use]
    pub fn resource_url(&self, resource_id: &str, api_version: &str) -> String {
        resource_url(&self.base_url, resource_id, api_version)
    }

    /// Create or replace a resource with an authenticated `PUT`.
    ///
    /// `kind` names the resource in logs and errors. Any status below 300
    /// counts as success; the response body is not read back.
    ///
    /// # Errors
    /// Returns [`ProvisionError::Serialization`] if the body cannot be
    /// encoded, [`ProvisionError::Http`] on transport failure or timeout, and
    /// [`ProvisionError::Rejected`] for a status of 300 or above.
    pub async fn put_resource<B: Serialize>(
        &self,
        kind: &'static str,
        resource_id: &str,
        api_version: &str,
        body: &B,
    ) -> Result<(), ProvisionError> {
        let url = self.resource_url(resource_id, api_version);
        let payload = serde_json::to_vec_pretty(body)?;

        debug!(url = %url, bytes = payload.len(), kind, "PUT request");

        let response = self
            .client
            .put(&url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() >= 300 {
            let body = response.text().await.unwrap_or_default();
            warn!(kind, status = %status, "Resource request rejected");
            return Err(ProvisionError::Rejected { kind, status, body });
        }

        info!(kind, resource_id = %resource_id, status = %status, "Resource created");
        Ok(())
    }
}

/// Join a base URL, resource ID and API version into a request URL.
#[must_use]
pub fn resource_url(base_url: &str, resource_id: &str, api_version: &str) -> String {
    format!(
        "{}{resource_id}?api-version={api_version}",
        base_url.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ID: &str = "/subscriptions/s1/resourceGroups/rg1/providers/microsoft.insights/actionGroups/ag1";

    fn client(server: &MockServer) -> ArmClient {
        ArmClient::with_base_url(server.uri(), "tok", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_resource_url() {
        let client = ArmClient::new("tok", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.resource_url(ID, "2022-06-01"),
            format!("https://management.azure.com{ID}?api-version=2022-06-01")
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client =
            ArmClient::with_base_url("http://localhost:1234/", "tok", Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            client.resource_url("/x", "v1"),
            "http://localhost:1234/x?api-version=v1"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let client = ArmClient::new("secret-token", Duration::from_secs(1)).unwrap();
        assert!(!format!("{client:?}").contains("secret-token"));
    }

    #[tokio::test]
    async fn test_put_resource_success() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(ID))
            .and(query_param("api-version", "2022-06-01"))
            .and(header("Authorization", "Bearer tok"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({"location": "global"})))
            .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .put_resource(
                "action group",
                ID,
                "2022-06-01",
                &serde_json::json!({"location": "global"}),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_put_resource_rejected_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":{"code":"BadRequest"}}"#),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .put_resource("action group", ID, "2022-06-01", &serde_json::json!({}))
            .await
            .unwrap_err();

        match err {
            ProvisionError::Rejected { kind, status, body } => {
                assert_eq!(kind, "action group");
                assert_eq!(status.as_u16(), 400);
                assert!(body.contains("BadRequest"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_put_resource_redirect_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(304))
            .mount(&server)
            .await;

        let err = client(&server)
            .put_resource("alert rule", ID, "2023-12-01", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::Rejected { .. }));
    }

    #[tokio::test]
    async fn test_put_resource_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client =
            ArmClient::with_base_url(server.uri(), "tok", Duration::from_millis(200)).unwrap();
        let err = client
            .put_resource("alert rule", ID, "2023-12-01", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::Http(_)));
    }
}
