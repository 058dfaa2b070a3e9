//! Service-to-service credential for the provider's management API.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::AppError;
use crate::state::auth_config::AuthConfig;

const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct ClientCredentialsRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    audience: &'a str,
    grant_type: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Obtains a management API access token via the client-credentials grant
/// and memoizes it for the process lifetime.
///
/// There is no expiry tracking: a long-lived process can hold the token past
/// its real expiry, at which point management calls start failing until
/// restart. Callers observe failures; nothing here retries.
pub struct ManagementTokenProvider {
    client: reqwest::Client,
    token_url: String,
    audience: String,
    client_id: String,
    client_secret: String,
    token: OnceCell<String>,
}

impl ManagementTokenProvider {
    pub fn new(auth: &AuthConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            token_url: auth.token_url(),
            audience: auth.management_audience(),
            client_id: auth.management_client_id.clone(),
            client_secret: auth.management_client_secret.clone(),
            token: OnceCell::new(),
        }
    }

    pub async fn token(&self) -> Result<&str, AppError> {
        self.token
            .get_or_try_init(|| self.exchange())
            .await
            .map(String::as_str)
    }

    async fn exchange(&self) -> Result<String, AppError> {
        debug!(url = %self.token_url, "exchanging client credentials for management token");

        let body = ClientCredentialsRequest {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            audience: &self.audience,
            grant_type: "client_credentials",
        };

        let response = self
            .client
            .post(&self.token_url)
            .json(&body)
            .timeout(EXCHANGE_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                AppError::upstream_unavailable(format!("management token exchange failed: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(AppError::upstream_unavailable(format!(
                "management token exchange returned HTTP {}",
                response.status()
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            AppError::upstream_unavailable(format!("management token response invalid: {e}"))
        })?;

        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::ManagementTokenProvider;
    use crate::error::AppError;
    use crate::state::auth_config::AuthConfig;

    fn provider_for(server: &MockServer) -> ManagementTokenProvider {
        let auth = AuthConfig::new(server.uri(), "aud", "mgmt-client", "mgmt-secret");
        ManagementTokenProvider::new(&auth)
    }

    #[tokio::test]
    async fn exchanges_once_and_memoizes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_partial_json(json!({
                "client_id": "mgmt-client",
                "grant_type": "client_credentials",
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "mgmt-token-1", "expires_in": 86400})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);

        assert_eq!(provider.token().await.unwrap(), "mgmt-token-1");
        assert_eq!(provider.token().await.unwrap(), "mgmt-token-1");
    }

    #[tokio::test]
    async fn rejected_exchange_maps_to_upstream_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let provider = provider_for(&server);

        match provider.token().await {
            Err(AppError::UpstreamUnavailable { .. }) => {}
            other => panic!("expected UpstreamUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sends_management_audience() {
        let server = MockServer::start().await;
        let expected_audience = format!("{}/api/v2/", server.uri());
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_partial_json(json!({"audience": expected_audience})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": "t"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        provider.token().await.unwrap();
    }
}
