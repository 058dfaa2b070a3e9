//! Best-effort propagation of profile flags to the identity provider.

use std::time::Duration;

use serde_json::json;
use thiserror::Error;
use tracing::debug;

use super::management::ManagementTokenProvider;
use crate::state::auth_config::AuthConfig;

const PUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure of a metadata push. Deliberately not convertible into the HTTP
/// error type: this write happens after the local commit, and its failure
/// must never fail the triggering request. Callers log it and move on.
#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("management credential unavailable: {0}")]
    Credential(String),
    #[error("metadata update failed: {0}")]
    Upstream(String),
}

pub struct MetadataPropagator {
    client: reqwest::Client,
    management: ManagementTokenProvider,
    config: AuthConfig,
}

impl MetadataPropagator {
    pub fn new(management: ManagementTokenProvider, auth: &AuthConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            management,
            config: auth.clone(),
        }
    }

    /// PATCH the given object into the provider's per-user `app_metadata`.
    /// At most one attempt; no retry, no queuing.
    pub async fn push_metadata(
        &self,
        user_id: &str,
        metadata: serde_json::Value,
    ) -> Result<(), PropagationError> {
        let token = self
            .management
            .token()
            .await
            .map_err(|e| PropagationError::Credential(e.to_string()))?;

        let url = self.config.user_url(user_id);
        debug!(user_id = %user_id, "pushing app_metadata to identity provider");

        let response = self
            .client
            .patch(&url)
            .bearer_auth(token)
            .json(&json!({ "app_metadata": metadata }))
            .timeout(PUSH_TIMEOUT)
            .send()
            .await
            .map_err(|e| PropagationError::Upstream(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(PropagationError::Upstream(format!(
                "HTTP {}",
                response.status()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{MetadataPropagator, PropagationError};
    use crate::auth::management::ManagementTokenProvider;
    use crate::state::auth_config::AuthConfig;

    fn propagator_for(server: &MockServer) -> MetadataPropagator {
        let auth = AuthConfig::new(server.uri(), "aud", "mgmt-client", "mgmt-secret");
        MetadataPropagator::new(ManagementTokenProvider::new(&auth), &auth)
    }

    async fn stub_token_endpoint(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": "mgmt-token"})),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn patches_app_metadata_with_bearer_credential() {
        let server = MockServer::start().await;
        stub_token_endpoint(&server).await;
        Mock::given(method("PATCH"))
            .and(path("/api/v2/users/auth0%7C123"))
            .and(header("authorization", "Bearer mgmt-token"))
            .and(body_partial_json(
                json!({"app_metadata": {"hasCompletedOnboarding": true}}),
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let propagator = propagator_for(&server);
        propagator
            .push_metadata("auth0|123", json!({"hasCompletedOnboarding": true}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn provider_error_returns_soft_failure() {
        let server = MockServer::start().await;
        stub_token_endpoint(&server).await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let propagator = propagator_for(&server);
        let result = propagator
            .push_metadata("auth0|123", json!({"hasCompletedOnboarding": true}))
            .await;

        match result {
            Err(PropagationError::Upstream(detail)) => assert!(detail.contains("500")),
            other => panic!("expected Upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_credential_returns_soft_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let propagator = propagator_for(&server);
        let result = propagator
            .push_metadata("auth0|123", json!({"hasCompletedOnboarding": true}))
            .await;

        assert!(matches!(result, Err(PropagationError::Credential(_))));
    }
}
