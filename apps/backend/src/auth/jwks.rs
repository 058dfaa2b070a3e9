//! Signing key set cache.
//!
//! Fetches the identity provider's JWKS once and memoizes it for the process
//! lifetime. There is no TTL and no refresh path: if the provider rotates
//! keys mid-process, tokens signed with an unseen kid fail verification
//! until restart.

use std::time::Duration;

use jsonwebtoken::jwk::JwkSet;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::AppError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub struct JwksCache {
    client: reqwest::Client,
    url: String,
    keys: OnceCell<JwkSet>,
}

impl JwksCache {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            keys: OnceCell::new(),
        }
    }

    /// The cached key set, fetching it on first use. Concurrent first calls
    /// collapse into a single upstream fetch; a failed fetch leaves the cell
    /// empty so the next call retries.
    pub async fn get(&self) -> Result<&JwkSet, AppError> {
        self.keys.get_or_try_init(|| self.fetch()).await
    }

    async fn fetch(&self) -> Result<JwkSet, AppError> {
        debug!(url = %self.url, "fetching signing key set");

        let response = self
            .client
            .get(&self.url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::upstream_unavailable(format!("JWKS fetch failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::upstream_unavailable(format!(
                "JWKS fetch returned HTTP {}",
                response.status()
            )));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AppError::upstream_unavailable(format!("JWKS body invalid: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::JwksCache;
    use crate::error::AppError;

    fn jwks_body() -> serde_json::Value {
        serde_json::json!({
            "keys": [{
                "kty": "RSA",
                "use": "sig",
                "alg": "RS256",
                "kid": "key-1",
                "n": backend_test_support::test_keys::RSA_MODULUS_B64,
                "e": backend_test_support::test_keys::RSA_EXPONENT_B64,
            }]
        })
    }

    #[tokio::test]
    async fn fetches_once_and_serves_from_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body()))
            .expect(1)
            .mount(&server)
            .await;

        let cache = JwksCache::new(format!("{}/.well-known/jwks.json", server.uri()));

        for _ in 0..10 {
            let keys = cache.get().await.unwrap();
            assert_eq!(keys.keys.len(), 1);
        }
        // expect(1) verified on MockServer drop
    }

    #[tokio::test]
    async fn upstream_failure_maps_to_upstream_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let cache = JwksCache::new(format!("{}/.well-known/jwks.json", server.uri()));

        match cache.get().await {
            Err(AppError::UpstreamUnavailable { .. }) => {}
            other => panic!("expected UpstreamUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_fetch_is_retried_on_next_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body()))
            .mount(&server)
            .await;

        let cache = JwksCache::new(format!("{}/.well-known/jwks.json", server.uri()));

        assert!(cache.get().await.is_err());
        assert!(cache.get().await.is_ok());
    }
}
