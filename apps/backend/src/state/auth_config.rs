use jsonwebtoken::Algorithm;

use crate::error::AppError;

/// Identity-provider settings: where tokens come from, which audience they
/// must carry, and the service credential for the provider's management API.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Provider base URL without a trailing slash, e.g.
    /// `https://example.auth0.com`. Tests point this at a local stub.
    pub provider_url: String,
    /// Expected `aud` claim of inbound access tokens.
    pub audience: String,
    /// Signing algorithms accepted during verification. Never taken from the
    /// token header.
    pub algorithms: Vec<Algorithm>,
    /// Client-credentials pair for the management API.
    pub management_client_id: String,
    pub management_client_secret: String,
}

impl AuthConfig {
    pub fn new(
        provider_url: impl Into<String>,
        audience: impl Into<String>,
        management_client_id: impl Into<String>,
        management_client_secret: impl Into<String>,
    ) -> Self {
        Self {
            provider_url: provider_url.into().trim_end_matches('/').to_string(),
            audience: audience.into(),
            algorithms: vec![Algorithm::RS256],
            management_client_id: management_client_id.into(),
            management_client_secret: management_client_secret.into(),
        }
    }

    /// Read settings from the environment (AUTH0_DOMAIN, AUTH0_AUDIENCE,
    /// AUTH0_MGMT_CLIENT_ID, AUTH0_MGMT_CLIENT_SECRET).
    pub fn from_env() -> Result<Self, AppError> {
        let domain = required_env("AUTH0_DOMAIN")?;
        let audience = required_env("AUTH0_AUDIENCE")?;
        let client_id = required_env("AUTH0_MGMT_CLIENT_ID")?;
        let client_secret = required_env("AUTH0_MGMT_CLIENT_SECRET")?;
        Ok(Self::new(
            format!("https://{domain}"),
            audience,
            client_id,
            client_secret,
        ))
    }

    /// Expected `iss` claim. The provider always issues with a trailing slash.
    pub fn issuer(&self) -> String {
        format!("{}/", self.provider_url)
    }

    pub fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.provider_url)
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.provider_url)
    }

    /// Audience of the management API itself, sent in the client-credentials
    /// exchange.
    pub fn management_audience(&self) -> String {
        format!("{}/api/v2/", self.provider_url)
    }

    /// Management API URL for one user. Subjects contain `|`, so the id is
    /// always percent-encoded.
    pub fn user_url(&self, user_id: &str) -> String {
        format!(
            "{}/api/v2/users/{}",
            self.provider_url,
            urlencoding::encode(user_id)
        )
    }
}

fn required_env(name: &'static str) -> Result<String, AppError> {
    std::env::var(name)
        .map_err(|_| AppError::config(format!("{name} must be set")))
        .and_then(|v| {
            if v.trim().is_empty() {
                Err(AppError::config(format!("{name} must not be empty")))
            } else {
                Ok(v)
            }
        })
}
