//! Bearer token verification against the provider's signing key set.

use jsonwebtoken::jwk::AlgorithmParameters;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

use super::claims::Claims;
use super::jwks::JwksCache;
use crate::error::{AppError, AuthFailure};
use crate::state::auth_config::AuthConfig;

pub struct TokenVerifier {
    jwks: JwksCache,
    audience: String,
    issuer: String,
    algorithms: Vec<Algorithm>,
}

impl TokenVerifier {
    pub fn new(jwks: JwksCache, auth: &AuthConfig) -> Self {
        Self {
            jwks,
            audience: auth.audience.clone(),
            issuer: auth.issuer(),
            algorithms: auth.algorithms.clone(),
        }
    }

    /// Verify a bearer token and return its full claim set.
    ///
    /// The unverified header is read only to route to the right key by kid;
    /// nothing from it is trusted until the signature checks out. Runs on
    /// every authenticated request, so the hot path after the first JWKS
    /// fetch does no network I/O.
    pub async fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let header = decode_header(token)
            .map_err(|_| AppError::unauthorized(AuthFailure::MalformedToken))?;
        let kid = header
            .kid
            .ok_or(AppError::unauthorized(AuthFailure::UnknownSigningKey))?;

        let key_set = self.jwks.get().await?;
        let jwk = key_set
            .keys
            .iter()
            .find(|k| k.common.key_id.as_deref() == Some(kid.as_str()))
            .ok_or(AppError::unauthorized(AuthFailure::UnknownSigningKey))?;

        let decoding_key = match &jwk.algorithm {
            AlgorithmParameters::RSA(rsa) => DecodingKey::from_rsa_components(&rsa.n, &rsa.e)
                .map_err(|_| AppError::unauthorized(AuthFailure::UnknownSigningKey))?,
            _ => return Err(AppError::unauthorized(AuthFailure::UnknownSigningKey)),
        };

        let mut validation = Validation::new(*self.algorithms.first().unwrap_or(&Algorithm::RS256));
        validation.algorithms = self.algorithms.clone();
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&[self.issuer.as_str()]);

        let data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            let reason = match e.kind() {
                ErrorKind::ExpiredSignature => AuthFailure::ExpiredToken,
                ErrorKind::InvalidSignature => AuthFailure::InvalidSignature,
                ErrorKind::InvalidAudience => AuthFailure::AudienceMismatch,
                ErrorKind::InvalidIssuer => AuthFailure::IssuerMismatch,
                _ => AuthFailure::MalformedToken,
            };
            AppError::unauthorized(reason)
        })?;

        Ok(data.claims)
    }
}
