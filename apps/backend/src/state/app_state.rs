use sea_orm::DatabaseConnection;

use super::auth_config::AuthConfig;
use crate::auth::jwks::JwksCache;
use crate::auth::management::ManagementTokenProvider;
use crate::auth::metadata::MetadataPropagator;
use crate::auth::verifier::TokenVerifier;

/// Application state containing shared resources.
///
/// The auth-pipeline caches (signing key set, management credential) live
/// here as owned objects rather than module globals, so tests can build a
/// state against a stub provider and tear it down freely.
pub struct AppState {
    pub db: DatabaseConnection,
    pub verifier: TokenVerifier,
    pub metadata: MetadataPropagator,
}

impl AppState {
    pub fn new(db: DatabaseConnection, auth: AuthConfig) -> Self {
        let jwks = JwksCache::new(auth.jwks_url());
        let verifier = TokenVerifier::new(jwks, &auth);
        let management = ManagementTokenProvider::new(&auth);
        let metadata = MetadataPropagator::new(management, &auth);
        Self {
            db,
            verifier,
            metadata,
        }
    }
}
