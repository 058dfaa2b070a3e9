#![allow(dead_code)]

use std::time::{SystemTime, UNIX_EPOCH};

use actix_web::web;
use backend::state::app_state::AppState;
use backend::state::auth_config::AuthConfig;
use backend_test_support::test_keys;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const AUDIENCE: &str = "https://api.athyra.test";

#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}

/// Fresh migrated database, private to one test.
pub async fn test_db() -> DatabaseConnection {
    let name = backend_test_support::unique_helpers::unique_str("db");
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let db = Database::connect(&url)
        .await
        .unwrap_or_else(|e| panic!("sqlite connect failed: {e}"));
    Migrator::up(&db, None)
        .await
        .unwrap_or_else(|e| panic!("migration failed: {e}"));
    db
}

/// Identity-provider stub serving the test JWKS document.
pub async fn stub_provider() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/jwks.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "keys": [{
                "kty": "RSA",
                "use": "sig",
                "alg": "RS256",
                "kid": test_keys::KEY_ID,
                "n": test_keys::RSA_MODULUS_B64,
                "e": test_keys::RSA_EXPONENT_B64,
            }]
        })))
        .mount(&server)
        .await;
    server
}

/// Management token endpoint stub, for flows that touch the provider.
pub async fn stub_management_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "mgmt-token"})),
        )
        .mount(server)
        .await;
}

pub fn auth_config_for(server: &MockServer) -> AuthConfig {
    AuthConfig::new(server.uri(), AUDIENCE, "mgmt-client", "mgmt-secret")
}

pub async fn test_state(server: &MockServer) -> (web::Data<AppState>, DatabaseConnection) {
    let db = test_db().await;
    let state = AppState::new(db.clone(), auth_config_for(server));
    (web::Data::new(state), db)
}

/// Insert a minimal recipe row. The API has no write path for the catalog.
pub async fn seed_recipe(db: &DatabaseConnection, id: &str, name: &str) {
    use backend::entities::{recipes, StringList};
    use sea_orm::{ActiveModelTrait, Set};

    recipes::ActiveModel {
        id: Set(id.to_string()),
        name: Set(name.to_string()),
        cook_time: Set(30),
        servings: Set(2),
        calories: Set(500),
        ingredients: Set(json!([])),
        main_ingredients: Set(StringList::default()),
        instructions: Set(json!([])),
        tags: Set(StringList::default()),
        cuisine: Set(None),
        prep_complexity: Set("easy".to_string()),
        protein: Set(None),
        grain: Set(None),
        vegetable: Set(None),
        image_url: Set(None),
        source_url: Set(None),
        created_at: Set(time::OffsetDateTime::now_utc()),
        created_by: Set(None),
    }
    .insert(db)
    .await
    .unwrap_or_else(|e| panic!("recipe seed failed: {e}"));
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

pub fn mint_token(server: &MockServer, sub: &str, email: Option<&str>) -> String {
    mint_token_with_exp(server, sub, email, now_secs() + 3600)
}

pub fn mint_token_with_exp(
    server: &MockServer,
    sub: &str,
    email: Option<&str>,
    exp: i64,
) -> String {
    let mut claims = json!({
        "iss": format!("{}/", server.uri()),
        "sub": sub,
        "aud": AUDIENCE,
        "exp": exp,
        "iat": now_secs(),
    });
    if let Some(email) = email {
        claims["email"] = json!(email);
    }

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(test_keys::KEY_ID.to_string());
    let key = EncodingKey::from_rsa_pem(test_keys::RSA_PRIVATE_KEY_PEM.as_bytes()).unwrap();
    encode(&header, &claims, &key).unwrap()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
