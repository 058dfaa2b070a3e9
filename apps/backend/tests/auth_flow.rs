mod common;

use actix_web::http::StatusCode;
use actix_web::{test, App};
use backend::entities::users;
use backend::routes;
use sea_orm::EntityTrait;
use serde_json::Value;

use common::{bearer, mint_token, mint_token_with_exp, stub_provider, test_state};

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn health_needs_no_credential() {
    let server = stub_provider().await;
    let (state, _db) = test_state(&server).await;
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn missing_credential_is_401_problem() {
    let server = stub_provider().await;
    let (state, _db) = test_state(&server).await;
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/profile").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "AUTH_MISSING_CREDENTIAL");
    assert_eq!(body["status"], 401);
    assert!(body["trace_id"].is_string());
}

#[actix_web::test]
async fn expired_token_is_401_with_reason() {
    let server = stub_provider().await;
    let (state, _db) = test_state(&server).await;
    let app = test_app!(state);

    let token = mint_token_with_exp(&server, "auth0|expired", Some("a@b.com"), 1_000_000);
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/profile")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "AUTH_EXPIRED_TOKEN");
}

#[actix_web::test]
async fn valid_token_provisions_user_on_first_request() {
    let server = stub_provider().await;
    let (state, db) = test_state(&server).await;
    let app = test_app!(state);

    let token = mint_token(&server, "auth0|fresh", Some("fresh@example.com"));
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/profile")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], "auth0|fresh");
    assert_eq!(body["email"], "fresh@example.com");
    assert_eq!(body["hasCompletedOnboarding"], false);
    assert_eq!(body["typicalPrepTime"], 30);

    let stored = users::Entity::find_by_id("auth0|fresh")
        .one(&db)
        .await
        .unwrap();
    assert!(stored.is_some());
}

#[actix_web::test]
async fn repeat_requests_reuse_the_same_user() {
    let server = stub_provider().await;
    let (state, db) = test_state(&server).await;
    let app = test_app!(state);

    let token = mint_token(&server, "auth0|repeat", Some("repeat@example.com"));
    for _ in 0..3 {
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/profile")
                .insert_header(bearer(&token))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let count = users::Entity::find().all(&db).await.unwrap().len();
    assert_eq!(count, 1);
}

#[actix_web::test]
async fn token_without_email_falls_back_to_subject() {
    let server = stub_provider().await;
    let (state, _db) = test_state(&server).await;
    let app = test_app!(state);

    let token = mint_token(&server, "auth0|noemail", None);
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/profile")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "auth0|noemail");
}
