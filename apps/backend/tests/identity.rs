mod common;

use backend::auth::claims::Claims;
use backend::entities::users;
use backend::error::{AppError, AuthFailure};
use backend::services::identity;
use sea_orm::EntityTrait;
use serde_json::{Map, Value};

use common::test_db;

fn claims_with(sub: Option<&str>, email: Option<&str>) -> Claims {
    let mut map = Map::new();
    if let Some(sub) = sub {
        map.insert("sub".to_string(), Value::String(sub.to_string()));
    }
    if let Some(email) = email {
        map.insert("email".to_string(), Value::String(email.to_string()));
    }
    Claims::from(map)
}

#[tokio::test]
async fn first_resolution_creates_user_with_defaults() {
    let db = test_db().await;

    let user = identity::resolve_or_create(&db, &claims_with(Some("auth0|123"), Some("a@b.com")))
        .await
        .unwrap();

    assert_eq!(user.id, "auth0|123");
    assert_eq!(user.email, "a@b.com");
    assert!(!user.has_completed_onboarding);
    assert_eq!(user.activity_level, "moderate");
    assert_eq!(user.meal_layout, "breakfast-lunch-dinner");
    assert_eq!(user.typical_prep_time, 30);
    assert!(user.goals.0.is_empty());
    assert!(user.food_exclusions.0.is_empty());
}

#[tokio::test]
async fn resolution_is_idempotent_per_subject() {
    let db = test_db().await;
    let claims = claims_with(Some("auth0|same"), Some("same@example.com"));

    let first = identity::resolve_or_create(&db, &claims).await.unwrap();
    let second = identity::resolve_or_create(&db, &claims).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.created_at, second.created_at);
    assert_eq!(users::Entity::find().all(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn missing_subject_is_a_distinct_auth_failure() {
    let db = test_db().await;

    let result = identity::resolve_or_create(&db, &claims_with(None, Some("a@b.com"))).await;

    match result {
        Err(AppError::Unauthorized { reason }) => {
            assert_eq!(reason, AuthFailure::MissingSubject)
        }
        other => panic!("expected MissingSubject, got {other:?}"),
    }
    assert!(users::Entity::find().all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_email_falls_back_to_subject() {
    let db = test_db().await;

    let user = identity::resolve_or_create(&db, &claims_with(Some("auth0|noemail"), None))
        .await
        .unwrap();

    assert_eq!(user.email, "auth0|noemail");
}

#[tokio::test]
async fn concurrent_first_logins_yield_one_row() {
    let db = test_db().await;
    let claims = claims_with(Some("auth0|race"), Some("race@example.com"));

    let (a, b) = tokio::join!(
        identity::resolve_or_create(&db, &claims),
        identity::resolve_or_create(&db, &claims),
    );

    let a = a.unwrap();
    let b = b.unwrap();
    assert_eq!(a.id, b.id);
    assert_eq!(users::Entity::find().all(&db).await.unwrap().len(), 1);
}
