//! Just-in-time materialization of local user records from verified claims.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::auth::claims::Claims;
use crate::entities::{users, StringList};
use crate::error::{AppError, AuthFailure};
use crate::infra::db_errors::is_unique_violation;

const DEFAULT_ACTIVITY_LEVEL: &str = "moderate";
const DEFAULT_MEAL_LAYOUT: &str = "breakfast-lunch-dinner";
const DEFAULT_PREP_TIME_MINUTES: i32 = 30;

/// Find the local user for the verified claims, creating one on first sight.
///
/// Idempotent: the same `sub` always resolves to the same row. Two requests
/// racing on first login both succeed; the loser of the insert re-fetches the
/// row the winner created, relying on the primary key constraint.
pub async fn resolve_or_create(
    conn: &impl ConnectionTrait,
    claims: &Claims,
) -> Result<users::Model, AppError> {
    let sub = claims
        .sub()
        .ok_or(AppError::unauthorized(AuthFailure::MissingSubject))?;

    if let Some(user) = users::Entity::find_by_id(sub).one(conn).await? {
        debug!(user_id = %user.id, "resolved existing user");
        return Ok(user);
    }

    // Tokens without an email claim still get a usable row.
    let email = claims.email().unwrap_or(sub);
    let now = OffsetDateTime::now_utc();

    let active = users::ActiveModel {
        id: Set(sub.to_string()),
        email: Set(email.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        has_completed_onboarding: Set(false),
        goals: Set(StringList::default()),
        activity_level: Set(DEFAULT_ACTIVITY_LEVEL.to_string()),
        body_weight: Set(None),
        primary_diet_type: Set(None),
        food_exclusions: Set(StringList::default()),
        budget: Set(None),
        meal_layout: Set(DEFAULT_MEAL_LAYOUT.to_string()),
        preferred_cooking_days: Set(StringList::default()),
        typical_prep_time: Set(DEFAULT_PREP_TIME_MINUTES),
    };

    match active.insert(conn).await {
        Ok(user) => {
            info!(user_id = %user.id, "created user on first login");
            Ok(user)
        }
        Err(e) if is_unique_violation(&e) => {
            // Lost a first-login race; the other request's row is ours.
            debug!(user_id = %sub, "insert raced, re-fetching");
            users::Entity::find_by_id(sub)
                .one(conn)
                .await?
                .ok_or_else(|| AppError::internal("User vanished after insert conflict"))
        }
        Err(e) => Err(e.into()),
    }
}
