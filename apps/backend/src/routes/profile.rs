use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::entities::users;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::services::profile::{self, ProfileUpdate};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
    pub has_completed_onboarding: bool,
    pub goals: Vec<String>,
    pub activity_level: String,
    pub body_weight: Option<f64>,
    pub primary_diet_type: Option<String>,
    pub food_exclusions: Vec<String>,
    pub budget: Option<String>,
    pub meal_layout: String,
    pub preferred_cooking_days: Vec<String>,
    pub typical_prep_time: i32,
}

fn rfc3339(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: rfc3339(user.created_at),
            updated_at: rfc3339(user.updated_at),
            has_completed_onboarding: user.has_completed_onboarding,
            goals: user.goals.0,
            activity_level: user.activity_level,
            body_weight: user.body_weight,
            primary_diet_type: user.primary_diet_type,
            food_exclusions: user.food_exclusions.0,
            budget: user.budget,
            meal_layout: user.meal_layout,
            preferred_cooking_days: user.preferred_cooking_days.0,
            typical_prep_time: user.typical_prep_time,
        }
    }
}

async fn get_profile(current_user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(UserResponse::from(current_user.0)))
}

async fn update_profile(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, AppError> {
    let updated = profile::update_profile(&app_state.db, current_user.0, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// Applies any submitted profile fields, forces the onboarding flag, commits,
/// then mirrors the flag into the identity provider's `app_metadata`. The
/// mirror write is best effort; its failure is logged and never surfaces to
/// the client.
async fn complete_onboarding(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    // An empty body just completes onboarding; a non-empty one must parse.
    let mut update = if body.is_empty() {
        ProfileUpdate::default()
    } else {
        serde_json::from_slice::<ProfileUpdate>(&body).map_err(|e| {
            AppError::bad_request("INVALID_JSON", format!("Invalid request body: {e}"))
        })?
    };
    update.has_completed_onboarding = Some(true);

    let updated = profile::update_profile(&app_state.db, current_user.0, update).await?;
    info!(user_id = %updated.id, "onboarding completed");

    if let Err(e) = app_state
        .metadata
        .push_metadata(&updated.id, json!({"hasCompletedOnboarding": true}))
        .await
    {
        warn!(user_id = %updated.id, error = %e, "onboarding flag not propagated to identity provider");
    }

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/profile", web::get().to(get_profile))
        .route("/profile", web::put().to(update_profile))
        .route(
            "/profile/complete-onboarding",
            web::post().to(complete_onboarding),
        );
}
