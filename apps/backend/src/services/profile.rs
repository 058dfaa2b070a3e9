//! Profile reads and writes for the current user.

use sea_orm::{ActiveModelTrait, ConnectionTrait, IntoActiveModel, Set};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::entities::users;
use crate::error::AppError;

/// Partial profile update. Absent fields keep their stored values.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub goals: Option<Vec<String>>,
    pub activity_level: Option<String>,
    pub body_weight: Option<f64>,
    pub primary_diet_type: Option<String>,
    pub food_exclusions: Option<Vec<String>>,
    pub budget: Option<String>,
    pub meal_layout: Option<String>,
    pub preferred_cooking_days: Option<Vec<String>>,
    pub typical_prep_time: Option<i32>,
    pub has_completed_onboarding: Option<bool>,
}

pub async fn update_profile(
    conn: &impl ConnectionTrait,
    user: users::Model,
    update: ProfileUpdate,
) -> Result<users::Model, AppError> {
    let mut active = user.into_active_model();

    if let Some(goals) = update.goals {
        active.goals = Set(goals.into());
    }
    if let Some(activity_level) = update.activity_level {
        active.activity_level = Set(activity_level);
    }
    if let Some(body_weight) = update.body_weight {
        active.body_weight = Set(Some(body_weight));
    }
    if let Some(primary_diet_type) = update.primary_diet_type {
        active.primary_diet_type = Set(Some(primary_diet_type));
    }
    if let Some(food_exclusions) = update.food_exclusions {
        active.food_exclusions = Set(food_exclusions.into());
    }
    if let Some(budget) = update.budget {
        active.budget = Set(Some(budget));
    }
    if let Some(meal_layout) = update.meal_layout {
        active.meal_layout = Set(meal_layout);
    }
    if let Some(preferred_cooking_days) = update.preferred_cooking_days {
        active.preferred_cooking_days = Set(preferred_cooking_days.into());
    }
    if let Some(typical_prep_time) = update.typical_prep_time {
        active.typical_prep_time = Set(typical_prep_time);
    }
    if let Some(has_completed_onboarding) = update.has_completed_onboarding {
        active.has_completed_onboarding = Set(has_completed_onboarding);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    let updated = active.update(conn).await?;
    Ok(updated)
}
