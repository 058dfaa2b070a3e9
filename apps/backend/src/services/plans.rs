//! Weekly meal plan storage. Plans arrive fully formed from the client;
//! nothing here generates or scores them.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::entities::{meal_plans, week_plans};
use crate::error::AppError;
use crate::services::recipes;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWeekPlan {
    #[serde(with = "time::serde::rfc3339")]
    pub week_of: OffsetDateTime,
    #[serde(default)]
    pub shared_ingredients: Vec<String>,
    pub meals: Vec<NewMealAssignment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMealAssignment {
    pub recipe_id: String,
    pub day: String,
    pub meal_type: String,
}

#[derive(Debug)]
pub struct WeekPlanWithMeals {
    pub plan: week_plans::Model,
    pub meals: Vec<meal_plans::Model>,
}

/// Persist a week plan and its meal assignments atomically. Every referenced
/// recipe must exist; an unknown id fails the whole save.
pub async fn save_week_plan(
    db: &DatabaseConnection,
    user_id: &str,
    new: NewWeekPlan,
) -> Result<WeekPlanWithMeals, AppError> {
    for meal in &new.meals {
        match recipes::find(db, &meal.recipe_id).await {
            Ok(_) => {}
            Err(AppError::NotFound { .. }) => {
                return Err(AppError::bad_request(
                    "UNKNOWN_RECIPE",
                    "Plan references an unknown recipe",
                ))
            }
            Err(e) => return Err(e),
        }
    }

    let txn = db.begin().await?;

    let plan = week_plans::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        week_of: Set(new.week_of),
        created_at: Set(OffsetDateTime::now_utc()),
        shared_ingredients: Set(new.shared_ingredients.into()),
    }
    .insert(&txn)
    .await?;

    let mut meals = Vec::with_capacity(new.meals.len());
    for meal in new.meals {
        let row = meal_plans::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            week_plan_id: Set(plan.id.clone()),
            recipe_id: Set(meal.recipe_id),
            day: Set(meal.day),
            meal_type: Set(meal.meal_type),
        }
        .insert(&txn)
        .await?;
        meals.push(row);
    }

    txn.commit().await?;
    info!(user_id = %user_id, plan_id = %plan.id, meals = meals.len(), "week plan saved");

    Ok(WeekPlanWithMeals { plan, meals })
}

/// The most recently planned week for the user, with its meals.
pub async fn latest_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<WeekPlanWithMeals>, AppError> {
    let plan = week_plans::Entity::find()
        .filter(week_plans::Column::UserId.eq(user_id))
        .order_by_desc(week_plans::Column::WeekOf)
        .one(db)
        .await?;

    let Some(plan) = plan else {
        return Ok(None);
    };

    let meals = plan
        .find_related(meal_plans::Entity)
        .all(db)
        .await?;

    Ok(Some(WeekPlanWithMeals { plan, meals }))
}
