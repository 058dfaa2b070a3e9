use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::entities::{meal_plans, week_plans};
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::services::plans::{self, NewWeekPlan, WeekPlanWithMeals};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct WeekPlanResponse {
    #[serde(flatten)]
    pub plan: week_plans::Model,
    pub meals: Vec<meal_plans::Model>,
}

impl From<WeekPlanWithMeals> for WeekPlanResponse {
    fn from(value: WeekPlanWithMeals) -> Self {
        Self {
            plan: value.plan,
            meals: value.meals,
        }
    }
}

async fn save_week_plan(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: web::Json<NewWeekPlan>,
) -> Result<HttpResponse, AppError> {
    let saved =
        plans::save_week_plan(&app_state.db, &current_user.0.id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(WeekPlanResponse::from(saved)))
}

async fn current_week_plan(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let latest = plans::latest_for_user(&app_state.db, &current_user.0.id)
        .await?
        .ok_or_else(|| AppError::not_found("WEEK_PLAN_NOT_FOUND", "No week plan yet"))?;
    Ok(HttpResponse::Ok().json(WeekPlanResponse::from(latest)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/week-plan", web::post().to(save_week_plan))
        .route("/week-plan/current", web::get().to(current_week_plan));
}
