use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::services::recipes;
use crate::state::app_state::AppState;

async fn list_recipes(
    _current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let recipes = recipes::list_all(&app_state.db).await?;
    Ok(HttpResponse::Ok().json(recipes))
}

async fn get_recipe(
    _current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let recipe = recipes::find(&app_state.db, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(recipe))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/recipes", web::get().to(list_recipes))
        .route("/recipes/{recipe_id}", web::get().to(get_recipe));
}
