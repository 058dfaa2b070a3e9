use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::entities::pantry_items;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::services::pantry::{self, NewPantryItem, PantryItemUpdate, DEFAULT_EXPIRY_WINDOW_DAYS};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItemResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_at: Option<time::OffsetDateTime>,
    pub category: String,
    pub storage_location: String,
    #[serde(with = "time::serde::rfc3339")]
    pub added_at: time::OffsetDateTime,
    pub purchase_source: Option<String>,
}

impl From<pantry_items::Model> for PantryItemResponse {
    fn from(item: pantry_items::Model) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id,
            name: item.name,
            quantity: item.quantity,
            unit: item.unit,
            expires_at: item.expires_at,
            category: item.category,
            storage_location: item.storage_location,
            added_at: item.added_at,
            purchase_source: item.purchase_source,
        }
    }
}

fn to_responses(items: Vec<pantry_items::Model>) -> Vec<PantryItemResponse> {
    items.into_iter().map(PantryItemResponse::from).collect()
}

#[derive(Debug, Deserialize)]
pub struct ExpiryWindowQuery {
    days: Option<i64>,
}

impl ExpiryWindowQuery {
    fn days(&self) -> i64 {
        self.days.unwrap_or(DEFAULT_EXPIRY_WINDOW_DAYS)
    }
}

async fn list_items(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let items = pantry::list_for_user(&app_state.db, &current_user.0.id).await?;
    Ok(HttpResponse::Ok().json(to_responses(items)))
}

async fn create_item(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: web::Json<NewPantryItem>,
) -> Result<HttpResponse, AppError> {
    let created =
        pantry::create_item(&app_state.db, &current_user.0.id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(PantryItemResponse::from(created)))
}

async fn update_item(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PantryItemUpdate>,
) -> Result<HttpResponse, AppError> {
    let item_id = path.into_inner();
    let updated = pantry::update_item(
        &app_state.db,
        &current_user.0.id,
        &item_id,
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(PantryItemResponse::from(updated)))
}

async fn delete_item(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let item_id = path.into_inner();
    pantry::delete_item(&app_state.db, &current_user.0.id, &item_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn expiring_items(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<ExpiryWindowQuery>,
) -> Result<HttpResponse, AppError> {
    let items = pantry::expiring_items(&app_state.db, &current_user.0.id, query.days()).await?;
    Ok(HttpResponse::Ok().json(to_responses(items)))
}

async fn clear_expiring(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<ExpiryWindowQuery>,
) -> Result<HttpResponse, AppError> {
    let removed = pantry::clear_expiring(&app_state.db, &current_user.0.id, query.days()).await?;
    info!(user_id = %current_user.0.id, removed, "cleared expiring pantry items");
    Ok(HttpResponse::NoContent().finish())
}

async fn get_item(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let item_id = path.into_inner();
    let item = pantry::find_item(&app_state.db, &current_user.0.id, &item_id).await?;
    Ok(HttpResponse::Ok().json(PantryItemResponse::from(item)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Literal segments before the {item_id} captures.
    cfg.route("/pantry", web::get().to(list_items))
        .route("/pantry", web::post().to(create_item))
        .route("/pantry/expiring", web::get().to(expiring_items))
        .route("/pantry/clear-expiring", web::post().to(clear_expiring))
        .route("/pantry/{item_id}", web::get().to(get_item))
        .route("/pantry/{item_id}", web::put().to(update_item))
        .route("/pantry/{item_id}", web::delete().to(delete_item));
}
