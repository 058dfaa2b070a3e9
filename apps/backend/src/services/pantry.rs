//! Pantry inventory CRUD, always scoped to the owning user.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Deserializer};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::entities::pantry_items;
use crate::error::AppError;

pub const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 3;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPantryItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
    pub category: String,
    pub storage_location: String,
    pub purchase_source: Option<String>,
}

/// Partial item update. Absent fields keep their stored values; for the
/// nullable columns an explicit JSON `null` clears the stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItemUpdate {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "rfc3339_field")]
    pub expires_at: Option<Option<OffsetDateTime>>,
    pub category: Option<String>,
    pub storage_location: Option<String>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub purchase_source: Option<Option<String>>,
}

// The outer Option records whether the field appeared in the payload at
// all; the inner one carries the JSON null.
fn nullable_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn rfc3339_field<'de, D>(deserializer: D) -> Result<Option<Option<OffsetDateTime>>, D::Error>
where
    D: Deserializer<'de>,
{
    time::serde::rfc3339::option::deserialize(deserializer).map(Some)
}

pub async fn list_for_user(
    conn: &impl ConnectionTrait,
    user_id: &str,
) -> Result<Vec<pantry_items::Model>, AppError> {
    let items = pantry_items::Entity::find()
        .filter(pantry_items::Column::UserId.eq(user_id))
        .order_by_desc(pantry_items::Column::AddedAt)
        .all(conn)
        .await?;
    Ok(items)
}

/// Fetch one item, refusing to see other users' rows.
pub async fn find_item(
    conn: &impl ConnectionTrait,
    user_id: &str,
    item_id: &str,
) -> Result<pantry_items::Model, AppError> {
    pantry_items::Entity::find_by_id(item_id)
        .filter(pantry_items::Column::UserId.eq(user_id))
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("PANTRY_ITEM_NOT_FOUND", "Pantry item not found"))
}

pub async fn create_item(
    conn: &impl ConnectionTrait,
    user_id: &str,
    item: NewPantryItem,
) -> Result<pantry_items::Model, AppError> {
    let active = pantry_items::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        name: Set(item.name),
        quantity: Set(item.quantity),
        unit: Set(item.unit),
        expires_at: Set(item.expires_at),
        category: Set(item.category),
        storage_location: Set(item.storage_location),
        added_at: Set(OffsetDateTime::now_utc()),
        purchase_source: Set(item.purchase_source),
    };

    let created = active.insert(conn).await?;
    Ok(created)
}

pub async fn update_item(
    conn: &impl ConnectionTrait,
    user_id: &str,
    item_id: &str,
    update: PantryItemUpdate,
) -> Result<pantry_items::Model, AppError> {
    let item = find_item(conn, user_id, item_id).await?;
    let mut active = item.into_active_model();

    if let Some(name) = update.name {
        active.name = Set(name);
    }
    if let Some(quantity) = update.quantity {
        active.quantity = Set(quantity);
    }
    if let Some(unit) = update.unit {
        active.unit = Set(unit);
    }
    if let Some(expires_at) = update.expires_at {
        active.expires_at = Set(expires_at);
    }
    if let Some(category) = update.category {
        active.category = Set(category);
    }
    if let Some(storage_location) = update.storage_location {
        active.storage_location = Set(storage_location);
    }
    if let Some(purchase_source) = update.purchase_source {
        active.purchase_source = Set(purchase_source);
    }

    let updated = active.update(conn).await?;
    Ok(updated)
}

pub async fn delete_item(
    conn: &impl ConnectionTrait,
    user_id: &str,
    item_id: &str,
) -> Result<(), AppError> {
    let item = find_item(conn, user_id, item_id).await?;
    item.delete(conn).await?;
    Ok(())
}

/// Items expiring within the window, soonest first. Frozen items never count
/// as expiring, and neither do items already past their date.
pub async fn expiring_items(
    conn: &impl ConnectionTrait,
    user_id: &str,
    within_days: i64,
) -> Result<Vec<pantry_items::Model>, AppError> {
    let now = OffsetDateTime::now_utc();
    let cutoff = now + Duration::days(within_days);

    let items = pantry_items::Entity::find()
        .filter(pantry_items::Column::UserId.eq(user_id))
        .filter(pantry_items::Column::ExpiresAt.gte(now))
        .filter(pantry_items::Column::ExpiresAt.lte(cutoff))
        .filter(pantry_items::Column::StorageLocation.ne("freezer"))
        .order_by_asc(pantry_items::Column::ExpiresAt)
        .all(conn)
        .await?;
    Ok(items)
}

/// Delete everything the expiring query would return. Returns the row count.
pub async fn clear_expiring(
    conn: &impl ConnectionTrait,
    user_id: &str,
    within_days: i64,
) -> Result<u64, AppError> {
    let now = OffsetDateTime::now_utc();
    let cutoff = now + Duration::days(within_days);

    let result = pantry_items::Entity::delete_many()
        .filter(pantry_items::Column::UserId.eq(user_id))
        .filter(pantry_items::Column::ExpiresAt.gte(now))
        .filter(pantry_items::Column::ExpiresAt.lte(cutoff))
        .filter(pantry_items::Column::StorageLocation.ne("freezer"))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
