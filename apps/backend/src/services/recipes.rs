//! Recipe catalog reads. The catalog is seeded out of band; the API never
//! writes it.

use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};

use crate::entities::recipes;
use crate::error::AppError;

pub async fn list_all(conn: &impl ConnectionTrait) -> Result<Vec<recipes::Model>, AppError> {
    let recipes = recipes::Entity::find()
        .order_by_asc(recipes::Column::Name)
        .all(conn)
        .await?;
    Ok(recipes)
}

pub async fn find(conn: &impl ConnectionTrait, id: &str) -> Result<recipes::Model, AppError> {
    recipes::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("RECIPE_NOT_FOUND", "Recipe not found"))
}
