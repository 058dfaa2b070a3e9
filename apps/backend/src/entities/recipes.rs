use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::StringList;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipes")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub cook_time: i32,
    pub servings: i32,
    pub calories: i32,
    #[sea_orm(column_type = "Json")]
    pub ingredients: Json,
    #[sea_orm(column_type = "Json")]
    pub main_ingredients: StringList,
    #[sea_orm(column_type = "Json")]
    pub instructions: Json,
    #[sea_orm(column_type = "Json")]
    pub tags: StringList,
    pub cuisine: Option<String>,
    pub prep_complexity: String,
    pub protein: Option<String>,
    pub grain: Option<String>,
    pub vegetable: Option<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub created_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::meal_plans::Entity")]
    MealPlans,
}

impl Related<super::meal_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MealPlans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
