use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::StringList;

/// Local user record. The primary key is always the identity provider's
/// subject claim, never generated locally.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub has_completed_onboarding: bool,
    #[sea_orm(column_type = "Json")]
    pub goals: StringList,
    pub activity_level: String,
    pub body_weight: Option<f64>,
    pub primary_diet_type: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub food_exclusions: StringList,
    pub budget: Option<String>,
    pub meal_layout: String,
    #[sea_orm(column_type = "Json")]
    pub preferred_cooking_days: StringList,
    pub typical_prep_time: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pantry_items::Entity")]
    PantryItems,
    #[sea_orm(has_many = "super::week_plans::Entity")]
    WeekPlans,
    #[sea_orm(has_many = "super::telemetry_events::Entity")]
    TelemetryEvents,
}

impl Related<super::pantry_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PantryItems.def()
    }
}

impl Related<super::week_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WeekPlans.def()
    }
}

impl Related<super::telemetry_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TelemetryEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
