use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

pub mod meal_plans;
pub mod pantry_items;
pub mod recipes;
pub mod telemetry_events;
pub mod users;
pub mod week_plans;

pub use meal_plans::Entity as MealPlans;
pub use pantry_items::Entity as PantryItems;
pub use recipes::Entity as Recipes;
pub use telemetry_events::Entity as TelemetryEvents;
pub use users::Entity as Users;
pub use users::Model as User;
pub use week_plans::Entity as WeekPlans;

/// JSON-backed list column, portable across Postgres and the SQLite test
/// profile.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult,
)]
pub struct StringList(pub Vec<String>);

impl From<Vec<String>> for StringList {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}
