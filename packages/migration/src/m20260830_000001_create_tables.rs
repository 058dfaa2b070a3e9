use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    CreatedAt,
    UpdatedAt,
    HasCompletedOnboarding,
    Goals,
    ActivityLevel,
    BodyWeight,
    PrimaryDietType,
    FoodExclusions,
    Budget,
    MealLayout,
    PreferredCookingDays,
    TypicalPrepTime,
}

#[derive(Iden)]
enum PantryItems {
    Table,
    Id,
    UserId,
    Name,
    Quantity,
    Unit,
    ExpiresAt,
    Category,
    StorageLocation,
    AddedAt,
    PurchaseSource,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
    Name,
    CookTime,
    Servings,
    Calories,
    Ingredients,
    MainIngredients,
    Instructions,
    Tags,
    Cuisine,
    PrepComplexity,
    Protein,
    Grain,
    Vegetable,
    ImageUrl,
    SourceUrl,
    CreatedAt,
    CreatedBy,
}

#[derive(Iden)]
enum WeekPlans {
    Table,
    Id,
    UserId,
    WeekOf,
    CreatedAt,
    SharedIngredients,
}

#[derive(Iden)]
enum MealPlans {
    Table,
    Id,
    WeekPlanId,
    RecipeId,
    Day,
    MealType,
}

#[derive(Iden)]
enum TelemetryEvents {
    Table,
    Id,
    UserId,
    EventType,
    EventData,
    Timestamp,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users: primary key is the identity provider's subject claim,
        // never generated locally.
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::HasCompletedOnboarding)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::Goals).json().not_null())
                    .col(ColumnDef::new(Users::ActivityLevel).string().not_null())
                    .col(ColumnDef::new(Users::BodyWeight).double().null())
                    .col(ColumnDef::new(Users::PrimaryDietType).string().null())
                    .col(ColumnDef::new(Users::FoodExclusions).json().not_null())
                    .col(ColumnDef::new(Users::Budget).string().null())
                    .col(ColumnDef::new(Users::MealLayout).string().not_null())
                    .col(
                        ColumnDef::new(Users::PreferredCookingDays)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::TypicalPrepTime)
                            .integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PantryItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PantryItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PantryItems::UserId).string().not_null())
                    .col(ColumnDef::new(PantryItems::Name).string().not_null())
                    .col(ColumnDef::new(PantryItems::Quantity).double().not_null())
                    .col(ColumnDef::new(PantryItems::Unit).string().not_null())
                    .col(
                        ColumnDef::new(PantryItems::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(PantryItems::Category).string().not_null())
                    .col(
                        ColumnDef::new(PantryItems::StorageLocation)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PantryItems::AddedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PantryItems::PurchaseSource).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pantry_items_user")
                            .from(PantryItems::Table, PantryItems::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pantry_items_user_id")
                    .table(PantryItems::Table)
                    .col(PantryItems::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Recipes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Recipes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Recipes::Name).string().not_null())
                    .col(ColumnDef::new(Recipes::CookTime).integer().not_null())
                    .col(ColumnDef::new(Recipes::Servings).integer().not_null())
                    .col(ColumnDef::new(Recipes::Calories).integer().not_null())
                    .col(ColumnDef::new(Recipes::Ingredients).json().not_null())
                    .col(ColumnDef::new(Recipes::MainIngredients).json().not_null())
                    .col(ColumnDef::new(Recipes::Instructions).json().not_null())
                    .col(ColumnDef::new(Recipes::Tags).json().not_null())
                    .col(ColumnDef::new(Recipes::Cuisine).string().null())
                    .col(ColumnDef::new(Recipes::PrepComplexity).string().not_null())
                    .col(ColumnDef::new(Recipes::Protein).string().null())
                    .col(ColumnDef::new(Recipes::Grain).string().null())
                    .col(ColumnDef::new(Recipes::Vegetable).string().null())
                    .col(ColumnDef::new(Recipes::ImageUrl).string().null())
                    .col(ColumnDef::new(Recipes::SourceUrl).string().null())
                    .col(
                        ColumnDef::new(Recipes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Recipes::CreatedBy).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WeekPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeekPlans::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WeekPlans::UserId).string().not_null())
                    .col(
                        ColumnDef::new(WeekPlans::WeekOf)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WeekPlans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WeekPlans::SharedIngredients)
                            .json()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_week_plans_user")
                            .from(WeekPlans::Table, WeekPlans::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MealPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MealPlans::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MealPlans::WeekPlanId).string().not_null())
                    .col(ColumnDef::new(MealPlans::RecipeId).string().not_null())
                    .col(ColumnDef::new(MealPlans::Day).string().not_null())
                    .col(ColumnDef::new(MealPlans::MealType).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meal_plans_week_plan")
                            .from(MealPlans::Table, MealPlans::WeekPlanId)
                            .to(WeekPlans::Table, WeekPlans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meal_plans_recipe")
                            .from(MealPlans::Table, MealPlans::RecipeId)
                            .to(Recipes::Table, Recipes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TelemetryEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TelemetryEvents::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TelemetryEvents::UserId).string().null())
                    .col(
                        ColumnDef::new(TelemetryEvents::EventType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TelemetryEvents::EventData).json().not_null())
                    .col(
                        ColumnDef::new(TelemetryEvents::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_telemetry_events_user")
                            .from(TelemetryEvents::Table, TelemetryEvents::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_telemetry_events_event_type")
                    .table(TelemetryEvents::Table)
                    .col(TelemetryEvents::EventType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_telemetry_events_timestamp")
                    .table(TelemetryEvents::Table)
                    .col(TelemetryEvents::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TelemetryEvents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MealPlans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WeekPlans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Recipes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PantryItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
