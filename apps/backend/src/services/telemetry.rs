//! Client telemetry event recording.

use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::telemetry_events;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTelemetryEvent {
    pub event_type: String,
    #[serde(default)]
    pub event_data: serde_json::Value,
}

pub async fn record(
    conn: &impl ConnectionTrait,
    user_id: Option<&str>,
    event: NewTelemetryEvent,
) -> Result<telemetry_events::Model, AppError> {
    let active = telemetry_events::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.map(str::to_string)),
        event_type: Set(event.event_type),
        event_data: Set(event.event_data),
        timestamp: Set(OffsetDateTime::now_utc()),
    };

    let created = active.insert(conn).await?;
    Ok(created)
}
