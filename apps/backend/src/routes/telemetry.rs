use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::services::telemetry::{self, NewTelemetryEvent};
use crate::state::app_state::AppState;

async fn record_event(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: web::Json<NewTelemetryEvent>,
) -> Result<HttpResponse, AppError> {
    let event =
        telemetry::record(&app_state.db, Some(&current_user.0.id), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(event))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/telemetry", web::post().to(record_event));
}
