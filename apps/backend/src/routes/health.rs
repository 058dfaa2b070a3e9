use actix_web::{web, HttpResponse};
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::AppError;

async fn health() -> Result<HttpResponse, AppError> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| AppError::internal(format!("timestamp formatting failed: {e}")))?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": timestamp,
    })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
