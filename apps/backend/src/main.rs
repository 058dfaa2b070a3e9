use actix_web::{web, App, HttpServer};
use migration::{Migrator, MigratorTrait};
use tracing::info;

use backend::error::AppError;
use backend::infra::db::connect_db;
use backend::middleware::{cors_middleware, RequestTrace};
use backend::routes;
use backend::state::app_state::AppState;
use backend::state::auth_config::AuthConfig;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let state = bootstrap()
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3001);

    info!(host = %host, port = port, "starting server");

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}

async fn bootstrap() -> Result<AppState, AppError> {
    let auth = AuthConfig::from_env()?;
    let database_url = std::env::var("DATABASE_URL")?;

    let db = connect_db(&database_url).await?;
    Migrator::up(&db, None)
        .await
        .map_err(AppError::from)?;
    info!("database migrated");

    Ok(AppState::new(db, auth))
}
