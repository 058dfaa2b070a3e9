use actix_web::web;

pub mod health;
pub mod pantry;
pub mod plans;
pub mod profile;
pub mod recipes;
pub mod telemetry;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(
        web::scope("/api")
            .configure(profile::configure_routes)
            .configure(pantry::configure_routes)
            .configure(recipes::configure_routes)
            .configure(plans::configure_routes)
            .configure(telemetry::configure_routes),
    );
}
