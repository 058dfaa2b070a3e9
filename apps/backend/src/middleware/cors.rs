use std::env;

use actix_cors::Cors;
use actix_web::http::header;

/// Build CORS middleware for the frontend origin.
///
/// Origins come from FRONTEND_URL (comma-separated for multi-env setups);
/// falls back to the local dev frontend when unset.
pub fn cors_middleware() -> Cors {
    let allowed_raw = env::var("FRONTEND_URL").unwrap_or_default();

    let allowed_origins: Vec<String> = allowed_raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.to_string())
        .collect();

    let effective_origins: Vec<String> = if allowed_origins.is_empty() {
        vec!["http://localhost:5173".to_string()]
    } else {
        allowed_origins
    };

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .supports_credentials()
        .max_age(3600);

    for origin in effective_origins {
        cors = cors.allowed_origin(&origin);
    }

    cors
}
