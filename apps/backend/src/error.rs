use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::trace_ctx;

/// RFC 7807 Problem Details response body. Every error leaving the HTTP
/// boundary serializes to this shape.
#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Why a bearer token was rejected. Mapped to 401 with the reason as the
/// response detail text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    MissingCredential,
    UnknownSigningKey,
    InvalidSignature,
    ExpiredToken,
    AudienceMismatch,
    IssuerMismatch,
    MalformedToken,
    /// Token verified cryptographically but carries no usable `sub` claim.
    MissingSubject,
}

impl AuthFailure {
    pub fn code(self) -> &'static str {
        match self {
            AuthFailure::MissingCredential => "AUTH_MISSING_CREDENTIAL",
            AuthFailure::UnknownSigningKey => "AUTH_UNKNOWN_SIGNING_KEY",
            AuthFailure::InvalidSignature => "AUTH_INVALID_SIGNATURE",
            AuthFailure::ExpiredToken => "AUTH_EXPIRED_TOKEN",
            AuthFailure::AudienceMismatch => "AUTH_AUDIENCE_MISMATCH",
            AuthFailure::IssuerMismatch => "AUTH_ISSUER_MISMATCH",
            AuthFailure::MalformedToken => "AUTH_MALFORMED_TOKEN",
            AuthFailure::MissingSubject => "AUTH_MISSING_SUBJECT",
        }
    }

    fn detail(self) -> &'static str {
        match self {
            AuthFailure::MissingCredential => "Missing or malformed Bearer token",
            AuthFailure::UnknownSigningKey => "Token signed with an unknown key",
            AuthFailure::InvalidSignature => "Token signature verification failed",
            AuthFailure::ExpiredToken => "Token expired",
            AuthFailure::AudienceMismatch => "Token audience does not match this API",
            AuthFailure::IssuerMismatch => "Token issuer does not match this API",
            AuthFailure::MalformedToken => "Token is malformed",
            AuthFailure::MissingSubject => "Token carries no subject claim",
        }
    }
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.detail())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: AuthFailure },
    #[error("Upstream unavailable: {detail}")]
    UpstreamUnavailable { detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: &'static str, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    fn code(&self) -> String {
        match self {
            AppError::Unauthorized { reason } => reason.code().to_string(),
            AppError::UpstreamUnavailable { .. } => "UPSTREAM_UNAVAILABLE".to_string(),
            AppError::NotFound { code, .. } => code.to_string(),
            AppError::BadRequest { code, .. } => code.to_string(),
            AppError::Db { .. } => "DB_ERROR".to_string(),
            AppError::DbUnavailable { .. } => "DB_UNAVAILABLE".to_string(),
            AppError::Internal { .. } => "INTERNAL".to_string(),
            AppError::Config { .. } => "CONFIG_ERROR".to_string(),
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Unauthorized { reason } => reason.to_string(),
            AppError::UpstreamUnavailable { detail } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            // Database details are internal; the client gets a generic line.
            AppError::Db { .. } => "Database operation failed".to_string(),
            AppError::DbUnavailable { .. } => "Database unavailable".to_string(),
            AppError::Internal { .. } => "Internal server error".to_string(),
            AppError::Config { .. } => "Service misconfigured".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Db { .. }
            | AppError::DbUnavailable { .. }
            | AppError::Internal { .. }
            | AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthorized(reason: AuthFailure) -> Self {
        Self::Unauthorized { reason }
    }

    pub fn upstream_unavailable(detail: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            detail: detail.into(),
        }
    }

    pub fn not_found(code: &'static str, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: &'static str, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable(detail: impl Into<String>) -> Self {
        Self::DbUnavailable {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let body = ProblemDetails {
            type_: "about:blank".to_string(),
            title: Self::humanize_code(&code),
            status: status.as_u16(),
            detail: self.detail(),
            code,
            trace_id: trace_ctx::trace_id(),
        };
        HttpResponse::build(status).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_map_to_401() {
        let reasons = [
            AuthFailure::MissingCredential,
            AuthFailure::UnknownSigningKey,
            AuthFailure::InvalidSignature,
            AuthFailure::ExpiredToken,
            AuthFailure::AudienceMismatch,
            AuthFailure::IssuerMismatch,
            AuthFailure::MalformedToken,
            AuthFailure::MissingSubject,
        ];
        for reason in reasons {
            assert_eq!(
                AppError::unauthorized(reason).status(),
                StatusCode::UNAUTHORIZED
            );
        }
    }

    #[test]
    fn upstream_unavailable_maps_to_502() {
        let err = AppError::upstream_unavailable("jwks fetch failed");
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn humanize_code_splits_words() {
        assert_eq!(
            AppError::humanize_code("AUTH_EXPIRED_TOKEN"),
            "AUTH EXPIRED TOKEN"
        );
    }
}
