use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::error::{AppError, AuthFailure};

/// Bearer token lifted from the Authorization header, not yet verified.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub token: String,
}

pub(crate) fn bearer_token(req: &HttpRequest) -> Result<AuthToken, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AppError::unauthorized(AuthFailure::MissingCredential))?;

    let value = header_value
        .to_str()
        .map_err(|_| AppError::unauthorized(AuthFailure::MissingCredential))?;

    match value.split_once(' ') {
        Some(("Bearer", token)) if !token.trim().is_empty() => Ok(AuthToken {
            token: token.trim().to_string(),
        }),
        _ => Err(AppError::unauthorized(AuthFailure::MissingCredential)),
    }
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(bearer_token(req))
    }
}
