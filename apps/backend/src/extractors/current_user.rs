use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::entities::users;
use crate::error::AppError;
use crate::extractors::auth_token::bearer_token;
use crate::services::identity;
use crate::state::app_state::AppState;

/// The authenticated local user, provisioned on first sight.
///
/// Extraction runs the whole pipeline: bearer header, signature verification
/// against the cached key set, then find-or-create keyed on the subject claim.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub users::Model);

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let token = token?;
            let state =
                state.ok_or_else(|| AppError::internal("AppState missing from request"))?;

            let claims = state.verifier.verify(&token.token).await?;
            let user = identity::resolve_or_create(&state.db, &claims).await?;
            Ok(CurrentUser(user))
        })
    }
}
