use actix_web::http::header::Header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::auth::jwt::TokenService;
use crate::error::AppError;

pub const NO_TOKEN: &str = "No token provided. Authorization denied.";
pub const INVALID_TOKEN: &str = "Invalid or expired token. Authorization denied.";

/// Proof that the request carried a valid admin bearer token.
///
/// Taken as the first argument of every admin handler. Carries no identity.
#[derive(Debug)]
pub struct AdminAccess(());

impl FromRequest for AdminAccess {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authorize(req))
    }
}

fn authorize(req: &HttpRequest) -> Result<AdminAccess, AppError> {
    // 1. Extract the Bearer token from the Authorization header.
    let header = Authorization::<Bearer>::parse(req)
        .map_err(|_| AppError::Unauthorized(NO_TOKEN.to_string()))?;
    let bearer = header.into_scheme();
    let token = bearer.token().trim();
    if token.is_empty() {
        return Err(AppError::Unauthorized(NO_TOKEN.to_string()));
    }

    // 2. Get the token service from app data.
    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| AppError::Internal("Token service not configured".to_string()))?;

    // 3. Verify signature and expiry.
    tokens.verify(token).map_err(|e| {
        debug!("Rejected admin token: {e}");
        AppError::Unauthorized(INVALID_TOKEN.to_string())
    })?;

    Ok(AdminAccess(()))
}
