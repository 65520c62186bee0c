//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;

/// Authenticated account extracted from the JWT token
#[derive(Clone, Debug)]
pub struct CurrentAccount {
    pub id: i32,
    pub username: String,
    pub is_admin: bool,
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentAccount into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let current = CurrentAccount {
        id: claims.sub,
        username: claims.username,
        is_admin: claims.is_admin,
    };

    request.extensions_mut().insert(current);

    Ok(next.run(request).await)
}

/// Require admin privileges, returns Forbidden error otherwise.
pub fn require_admin(account: &CurrentAccount) -> Result<(), AppError> {
    if account.is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
