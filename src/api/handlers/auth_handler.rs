//! Authentication handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::schemas::{AccountResponse, SigninRequest, SignupRequest};
use crate::services::TokenResponse;

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/v1/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let account = state
        .auth_service
        .signup(payload.username, payload.email, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// Sign in and get a JWT token
#[utoipa::path(
    post,
    path = "/v1/auth/signin",
    tag = "Authentication",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signin successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SigninRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .signin(payload.username, payload.password)
        .await?;

    Ok(Json(token))
}
