//! Account management handlers.
//!
//! All routes here sit behind the JWT middleware; `CurrentAccount` is pulled
//! from the request extensions it populates.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentAccount};
use crate::api::AppState;
use crate::errors::{AppError, AppResult};
use crate::schemas::{AccountResponse, UpdateAccountRequest};

/// Create account management routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_accounts))
        .route("/me", get(get_current_account))
        .route("/:id", get(get_account).patch(update_account))
        .route("/:id/verify", post(verify_account))
}

/// List all accounts (admin only)
#[utoipa::path(
    get,
    path = "/v1/accounts",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All accounts", body = [AccountResponse]),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_accounts(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
) -> AppResult<Json<Vec<AccountResponse>>> {
    require_admin(&current)?;

    let accounts = state.account_service.list_accounts().await?;
    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// Get the authenticated account
#[utoipa::path(
    get,
    path = "/v1/accounts/me",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = AccountResponse),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn get_current_account(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
) -> AppResult<Json<AccountResponse>> {
    let account = state.account_service.get_account(current.id).await?;
    Ok(Json(AccountResponse::from(account)))
}

/// Get an account by ID (self or admin)
#[utoipa::path(
    get,
    path = "/v1/accounts/{id}",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account found", body = AccountResponse),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_account(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
    Path(id): Path<i32>,
) -> AppResult<Json<AccountResponse>> {
    if current.id != id && !current.is_admin {
        return Err(AppError::Forbidden);
    }

    let account = state.account_service.get_account(id).await?;
    Ok(Json(AccountResponse::from(account)))
}

/// Update an account (self or admin)
#[utoipa::path(
    patch,
    path = "/v1/accounts/{id}",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Account ID")),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated", body = AccountResponse),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Account not found"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn update_account(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateAccountRequest>,
) -> AppResult<Json<AccountResponse>> {
    if current.id != id && !current.is_admin {
        return Err(AppError::Forbidden);
    }

    let account = state
        .account_service
        .update_account(id, payload.username, payload.email, payload.password)
        .await?;

    Ok(Json(AccountResponse::from(account)))
}

/// Mark an account as verified (admin only)
#[utoipa::path(
    post,
    path = "/v1/accounts/{id}/verify",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account verified", body = AccountResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn verify_account(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
    Path(id): Path<i32>,
) -> AppResult<Json<AccountResponse>> {
    require_admin(&current)?;

    let account = state.account_service.verify_account(id).await?;
    Ok(Json(AccountResponse::from(account)))
}
