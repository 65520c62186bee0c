//! Error taxonomy for the account backend.
//!
//! Every fallible path in the crate funnels into [`AppError`]; the
//! `IntoResponse` impl maps each variant onto the wire shape
//! `{"error": {"code", "message"}}` so handlers never assemble error
//! bodies by hand.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Result alias used across handlers, services and repositories.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// No credentials presented, or a token that failed verification.
    #[error("Authentication required")]
    Unauthorized,

    /// Authenticated, but not allowed to touch the target account.
    #[error("Access denied")]
    Forbidden,

    /// Signin with an unknown username or a wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The requested account does not exist.
    #[error("Account not found")]
    NotFound,

    /// A unique account column (username or email) is already taken.
    #[error("{0} is already taken")]
    Conflict(String),

    /// Request payload failed validation.
    #[error("{0}")]
    Validation(String),

    #[error("Database operation failed")]
    Database(#[from] sea_orm::DbErr),

    #[error("Token error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    pub fn conflict(field: impl Into<String>) -> Self {
        AppError::Conflict(field.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// HTTP status and stable machine-readable code for this variant.
    fn response_parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AppError::Jwt(_) => (StatusCode::UNAUTHORIZED, "AUTH_ERROR"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Message safe to hand to the client.
    ///
    /// Database, token and internal failures are logged server-side and
    /// replaced with a generic line; the remaining variants render their
    /// `Display` form as-is.
    fn public_message(&self) -> String {
        match self {
            AppError::Database(err) => {
                tracing::error!(error = ?err, "database operation failed");
                "A database error occurred".to_string()
            }
            AppError::Jwt(err) => {
                tracing::error!(error = ?err, "token verification failed");
                "Invalid or expired token".to_string()
            }
            AppError::Internal(detail) => {
                tracing::error!(detail = %detail, "internal error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.response_parts();
        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.public_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn rendered(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_conflict_names_the_taken_field() {
        let (status, body) = rendered(AppError::conflict("Username")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
        assert_eq!(body["error"]["message"], "Username is already taken");
    }

    #[tokio::test]
    async fn test_missing_account_maps_to_not_found() {
        let (status, body) = rendered(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Account not found");
    }

    #[tokio::test]
    async fn test_signin_failures_are_unauthorized() {
        let (status, body) = rendered(AppError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_validation_message_passes_through() {
        let err = AppError::validation("Password must be at least 8 characters");
        let (status, body) = rendered(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Password must be at least 8 characters"
        );
    }

    #[tokio::test]
    async fn test_database_detail_stays_server_side() {
        let err = AppError::from(sea_orm::DbErr::Custom("relation account exploded".into()));
        let (status, body) = rendered(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "DATABASE_ERROR");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(!message.contains("exploded"));
    }
}
