//! Integration tests for API endpoints.
//!
//! These tests use mock services behind the real router, so no database
//! connection is required.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{TimeZone, Utc};
use tower::ServiceExt;

use account_backend::api::{create_router, AppState};
use account_backend::config::Config;
use account_backend::domain::Account;
use account_backend::errors::{AppError, AppResult};
use account_backend::infra::Database;
use account_backend::services::{AccountService, AuthService, Claims, TokenResponse};

// =============================================================================
// Mock Services
// =============================================================================

fn sample_account(id: i32) -> Account {
    Account {
        id,
        username: "jane".to_string(),
        email: "jane@example.com".to_string(),
        hashed_password: "opaque-hash".to_string(),
        hashed_salt: "opaque-salt".to_string(),
        is_admin: false,
        is_logged_in: false,
        is_verified: false,
        created_at: Utc.with_ymd_and_hms(2023, 2, 22, 11, 21, 28).unwrap(),
        updated_at: None,
    }
}

/// Mock auth service that returns predefined responses
struct MockAuthService;

#[async_trait]
impl AuthService for MockAuthService {
    async fn signup(
        &self,
        username: String,
        email: String,
        _password: String,
    ) -> AppResult<Account> {
        if username == "taken" {
            return Err(AppError::conflict("Username"));
        }
        let mut account = sample_account(1);
        account.username = username;
        account.email = email;
        Ok(account)
    }

    async fn signin(&self, _username: String, password: String) -> AppResult<TokenResponse> {
        if password != "SecurePass123" {
            return Err(AppError::InvalidCredentials);
        }
        Ok(TokenResponse {
            access_token: "mock-token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 86400,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        match token {
            "valid-test-token" => Ok(Claims {
                sub: 1,
                username: "jane".to_string(),
                is_admin: false,
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            }),
            "admin-test-token" => Ok(Claims {
                sub: 9,
                username: "root".to_string(),
                is_admin: true,
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            }),
            _ => Err(AppError::Unauthorized),
        }
    }
}

/// Mock account service backed by canned data
struct MockAccountService;

#[async_trait]
impl AccountService for MockAccountService {
    async fn get_account(&self, id: i32) -> AppResult<Account> {
        if id > 100 {
            return Err(AppError::NotFound);
        }
        Ok(sample_account(id))
    }

    async fn list_accounts(&self) -> AppResult<Vec<Account>> {
        Ok(vec![sample_account(1), sample_account(2)])
    }

    async fn update_account(
        &self,
        id: i32,
        username: Option<String>,
        _email: Option<String>,
        _password: Option<String>,
    ) -> AppResult<Account> {
        let mut account = sample_account(id);
        if let Some(username) = username {
            account.username = username;
        }
        account.updated_at = Some(Utc::now());
        Ok(account)
    }

    async fn verify_account(&self, id: i32) -> AppResult<Account> {
        let mut account = sample_account(id);
        account.mark_verified();
        Ok(account)
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn test_router() -> axum::Router {
    let database = Arc::new(Database::new(&Config::from_env()));
    let state = AppState::new(
        Arc::new(MockAuthService),
        Arc::new(MockAccountService),
        database,
    );
    create_router(state)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Authentication Routes
// =============================================================================

#[tokio::test]
async fn test_signup_returns_created_with_camel_case_body() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/v1/auth/signup",
            serde_json::json!({
                "username": "jane",
                "email": "jane@example.com",
                "password": "SecurePass123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["username"], "jane");
    assert_eq!(body["isVerified"], false);
    assert_eq!(body["createdAt"], "2023-02-22T11:21:28.000000+00:00");
    // Secrets never leave the server
    assert!(body.get("hashedPassword").is_none());
    assert!(body.get("hashed_password").is_none());
}

#[tokio::test]
async fn test_signup_conflict() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/v1/auth/signup",
            serde_json::json!({
                "username": "taken",
                "email": "taken@example.com",
                "password": "SecurePass123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_signup_validation_error() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/v1/auth/signup",
            serde_json::json!({
                "username": "jane",
                "email": "not-an-email",
                "password": "short"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_signin_returns_token() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/v1/auth/signin",
            serde_json::json!({
                "username": "jane",
                "password": "SecurePass123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["accessToken"], "mock-token");
    assert_eq!(body["tokenType"], "Bearer");
}

#[tokio::test]
async fn test_signin_invalid_credentials() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/v1/auth/signin",
            serde_json::json!({
                "username": "jane",
                "password": "WrongPass999"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Account Routes (JWT-protected)
// =============================================================================

#[tokio::test]
async fn test_accounts_require_token() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/v1/accounts/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_accounts_reject_malformed_header() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/v1/accounts/me")
                .header(header::AUTHORIZATION, "Token valid-test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_current_account() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/v1/accounts/me")
                .header(header::AUTHORIZATION, "Bearer valid-test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["username"], "jane");
}

#[tokio::test]
async fn test_list_accounts_requires_admin() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/v1/accounts")
                .header(header::AUTHORIZATION, "Bearer valid-test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_accounts_as_admin() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/v1/accounts")
                .header(header::AUTHORIZATION, "Bearer admin-test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_foreign_account_forbidden() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/v1/accounts/2")
                .header(header::AUTHORIZATION, "Bearer valid-test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_own_account() {
    let mut request = json_request(
        "PATCH",
        "/v1/accounts/1",
        serde_json::json!({ "username": "jane_doe" }),
    );
    request.headers_mut().insert(
        header::AUTHORIZATION,
        "Bearer valid-test-token".parse().unwrap(),
    );

    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["username"], "jane_doe");
    assert!(!body["updatedAt"].is_null());
}

#[tokio::test]
async fn test_verify_account_admin_only() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/accounts/1/verify")
        .header(header::AUTHORIZATION, "Bearer admin-test-token")
        .body(Body::empty())
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["isVerified"], true);
}

// =============================================================================
// Root Endpoint
// =============================================================================

#[tokio::test]
async fn test_root_endpoint() {
    let response = test_router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
