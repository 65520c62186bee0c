//! Account transfer objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Account;
use crate::schemas::datetime;

/// Account signup request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    /// Unique account name
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    #[schema(example = "jane")]
    pub username: String,
    /// Unique email address
    #[validate(
        email(message = "Invalid email format"),
        length(max = 64, message = "Email must be at most 64 characters")
    )]
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
}

/// Account signin request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SigninRequest {
    /// Account name
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "jane")]
    pub username: String,
    /// Password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Account update request (all fields optional)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateAccountRequest {
    /// New account name
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    #[schema(example = "jane_doe")]
    pub username: Option<String>,
    /// New email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane.doe@example.com")]
    pub email: Option<String>,
    /// New password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "NewSecurePass456!", min_length = 8)]
    pub password: Option<String>,
}

/// Account response (safe to return to clients).
///
/// Serializes under camelCase wire names; multi-word fields also accept their
/// snake_case name on input.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Server-assigned account identifier
    #[schema(example = 1)]
    pub id: i32,
    /// Account name
    #[schema(example = "jane")]
    pub username: String,
    /// Email address
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[serde(alias = "is_admin")]
    pub is_admin: bool,
    #[serde(alias = "is_logged_in")]
    pub is_logged_in: bool,
    #[serde(alias = "is_verified")]
    pub is_verified: bool,
    /// Creation timestamp, ISO-8601
    #[serde(with = "datetime::iso8601", alias = "created_at")]
    #[schema(value_type = String, example = "2023-02-22T11:21:28.257741+00:00")]
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp, ISO-8601, null until first update
    #[serde(with = "datetime::iso8601_option", alias = "updated_at", default)]
    #[schema(value_type = Option<String>)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            is_admin: account.is_admin,
            is_logged_in: account.is_logged_in,
            is_verified: account.is_verified,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
