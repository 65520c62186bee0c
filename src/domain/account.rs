//! Account domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account domain entity.
///
/// `id` and `created_at` are server-assigned at insert and immutable
/// afterwards. `updated_at` is set on every mutation. Accounts are never
/// physically deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    #[serde(skip_serializing)]
    pub hashed_salt: String,
    pub is_admin: bool,
    pub is_logged_in: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Record a successful signin.
    pub fn record_login(&mut self) {
        self.is_logged_in = true;
        self.updated_at = Some(Utc::now());
    }

    /// Record a signout.
    pub fn record_logout(&mut self) {
        self.is_logged_in = false;
        self.updated_at = Some(Utc::now());
    }

    /// Mark the account as verified.
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.updated_at = Some(Utc::now());
    }
}
