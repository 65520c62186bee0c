//! Account service - account reads and mutations.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Account, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::AccountRepository;

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Get account by ID
    async fn get_account(&self, id: i32) -> AppResult<Account>;

    /// List all accounts
    async fn list_accounts(&self) -> AppResult<Vec<Account>>;

    /// Update account fields
    async fn update_account(
        &self,
        id: i32,
        username: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> AppResult<Account>;

    /// Mark an account as verified
    async fn verify_account(&self, id: i32) -> AppResult<Account>;
}

/// Concrete implementation of AccountService.
pub struct AccountManager {
    accounts: Arc<dyn AccountRepository>,
}

impl AccountManager {
    /// Create new account service instance
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn get_account(&self, id: i32) -> AppResult<Account> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_accounts(&self) -> AppResult<Vec<Account>> {
        self.accounts.list().await
    }

    async fn update_account(
        &self,
        id: i32,
        username: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> AppResult<Account> {
        // Reject identities already taken by another account
        if let Some(username) = &username {
            if let Some(other) = self.accounts.find_by_username(username).await? {
                if other.id != id {
                    return Err(AppError::conflict("Username"));
                }
            }
        }
        if let Some(email) = &email {
            if let Some(other) = self.accounts.find_by_email(email).await? {
                if other.id != id {
                    return Err(AppError::conflict("Email"));
                }
            }
        }

        let password = password.as_deref().map(Password::generate).transpose()?;
        self.accounts.update(id, username, email, password).await
    }

    async fn verify_account(&self, id: i32) -> AppResult<Account> {
        // NotFound surfaces from the repository when the id is unknown
        self.accounts.mark_verified(id).await
    }
}
