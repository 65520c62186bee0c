//! Account repository implementation.
//!
//! No delete operation exists: accounts are never physically removed.
//! Reads go straight to the pooled engine; every mutation runs inside a
//! session minted from the factory for that one unit of work, so an error
//! before commit rolls the whole change back.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    Set,
};

use super::entities::account::{self, ActiveModel, Entity as AccountEntity};
use crate::domain::{Account, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::db::SessionFactory;

#[cfg(test)]
use mockall::automock;

/// Account repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Account>>;

    /// Find account by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    /// Find account by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Create a new account
    async fn create(&self, username: String, email: String, password: Password)
        -> AppResult<Account>;

    /// Update account fields, stamping `updated_at`
    async fn update(
        &self,
        id: i32,
        username: Option<String>,
        email: Option<String>,
        password: Option<Password>,
    ) -> AppResult<Account>;

    /// Set the logged-in flag
    async fn set_logged_in(&self, id: i32, is_logged_in: bool) -> AppResult<Account>;

    /// Mark the account as verified
    async fn mark_verified(&self, id: i32) -> AppResult<Account>;

    /// List all accounts
    async fn list(&self) -> AppResult<Vec<Account>>;
}

/// Concrete implementation of AccountRepository over SeaORM
pub struct AccountStore {
    sessions: SessionFactory,
}

impl AccountStore {
    /// Create a repository backed by the session factory
    pub fn new(sessions: SessionFactory) -> Self {
        Self { sessions }
    }
}

async fn find_required(conn: &impl ConnectionTrait, id: i32) -> AppResult<account::Model> {
    AccountEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Account>> {
        let result = AccountEntity::find_by_id(id)
            .one(self.sessions.engine())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let result = AccountEntity::find()
            .filter(account::Column::Username.eq(username))
            .one(self.sessions.engine())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let result = AccountEntity::find()
            .filter(account::Column::Email.eq(email))
            .one(self.sessions.engine())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn create(
        &self,
        username: String,
        email: String,
        password: Password,
    ) -> AppResult<Account> {
        let active_model = ActiveModel {
            id: NotSet,
            username: Set(username),
            email: Set(email),
            hashed_password: Set(password.hash().to_string()),
            hashed_salt: Set(password.salt().to_string()),
            is_admin: Set(false),
            is_logged_in: Set(false),
            is_verified: Set(false),
            // Server-assigned via the column default; the insert returns it
            created_at: NotSet,
            updated_at: Set(None),
        };

        let session = self.sessions.begin().await?;
        let model = active_model.insert(&session).await.map_err(AppError::from)?;
        session.commit().await?;

        Ok(Account::from(model))
    }

    async fn update(
        &self,
        id: i32,
        username: Option<String>,
        email: Option<String>,
        password: Option<Password>,
    ) -> AppResult<Account> {
        let session = self.sessions.begin().await?;

        let model = find_required(&session, id).await?;
        let mut active: ActiveModel = model.into();

        if let Some(username) = username {
            active.username = Set(username);
        }
        if let Some(email) = email {
            active.email = Set(email);
        }
        if let Some(password) = password {
            active.hashed_password = Set(password.hash().to_string());
            active.hashed_salt = Set(password.salt().to_string());
        }
        active.updated_at = Set(Some(chrono::Utc::now()));

        let model = active.update(&session).await.map_err(AppError::from)?;
        session.commit().await?;

        Ok(Account::from(model))
    }

    async fn set_logged_in(&self, id: i32, is_logged_in: bool) -> AppResult<Account> {
        let session = self.sessions.begin().await?;

        let model = find_required(&session, id).await?;
        let mut active: ActiveModel = model.into();

        active.is_logged_in = Set(is_logged_in);
        active.updated_at = Set(Some(chrono::Utc::now()));

        let model = active.update(&session).await.map_err(AppError::from)?;
        session.commit().await?;

        Ok(Account::from(model))
    }

    async fn mark_verified(&self, id: i32) -> AppResult<Account> {
        let session = self.sessions.begin().await?;

        let model = find_required(&session, id).await?;
        let mut active: ActiveModel = model.into();

        active.is_verified = Set(true);
        active.updated_at = Set(Some(chrono::Utc::now()));

        let model = active.update(&session).await.map_err(AppError::from)?;
        session.commit().await?;

        Ok(Account::from(model))
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        let models = AccountEntity::find()
            .all(self.sessions.engine())
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Account::from).collect())
    }
}
