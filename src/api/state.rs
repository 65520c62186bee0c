//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{AccountStore, Database};
use crate::services::{AccountManager, AccountService, AuthService, Authenticator};

/// Application state containing all services and the connection manager.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Account service
    pub account_service: Arc<dyn AccountService>,
    /// Database connection manager
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire services to the established connection manager.
    ///
    /// The engine and session factory must already be constructed (call
    /// `Database::establish` first); the repository reaches the single
    /// pooled engine through the factory.
    pub async fn from_config(database: Arc<Database>, config: Config) -> AppResult<Self> {
        let sessions = database.session_factory().await?.clone();
        let accounts = Arc::new(AccountStore::new(sessions));

        Ok(Self {
            auth_service: Arc::new(Authenticator::new(accounts.clone(), config)),
            account_service: Arc::new(AccountManager::new(accounts)),
            database,
        })
    }

    /// Create application state with manually injected services (tests).
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        account_service: Arc<dyn AccountService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            account_service,
            database,
        }
    }
}
