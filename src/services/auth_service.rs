//! Authentication service - signup, signin, and token verification.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Account, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::AccountRepository;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account ID
    pub sub: i32,
    pub username: String,
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account
    async fn signup(&self, username: String, email: String, password: String)
        -> AppResult<Account>;

    /// Sign in, flip the logged-in flag, and return a JWT token
    async fn signin(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for an account
fn generate_token(account: &Account, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: account.id,
        username: account.username.clone(),
        is_admin: account.is_admin,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    accounts: Arc<dyn AccountRepository>,
    config: Config,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(accounts: Arc<dyn AccountRepository>, config: Config) -> Self {
        Self { accounts, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn signup(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<Account> {
        if self.accounts.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict("Username"));
        }
        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let password = Password::generate(&password)?;
        self.accounts.create(username, email, password).await
    }

    async fn signin(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let account = self.accounts.find_by_username(&username).await?;

        // SECURITY: Perform password verification even if the account doesn't
        // exist to prevent timing attacks that enumerate valid usernames.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (stored, exists) = match &account {
            Some(account) => (
                Password::from_stored(
                    account.hashed_password.clone(),
                    account.hashed_salt.clone(),
                ),
                true,
            ),
            None => (
                Password::from_stored(dummy_hash.to_string(), String::new()),
                false,
            ),
        };

        let password_valid = stored.verify(&password);
        if !exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe: exists was checked above
        let account = account.unwrap();
        let account = self.accounts.set_logged_in(account.id, true).await?;

        generate_token(&account, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockAccountRepository;
    use mockall::predicate::eq;

    fn test_config() -> Config {
        Config::from_env()
    }

    fn test_account(id: i32, password: &Password) -> Account {
        Account {
            id,
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            hashed_password: password.hash().to_string(),
            hashed_salt: password.salt().to_string(),
            is_admin: false,
            is_logged_in: false,
            is_verified: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_signup_rejects_taken_username() {
        let password = Password::generate("SecurePass123").unwrap();
        let existing = test_account(1, &password);

        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_username()
            .with(eq("jane"))
            .returning(move |_| Ok(Some(existing.clone())));

        let service = Authenticator::new(Arc::new(repo), test_config());
        let result = service
            .signup(
                "jane".to_string(),
                "other@example.com".to_string(),
                "SecurePass123".to_string(),
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_signin_issues_token_and_flips_login_flag() {
        let password = Password::generate("SecurePass123").unwrap();
        let account = test_account(1, &password);

        let mut repo = MockAccountRepository::new();
        let found = account.clone();
        repo.expect_find_by_username()
            .with(eq("jane"))
            .returning(move |_| Ok(Some(found.clone())));
        repo.expect_set_logged_in()
            .with(eq(1), eq(true))
            .returning(move |_, _| {
                let mut updated = account.clone();
                updated.record_login();
                Ok(updated)
            });

        let service = Authenticator::new(Arc::new(repo), test_config());
        let token = service
            .signin("jane".to_string(), "SecurePass123".to_string())
            .await
            .unwrap();

        assert_eq!(token.token_type, "Bearer");
        let claims = service.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, 1);
        assert_eq!(claims.username, "jane");
    }

    #[tokio::test]
    async fn test_signin_wrong_password() {
        let password = Password::generate("SecurePass123").unwrap();
        let account = test_account(1, &password);

        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_username()
            .returning(move |_| Ok(Some(account.clone())));

        let service = Authenticator::new(Arc::new(repo), test_config());
        let result = service
            .signin("jane".to_string(), "WrongPass999".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_signin_unknown_username() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));

        let service = Authenticator::new(Arc::new(repo), test_config());
        let result = service
            .signin("ghost".to_string(), "SecurePass123".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }
}
