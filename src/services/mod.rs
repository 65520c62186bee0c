//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure behind traits so the
//! API layer depends on abstractions only.

mod account_service;
mod auth_service;

pub use account_service::{AccountManager, AccountService};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
