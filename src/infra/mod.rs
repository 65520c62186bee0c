//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection lifecycle (engine and session factory)
//! - Migrations
//! - Repositories over the persisted `account` entity

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator, SessionFactory};
pub use repositories::{AccountRepository, AccountStore};

#[cfg(test)]
pub use repositories::MockAccountRepository;
