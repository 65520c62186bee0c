//! Repository layer - Data access abstraction over the `account` table.

pub(crate) mod entities;
mod account_repository;

pub use account_repository::{AccountRepository, AccountStore};

// Export mock for service unit tests
#[cfg(test)]
pub use account_repository::MockAccountRepository;
