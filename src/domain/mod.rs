//! Domain layer - Core business entities and value objects.

mod account;
mod password;

pub use account::Account;
pub use password::Password;
