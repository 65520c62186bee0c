//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Database
// =============================================================================

/// Default connection URI scheme
pub const DEFAULT_POSTGRES_SCHEMA: &str = "postgresql";

/// Default database host (for development)
pub const DEFAULT_POSTGRES_HOST: &str = "localhost";

/// Default Postgres port
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// Default database name (for development)
pub const DEFAULT_POSTGRES_NAME: &str = "account_backend";

/// Default number of base pooled connections
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Default number of transient overflow connections on top of the base pool
pub const DEFAULT_POOL_OVERFLOW: u32 = 20;

/// Connection URI scheme prefix rewritten when the async driver flag is set
pub const SYNC_SCHEME_PREFIX: &str = "postgresql://";

/// Async-driver variant of the connection URI scheme prefix
pub const ASYNC_SCHEME_PREFIX: &str = "postgresql+asyncpg://";

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8000;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;
