//! Database connection lifecycle management.
//!
//! The [`Database`] struct owns at most one pooled engine handle and one
//! session factory per instance, each constructed lazily on first access and
//! memoized for the rest of the process lifetime. It is built once at startup
//! and handed to the rest of the application behind an `Arc`.

use std::fmt;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection,
    DatabaseTransaction, DbErr, Statement, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;
use tokio::sync::OnceCell;

use crate::config::{Config, ASYNC_SCHEME_PREFIX, SYNC_SCHEME_PREFIX};

pub mod migrations;

pub use migrations::Migrator;

/// Human-readable label for the backing server kind.
const SERVER_KIND: &str = "Asynchronous PostgreSQL";

/// Human-readable label for the data-access framework.
const FRAMEWORK_KIND: &str = "SeaORM";

/// Connection manager for the pooled async Postgres engine.
///
/// Both handles are created at most once: the cells act as initialize-once
/// guards, so concurrent first accesses race on construction but only one
/// winner is memoized.
pub struct Database {
    postgres_url: String,
    is_async_driver: bool,
    echo_log: bool,
    pool_size: u32,
    pool_overflow: u32,
    engine: OnceCell<DatabaseConnection>,
    sessions: OnceCell<SessionFactory>,
}

impl Database {
    /// Create a new, not-yet-connected manager from configuration.
    ///
    /// Connection parameters are snapshot here; nothing touches the network
    /// until [`Database::engine`] or [`Database::establish`] is called.
    pub fn new(config: &Config) -> Self {
        Self {
            postgres_url: config.postgres_url(),
            is_async_driver: config.is_db_async_driver,
            echo_log: config.is_db_echo_log,
            pool_size: config.db_pool_size,
            pool_overflow: config.db_pool_overflow,
            engine: OnceCell::new(),
            sessions: OnceCell::new(),
        }
    }

    /// The connection URL actually handed to the engine.
    ///
    /// When the async-driver flag is set the URI scheme is rewritten to its
    /// async variant (`postgresql://` becomes `postgresql+asyncpg://`);
    /// otherwise the configured URL is returned unmodified.
    pub fn effective_url(&self) -> String {
        if self.is_async_driver {
            self.postgres_url
                .replacen(SYNC_SCHEME_PREFIX, ASYNC_SCHEME_PREFIX, 1)
        } else {
            self.postgres_url.clone()
        }
    }

    /// Get the memoized engine handle, constructing it on first access.
    ///
    /// # Errors
    /// Construction failures (malformed URL, unreachable server, invalid pool
    /// parameters) are fatal and surface to the caller; they are not retried.
    pub async fn engine(&self) -> Result<&DatabaseConnection, DbErr> {
        self.engine
            .get_or_try_init(|| self.connect_engine())
            .await
    }

    /// Get the memoized session factory, constructing it on first access.
    ///
    /// The factory is bound to the engine, so the engine is produced first if
    /// it does not exist yet.
    pub async fn session_factory(&self) -> Result<&SessionFactory, DbErr> {
        let engine = self.engine().await?;
        self.sessions
            .get_or_try_init(|| async { Ok::<_, DbErr>(SessionFactory::new(engine.clone())) })
            .await
    }

    /// Idempotent readiness routine: bring up the engine and the session
    /// factory, logging a line per attempt.
    ///
    /// A handle cell that is still empty is re-attempted; a construction
    /// error is fatal and propagates immediately.
    pub async fn establish(&self) -> Result<(), DbErr> {
        tracing::info!("Async engine --- establishing");
        while self.engine.get().is_none() {
            tracing::info!("Async engine --- not found, initializing");
            self.engine().await?;
        }
        tracing::info!("Async engine --- established");

        tracing::info!("Session factory --- establishing");
        while self.sessions.get().is_none() {
            tracing::info!("Session factory --- not found, initializing");
            self.session_factory().await?;
        }
        tracing::info!("Session factory --- established");

        Ok(())
    }

    /// Whether the engine handle has been constructed yet.
    pub fn is_established(&self) -> bool {
        self.engine.get().is_some() && self.sessions.get().is_some()
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(self.engine().await?, None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(self.engine().await?, Some(1)).await
    }

    /// Get migration status (list all migrations with applied status).
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        use sea_orm::{EntityTrait, QueryOrder};
        use sea_orm_migration::seaql_migrations;

        let engine = self.engine().await?;

        // Get applied migrations from database
        let applied: std::collections::HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(engine)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        // Map all defined migrations with their applied status
        let migrations: Vec<(String, bool)> = Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect();

        Ok(migrations)
    }

    /// Reset database and run all migrations fresh.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(self.engine().await?).await
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        let engine = self.engine().await?;
        engine
            .execute(Statement::from_string(
                engine.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }

    /// Release the underlying pool at shutdown.
    ///
    /// A no-op when the engine was never constructed.
    pub async fn close(&self) -> Result<(), DbErr> {
        if let Some(engine) = self.engine.get() {
            engine.clone().close().await?;
        }
        Ok(())
    }

    async fn connect_engine(&self) -> Result<DatabaseConnection, DbErr> {
        let mut options = ConnectOptions::new(self.effective_url());
        options
            .min_connections(self.pool_size)
            .max_connections(self.pool_size + self.pool_overflow)
            .sqlx_logging(self.echo_log);

        SeaDatabase::connect(options).await
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Database Server: {}\nDatabase Framework: {}",
            SERVER_KIND, FRAMEWORK_KIND
        )
    }
}

/// Factory for transactional session handles, bound to the engine.
///
/// Each logical unit of work begins its own session; sessions are not shared
/// across concurrent units of work. Values held in memory are not refreshed
/// after commit, so callers re-fetch server-assigned columns (`id`,
/// `created_at`) when they need them post-commit.
#[derive(Clone)]
pub struct SessionFactory {
    engine: DatabaseConnection,
}

impl SessionFactory {
    fn new(engine: DatabaseConnection) -> Self {
        Self { engine }
    }

    /// Begin a new session scoping one logical sequence of reads/writes.
    pub async fn begin(&self) -> Result<DatabaseTransaction, DbErr> {
        self.engine.begin().await
    }

    /// The engine this factory mints sessions from.
    pub fn engine(&self) -> &DatabaseConnection {
        &self.engine
    }
}
