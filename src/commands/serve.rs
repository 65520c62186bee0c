//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // Construct the connection manager and bring up engine + session factory.
    // Construction failures are fatal here, before the server binds.
    let database = Arc::new(Database::new(&config));
    database.establish().await?;
    tracing::info!("{}", database);

    // Run pending migrations
    database.run_migrations().await?;
    tracing::info!("Migrations applied");

    // Wire services onto the shared engine
    let app_state = AppState::from_config(Arc::clone(&database), config).await?;

    // Build router
    let app = create_router(app_state);

    // Start server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // Release the pool on the way out
    database.close().await?;
    tracing::info!("Database pool released");

    Ok(())
}

/// Resolve when Ctrl-C is received
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
