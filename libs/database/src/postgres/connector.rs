use sqlx::postgres::PgPool;
use tracing::{info, warn};

use super::PostgresConfig;
use crate::common::DatabaseError;

/// Build the pool described by `config` and open its first connection
///
/// Startup fails fast: an unreachable server is reported once and the caller
/// decides what to do. Nothing here retries.
///
/// # Example
/// ```ignore
/// use database::postgres::{PostgresConfig, connect_from_config};
/// use core_config::FromEnv;
///
/// let config = PostgresConfig::from_env()?;
/// let pool = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &PostgresConfig) -> Result<PgPool, DatabaseError> {
    info!(
        url = %config.redacted_url(),
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Connecting to PostgreSQL"
    );

    let pool = config
        .pool_options()
        .connect(config.url())
        .await
        .map_err(|e| {
            warn!(error = %e, "PostgreSQL connection failed");
            DatabaseError::ConnectionFailed(e.to_string())
        })?;

    info!("Successfully connected to PostgreSQL database");
    Ok(pool)
}

/// Run an idempotent install script (tables, schemas, procedures)
///
/// The script may hold several statements; it is sent as one simple-protocol
/// batch so `CREATE OR REPLACE PROCEDURE` bodies survive intact.
pub async fn install_schema(pool: &PgPool, script: &str) -> Result<(), DatabaseError> {
    info!("Installing database schema");

    sqlx::raw_sql(script)
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::SchemaInstall(e.to_string()))?;

    info!("Database schema installed");
    Ok(())
}
