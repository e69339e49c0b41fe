use sqlx::postgres::PgPool;
use tracing::debug;

use crate::common::DatabaseError;

/// Check PostgreSQL database health
///
/// Executes `SELECT 1` on a pooled connection. Used by the readiness probe.
///
/// # Example
/// ```ignore
/// use database::postgres::{check_health, connect_from_config};
///
/// let pool = connect_from_config(&config).await?;
/// check_health(&pool).await?;
/// ```
pub async fn check_health(pool: &PgPool) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| {
            DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e))
        })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}
