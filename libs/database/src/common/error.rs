use std::time::Duration;

/// Unified database error type for all database operations
///
/// Everything here counts as a store failure for callers: pool exhaustion,
/// a failed remote call, an unreachable server.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Error returned by the driver or the server (SQLSTATE errors, I/O, decoding)
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// No pooled connection became available within the acquire timeout
    #[error("Connection pool exhausted: no connection available within {0:?}")]
    PoolExhausted(Duration),

    /// The call did not complete within the configured call timeout
    #[error("Database call timed out after {0:?}")]
    Timeout(Duration),

    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Schema installation failed
    #[error("Schema installation failed: {0}")]
    SchemaInstall(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
