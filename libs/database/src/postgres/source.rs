use sqlx::Postgres;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPool;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult};

/// A connection checked out of the pool. Returned to the pool when dropped.
pub type PooledConnection = PoolConnection<Postgres>;

/// Hands out pooled connections to data-access code
///
/// Built once at startup from a pool and shared (cheaply cloned) by every
/// repository. It never reads global state. Acquisition waits at most the
/// pool's acquire timeout and reports [`DatabaseError::PoolExhausted`] after
/// that; whole operations can be bounded with [`ConnectionSource::bounded`].
#[derive(Clone, Debug)]
pub struct ConnectionSource {
    pool: PgPool,
    call_timeout: Duration,
}

impl ConnectionSource {
    pub fn new(pool: PgPool, call_timeout: Duration) -> Self {
        Self { pool, call_timeout }
    }

    pub fn from_config(pool: PgPool, config: &PostgresConfig) -> Self {
        Self::new(pool, config.call_timeout())
    }

    /// Check out one connection
    pub async fn acquire(&self) -> DatabaseResult<PooledConnection> {
        self.pool.acquire().await.map_err(|e| match e {
            sqlx::Error::PoolTimedOut => {
                let waited = self.pool.options().get_acquire_timeout();
                warn!(
                    size = self.pool.size(),
                    idle = self.pool.num_idle(),
                    "No pooled connection available within {:?}",
                    waited
                );
                DatabaseError::PoolExhausted(waited)
            }
            other => DatabaseError::from(other),
        })
    }

    /// Run `op` under the call timeout
    ///
    /// A connection acquired inside `op` is dropped with the future on expiry,
    /// which returns it to the pool.
    pub async fn bounded<F, T>(&self, op: F) -> DatabaseResult<T>
    where
        F: Future<Output = DatabaseResult<T>>,
    {
        match tokio::time::timeout(self.call_timeout, op).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Database call exceeded {:?}", self.call_timeout);
                Err(DatabaseError::Timeout(self.call_timeout))
            }
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    /// Close the pool, waiting for checked-out connections to come back
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
