//! PostgreSQL connection source and utilities
//!
//! Provides pool construction, the [`ConnectionSource`] handed to data-access
//! components, schema installation and health checks.

mod config;
mod connector;
mod health;
mod source;

pub use config::PostgresConfig;
pub use connector::{connect_from_config, install_schema};
pub use health::check_health;
pub use source::{ConnectionSource, PooledConnection};

// Re-export sqlx pool types for convenience
pub use sqlx::postgres::{PgPool, PgPoolOptions};
