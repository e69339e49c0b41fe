//! Application state management

use database::postgres::ConnectionSource;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub source: ConnectionSource,
}
