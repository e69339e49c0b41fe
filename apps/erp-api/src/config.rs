//! Configuration for ERP API

use core_config::{AppInfo, FromEnv, app_info, env_parse_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration, built once in `main` and passed down
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub postgres: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Run the product install script at startup (`DB_INSTALL_SCHEMA`)
    pub install_schema: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let postgres = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let install_schema = env_parse_or_default("DB_INSTALL_SCHEMA", "false")?;

        Ok(Self {
            app: app_info!(),
            postgres,
            server,
            environment,
            install_schema,
        })
    }
}
