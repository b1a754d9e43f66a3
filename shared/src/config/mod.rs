//! Configuration module
//!
//! - `database` - Connection records, backend defaults and pool tuning
//! - `environment` - Environment detection and logging configuration
//!
//! Configuration is layered: serde defaults, then an optional TOML file, then
//! `CP__`-prefixed environment variables (`CP__DATABASE__HOST=db1`).

pub mod database;
pub mod environment;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::Path;

use ::config::{Config, File, FileFormat};

use crate::errors::ConfigError;

// Re-export commonly used types
pub use database::{ConfigurationDefaults, ConnectionConfiguration, PoolSettings, MYSQL_DEFAULTS};
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Environment variable prefix for layered configuration
pub const ENV_PREFIX: &str = "CP";

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Connection configuration
    pub database: ConnectionConfiguration,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            database: ConnectionConfiguration::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from plain environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        Ok(Self {
            environment,
            database: ConnectionConfiguration::from_env()?,
            logging: LoggingConfig::for_environment(environment),
        })
    }
}

/// Load layered configuration for the detected environment
///
/// `path` defaults to the file named by [`Environment::config_file`] for the
/// current environment. A missing file is not an error.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_for_environment(Environment::from_env(), path)
}

/// Load layered configuration for a given environment
///
/// The environment and its logging preset are the lowest layer, so a file or
/// `CP__*` variable that leaves them out still gets environment-appropriate
/// values.
pub fn load_for_environment(
    environment: Environment,
    path: Option<&Path>,
) -> Result<AppConfig, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new(environment.config_file()));

    tracing::debug!(path = %path.display(), %environment, "Loading configuration");

    let settings = environment
        .seed_defaults(Config::builder())?
        .add_source(File::from(path).required(false))
        .add_source(::config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Load configuration from a TOML document, without environment overrides
pub fn load_from_str(toml: &str) -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}
