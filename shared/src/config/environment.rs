//! Deployment environment and logging configuration
//!
//! The environment picks the configuration file and seeds the logging
//! preset that layered loading starts from.

use ::config::builder::{ConfigBuilder, DefaultState};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Variables consulted, in order, to detect the environment
pub const ENVIRONMENT_VARS: [&str; 3] = ["ENVIRONMENT", "ENV", "RUST_ENV"];

/// Deployment environment
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Detect the environment from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Detect the environment through a variable lookup
    ///
    /// The first of [`ENVIRONMENT_VARS`] that is set decides. Unknown names
    /// fall back to development.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        ENVIRONMENT_VARS
            .iter()
            .find_map(|key| lookup(*key))
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Configuration file read by [`load`](super::load) for this environment
    pub fn config_file(&self) -> &'static str {
        match self {
            Environment::Development => "config.development.toml",
            Environment::Staging => "config.staging.toml",
            Environment::Production => "config.production.toml",
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Seed a configuration builder with this environment and its logging preset
    ///
    /// Later sources (file, `CP__*` variables) override these values.
    pub(crate) fn seed_defaults(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ::config::ConfigError> {
        let logging = LoggingConfig::for_environment(*self);
        builder
            .set_default("environment", self.as_str())?
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", logging.format.as_str())?
            .set_default("logging.timestamp", logging.timestamp)?
            .set_default("logging.source_location", logging.source_location)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment {:?}", other)),
        }
    }
}

/// Logging configuration consumed by [`init_tracing`](crate::telemetry::init_tracing)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    pub format: LogFormat,
    pub timestamp: bool,
    /// Emit file and line of each event
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: LogFormat::Pretty,
            timestamp: true,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Logging preset for an environment
    ///
    /// Development logs debug events in pretty form with source locations;
    /// staging and production log JSON at info and warn.
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: String::from("debug"),
                source_location: true,
                ..Self::default()
            },
            Environment::Staging => Self {
                format: LogFormat::Json,
                ..Self::default()
            },
            Environment::Production => Self {
                level: String::from("warn"),
                format: LogFormat::Json,
                ..Self::default()
            },
        }
    }
}

/// Output format of the fmt subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
            LogFormat::Compact => "compact",
        }
    }
}
