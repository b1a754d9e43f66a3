//! Shared configuration and setup for the connection provider crates
//!
//! This crate provides:
//! - Connection configuration records and backend defaults
//! - Layered configuration loading
//! - Logging setup
//! - Configuration error types

pub mod config;
pub mod errors;
pub mod telemetry;

// Re-export commonly used items at crate root
pub use crate::config::{
    AppConfig, ConfigurationDefaults, ConnectionConfiguration, Environment, LogFormat,
    LoggingConfig, PoolSettings, MYSQL_DEFAULTS,
};
pub use errors::ConfigError;
pub use telemetry::init_tracing;
