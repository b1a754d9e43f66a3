//! Error types shared across crates

use thiserror::Error;

/// Configuration and setup errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Layered configuration could not be read or deserialized
    #[error("Configuration error: {0}")]
    Load(#[from] ::config::ConfigError),

    /// Environment variable present but not parsable
    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },

    /// Logging could not be initialized
    #[error("Telemetry error: {0}")]
    Telemetry(String),
}
