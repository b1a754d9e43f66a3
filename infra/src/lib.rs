//! # MySQL Backend
//!
//! Concrete MySQL implementations of the provider contracts:
//! - **Pool**: [`database::MySqlConnectionPool`], an sqlx pool built from a
//!   connection configuration
//! - **Provider**: [`database::MySqlConnectionProvider`], backend defaults and
//!   pool construction
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export the contracts for convenience
pub use cp_core::{ConnectOutcome, ConnectionPool, ConnectionProvider, ProviderKey, ProviderRegistry};

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// MySQL pool errors
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// Connection establishment or query error from sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The runtime driving blocking connects could not be started
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),

    /// Pool used before a successful connect
    #[error("Pool is not connected")]
    NotConnected,
}
