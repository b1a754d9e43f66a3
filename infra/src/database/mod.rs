//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool construction and establishment
//! - The MySQL connection provider
//! - Pool health checks and statistics

pub mod connection;
pub mod provider;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{MySqlConnectionPool, PoolStatistics};
pub use provider::{MySqlConnectionProvider, MySqlRegistry};
