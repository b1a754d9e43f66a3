//! Mock pool and provider for testing
//!
//! `MockPool` fails to connect when the configured host is
//! [`UNREACHABLE_HOST`], and succeeds otherwise.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

use cp_shared::config::{ConnectionConfiguration, MYSQL_DEFAULTS};

use super::trait_::ConnectionPool;
use crate::provider::ConnectionProvider;

/// Host name the mock pool treats as unreachable
pub const UNREACHABLE_HOST: &str = "unreachable.invalid";

/// Error raised by the mock pool
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MockPoolError {
    #[error("Can't connect to MySQL server on '{endpoint}'")]
    Unreachable { endpoint: String },
}

/// Mock connection pool for testing
#[derive(Debug)]
pub struct MockPool {
    config: ConnectionConfiguration,
    connect_calls: AtomicUsize,
}

impl MockPool {
    /// Configuration the pool was built from
    pub fn config(&self) -> &ConnectionConfiguration {
        &self.config
    }

    /// Number of connect attempts made on this pool
    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }

    fn attempt(&self) -> Result<(), MockPoolError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        if self.config.host == UNREACHABLE_HOST {
            return Err(MockPoolError::Unreachable {
                endpoint: self.config.endpoint(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ConnectionPool for MockPool {
    type Error = MockPoolError;

    fn from_configuration(config: &ConnectionConfiguration) -> Self {
        Self {
            config: config.clone(),
            connect_calls: AtomicUsize::new(0),
        }
    }

    fn connect_blocking(&self) -> Result<(), Self::Error> {
        self.attempt()
    }

    async fn connect(&self) -> Result<(), Self::Error> {
        tokio::task::yield_now().await;
        self.attempt()
    }
}

/// Mock provider backed by [`MockPool`], using the MySQL defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProvider;

impl ConnectionProvider for MockProvider {
    type Pool = MockPool;

    fn default_configuration(&self) -> ConnectionConfiguration {
        MYSQL_DEFAULTS.to_configuration()
    }
}
