//! Database connection pool management
//!
//! MySQL connection pooling using SQLx. The pool is built from a
//! [`ConnectionConfiguration`] without touching the network; connections are
//! established by [`ConnectionPool::connect`] or
//! [`ConnectionPool::connect_blocking`].

use async_trait::async_trait;
use log::LevelFilter;
use once_cell::sync::OnceCell as SyncOnceCell;
use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool,
};
use std::fmt;
use std::thread;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::OnceCell;

use cp_core::ConnectionPool;
use cp_shared::config::ConnectionConfiguration;

use crate::PoolError;

/// Runtime that drives blocking connects and the pools they create
static BLOCKING_RUNTIME: SyncOnceCell<Runtime> = SyncOnceCell::new();

fn blocking_runtime() -> Result<&'static Runtime, PoolError> {
    BLOCKING_RUNTIME
        .get_or_try_init(|| {
            tracing::debug!("Starting runtime for blocking connects");
            Builder::new_multi_thread()
                .enable_all()
                .thread_name("cp-blocking-connect")
                .build()
        })
        .map_err(PoolError::Runtime)
}

/// MySQL connection pool
///
/// Wraps an SQLx MySQL pool that is created on the first successful connect.
/// Connecting again after that is a no-op.
pub struct MySqlConnectionPool {
    /// Configuration used to create this pool
    config: ConnectionConfiguration,
    /// Connect options derived from the configuration
    connect_options: MySqlConnectOptions,
    /// SQLx MySQL connection pool, set once connected
    pool: OnceCell<MySqlPool>,
}

impl MySqlConnectionPool {
    /// Translate a configuration record into SQLx connect options
    ///
    /// A non-empty socket path replaces host and port. Statement logging is
    /// only enabled when `backend_debug` is set.
    pub fn connect_options(config: &ConnectionConfiguration) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new().username(&config.user);

        if !config.password.is_empty() {
            options = options.password(&config.password);
        }
        if !config.database.is_empty() {
            options = options.database(&config.database);
        }

        options = match config.socket_path() {
            Some(socket) => options.socket(socket),
            None => options.host(&config.host).port(config.port),
        };

        if config.backend_debug {
            options
                .log_statements(LevelFilter::Debug)
                .log_slow_statements(LevelFilter::Warn, config.pool.slow_query_threshold())
        } else {
            options.disable_statement_logging()
        }
    }

    fn pool_options(&self) -> MySqlPoolOptions {
        let settings = &self.config.pool;
        MySqlPoolOptions::new()
            // Connection pool size
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            // Connection lifecycle
            .acquire_timeout(settings.connect_timeout())
            .idle_timeout(settings.idle_timeout())
            .max_lifetime(settings.max_lifetime())
            // Test connections before returning from pool
            .test_before_acquire(true)
    }

    /// Configuration used to create this pool
    pub fn config(&self) -> &ConnectionConfiguration {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    /// Get a reference to the underlying SQLx pool
    ///
    /// # Returns
    /// * `Ok(&MySqlPool)` - The connected pool
    /// * `Err(PoolError::NotConnected)` - No successful connect yet
    pub fn get_pool(&self) -> Result<&MySqlPool, PoolError> {
        self.pool.get().ok_or(PoolError::NotConnected)
    }

    /// Check if the database connection is healthy
    ///
    /// Performs a simple query to verify connectivity.
    ///
    /// # Example
    /// ```no_run
    /// use cp_infra::database::MySqlConnectionPool;
    ///
    /// async fn check_health(pool: &MySqlConnectionPool) {
    ///     match pool.health_check().await {
    ///         Ok(true) => println!("Database is healthy"),
    ///         Ok(false) => println!("Database check returned false"),
    ///         Err(e) => println!("Database is unhealthy: {}", e),
    ///     }
    /// }
    /// ```
    pub async fn health_check(&self) -> Result<bool, PoolError> {
        tracing::debug!("Performing database health check");

        let value: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(self.get_pool()?)
            .await
            .map_err(|e| {
                tracing::error!("Database health check failed: {}", e);
                PoolError::Database(e)
            })?;

        if value == 1 {
            tracing::debug!("Database health check passed");
            Ok(true)
        } else {
            tracing::warn!("Database health check returned unexpected value: {}", value);
            Ok(false)
        }
    }

    /// Get connection pool statistics
    pub fn get_statistics(&self) -> Result<PoolStatistics, PoolError> {
        let pool = self.get_pool()?;
        Ok(PoolStatistics {
            connections: pool.size(),
            idle_connections: pool.num_idle(),
            max_connections: pool.options().get_max_connections(),
        })
    }

    /// Close all connections in the pool
    ///
    /// Does nothing if the pool never connected.
    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            tracing::info!("Closing database connection pool");
            pool.close().await;
            tracing::info!("Database connection pool closed");
        }
    }
}

#[async_trait]
impl ConnectionPool for MySqlConnectionPool {
    type Error = PoolError;

    fn from_configuration(config: &ConnectionConfiguration) -> Self {
        Self {
            config: config.clone(),
            connect_options: Self::connect_options(config),
            pool: OnceCell::new(),
        }
    }

    /// Drive [`connect`](Self::connect) to completion on a shared runtime
    ///
    /// Pools created here keep running on that runtime after this returns.
    /// A thread that already belongs to a tokio runtime (a worker, or a
    /// `spawn_blocking` thread) cannot enter another one, so the connect is
    /// driven from a scoped helper thread while the caller waits.
    fn connect_blocking(&self) -> Result<(), PoolError> {
        let runtime = blocking_runtime()?;

        if Handle::try_current().is_err() {
            return runtime.block_on(self.connect());
        }

        tracing::debug!("Blocking connect inside a runtime; driving it from a helper thread");
        thread::scope(|scope| {
            scope
                .spawn(|| runtime.block_on(self.connect()))
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
        })
    }

    async fn connect(&self) -> Result<(), PoolError> {
        self.pool
            .get_or_try_init(|| async {
                tracing::info!(
                    "Creating database connection pool with max_connections: {}",
                    self.config.pool.max_connections
                );

                let pool = self
                    .pool_options()
                    .connect_with(self.connect_options.clone())
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to create database pool: {}", e);
                        PoolError::Database(e)
                    })?;

                tracing::info!("Database connection pool created successfully");
                Ok::<_, PoolError>(pool)
            })
            .await?;

        Ok(())
    }
}

impl fmt::Debug for MySqlConnectionPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlConnectionPool")
            .field("endpoint", &self.config.endpoint())
            .field("database", &self.config.database)
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// Connection pool statistics
#[derive(Debug, Clone)]
pub struct PoolStatistics {
    /// Total number of connections in the pool
    pub connections: u32,
    /// Number of idle connections
    pub idle_connections: usize,
    /// Maximum allowed connections
    pub max_connections: u32,
}

impl std::fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pool Stats: {}/{} connections ({} idle)",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}
