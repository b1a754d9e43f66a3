//! Connection pool trait defining the boundary to the pool implementation.
//!
//! A provider never looks inside a pool. It builds one from a configuration
//! record and asks it to establish connections, either blocking the calling
//! thread or as a future.

use async_trait::async_trait;

use cp_shared::config::ConnectionConfiguration;

/// A backend connection pool, owned and managed by its implementation
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use cp_core::pool::ConnectionPool;
/// use cp_shared::config::ConnectionConfiguration;
///
/// struct NullPool;
///
/// #[async_trait]
/// impl ConnectionPool for NullPool {
///     type Error = std::io::Error;
///
///     fn from_configuration(_config: &ConnectionConfiguration) -> Self {
///         NullPool
///     }
///
///     fn connect_blocking(&self) -> Result<(), Self::Error> {
///         Ok(())
///     }
///
///     async fn connect(&self) -> Result<(), Self::Error> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait ConnectionPool: Send + Sync + 'static {
    /// Connection establishment failure reported by the implementation
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build a pool object from a configuration record
    ///
    /// Construction performs no I/O; nothing is connected until one of the
    /// connect methods runs.
    fn from_configuration(config: &ConnectionConfiguration) -> Self
    where
        Self: Sized;

    /// Establish connections, blocking the calling thread until done
    fn connect_blocking(&self) -> Result<(), Self::Error>;

    /// Establish connections asynchronously
    async fn connect(&self) -> Result<(), Self::Error>;
}
