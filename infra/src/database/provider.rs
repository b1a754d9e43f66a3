//! MySQL connection provider

use std::fmt;
use std::marker::PhantomData;

use cp_core::{ConnectionPool, ConnectionProvider, ProviderRegistry};
use cp_shared::config::{ConnectionConfiguration, MYSQL_DEFAULTS};

use super::connection::MySqlConnectionPool;

/// Registry of MySQL pools keyed by provider key
pub type MySqlRegistry = ProviderRegistry<MySqlConnectionProvider>;

/// Connection provider for the MySQL backend
///
/// Stateless; the pool type is a parameter so tests can substitute a fake
/// pool implementation.
///
/// # Example
/// ```no_run
/// use cp_infra::database::MySqlConnectionProvider;
/// use cp_infra::ConnectionProvider;
///
/// async fn open() -> Result<(), cp_infra::PoolError> {
///     let provider = MySqlConnectionProvider::new();
///     let config = provider
///         .default_configuration()
///         .with_credentials("app", "secret");
///     let pool = provider.connect(&config).await.into_result()?;
///     println!("{}", pool.get_statistics()?);
///     Ok(())
/// }
/// ```
pub struct MySqlConnectionProvider<P = MySqlConnectionPool> {
    _pool: PhantomData<fn() -> P>,
}

impl MySqlConnectionProvider {
    /// Provider backed by the sqlx pool
    pub fn new() -> Self {
        Self::with_pool()
    }
}

impl<P> MySqlConnectionProvider<P> {
    /// Provider backed by a custom pool implementation
    pub fn with_pool() -> Self {
        Self { _pool: PhantomData }
    }
}

impl<P> Default for MySqlConnectionProvider<P> {
    fn default() -> Self {
        Self::with_pool()
    }
}

impl<P> Clone for MySqlConnectionProvider<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for MySqlConnectionProvider<P> {}

impl<P> fmt::Debug for MySqlConnectionProvider<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlConnectionProvider").finish()
    }
}

impl<P: ConnectionPool> ConnectionProvider for MySqlConnectionProvider<P> {
    type Pool = P;

    fn default_configuration(&self) -> ConnectionConfiguration {
        MYSQL_DEFAULTS.to_configuration()
    }
}
