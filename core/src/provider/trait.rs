//! Connection provider trait.
//!
//! A provider translates a backend-agnostic configuration record into a live
//! backend pool. Implementations supply the backend defaults and the pool
//! type; building the pool and forwarding establishment is shared here.
//!
//! Providers hold no state between calls. Establishment errors come from the
//! pool implementation and are handed back unchanged.

use async_trait::async_trait;
use tokio::task::JoinHandle;

use cp_shared::config::ConnectionConfiguration;

use super::key::ProviderKey;
use super::outcome::ConnectOutcome;
use crate::pool::ConnectionPool;

/// Establishment error type of a provider's pool
pub type ProviderError<P> = <<P as ConnectionProvider>::Pool as ConnectionPool>::Error;

/// Backend connection provider
///
/// # Example
/// ```no_run
/// use cp_core::provider::ConnectionProvider;
///
/// fn open<P: ConnectionProvider>(provider: &P) -> Result<P::Pool, cp_core::ProviderError<P>> {
///     let config = provider
///         .default_configuration()
///         .with_endpoint("db1", 3306)
///         .with_credentials("app", "secret");
///     provider.connect_blocking(&config)
/// }
/// ```
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// Pool type this provider builds
    type Pool: ConnectionPool;

    /// Fresh copy of the backend default configuration
    fn default_configuration(&self) -> ConnectionConfiguration;

    /// Identity of the connection target, for registries of providers
    ///
    /// Contains the password; see [`ProviderKey`].
    fn provider_key(&self, config: &ConnectionConfiguration) -> ProviderKey {
        ProviderKey::derive(config)
    }

    /// Native interop modules bundled with the backend
    fn native_modules(&self) -> Vec<String> {
        Vec::new()
    }

    /// Build a pool and establish it, blocking the calling thread
    ///
    /// # Returns
    /// * `Ok(pool)` - Connected pool handle
    /// * `Err(error)` - The pool's establishment error, unmodified
    fn connect_blocking(
        &self,
        config: &ConnectionConfiguration,
    ) -> Result<Self::Pool, <Self::Pool as ConnectionPool>::Error> {
        if config.debug {
            tracing::debug!(
                implementation = %config.implementation,
                endpoint = %config.endpoint(),
                database = %config.database,
                "Connecting (blocking)"
            );
        }

        let pool = <Self::Pool as ConnectionPool>::from_configuration(config);
        pool.connect_blocking().map_err(|e| {
            tracing::error!("Connection establishment failed: {}", e);
            e
        })?;

        Ok(pool)
    }

    /// Build a pool and establish it asynchronously
    ///
    /// Resolves once, to an outcome carrying the pool handle and, on
    /// failure, the pool's establishment error.
    async fn connect(&self, config: &ConnectionConfiguration) -> ConnectOutcome<Self::Pool> {
        if config.debug {
            tracing::debug!(
                implementation = %config.implementation,
                endpoint = %config.endpoint(),
                database = %config.database,
                "Connecting"
            );
        }

        let pool = <Self::Pool as ConnectionPool>::from_configuration(config);
        let error = pool.connect().await.err();
        if let Some(e) = &error {
            tracing::error!("Connection establishment failed: {}", e);
        }

        ConnectOutcome::new(pool, error)
    }

    /// Connect in a background task and report through a callback
    ///
    /// `on_complete(error, pool)` runs exactly once, with `error` set when
    /// establishment failed; the pool handle is passed either way. Must be
    /// called within a tokio runtime. The attempt cannot be cancelled; dropping
    /// the returned handle detaches the task.
    fn connect_with_callback<F>(
        &self,
        config: ConnectionConfiguration,
        on_complete: F,
    ) -> JoinHandle<()>
    where
        Self: Clone + 'static,
        F: FnOnce(Option<<Self::Pool as ConnectionPool>::Error>, Self::Pool) + Send + 'static,
    {
        let provider = self.clone();
        tokio::spawn(async move {
            let (pool, error) = provider.connect(&config).await.into_parts();
            on_complete(error, pool);
        })
    }
}
