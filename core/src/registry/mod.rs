//! Registry of connected pools keyed by provider key
//!
//! This is the session-factory side of the provider contract: configurations
//! that resolve to the same [`ProviderKey`] share one connected pool. Failed
//! connects are never cached.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use cp_shared::config::ConnectionConfiguration;

use crate::pool::ConnectionPool;
use crate::provider::{ConnectionProvider, ProviderKey};

#[cfg(test)]
mod tests;

/// Caches connected pools built by a provider
pub struct ProviderRegistry<P: ConnectionProvider> {
    provider: P,
    pools: RwLock<HashMap<ProviderKey, Arc<P::Pool>>>,
}

impl<P: ConnectionProvider> ProviderRegistry<P> {
    /// Create an empty registry around a provider
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            pools: RwLock::new(HashMap::new()),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Return the pool for this configuration's target, connecting on a miss
    ///
    /// The lock is not held while connecting. If two callers race on the same
    /// key, the first pool stored wins and both receive it.
    pub async fn get_or_connect(
        &self,
        config: &ConnectionConfiguration,
    ) -> Result<Arc<P::Pool>, <P::Pool as ConnectionPool>::Error> {
        let key = self.provider.provider_key(config);

        if let Some(pool) = self.pools.read().await.get(&key) {
            tracing::debug!(key = %key.redacted(), "Reusing connected pool");
            return Ok(Arc::clone(pool));
        }

        let pool = Arc::new(self.provider.connect(config).await.into_result()?);

        let mut pools = self.pools.write().await;
        let stored = Arc::clone(pools.entry(key).or_insert(pool));
        tracing::info!(pools = pools.len(), "Registered connected pool");
        Ok(stored)
    }

    /// Look up a cached pool
    pub async fn get(&self, key: &ProviderKey) -> Option<Arc<P::Pool>> {
        self.pools.read().await.get(key).cloned()
    }

    /// Drop a cached pool from the registry
    ///
    /// Callers still holding the `Arc` keep the pool alive.
    pub async fn remove(&self, key: &ProviderKey) -> Option<Arc<P::Pool>> {
        self.pools.write().await.remove(key)
    }

    pub async fn len(&self) -> usize {
        self.pools.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pools.read().await.is_empty()
    }
}
