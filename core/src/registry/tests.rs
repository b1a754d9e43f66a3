//! Unit tests for the provider registry

use std::sync::Arc;

use cp_shared::config::ConnectionConfiguration;

use crate::pool::{MockPoolError, MockProvider, UNREACHABLE_HOST};
use crate::provider::ConnectionProvider;
use crate::registry::ProviderRegistry;

fn config(host: &str) -> ConnectionConfiguration {
    MockProvider
        .default_configuration()
        .with_endpoint(host, 3306)
        .with_credentials("a", "b")
}

#[tokio::test]
async fn test_same_target_shares_pool() {
    let registry = ProviderRegistry::new(MockProvider);

    let first = registry.get_or_connect(&config("db1")).await.unwrap();
    let second = registry
        .get_or_connect(&config("db1").with_database("other"))
        .await
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.connect_calls(), 1);
    assert_eq!(registry.len().await, 1);
}

#[tokio::test]
async fn test_different_targets_get_separate_pools() {
    let registry = ProviderRegistry::new(MockProvider);

    let first = registry.get_or_connect(&config("db1")).await.unwrap();
    let second = registry.get_or_connect(&config("db2")).await.unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(registry.len().await, 2);
}

#[tokio::test]
async fn test_failed_connect_is_not_cached() {
    let registry = ProviderRegistry::new(MockProvider);

    let result = registry.get_or_connect(&config(UNREACHABLE_HOST)).await;

    assert_eq!(
        result.err(),
        Some(MockPoolError::Unreachable {
            endpoint: format!("{}:3306", UNREACHABLE_HOST),
        })
    );
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn test_get_and_remove() {
    let registry = ProviderRegistry::new(MockProvider);
    let config = config("db1");
    let key = registry.provider().provider_key(&config);

    assert!(registry.get(&key).await.is_none());

    let pool = registry.get_or_connect(&config).await.unwrap();
    let cached = registry.get(&key).await.unwrap();
    assert!(Arc::ptr_eq(&pool, &cached));

    let removed = registry.remove(&key).await.unwrap();
    assert!(Arc::ptr_eq(&pool, &removed));
    assert!(registry.is_empty().await);

    // A later request connects a fresh pool
    let fresh = registry.get_or_connect(&config).await.unwrap();
    assert!(!Arc::ptr_eq(&pool, &fresh));
}
