//! Unit tests for the MySQL connection pool

use cp_core::ConnectionPool;
use cp_shared::config::ConnectionConfiguration;

use crate::database::connection::{MySqlConnectionPool, PoolStatistics};
use crate::PoolError;

/// Loopback port nothing listens on
fn refused_config() -> ConnectionConfiguration {
    let mut config = ConnectionConfiguration::default()
        .with_endpoint("127.0.0.1", 1)
        .with_credentials("root", "password");
    config.pool.connect_timeout = 1;
    config
}

#[test]
fn test_connect_options_use_host_and_port() {
    let config = ConnectionConfiguration::default()
        .with_endpoint("db1", 3307)
        .with_credentials("app", "secret")
        .with_database("orders");

    let options = MySqlConnectionPool::connect_options(&config);
    assert_eq!(options.get_host(), "db1");
    assert_eq!(options.get_port(), 3307);
    assert_eq!(options.get_username(), "app");
    assert_eq!(options.get_database(), Some("orders"));
    assert!(options.get_socket().is_none());
}

#[test]
fn test_connect_options_prefer_socket() {
    let config = ConnectionConfiguration::default()
        .with_endpoint("h", 1)
        .with_socket("/tmp/x.sock");

    let options = MySqlConnectionPool::connect_options(&config);
    assert_eq!(
        options.get_socket().map(|p| p.to_string_lossy().into_owned()),
        Some(String::from("/tmp/x.sock"))
    );
}

#[test]
fn test_empty_database_is_not_selected() {
    let config = ConnectionConfiguration::default().with_database("");

    let options = MySqlConnectionPool::connect_options(&config);
    assert_eq!(options.get_database(), None);
}

#[tokio::test]
async fn test_construction_does_not_connect() {
    let pool = MySqlConnectionPool::from_configuration(&refused_config());

    assert!(!pool.is_connected());
    assert!(matches!(pool.get_pool(), Err(PoolError::NotConnected)));
    assert!(matches!(pool.get_statistics(), Err(PoolError::NotConnected)));
    assert!(matches!(pool.health_check().await, Err(PoolError::NotConnected)));

    // Closing an unconnected pool is a no-op
    pool.close().await;
}

#[tokio::test]
async fn test_connect_refused_is_database_error() {
    let pool = MySqlConnectionPool::from_configuration(&refused_config());

    let result = pool.connect().await;
    assert!(matches!(result, Err(PoolError::Database(_))));
    assert!(!pool.is_connected());
}

#[tokio::test]
async fn test_connect_blocking_inside_runtime_reaches_server() {
    let pool = MySqlConnectionPool::from_configuration(&refused_config());

    let result = pool.connect_blocking();
    assert!(matches!(result, Err(PoolError::Database(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_connect_blocking_from_spawn_blocking() {
    let result = tokio::task::spawn_blocking(|| {
        MySqlConnectionPool::from_configuration(&refused_config()).connect_blocking()
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(PoolError::Database(_))));
}

#[test]
fn test_connect_blocking_refused_is_database_error() {
    let pool = MySqlConnectionPool::from_configuration(&refused_config());

    let result = pool.connect_blocking();
    assert!(matches!(result, Err(PoolError::Database(_))));
}

#[test]
fn test_debug_hides_credentials() {
    let pool = MySqlConnectionPool::from_configuration(&refused_config());

    let debug = format!("{:?}", pool);
    assert!(debug.contains("127.0.0.1:1"));
    assert!(!debug.contains("password"));
}

#[test]
fn test_pool_statistics_display() {
    let stats = PoolStatistics {
        connections: 5,
        idle_connections: 3,
        max_connections: 10,
    };

    let display = format!("{}", stats);
    assert_eq!(display, "Pool Stats: 5/10 connections (3 idle)");
}
