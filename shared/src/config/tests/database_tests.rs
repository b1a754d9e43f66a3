//! Unit tests for connection configuration

use std::collections::HashMap;

use crate::config::database::{ConnectionConfiguration, PoolSettings, MYSQL_DEFAULTS};
use crate::errors::ConfigError;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_defaults_match_documented_table() {
    let config = ConnectionConfiguration::default();

    assert_eq!(config.implementation, "mysql");
    assert_eq!(config.database, "test");
    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 3306);
    assert_eq!(config.user, "");
    assert_eq!(config.password, "");
    assert_eq!(config.socket, None);
    assert!(config.debug);
    assert!(!config.backend_debug);
    assert_eq!(config.pool, PoolSettings::default());
}

#[test]
fn test_defaults_are_copied() {
    let mut first = MYSQL_DEFAULTS.to_configuration();
    first.host = String::from("elsewhere");
    first.port = 1;

    let second = MYSQL_DEFAULTS.to_configuration();
    assert_eq!(second.host, "localhost");
    assert_eq!(second.port, 3306);
}

#[test]
fn test_debug_redacts_password() {
    let config = ConnectionConfiguration::default().with_credentials("app", "s3cret-pw");

    let output = format!("{:?}", config);
    assert!(output.contains("app"));
    assert!(!output.contains("s3cret-pw"));
    assert!(output.contains("<redacted>"));
}

#[test]
fn test_endpoint_prefers_socket() {
    let config = ConnectionConfiguration::default()
        .with_endpoint("h", 1)
        .with_socket("/tmp/x.sock");

    assert_eq!(config.endpoint(), "/tmp/x.sock");
    assert_eq!(config.socket_path(), Some("/tmp/x.sock"));
}

#[test]
fn test_empty_socket_falls_back_to_host_port() {
    let config = ConnectionConfiguration::default()
        .with_endpoint("db1", 3307)
        .with_socket("");

    assert_eq!(config.socket_path(), None);
    assert_eq!(config.endpoint(), "db1:3307");
}

#[test]
fn test_deserialize_legacy_property_names() {
    let json = serde_json::json!({
        "implementation": "mysql",
        "database": "shop",
        "mysql_host": "db1",
        "mysql_port": 3307,
        "mysql_user": "a",
        "mysql_password": "b",
        "mysql_socket": null,
        "debug": false,
        "mysql_debug": true
    });

    let config: ConnectionConfiguration = serde_json::from_value(json).unwrap();
    assert_eq!(config.database, "shop");
    assert_eq!(config.host, "db1");
    assert_eq!(config.port, 3307);
    assert_eq!(config.user, "a");
    assert_eq!(config.password, "b");
    assert_eq!(config.socket, None);
    assert!(!config.debug);
    assert!(config.backend_debug);
}

#[test]
fn test_deserialize_partial_record_keeps_defaults() {
    let json = serde_json::json!({ "host": "db2", "pool": { "max_connections": 4 } });

    let config: ConnectionConfiguration = serde_json::from_value(json).unwrap();
    assert_eq!(config.host, "db2");
    assert_eq!(config.port, 3306);
    assert_eq!(config.database, "test");
    assert_eq!(config.pool.max_connections, 4);
    assert_eq!(config.pool.idle_timeout, 600);
}

#[test]
fn test_from_lookup_overrides() {
    let lookup = lookup_from(&[
        ("MYSQL_HOST", "db.internal"),
        ("MYSQL_PORT", "3310"),
        ("MYSQL_USER", "svc"),
        ("MYSQL_PASSWORD", "pw"),
        ("MYSQL_DEBUG", "true"),
        ("DATABASE_MAX_CONNECTIONS", "25"),
    ]);

    let config = ConnectionConfiguration::from_lookup(lookup).unwrap();
    assert_eq!(config.host, "db.internal");
    assert_eq!(config.port, 3310);
    assert_eq!(config.user, "svc");
    assert_eq!(config.password, "pw");
    assert!(config.backend_debug);
    assert_eq!(config.pool.max_connections, 25);
    assert_eq!(config.database, "test");
}

#[test]
fn test_from_lookup_empty_socket_is_unset() {
    let config = ConnectionConfiguration::from_lookup(lookup_from(&[("MYSQL_SOCKET", "")])).unwrap();
    assert_eq!(config.socket, None);
}

#[test]
fn test_from_lookup_rejects_bad_port() {
    let result = ConnectionConfiguration::from_lookup(lookup_from(&[("MYSQL_PORT", "abc")]));

    match result {
        Err(ConfigError::InvalidEnv { key, value }) => {
            assert_eq!(key, "MYSQL_PORT");
            assert_eq!(value, "abc");
        }
        other => panic!("expected InvalidEnv, got {:?}", other),
    }
}

#[test]
fn test_pool_settings_durations() {
    let settings = PoolSettings::default();
    assert_eq!(settings.connect_timeout().as_secs(), 30);
    assert_eq!(settings.idle_timeout().as_secs(), 600);
    assert_eq!(settings.max_lifetime().as_secs(), 1800);
    assert_eq!(settings.slow_query_threshold().as_millis(), 1000);
}
