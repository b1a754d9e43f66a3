//! Database connection configuration module

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ConfigError;

/// Compile-time default connection record for a backend
///
/// Holds only `'static` data so it can live in a `const`. Callers never get a
/// reference into it; [`ConfigurationDefaults::to_configuration`] hands out an
/// owned copy every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationDefaults {
    pub implementation: &'static str,
    pub database: &'static str,
    pub host: &'static str,
    pub port: u16,
    pub user: &'static str,
    pub password: &'static str,
    pub socket: Option<&'static str>,
    pub debug: bool,
    pub backend_debug: bool,
}

/// Default connection properties for the MySQL backend
pub const MYSQL_DEFAULTS: ConfigurationDefaults = ConfigurationDefaults {
    implementation: "mysql",
    database: "test",
    host: "localhost",
    port: 3306,
    user: "",
    password: "",
    socket: None,
    debug: true,
    backend_debug: false,
};

impl ConfigurationDefaults {
    /// Materialize an owned configuration record from these defaults
    pub fn to_configuration(&self) -> ConnectionConfiguration {
        ConnectionConfiguration {
            implementation: self.implementation.to_string(),
            database: self.database.to_string(),
            host: self.host.to_string(),
            port: self.port,
            user: self.user.to_string(),
            password: self.password.to_string(),
            socket: self.socket.map(str::to_string),
            debug: self.debug,
            backend_debug: self.backend_debug,
            pool: PoolSettings::default(),
        }
    }
}

/// Configuration record handed to a connection provider
///
/// Legacy `mysql_*` property names are accepted when deserializing, so
/// property files written for the older adapters keep working.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionConfiguration {
    /// Backend tag, e.g. "mysql"
    pub implementation: String,

    /// Target database name
    pub database: String,

    /// Server host
    #[serde(alias = "mysql_host")]
    pub host: String,

    /// Server port
    #[serde(alias = "mysql_port")]
    pub port: u16,

    /// User name
    #[serde(alias = "mysql_user")]
    pub user: String,

    /// Password, kept in plaintext
    #[serde(alias = "mysql_password")]
    pub password: String,

    /// Local socket path; takes precedence over host and port when set
    #[serde(alias = "mysql_socket")]
    pub socket: Option<String>,

    /// Generic diagnostics
    pub debug: bool,

    /// Backend-specific diagnostics (statement logging)
    #[serde(alias = "mysql_debug")]
    pub backend_debug: bool,

    /// Pool tuning passed through to the pool implementation
    pub pool: PoolSettings,
}

impl Default for ConnectionConfiguration {
    fn default() -> Self {
        MYSQL_DEFAULTS.to_configuration()
    }
}

impl fmt::Debug for ConnectionConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfiguration")
            .field("implementation", &self.implementation)
            .field("database", &self.database)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("socket", &self.socket)
            .field("debug", &self.debug)
            .field("backend_debug", &self.backend_debug)
            .field("pool", &self.pool)
            .finish()
    }
}

impl ConnectionConfiguration {
    /// Create from environment variables, starting from the MySQL defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup
    ///
    /// Unset variables keep their default; set but unparsable numeric or
    /// boolean variables are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(database) = lookup("MYSQL_DATABASE") {
            config.database = database;
        }
        if let Some(host) = lookup("MYSQL_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("MYSQL_PORT") {
            config.port = parse_env("MYSQL_PORT", &port)?;
        }
        if let Some(user) = lookup("MYSQL_USER") {
            config.user = user;
        }
        if let Some(password) = lookup("MYSQL_PASSWORD") {
            config.password = password;
        }
        if let Some(socket) = lookup("MYSQL_SOCKET") {
            config.socket = Some(socket).filter(|s| !s.is_empty());
        }
        if let Some(debug) = lookup("CP_DEBUG") {
            config.debug = parse_env("CP_DEBUG", &debug)?;
        }
        if let Some(backend_debug) = lookup("MYSQL_DEBUG") {
            config.backend_debug = parse_env("MYSQL_DEBUG", &backend_debug)?;
        }
        if let Some(max) = lookup("DATABASE_MAX_CONNECTIONS") {
            config.pool.max_connections = parse_env("DATABASE_MAX_CONNECTIONS", &max)?;
        }
        if let Some(timeout) = lookup("DATABASE_CONNECT_TIMEOUT") {
            config.pool.connect_timeout = parse_env("DATABASE_CONNECT_TIMEOUT", &timeout)?;
        }

        Ok(config)
    }

    /// Set the target database
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the TCP endpoint
    pub fn with_endpoint(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Set the local socket path
    pub fn with_socket(mut self, socket: impl Into<String>) -> Self {
        self.socket = Some(socket.into());
        self
    }

    /// Set user and password
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// Enable backend statement logging
    pub fn with_backend_debug(mut self, enable: bool) -> Self {
        self.backend_debug = enable;
        self
    }

    /// Set the maximum number of pooled connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.pool.max_connections = max;
        self
    }

    /// Socket path, if one is set and non-empty
    pub fn socket_path(&self) -> Option<&str> {
        self.socket.as_deref().filter(|s| !s.is_empty())
    }

    /// Effective endpoint: the socket path when set, otherwise `host:port`
    pub fn endpoint(&self) -> String {
        match self.socket_path() {
            Some(socket) => socket.to_string(),
            None => format!("{}:{}", self.host, self.port),
        }
    }
}

/// Pool tuning settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connections kept open while idle
    pub min_connections: u32,

    /// Acquire timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,

    /// Slow statement threshold in milliseconds
    pub slow_query_threshold: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
            slow_query_threshold: 1000,
        }
    }
}

impl PoolSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout)
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime)
    }

    pub fn slow_query_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_query_threshold)
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    })
}
