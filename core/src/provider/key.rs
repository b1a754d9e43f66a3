//! Provider key derivation
//!
//! A provider key identifies the effective connection target of a
//! configuration: `implementation://endpoint+user<password>`, where the
//! endpoint is the socket path when one is set and `host:port` otherwise.
//! Configurations that differ only in `database` share a key.
//!
//! The key embeds the password in plaintext. `Debug` masks it, and
//! [`ProviderKey::redacted`] gives a loggable form; the raw key should never
//! be logged or persisted.

use std::fmt;
use std::hash::{Hash, Hasher};

use cp_shared::config::ConnectionConfiguration;

/// Deterministic identity of a connection target
#[derive(Clone)]
pub struct ProviderKey {
    key: String,
    // Byte offset of the password within `key`
    password_at: usize,
}

impl ProviderKey {
    /// Derive the key for a configuration
    pub fn derive(config: &ConnectionConfiguration) -> Self {
        let prefix = format!(
            "{}://{}+{}<",
            config.implementation,
            config.endpoint(),
            config.user
        );
        let password_at = prefix.len();
        let key = format!("{}{}>", prefix, config.password);

        Self { key, password_at }
    }

    /// The raw key, password included
    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn into_string(self) -> String {
        self.key
    }

    /// The key with its password masked, safe for logs
    pub fn redacted(&self) -> String {
        format!("{}***>", &self.key[..self.password_at])
    }
}

impl PartialEq for ProviderKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ProviderKey {}

impl Hash for ProviderKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProviderKey").field(&self.redacted()).finish()
    }
}
