//! # Connection Provider Core
//!
//! Backend-agnostic contracts between a session factory, a connection
//! provider and the pool implementation behind it:
//!
//! - [`ConnectionPool`] - the pool implementation boundary
//! - [`ConnectionProvider`] - configuration in, connected pool out
//! - [`ProviderKey`] - identity of a connection target
//! - [`ProviderRegistry`] - connected pools cached by provider key
//!
//! ## Features
//!
//! - `mocks`: expose [`pool::mock`] for tests in downstream crates

pub mod pool;
pub mod provider;
pub mod registry;

// Re-export commonly used types for convenience
pub use pool::ConnectionPool;
pub use provider::{ConnectOutcome, ConnectionProvider, ProviderError, ProviderKey};
pub use registry::ProviderRegistry;
