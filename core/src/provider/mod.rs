pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod key;
pub mod outcome;

#[cfg(test)]
mod tests;

pub use key::ProviderKey;
pub use outcome::ConnectOutcome;
pub use r#trait::{ConnectionProvider, ProviderError};
