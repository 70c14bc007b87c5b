//! Async traits shared across discotui crates.
//!
//! Cross-crate abstractions live here so that higher layers depend only on
//! `discotui-types`, not on each other.

use crate::{DataSource, ReleaseModel, TokenPair};
use async_trait::async_trait;

pub use crate::error::Result;

/// Persistent storage for the single OAuth token pair of this client.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the stored token pair, if any.
    async fn load(&self) -> Result<Option<TokenPair>>;
    /// Persist (or overwrite) the token pair.
    async fn save(&self, token: &TokenPair) -> Result<()>;
    /// Remove the stored token pair. Removing a missing token is not an error.
    async fn remove(&self) -> Result<()>;
}

/// Read access to the three lists of the authenticated user.
#[async_trait]
pub trait ReleaseCatalog: Send + Sync {
    /// Fetch every row of `source`, already mapped for display.
    async fn releases(&self, source: DataSource) -> Result<Vec<ReleaseModel>>;
}
