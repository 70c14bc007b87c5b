//! In-memory token store backed by a `Mutex`.

use async_trait::async_trait;
use discotui_types::{TokenPair, TokenStore, traits::Result};
use std::sync::{Mutex, PoisonError};

/// An in-memory [`TokenStore`] implementation for testing and ephemeral use.
#[derive(Default)]
pub struct InMemoryTokenStore {
    data: Mutex<Option<TokenPair>>,
}

impl InMemoryTokenStore {
    /// Creates a new empty in-memory token store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`.
    #[must_use]
    pub fn with_token(token: TokenPair) -> Self {
        Self {
            data: Mutex::new(Some(token)),
        }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> Result<Option<TokenPair>> {
        Ok(self
            .data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn save(&self, token: &TokenPair) -> Result<()> {
        token.validate()?;
        *self.data.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        self.data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Ok(())
    }
}
