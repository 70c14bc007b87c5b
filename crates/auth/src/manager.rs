//! Token lifecycle for the single Discogs account.
//!
//! Responsibilities:
//! - Load the stored token pair from a [`TokenStore`].
//! - Run the OAuth handshake when no usable token exists.
//! - Verify the token against the identity endpoint.
//! - Re-authenticate **once** when verification fails.
use async_trait::async_trait;
use discotui_types::{DiscoError, Identity, TokenPair, TokenStore, traits::Result};
use std::sync::Arc;

/// Acquires a fresh access token pair from the user.
#[async_trait]
pub trait Handshake: Send + Sync {
    async fn authorize(&self) -> Result<TokenPair>;
}

/// Checks a token pair against the API and returns who it belongs to.
#[async_trait]
pub trait IdentityProbe: Send + Sync {
    async fn identity(&self, token: &TokenPair) -> Result<Identity>;
}

/// A verified token together with its owner.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: TokenPair,
    pub identity: Identity,
}

pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    handshake: Arc<dyn Handshake>,
    probe: Arc<dyn IdentityProbe>,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn TokenStore>,
        handshake: Arc<dyn Handshake>,
        probe: Arc<dyn IdentityProbe>,
    ) -> Self {
        Self {
            store,
            handshake,
            probe,
        }
    }

    /// Produce a verified session, authenticating as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the handshake fails, or if verification still fails
    /// after one re-authentication.
    pub async fn establish(&self) -> Result<Session> {
        eprintln!("Looking for existing authentication...");
        let token = match self.store.load().await {
            Ok(Some(token)) => {
                eprintln!("✓ Found existing authentication");
                token
            }
            Ok(None) => {
                eprintln!("No existing authentication found");
                self.authenticate().await?
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored token unusable");
                eprintln!("Stored authentication could not be read ({e})");
                self.authenticate().await?
            }
        };

        eprintln!("Verifying authentication with Discogs...");
        let identity = match self.probe.identity(&token).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(error = %e, "token verification failed, re-authenticating");
                eprintln!("Authentication verification failed: {e}");
                eprintln!("Re-authenticating...");
                let token = self.authenticate().await.map_err(|e| {
                    DiscoError::Auth(format!("re-authentication failed: {e}"))
                })?;
                let identity = self.probe.identity(&token).await.map_err(|e| {
                    DiscoError::Auth(format!("authentication still failing: {e}"))
                })?;
                return Ok(Self::finish(token, identity));
            }
        };
        Ok(Self::finish(token, identity))
    }

    /// Identity for the stored token without starting a handshake.
    /// `Ok(None)` means no token is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored token cannot be read or is rejected.
    pub async fn status(&self) -> Result<Option<Identity>> {
        match self.store.load().await? {
            Some(token) => self.probe.identity(&token).await.map(Some),
            None => Ok(None),
        }
    }

    async fn authenticate(&self) -> Result<TokenPair> {
        eprintln!("Starting Discogs authentication...");
        let token = self.handshake.authorize().await?;
        match self.store.save(&token).await {
            Ok(()) => eprintln!("✓ Authentication saved securely"),
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist token");
                eprintln!("Warning: failed to save authentication securely: {e}");
            }
        }
        Ok(token)
    }

    fn finish(token: TokenPair, identity: Identity) -> Session {
        tracing::info!(username = %identity.username, "authenticated");
        eprintln!("✓ Successfully authenticated as: {}", identity.username);
        Session { token, identity }
    }
}
