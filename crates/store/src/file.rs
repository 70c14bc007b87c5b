//! Encrypted on-disk token store.
//!
//! The token pair is serialized as JSON, encrypted with [`TokenCipher`] and
//! written to a single file readable only by the current user.

use crate::TokenCipher;
use async_trait::async_trait;
use discotui_types::{DiscoError, TokenPair, TokenStore, traits::Result};
use std::path::{Path, PathBuf};

/// A persistent [`TokenStore`] backed by one encrypted file.
pub struct EncryptedFileStore {
    path: PathBuf,
    cipher: TokenCipher,
}

impl EncryptedFileStore {
    /// Creates a store for `path` using `cipher`.
    #[must_use]
    pub fn new(path: PathBuf, cipher: TokenCipher) -> Self {
        Self { path, cipher }
    }

    /// Creates a store at the default location, keyed by the consumer secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory is unknown or the secret is empty.
    pub fn at_default_location(consumer_secret: &str) -> Result<Self> {
        let path = discotui_config::paths::token_path()?;
        Ok(Self::new(path, TokenCipher::from_secret(consumer_secret)?))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the token file at `path`. Needs no key, so logging out works
    /// without consumer credentials. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoError::Storage`] if the file exists but cannot be removed.
    pub async fn discard(path: &Path) -> Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "token removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_err("remove", path, &e)),
        }
    }

    async fn ensure_parent(&self) -> Result<()> {
        let Some(parent) = self.path.parent() else {
            return Ok(());
        };
        let mut builder = tokio::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o700);
        builder
            .create(parent)
            .await
            .map_err(|e| storage_err("create directory", parent, &e))
    }
}

fn storage_err(action: &str, path: &Path, e: &std::io::Error) -> DiscoError {
    DiscoError::Storage(format!("failed to {action} {}: {e}", path.display()))
}

#[async_trait]
impl TokenStore for EncryptedFileStore {
    async fn load(&self) -> Result<Option<TokenPair>> {
        let encoded = match tokio::fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_err("read", &self.path, &e)),
        };
        let plaintext = self.cipher.decrypt(&encoded)?;
        let token: TokenPair = serde_json::from_slice(&plaintext)?;
        token.validate()?;
        Ok(Some(token))
    }

    async fn save(&self, token: &TokenPair) -> Result<()> {
        token.validate()?;
        self.ensure_parent().await?;

        let json = serde_json::to_vec(token)?;
        let encoded = self.cipher.encrypt(&json)?;

        // Write to a sibling file first so a crash never leaves half a token.
        let tmp = self.path.with_extension("enc.tmp");
        let written = match write_private(&tmp, encoded.as_bytes()).await {
            Ok(()) => tokio::fs::rename(&tmp, &self.path)
                .await
                .map_err(|e| storage_err("replace", &self.path, &e)),
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }

        tracing::debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        Self::discard(&self.path).await
    }
}

async fn write_private(path: &Path, bytes: &[u8]) -> Result<()> {
    use tokio::io::AsyncWriteExt as _;
    let mut opts = tokio::fs::OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    opts.mode(0o600);
    let mut file = opts
        .open(path)
        .await
        .map_err(|e| storage_err("open", path, &e))?;
    file.write_all(bytes)
        .await
        .map_err(|e| storage_err("write", path, &e))?;
    file.sync_all()
        .await
        .map_err(|e| storage_err("sync", path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir, secret: &str) -> EncryptedFileStore {
        EncryptedFileStore::new(
            dir.path().join("nested").join("tokens.enc"),
            TokenCipher::from_secret(secret).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, "secret");
        let token = TokenPair::new("tok", "sec").unwrap();
        store.save(&token).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(token));
    }

    #[tokio::test]
    async fn test_file_is_not_plaintext() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, "secret");
        store
            .save(&TokenPair::new("visible-token", "visible-secret").unwrap())
            .await
            .unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(!raw.contains("visible-token"));
        assert!(!raw.contains("visible-secret"));
    }

    #[tokio::test]
    async fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, "secret");
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, "secret");
        store.save(&TokenPair::new("first", "s1").unwrap()).await.unwrap();
        store.save(&TokenPair::new("second", "s2").unwrap()).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.token, "second");
        assert_eq!(loaded.token_secret, "s2");
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, "secret");
        store.save(&TokenPair::new("tok", "sec").unwrap()).await.unwrap();
        store.remove().await.unwrap();
        store.remove().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_other_secret_cannot_read() {
        let dir = tempfile::tempdir().unwrap();
        store_in(&dir, "secret-a")
            .save(&TokenPair::new("tok", "sec").unwrap())
            .await
            .unwrap();
        let err = store_in(&dir, "secret-b").load().await.unwrap_err();
        assert!(matches!(err, DiscoError::Crypto(_)));
    }

    #[tokio::test]
    async fn test_half_pair_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, "secret");
        let cipher = TokenCipher::from_secret("secret").unwrap();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        let encoded = cipher
            .encrypt(br#"{"token":"tok","token_secret":""}"#)
            .unwrap();
        std::fs::write(store.path(), encoded).unwrap();
        assert!(matches!(
            store.load().await.unwrap_err(),
            DiscoError::Token(_)
        ));
    }

    #[tokio::test]
    async fn test_discard_without_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, "secret");
        store.save(&TokenPair::new("tok", "sec").unwrap()).await.unwrap();
        EncryptedFileStore::discard(store.path()).await.unwrap();
        assert!(!store.path().exists());
        EncryptedFileStore::discard(store.path()).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, "secret");
        // A non-empty directory where the token file should go makes the
        // final rename fail after the temp file is written.
        std::fs::create_dir_all(store.path().join("occupied")).unwrap();
        let err = store
            .save(&TokenPair::new("tok", "sec").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DiscoError::Storage(_)));
        assert!(!store.path().with_extension("enc.tmp").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_mode_is_private() {
        use std::os::unix::fs::PermissionsExt as _;
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, "secret");
        store.save(&TokenPair::new("tok", "sec").unwrap()).await.unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
