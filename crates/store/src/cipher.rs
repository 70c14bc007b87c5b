//! Symmetric encryption for the token file.
//!
//! Output format is `base64(nonce || ciphertext)` with a fresh 12-byte nonce
//! per call.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use discotui_types::{DiscoError, traits::Result};
use rand::RngCore as _;
use sha2::{Digest, Sha256};

const NONCE_LEN: usize = 12;

/// AES-256-GCM cipher keyed by a shared secret.
pub struct TokenCipher {
    cipher: Aes256Gcm,
}

impl TokenCipher {
    /// Derive the 32-byte key as SHA-256 of `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoError::Crypto`] if `secret` is empty.
    pub fn from_secret(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(DiscoError::Crypto(
                "cannot derive a key from an empty secret".into(),
            ));
        }
        let key = Sha256::digest(secret.as_bytes());
        let cipher = Aes256Gcm::new_from_slice(key.as_slice())
            .map_err(|e| DiscoError::Crypto(format!("failed to init AES cipher: {e}")))?;
        Ok(Self { cipher })
    }

    /// Encrypt `plaintext`, returning base64 text suitable for a file.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoError::Crypto`] if encryption fails.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| DiscoError::Crypto(format!("encryption failed: {e}")))?;

        let mut combined = nonce_bytes.to_vec();
        combined.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(&combined))
    }

    /// Decrypt the output of [`TokenCipher::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns [`DiscoError::Crypto`] on invalid base64, short input, a wrong
    /// key or tampered data.
    pub fn decrypt(&self, encoded: &str) -> Result<Vec<u8>> {
        let combined = STANDARD
            .decode(encoded.trim())
            .map_err(|e| DiscoError::Crypto(format!("invalid base64: {e}")))?;

        if combined.len() < NONCE_LEN {
            return Err(DiscoError::Crypto("ciphertext too short".into()));
        }

        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|e| DiscoError::Crypto(format!("decryption failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let c = TokenCipher::from_secret("consumer-secret").unwrap();
        let plaintext = br#"{"token":"a","token_secret":"b"}"#;
        let encrypted = c.encrypt(plaintext).unwrap();
        assert_ne!(encrypted.as_bytes(), plaintext);
        assert_eq!(c.decrypt(&encrypted).unwrap(), plaintext);
    }

    #[test]
    fn test_encrypt_produces_different_ciphertexts() {
        let c = TokenCipher::from_secret("consumer-secret").unwrap();
        let a = c.encrypt(b"same-input").unwrap();
        let b = c.encrypt(b"same-input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_fails() {
        let a = TokenCipher::from_secret("secret-one").unwrap();
        let b = TokenCipher::from_secret("secret-two").unwrap();
        let encrypted = a.encrypt(b"payload").unwrap();
        assert!(matches!(b.decrypt(&encrypted), Err(DiscoError::Crypto(_))));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let c = TokenCipher::from_secret("consumer-secret").unwrap();
        let encrypted = c.encrypt(b"payload").unwrap();
        let mut raw = STANDARD.decode(&encrypted).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0xff;
        assert!(c.decrypt(&STANDARD.encode(raw)).is_err());
    }

    #[test]
    fn test_short_and_garbage_input() {
        let c = TokenCipher::from_secret("consumer-secret").unwrap();
        assert!(c.decrypt(&STANDARD.encode([1u8; 4])).is_err());
        assert!(c.decrypt("not base64 !!!").is_err());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(TokenCipher::from_secret("").is_err());
    }
}
