//! Unified error type for the discotui workspace.

use thiserror::Error;

/// Enumerates all error kinds that can occur across discotui crates.
#[derive(Debug, Error)]
pub enum DiscoError {
    /// OAuth handshake or identity verification failure.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Consumer key / secret are missing or incomplete.
    #[error("credentials error: {0}")]
    Credentials(String),

    /// A token pair is malformed (one half missing).
    #[error("token error: {0}")]
    Token(String),

    /// The handshake did not complete in time.
    #[error("timed out: {0}")]
    Timeout(String),

    /// HTTP transport error.
    #[error("http error: {0}")]
    Http(String),

    /// The API rejected the OAuth credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The API returned a non-success status.
    #[error("upstream error: status={status}, body={body}")]
    Upstream { status: u16, body: String },

    /// JSON serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Token file could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Encryption or decryption failure.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Configuration loading or validation error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal or socket I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for DiscoError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else {
            Self::Http(e.to_string())
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DiscoError>;
