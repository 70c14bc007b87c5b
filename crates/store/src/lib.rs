//! Token storage backends for persisting the OAuth token pair.
//!
//! Provides an in-memory store for testing and an AES-256-GCM encrypted file
//! store for production. The file key is derived from the consumer secret.

pub mod cipher;
pub mod file;
pub mod memory;

pub use cipher::TokenCipher;
pub use file::EncryptedFileStore;
pub use memory::InMemoryTokenStore;
