//! Core types and traits for the discotui workspace.
//!
//! This crate defines the shared abstractions used across all layers of the
//! terminal client: the error type, the OAuth token pair, the Discogs
//! identity, the display row for a release and the storage trait for tokens.

pub mod error;
pub mod release;
pub mod source;
pub mod token;
pub mod traits;

pub use error::DiscoError;
pub use release::{Identity, ReleaseModel};
pub use source::DataSource;
pub use token::TokenPair;
pub use traits::{ReleaseCatalog, TokenStore};
