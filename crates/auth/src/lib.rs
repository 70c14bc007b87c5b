//! OAuth 1.0 authentication for the Discogs API.
//!
//! - [`credentials`] resolves the consumer key / secret.
//! - [`oauth1`] builds PLAINTEXT-signed `Authorization` headers.
//! - [`callback`] runs the loopback server that receives the browser redirect.
//! - [`flow`] drives the three-legged handshake.
//! - [`manager`] owns the token lifecycle: load, verify, re-authenticate once.

pub mod callback;
pub mod credentials;
pub mod flow;
pub mod manager;
pub mod oauth1;

pub use credentials::ConsumerCredentials;
pub use flow::OAuthHandshake;
pub use manager::{Handshake, IdentityProbe, Session, SessionManager};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("DiscoTUI/", env!("CARGO_PKG_VERSION"));
