//! Discogs REST client.
//!
//! [`DiscogsClient`] signs each request with the PLAINTEXT OAuth header and
//! walks paginated list endpoints. [`dto`] holds the wire shapes and their
//! mapping to display rows.

pub mod client;
pub mod dto;

pub use client::{DiscogsClient, DiscogsProbe, UserCatalog, http_client};
