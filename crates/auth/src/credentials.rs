//! Consumer key / secret resolution.
//!
//! Development builds read `DISCOGS_API_CONSUMER_KEY` and
//! `DISCOGS_API_CONSUMER_SECRET` from the environment. Release builds may
//! embed the same variables at compile time.

use discotui_types::{DiscoError, traits::Result};
use std::fmt;

pub const ENV_CONSUMER_KEY: &str = "DISCOGS_API_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "DISCOGS_API_CONSUMER_SECRET";

const EMBEDDED_KEY: Option<&str> = option_env!("DISCOGS_API_CONSUMER_KEY");
const EMBEDDED_SECRET: Option<&str> = option_env!("DISCOGS_API_CONSUMER_SECRET");

/// The application's OAuth consumer credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct ConsumerCredentials {
    pub key: String,
    pub secret: String,
}

impl fmt::Debug for ConsumerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerCredentials")
            .field("key", &self.key)
            .field("secret", &"***")
            .finish()
    }
}

impl ConsumerCredentials {
    /// Build credentials, rejecting empty values.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoError::Credentials`] if the key or secret is empty.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let creds = Self {
            key: key.into(),
            secret: secret.into(),
        };
        if creds.key.is_empty() {
            return Err(DiscoError::Credentials(format!(
                "no API credentials available; set {ENV_CONSUMER_KEY} and {ENV_CONSUMER_SECRET}"
            )));
        }
        if creds.secret.is_empty() {
            return Err(DiscoError::Credentials(format!(
                "incomplete API credentials; {ENV_CONSUMER_SECRET} is not set"
            )));
        }
        Ok(creds)
    }

    /// Resolve from the environment, falling back to build-time values.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoError::Credentials`] if neither source is complete.
    pub fn resolve() -> Result<Self> {
        resolve_from(
            std::env::var(ENV_CONSUMER_KEY).ok(),
            std::env::var(ENV_CONSUMER_SECRET).ok(),
            EMBEDDED_KEY,
            EMBEDDED_SECRET,
        )
    }
}

fn resolve_from(
    env_key: Option<String>,
    env_secret: Option<String>,
    embedded_key: Option<&str>,
    embedded_secret: Option<&str>,
) -> Result<ConsumerCredentials> {
    let env_key = env_key.filter(|k| !k.is_empty());
    match (env_key, embedded_key.filter(|k| !k.is_empty())) {
        (Some(key), _) => ConsumerCredentials::new(key, env_secret.unwrap_or_default()),
        (None, Some(key)) => {
            tracing::debug!("using embedded API credentials");
            ConsumerCredentials::new(key, embedded_secret.unwrap_or_default())
        }
        (None, None) => ConsumerCredentials::new("", ""),
    }
}
