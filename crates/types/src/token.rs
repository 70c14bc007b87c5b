//! OAuth 1.0 access token pair.

use crate::{DiscoError, error::Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An OAuth 1.0 access token together with its secret.
///
/// The pair is either fully present or absent: a value with an empty half is
/// rejected by [`TokenPair::new`] and [`TokenPair::validate`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub token: String,
    pub token_secret: String,
}

impl TokenPair {
    /// Build a pair, rejecting empty halves.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoError::Token`] if either half is empty.
    pub fn new(token: impl Into<String>, token_secret: impl Into<String>) -> Result<Self> {
        let pair = Self {
            token: token.into(),
            token_secret: token_secret.into(),
        };
        pair.validate()?;
        Ok(pair)
    }

    /// Check the "fully present" invariant.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoError::Token`] naming the missing half.
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(DiscoError::Token("token is empty".into()));
        }
        if self.token_secret.trim().is_empty() {
            return Err(DiscoError::Token("token secret is empty".into()));
        }
        Ok(())
    }
}

// Secrets stay out of logs.
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("token", &redact(&self.token))
            .field("token_secret", &"***")
            .finish()
    }
}

fn redact(s: &str) -> String {
    let head: String = s.chars().take(4).collect();
    format!("{head}***")
}
