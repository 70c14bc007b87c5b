//! OAuth 1.0a request signing with the PLAINTEXT method.
//!
//! Discogs accepts PLAINTEXT over HTTPS, where the signature is simply
//! `percent(consumer_secret) & percent(token_secret)`.

use crate::ConsumerCredentials;
use discotui_types::{DiscoError, TokenPair, traits::Result};
use rand::RngCore as _;
use std::{
    collections::HashMap,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// Browser-facing authorization page.
pub const AUTHORIZE_URL: &str = "https://www.discogs.com/oauth/authorize";
/// Request-token endpoint, relative to the API base.
pub const REQUEST_TOKEN_PATH: &str = "/oauth/request_token";
/// Access-token endpoint, relative to the API base.
pub const ACCESS_TOKEN_PATH: &str = "/oauth/access_token";

/// Builder for an `Authorization: OAuth ...` header value.
#[derive(Debug, Clone)]
pub struct AuthorizationHeader<'a> {
    consumer: &'a ConsumerCredentials,
    token: Option<&'a str>,
    token_secret: &'a str,
    callback: Option<&'a str>,
    verifier: Option<&'a str>,
}

impl<'a> AuthorizationHeader<'a> {
    #[must_use]
    pub fn new(consumer: &'a ConsumerCredentials) -> Self {
        Self {
            consumer,
            token: None,
            token_secret: "",
            callback: None,
            verifier: None,
        }
    }

    /// Sign with a request or access token.
    #[must_use]
    pub fn token(mut self, token: &'a str, secret: &'a str) -> Self {
        self.token = Some(token);
        self.token_secret = secret;
        self
    }

    /// Sign with a stored access token pair.
    #[must_use]
    pub fn access_token(self, pair: &'a TokenPair) -> Self {
        self.token(&pair.token, &pair.token_secret)
    }

    #[must_use]
    pub fn callback(mut self, url: &'a str) -> Self {
        self.callback = Some(url);
        self
    }

    #[must_use]
    pub fn verifier(mut self, verifier: &'a str) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// PLAINTEXT signature for the current consumer/token secrets.
    #[must_use]
    pub fn signature(&self) -> String {
        format!(
            "{}&{}",
            urlencoding::encode(&self.consumer.secret),
            urlencoding::encode(self.token_secret)
        )
    }

    /// Render with a fresh nonce and the current time.
    #[must_use]
    pub fn render(&self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        self.render_with(&random_nonce(), now)
    }

    /// Render with an explicit nonce and timestamp.
    #[must_use]
    pub fn render_with(&self, nonce: &str, timestamp: u64) -> String {
        let timestamp = timestamp.to_string();
        let signature = self.signature();
        let mut params: Vec<(&str, &str)> =
            vec![("oauth_consumer_key", self.consumer.key.as_str())];
        params.push(("oauth_nonce", nonce));
        if let Some(token) = self.token {
            params.push(("oauth_token", token));
        }
        params.push(("oauth_signature", signature.as_str()));
        params.push(("oauth_signature_method", "PLAINTEXT"));
        params.push(("oauth_timestamp", timestamp.as_str()));
        if let Some(callback) = self.callback {
            params.push(("oauth_callback", callback));
        }
        if let Some(verifier) = self.verifier {
            params.push(("oauth_verifier", verifier));
        }
        params.push(("oauth_version", "1.0"));

        let body = params
            .iter()
            .map(|(k, v)| format!("{k}=\"{}\"", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("OAuth {body}")
    }
}

/// Random hex nonce, 32 lowercase chars.
#[must_use]
pub fn random_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().fold(String::with_capacity(32), |mut s, b| {
        use std::fmt::Write as _;
        let _ = write!(s, "{b:02x}");
        s
    })
}

/// Browser URL where the user grants access to `request_token`.
#[must_use]
pub fn authorize_url(base: &str, request_token: &str) -> String {
    format!("{base}?oauth_token={}", urlencoding::encode(request_token))
}

/// Parse a form-encoded token endpoint response
/// (`oauth_token=..&oauth_token_secret=..`).
///
/// # Errors
///
/// Returns [`DiscoError::Auth`] if the body is not form-encoded or a field is
/// missing.
pub fn parse_token_response(body: &str) -> Result<TokenPair> {
    let fields: HashMap<String, String> = serde_urlencoded::from_str(body.trim())
        .map_err(|e| DiscoError::Auth(format!("invalid token response: {e}")))?;
    let token = fields
        .get("oauth_token")
        .ok_or_else(|| DiscoError::Auth("missing oauth_token in response".into()))?;
    let secret = fields
        .get("oauth_token_secret")
        .ok_or_else(|| DiscoError::Auth("missing oauth_token_secret in response".into()))?;
    TokenPair::new(token.as_str(), secret.as_str())
        .map_err(|e| DiscoError::Auth(format!("incomplete token response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consumer() -> ConsumerCredentials {
        ConsumerCredentials::new("ckey", "c&secret").unwrap()
    }

    #[test]
    fn test_signature_without_token() {
        let c = consumer();
        assert_eq!(AuthorizationHeader::new(&c).signature(), "c%26secret&");
    }

    #[test]
    fn test_signature_with_token() {
        let c = consumer();
        let h = AuthorizationHeader::new(&c).token("tok", "tsec");
        assert_eq!(h.signature(), "c%26secret&tsec");
    }

    #[test]
    fn test_render_request_token_header() {
        let c = consumer();
        let h = AuthorizationHeader::new(&c)
            .callback("http://localhost:8080")
            .render_with("abc", 1_700_000_000);
        assert!(h.starts_with("OAuth "));
        assert!(h.contains(r#"oauth_consumer_key="ckey""#));
        assert!(h.contains(r#"oauth_nonce="abc""#));
        assert!(h.contains(r#"oauth_signature_method="PLAINTEXT""#));
        assert!(h.contains(r#"oauth_timestamp="1700000000""#));
        assert!(h.contains(r#"oauth_callback="http%3A%2F%2Flocalhost%3A8080""#));
        // The signature itself is percent-encoded once more inside the header.
        assert!(h.contains(r#"oauth_signature="c%2526secret%26""#));
        assert!(!h.contains("oauth_token="));
        assert!(!h.contains("oauth_verifier"));
    }

    #[test]
    fn test_render_access_token_header() {
        let c = consumer();
        let pair = TokenPair::new("atok", "asec").unwrap();
        let h = AuthorizationHeader::new(&c)
            .access_token(&pair)
            .render_with("n", 1);
        assert!(h.contains(r#"oauth_token="atok""#));
        assert!(h.contains(r#"oauth_signature="c%2526secret%26asec""#));
    }

    #[test]
    fn test_render_with_verifier() {
        let c = consumer();
        let h = AuthorizationHeader::new(&c)
            .token("rtok", "rsec")
            .verifier("v123")
            .render_with("n", 1);
        assert!(h.contains(r#"oauth_verifier="v123""#));
        assert!(h.contains(r#"oauth_token="rtok""#));
    }

    #[test]
    fn test_random_nonce_is_hex_and_unique() {
        let a = random_nonce();
        let b = random_nonce();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_authorize_url() {
        assert_eq!(
            authorize_url(AUTHORIZE_URL, "abc"),
            "https://www.discogs.com/oauth/authorize?oauth_token=abc"
        );
    }

    #[test]
    fn test_parse_token_response() {
        let pair =
            parse_token_response("oauth_token=t1&oauth_token_secret=s1&oauth_callback_confirmed=true")
                .unwrap();
        assert_eq!(pair.token, "t1");
        assert_eq!(pair.token_secret, "s1");
    }

    #[test]
    fn test_parse_token_response_missing_secret() {
        let err = parse_token_response("oauth_token=t1").unwrap_err();
        assert!(err.to_string().contains("oauth_token_secret"));
    }

    #[test]
    fn test_parse_token_response_empty_secret() {
        assert!(parse_token_response("oauth_token=t1&oauth_token_secret=").is_err());
    }
}
