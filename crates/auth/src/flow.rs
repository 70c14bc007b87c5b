//! Interactive three-legged OAuth 1.0 handshake.
//!
//! request token → browser authorization → loopback redirect → access token.

use crate::{
    ConsumerCredentials, USER_AGENT, callback,
    manager::Handshake,
    oauth1::{self, AuthorizationHeader},
};
use async_trait::async_trait;
use discotui_types::{DiscoError, TokenPair, traits::Result};
use std::time::Duration;

/// Drives the browser-based handshake against the Discogs OAuth endpoints.
pub struct OAuthHandshake {
    http: reqwest::Client,
    consumer: ConsumerCredentials,
    api_base: String,
    authorize_base: String,
    callback_port: Option<u16>,
    timeout: Duration,
    open_browser: bool,
}

impl OAuthHandshake {
    #[must_use]
    pub fn new(http: reqwest::Client, consumer: ConsumerCredentials, api_base: &str) -> Self {
        Self {
            http,
            consumer,
            api_base: api_base.trim_end_matches('/').to_string(),
            authorize_base: oauth1::AUTHORIZE_URL.to_string(),
            callback_port: None,
            timeout: Duration::from_secs(300),
            open_browser: true,
        }
    }

    /// Fixed callback port instead of probing.
    #[must_use]
    pub fn with_callback_port(mut self, port: Option<u16>) -> Self {
        self.callback_port = port;
        self
    }

    /// How long to wait for the redirect.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the browser-facing authorization page.
    #[must_use]
    pub fn with_authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_base = url.into();
        self
    }

    /// Only print the URL instead of launching a browser.
    #[must_use]
    pub fn without_browser(mut self) -> Self {
        self.open_browser = false;
        self
    }

    async fn request_token(&self, callback_url: &str) -> Result<TokenPair> {
        let header = AuthorizationHeader::new(&self.consumer)
            .callback(callback_url)
            .render();
        self.post_token_endpoint(oauth1::REQUEST_TOKEN_PATH, header)
            .await
            .map_err(|e| DiscoError::Auth(format!("failed to get request token: {e}")))
    }

    async fn access_token(&self, request: &TokenPair, verifier: &str) -> Result<TokenPair> {
        let header = AuthorizationHeader::new(&self.consumer)
            .access_token(request)
            .verifier(verifier)
            .render();
        self.post_token_endpoint(oauth1::ACCESS_TOKEN_PATH, header)
            .await
            .map_err(|e| DiscoError::Auth(format!("failed to get access token: {e}")))
    }

    async fn post_token_endpoint(&self, path: &str, authorization: String) -> Result<TokenPair> {
        let resp = self
            .http
            .post(format!("{}{path}", self.api_base))
            .header("Authorization", authorization)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(DiscoError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        oauth1::parse_token_response(&body)
    }

    fn present_url(&self, url: &str) {
        eprintln!("\nPlease authenticate with Discogs:\n   {url}\n");
        if !self.open_browser {
            return;
        }
        match open::that(url) {
            Ok(()) => eprintln!("✓ Opened authentication page in your browser"),
            Err(e) => {
                tracing::debug!(error = %e, "failed to open browser");
                eprintln!("Please copy the URL above into your browser");
            }
        }
    }
}

#[async_trait]
impl Handshake for OAuthHandshake {
    async fn authorize(&self) -> Result<TokenPair> {
        let listener = callback::bind_callback(callback::pick_port(self.callback_port)).await?;
        let port = listener.local_addr()?.port();
        let callback_url = format!("http://127.0.0.1:{port}");

        let request = self.request_token(&callback_url).await?;
        let url = oauth1::authorize_url(&self.authorize_base, &request.token);
        self.present_url(&url);

        eprintln!("Waiting for authentication (listening on port {port})...");
        let verifier = callback::accept_callback(listener, &request.token, self.timeout).await?;

        let access = self.access_token(&request, &verifier).await?;
        eprintln!("✓ Authentication successful!");
        Ok(access)
    }
}
