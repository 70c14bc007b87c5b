//! Local HTTP callback server for the OAuth redirect.
//!
//! Binds a TCP listener on `127.0.0.1:<port>`, waits for Discogs to redirect
//! the browser back with `oauth_token` and `oauth_verifier`, and hands the
//! verifier to the handshake. The listener is dropped as soon as the
//! redirect is handled or the deadline passes.

use discotui_types::{DiscoError, traits::Result};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;

/// Port tried first when nothing is configured.
pub const DEFAULT_PORT: u16 = 8080;
/// Fallback ports probed after [`DEFAULT_PORT`].
pub const FALLBACK_PORTS: &[u16] = &[8081, 8082, 8083, 8084, 8085];
/// Environment override for the callback port.
pub const ENV_LOCAL_PORT: &str = "LOCAL_PORT";

/// How long one connection may take to send its request line.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
/// Upper bound on the bytes read from one request.
const MAX_REQUEST_BYTES: usize = 8192;

const SUCCESS_PAGE: &str = "<!DOCTYPE html>\
<html><head><title>DiscoTUI - Authentication Successful</title>\
<style>body{font-family:system-ui,sans-serif;text-align:center;padding:50px;background:#f5f5f5}\
.box{background:#fff;border-radius:10px;padding:40px;max-width:500px;margin:0 auto}\
.ok{color:#28a745;font-size:24px;margin-bottom:20px}</style></head>\
<body><div class=\"box\"><div class=\"ok\">&#10003; Authentication Successful!</div>\
<div>You can now close this window and return to your terminal.</div></div></body></html>";

/// What the server decided about one incoming request.
#[derive(Debug, PartialEq, Eq)]
enum CallbackOutcome {
    /// Not an OAuth redirect (favicon, probes); keep waiting.
    Ignore,
    /// Redirect for a different request token or without a verifier.
    Reject(String),
    /// Valid redirect carrying this verifier.
    Verified(String),
}

/// Choose the callback port: `LOCAL_PORT`, then `configured`, then the first
/// free port of 8080..=8085, then 8080.
#[must_use]
pub fn pick_port(configured: Option<u16>) -> u16 {
    pick_port_from(std::env::var(ENV_LOCAL_PORT).ok().as_deref(), configured)
}

/// [`pick_port`] with the environment value passed in. An unparsable
/// override is ignored.
#[must_use]
pub fn pick_port_from(env_port: Option<&str>, configured: Option<u16>) -> u16 {
    let from_env = env_port.and_then(|v| v.trim().parse::<u16>().ok());
    if let Some(port) = from_env.or(configured) {
        return port;
    }
    std::iter::once(DEFAULT_PORT)
        .chain(FALLBACK_PORTS.iter().copied())
        .find(|p| is_port_available(*p))
        .unwrap_or(DEFAULT_PORT)
}

fn is_port_available(port: u16) -> bool {
    std::net::TcpListener::bind(("127.0.0.1", port)).is_ok()
}

/// Bind the local callback port and return the listener.
///
/// The caller should bind the port **before** requesting a token and opening
/// the browser, then call [`accept_callback`] on the returned listener.
///
/// # Errors
///
/// Returns an error if the port is already in use or cannot be bound.
pub async fn bind_callback(port: u16) -> Result<TcpListener> {
    TcpListener::bind(("127.0.0.1", port)).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            DiscoError::Auth(format!(
                "callback port {port} is already in use; set {ENV_LOCAL_PORT} to a free port and retry"
            ))
        } else {
            DiscoError::Auth(format!("cannot bind callback port {port}: {e}"))
        }
    })
}

/// Wait for the redirect carrying `expected_token` and return its verifier.
///
/// Requests without an `oauth_token` get a 404 and are ignored. A redirect
/// with another token or without a verifier gets a 400 and fails the
/// handshake.
///
/// # Errors
///
/// Returns [`DiscoError::Auth`] for a rejected redirect and
/// [`DiscoError::Timeout`] if nothing valid arrives within `timeout`.
pub async fn accept_callback(
    listener: TcpListener,
    expected_token: &str,
    timeout: Duration,
) -> Result<String> {
    tokio::time::timeout(timeout, serve_until_verified(&listener, expected_token))
        .await
        .map_err(|_| {
            DiscoError::Timeout(format!(
                "authentication timed out after {} seconds",
                timeout.as_secs()
            ))
        })?
}

/// Serve connections concurrently so an idle socket (a browser preconnect,
/// a port scan) cannot hold up the real redirect.
async fn serve_until_verified(listener: &TcpListener, expected_token: &str) -> Result<String> {
    let expected: Arc<str> = Arc::from(expected_token);
    let mut connections = JoinSet::new();
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = accepted?;
                let expected = expected.clone();
                connections.spawn(async move {
                    let handled =
                        tokio::time::timeout(REQUEST_TIMEOUT, handle_connection(stream, &expected))
                            .await;
                    (peer, handled)
                });
            }
            Some(joined) = connections.join_next() => {
                let Ok((peer, handled)) = joined else {
                    continue;
                };
                match handled {
                    Err(_) => tracing::debug!(%peer, "callback connection sent no request"),
                    Ok(Ok(CallbackOutcome::Ignore)) => {
                        tracing::debug!(%peer, "ignored non-oauth request on callback port");
                    }
                    Ok(Ok(CallbackOutcome::Reject(reason))) => return Err(DiscoError::Auth(reason)),
                    Ok(Ok(CallbackOutcome::Verified(verifier))) => return Ok(verifier),
                    Ok(Err(e)) => tracing::warn!(%peer, error = %e, "callback connection failed"),
                }
            }
        }
    }
}

async fn handle_connection(mut stream: TcpStream, expected_token: &str) -> Result<CallbackOutcome> {
    let request = read_request_line(&mut stream).await?;

    let outcome = match parse_query_from_request(&request) {
        Ok(params) => classify(&params, expected_token),
        Err(e) => CallbackOutcome::Reject(e.to_string()),
    };

    let response = match &outcome {
        CallbackOutcome::Ignore => http_response("404 Not Found", "text/plain", "Not Found"),
        CallbackOutcome::Reject(reason) => http_response("400 Bad Request", "text/plain", reason),
        CallbackOutcome::Verified(_) => http_response("200 OK", "text/html", SUCCESS_PAGE),
    };
    stream.write_all(response.as_bytes()).await?;
    let _ = stream.shutdown().await;
    Ok(outcome)
}

/// Read until the request line is complete, the peer closes, or
/// [`MAX_REQUEST_BYTES`] have arrived.
async fn read_request_line(stream: &mut TcpStream) -> Result<String> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];
    while !buf.windows(2).any(|w| w == b"\r\n") && buf.len() < MAX_REQUEST_BYTES {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn classify(params: &HashMap<String, String>, expected_token: &str) -> CallbackOutcome {
    let Some(token) = params.get("oauth_token") else {
        return CallbackOutcome::Ignore;
    };
    if token != expected_token {
        return CallbackOutcome::Reject("invalid OAuth token".into());
    }
    match params.get("oauth_verifier").filter(|v| !v.is_empty()) {
        Some(verifier) => CallbackOutcome::Verified(verifier.clone()),
        None => CallbackOutcome::Reject("no verification code received".into()),
    }
}

fn http_response(status: &str, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn parse_query_from_request(request: &str) -> Result<HashMap<String, String>> {
    // First line format: "GET /?oauth_token=...&oauth_verifier=... HTTP/1.1"
    let first_line = request.lines().next().unwrap_or("");
    let path = first_line.split_ascii_whitespace().nth(1).unwrap_or("/");
    let query = path.split_once('?').map_or("", |(_, q)| q);
    serde_urlencoded::from_str(query)
        .map_err(|e| DiscoError::Auth(format!("invalid callback query params: {e}")))
}
