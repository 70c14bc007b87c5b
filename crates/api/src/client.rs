//! Authenticated Discogs REST client.

use crate::dto::{CollectionPage, OrdersPage, Page, WantsPage};
use async_trait::async_trait;
use discotui_auth::{ConsumerCredentials, IdentityProbe, USER_AGENT, oauth1::AuthorizationHeader};
use discotui_config::ApiConfig;
use discotui_types::{
    DataSource, DiscoError, Identity, ReleaseCatalog, ReleaseModel, TokenPair, traits::Result,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the shared HTTP client used for API and OAuth calls.
///
/// # Errors
///
/// Returns [`DiscoError::Http`] if the TLS backend cannot be initialised.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(DiscoError::from)
}

/// Signs every request with the stored access token.
#[derive(Clone)]
pub struct DiscogsClient {
    http: Client,
    base_url: String,
    per_page: u32,
    max_pages: u32,
    consumer: ConsumerCredentials,
    token: TokenPair,
}

impl DiscogsClient {
    #[must_use]
    pub fn new(
        http: Client,
        config: &ApiConfig,
        consumer: ConsumerCredentials,
        token: TokenPair,
    ) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            per_page: config.per_page.max(1),
            max_pages: config.max_pages.max(1),
            consumer,
            token,
        }
    }

    /// `GET /oauth/identity`.
    ///
    /// # Errors
    ///
    /// [`DiscoError::Unauthorized`] when Discogs rejects the token.
    pub async fn identity(&self) -> Result<Identity> {
        self.get_json("/oauth/identity", &[]).await
    }

    /// All pages of the user's collection (folder 0 holds everything).
    ///
    /// # Errors
    ///
    /// Transport, status, or decoding failures.
    pub async fn collection(&self, username: &str) -> Result<Vec<ReleaseModel>> {
        let path = format!(
            "/users/{}/collection/folders/0/releases",
            urlencoding::encode(username)
        );
        self.paginate::<CollectionPage>(&path).await
    }

    /// All pages of the user's wantlist.
    ///
    /// # Errors
    ///
    /// Transport, status, or decoding failures.
    pub async fn wishlist(&self, username: &str) -> Result<Vec<ReleaseModel>> {
        let path = format!("/users/{}/wants", urlencoding::encode(username));
        self.paginate::<WantsPage>(&path).await
    }

    /// Marketplace orders of the authenticated user, one row per item.
    ///
    /// # Errors
    ///
    /// Transport, status, or decoding failures.
    pub async fn orders(&self) -> Result<Vec<ReleaseModel>> {
        self.paginate::<OrdersPage>("/marketplace/orders").await
    }

    async fn paginate<P: Page>(&self, path: &str) -> Result<Vec<ReleaseModel>> {
        let mut rows = Vec::new();
        let mut page = 1u32;
        loop {
            let query = [
                ("page", page.to_string()),
                ("per_page", self.per_page.to_string()),
            ];
            let body: P = self.get_json(path, &query).await?;
            let pages = body.pagination().pages;
            rows.extend(body.into_models());
            if page >= pages || page >= self.max_pages {
                if page < pages {
                    tracing::debug!(path, pages, max = self.max_pages, "page limit reached");
                }
                break;
            }
            page += 1;
        }
        Ok(rows)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let authorization = AuthorizationHeader::new(&self.consumer)
            .access_token(&self.token)
            .render();
        let resp = self
            .http
            .get(format!("{}{path}", self.base_url))
            .query(query)
            .header("Authorization", authorization)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if status == StatusCode::UNAUTHORIZED {
            return Err(DiscoError::Unauthorized(body));
        }
        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "discogs request failed");
            return Err(DiscoError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Verifies candidate tokens by calling the identity endpoint.
pub struct DiscogsProbe {
    http: Client,
    config: ApiConfig,
    consumer: ConsumerCredentials,
}

impl DiscogsProbe {
    #[must_use]
    pub fn new(http: Client, config: ApiConfig, consumer: ConsumerCredentials) -> Self {
        Self {
            http,
            config,
            consumer,
        }
    }
}

#[async_trait]
impl IdentityProbe for DiscogsProbe {
    async fn identity(&self, token: &TokenPair) -> Result<Identity> {
        DiscogsClient::new(
            self.http.clone(),
            &self.config,
            self.consumer.clone(),
            token.clone(),
        )
        .identity()
        .await
    }
}

/// The three lists of one user.
pub struct UserCatalog {
    client: DiscogsClient,
    username: String,
}

impl UserCatalog {
    #[must_use]
    pub fn new(client: DiscogsClient, username: impl Into<String>) -> Self {
        Self {
            client,
            username: username.into(),
        }
    }
}

#[async_trait]
impl ReleaseCatalog for UserCatalog {
    async fn releases(&self, source: DataSource) -> Result<Vec<ReleaseModel>> {
        match source {
            DataSource::Collection => self.client.collection(&self.username).await,
            DataSource::Wishlist => self.client.wishlist(&self.username).await,
            DataSource::Orders => self.client.orders().await,
        }
    }
}
