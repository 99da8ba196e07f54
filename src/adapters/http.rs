use crate::core::{
    AuthProvider, CartProvider, CartUpsert, CatalogProvider, ConfigProvider, Credentials, LoginResponse, Product,
    RawCartEntry, Result,
};
use crate::domain::model::ApiFailure;
use crate::utils::error::StorefrontError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// reqwest-backed client for the commerce REST API (`.../api/v1`).
#[derive(Debug, Clone)]
pub struct HttpCommerceApi {
    client: Client,
    base_url: String,
}

impl HttpCommerceApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self::with_client(client, config.api_endpoint()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, Vec<u8>)> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let (status, body) = self.send(request).await?;
        if !status.is_success() {
            return Err(failure_from(status, &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Maps a non-2xx response onto the error taxonomy, keeping the backend's message.
fn failure_from(status: StatusCode, body: &[u8]) -> StorefrontError {
    let message = serde_json::from_slice::<ApiFailure>(body)
        .ok()
        .and_then(|failure| failure.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

    match status.as_u16() {
        404 => StorefrontError::NotFound { message },
        code @ 500..=599 => StorefrontError::ServerError { status: code, message },
        code => StorefrontError::Rejected { status: code, message },
    }
}

#[async_trait]
impl CatalogProvider for HttpCommerceApi {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        let url = self.url("products");
        tracing::debug!("Making API request to: {}", url);
        self.send_json(self.client.get(url)).await
    }

    async fn search_products(&self, text: &str) -> Result<Vec<Product>> {
        let url = self.url("products/search");
        tracing::debug!("Searching products at {} for {:?}", url, text);
        self.send_json(self.client.get(url).query(&[("value", text)])).await
    }
}

#[async_trait]
impl CartProvider for HttpCommerceApi {
    async fn fetch_cart(&self, token: &str) -> Result<Vec<RawCartEntry>> {
        let url = self.url("cart");
        tracing::debug!("Making API request to: {}", url);
        self.send_json(self.client.get(url).bearer_auth(token)).await
    }

    async fn upsert_cart(&self, token: &str, upsert: &CartUpsert) -> Result<Vec<RawCartEntry>> {
        let url = self.url("cart");
        tracing::debug!("Posting cart upsert to: {}", url);
        self.send_json(self.client.post(url).bearer_auth(token).json(upsert))
            .await
    }
}

#[async_trait]
impl AuthProvider for HttpCommerceApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let url = self.url("auth/login");
        tracing::debug!("Logging in {} at {}", credentials.username, url);
        self.send_json(self.client.post(url).json(credentials)).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<()> {
        let url = self.url("auth/register");
        tracing::debug!("Registering {} at {}", credentials.username, url);
        let (status, body) = self.send(self.client.post(url).json(credentials)).await?;
        if status.is_success() {
            Ok(())
        } else {
            Err(failure_from(status, &body))
        }
    }
}
