use crate::domain::model::{CartUpsert, Credentials, LoginResponse, Notification, Product, RawCartEntry, Session};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>>;
    async fn search_products(&self, text: &str) -> Result<Vec<Product>>;
}

#[async_trait]
pub trait CartProvider: Send + Sync {
    async fn fetch_cart(&self, token: &str) -> Result<Vec<RawCartEntry>>;
    async fn upsert_cart(&self, token: &str, upsert: &CartUpsert) -> Result<Vec<RawCartEntry>>;
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;
    async fn register(&self, credentials: &Credentials) -> Result<()>;
}

pub trait SessionStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Session>> + Send;
    fn save(&self, session: &Session) -> impl std::future::Future<Output = Result<()>> + Send;
    fn clear(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Receives user-facing messages (the storefront's toast/snackbar slot).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn debounce_delay(&self) -> Duration;
    fn session_path(&self) -> &str;
}
