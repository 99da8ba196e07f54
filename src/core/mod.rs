pub mod auth;
pub mod cart;
pub mod reconcile;
pub mod search;
pub mod storefront;

pub use crate::domain::model::{
    AddOptions, CartAction, CartKey, CartLineItem, CartSummary, CartUpsert, Credentials, LoginResponse,
    Notification, NotificationLevel, Product, RawCartEntry, Session,
};
pub use crate::domain::ports::{AuthProvider, CartProvider, CatalogProvider, ConfigProvider, Notifier, SessionStore};
pub use crate::utils::error::Result;
