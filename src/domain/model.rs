use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A purchasable product as served by `GET /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category: String,
    pub cost: f64,
    /// Aggregate rating, integer out of five.
    pub rating: u8,
    #[serde(rename = "image")]
    pub image_url: String,
}

/// A server-reported cart entry prior to enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCartEntry {
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl RawCartEntry {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Body of `POST /cart`.
pub type CartUpsert = RawCartEntry;

/// A raw cart entry joined with its product record.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartLineItem {
    pub fn subtotal(&self) -> f64 {
        self.product.cost * f64::from(self.quantity)
    }
}

/// Anything that identifies a cart slot by product id.
pub trait CartKey {
    fn product_id(&self) -> &str;
}

impl CartKey for RawCartEntry {
    fn product_id(&self) -> &str {
        &self.product_id
    }
}

impl CartKey for CartLineItem {
    fn product_id(&self) -> &str {
        &self.product.id
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CartSummary {
    pub total_items: u32,
    pub total_value: f64,
}

impl CartSummary {
    pub fn from_items(items: &[CartLineItem]) -> Self {
        items.iter().fold(Self::default(), |acc, item| Self {
            total_items: acc.total_items + item.quantity,
            total_value: acc.total_value + item.subtotal(),
        })
    }
}

/// Whether a product card should offer "Add" or jump to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Add,
    GoToCart,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Set by catalog "Add to cart"; the cart panel's quantity buttons leave it off.
    pub prevent_duplicate: bool,
}

impl AddOptions {
    pub fn add_new() -> Self {
        Self {
            prevent_duplicate: true,
        }
    }

    pub fn update_quantity() -> Self {
        Self::default()
    }
}

/// Authenticated-user state. Replaced wholesale at login and logout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub username: Option<String>,
    pub balance: Option<f64>,
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>, username: impl Into<String>, balance: f64) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
            balance: Some(balance),
            logged_in_at: Some(Utc::now()),
        }
    }

    /// The bearer token, if one is present and non-blank.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub token: String,
    pub username: String,
    pub balance: f64,
}

/// Error body carried by non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiFailure {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}
