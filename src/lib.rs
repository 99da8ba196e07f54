pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::Cli;

pub use crate::adapters::{ConsoleNotifier, FileSessionStore, HttpCommerceApi};
pub use crate::config::StorefrontConfig;
pub use crate::core::{auth::Authenticator, cart::CartMutator, search::SearchDebouncer, storefront::Storefront};
pub use crate::core::reconcile::{contains_product, reconcile};
pub use crate::utils::error::{Result, StorefrontError};
