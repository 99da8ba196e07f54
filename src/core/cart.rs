use crate::core::reconcile::contains_product;
use crate::core::{AddOptions, CartKey, CartProvider, CartUpsert, RawCartEntry, Result, Session};
use crate::utils::error::StorefrontError;
use crate::utils::validation::{validate_product_id, validate_quantity};
use std::sync::Arc;

const MUTATION_FALLBACK: &str = "Error adding to cart";

/// Applies add/update requests to the server-side cart.
///
/// Nothing is applied locally: the returned entries are the server's
/// confirmed cart, and the caller re-runs reconciliation with them.
pub struct CartMutator<P: CartProvider> {
    provider: Arc<P>,
}

impl<P: CartProvider> CartMutator<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Upserts `quantity` of `product_id`.
    ///
    /// Rejected without any request when the session has no token, when
    /// the arguments are invalid, or when `prevent_duplicate` is set and
    /// the product already appears in `current_items`. The duplicate check
    /// only sees `current_items` as captured by the caller, so two
    /// concurrent adds of the same product can both get through.
    pub async fn add_or_update<K: CartKey>(
        &self,
        session: &Session,
        current_items: &[K],
        product_id: &str,
        quantity: u32,
        options: AddOptions,
    ) -> Result<Vec<RawCartEntry>> {
        let token = session.token().ok_or(StorefrontError::Unauthenticated)?;

        validate_product_id(product_id)?;
        validate_quantity(quantity, options.prevent_duplicate)?;

        if options.prevent_duplicate && contains_product(current_items, product_id) {
            tracing::debug!("Product {} already in cart, not re-adding", product_id);
            return Err(StorefrontError::DuplicateItem {
                product_id: product_id.to_string(),
            });
        }

        let upsert = CartUpsert::new(product_id, quantity);
        tracing::debug!("Upserting cart entry {} x{}", product_id, quantity);

        self.provider
            .upsert_cart(token, &upsert)
            .await
            .map_err(|e| {
                tracing::warn!("Cart mutation for {} failed: {}", product_id, e);
                StorefrontError::MutationFailed {
                    message: e.server_message().unwrap_or(MUTATION_FALLBACK).to_string(),
                }
            })
    }
}
