use crate::core::{CartKey, CartLineItem, Product, RawCartEntry};
use std::collections::HashMap;

/// Joins raw cart entries with the catalog into display-ready line items.
///
/// Returns an empty list while either input is still unloaded. Entries whose
/// product id is not in the catalog are dropped without error, and the
/// surviving entries keep their input order. The result never aliases the
/// inputs, so calling this twice with the same arguments yields equal lists.
pub fn reconcile(raw_entries: Option<&[RawCartEntry]>, catalog: Option<&[Product]>) -> Vec<CartLineItem> {
    let (Some(raw_entries), Some(catalog)) = (raw_entries, catalog) else {
        return Vec::new();
    };

    let mut index: HashMap<&str, &Product> = HashMap::with_capacity(catalog.len());
    for product in catalog {
        // first occurrence wins
        index.entry(product.id.as_str()).or_insert(product);
    }

    let items: Vec<CartLineItem> = raw_entries
        .iter()
        .filter_map(|entry| {
            index.get(entry.product_id()).map(|product| CartLineItem {
                product: (*product).clone(),
                quantity: entry.quantity,
            })
        })
        .collect();

    if items.len() < raw_entries.len() {
        tracing::debug!(
            "Dropped {} cart entries with no matching product",
            raw_entries.len() - items.len()
        );
    }

    items
}

/// True iff some item refers to `product_id`.
pub fn contains_product<T: CartKey>(items: &[T], product_id: &str) -> bool {
    items.iter().any(|item| item.product_id() == product_id)
}
