use crate::core::cart::CartMutator;
use crate::core::reconcile::{contains_product, reconcile};
use crate::core::{
    AddOptions, CartAction, CartLineItem, CartProvider, CartSummary, CatalogProvider, Notification, Notifier,
    Product, RawCartEntry, Result, Session,
};
use crate::utils::error::{StorefrontError, BACKEND_UNREACHABLE};
use std::sync::Arc;

const SEARCH_UNREACHABLE: &str =
    "Could not fetch products. Check that the backend is running, reachable and returns valid JSON.";
const CART_UNREACHABLE: &str =
    "Could not fetch cart details. Check that the backend is running, reachable and returns valid JSON.";

/// Products-page state: catalog, search results, the user's cart.
///
/// Line items are a projection of `(raw_cart, catalog)` and are recomputed
/// whenever either side changes. Failures are reported through the notifier
/// and never leave the storefront in a loading state.
pub struct Storefront<A, N>
where
    A: CatalogProvider + CartProvider,
    N: Notifier,
{
    api: Arc<A>,
    notifier: N,
    mutator: CartMutator<A>,
    session: Session,
    catalog: Option<Vec<Product>>,
    filtered: Vec<Product>,
    raw_cart: Option<Vec<RawCartEntry>>,
    items: Vec<CartLineItem>,
    loading: bool,
}

impl<A, N> Storefront<A, N>
where
    A: CatalogProvider + CartProvider,
    N: Notifier,
{
    pub fn new(api: Arc<A>, notifier: N, session: Session) -> Self {
        Self {
            mutator: CartMutator::new(api.clone()),
            api,
            notifier,
            session,
            catalog: None,
            filtered: Vec::new(),
            raw_cart: None,
            items: Vec::new(),
            loading: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Swaps in the session produced by login or logout. A logged-in session
    /// gets its own cart fetched; an anonymous one drops the cart.
    pub async fn replace_session(&mut self, session: Session) {
        self.session = session;
        self.raw_cart = self.fetch_cart().await;
        self.refresh_items();
    }

    pub fn catalog(&self) -> &[Product] {
        self.catalog.as_deref().unwrap_or_default()
    }

    pub fn filtered_products(&self) -> &[Product] {
        &self.filtered
    }

    pub fn line_items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::from_items(&self.items)
    }

    pub fn cart_action(&self, product_id: &str) -> CartAction {
        if contains_product(&self.items, product_id) {
            CartAction::GoToCart
        } else {
            CartAction::Add
        }
    }

    /// Page load: catalog first, then the cart if someone is logged in.
    pub async fn load(&mut self) {
        self.loading = true;
        let fetched = self.api.fetch_products().await;
        self.loading = false;

        match fetched {
            Ok(products) => {
                tracing::info!("Loaded {} products", products.len());
                self.filtered = products.clone();
                self.catalog = Some(products);
            }
            Err(e) => {
                tracing::error!("Fetching products failed: {}", e);
                let message = match &e {
                    StorefrontError::ServerError { status: 500, message } => message.as_str(),
                    _ => BACKEND_UNREACHABLE,
                };
                self.notifier.notify(Notification::error(message));
            }
        }

        self.raw_cart = self.fetch_cart().await;
        self.refresh_items();
    }

    /// Runs one search against the backend and updates the filtered list.
    pub async fn search(&mut self, text: &str) {
        match self.api.search_products(text).await {
            Ok(products) => {
                tracing::debug!("Search {:?} matched {} products", text, products.len());
                self.filtered = products;
            }
            Err(StorefrontError::NotFound { .. }) => {
                tracing::debug!("Search {:?} matched nothing", text);
                self.filtered.clear();
            }
            Err(StorefrontError::ServerError { status: 500, message }) => {
                self.notifier.notify(Notification::error(message));
                self.filtered = self.catalog().to_vec();
            }
            // filtered keeps the previous results
            Err(e) => {
                tracing::warn!("Search {:?} failed: {}", text, e);
                self.notifier.notify(Notification::error(SEARCH_UNREACHABLE));
            }
        }
    }

    /// Returns `None` for anonymous sessions and after any failure.
    async fn fetch_cart(&self) -> Option<Vec<RawCartEntry>> {
        let token = self.session.token()?;

        match self.api.fetch_cart(token).await {
            Ok(entries) => Some(entries),
            Err(e) => {
                tracing::warn!("Fetching cart failed: {}", e);
                let message = match &e {
                    StorefrontError::Rejected { status: 400, message } => message.as_str(),
                    _ => CART_UNREACHABLE,
                };
                self.notifier.notify(Notification::error(message));
                None
            }
        }
    }

    /// Adds or re-quantifies a product; the cart only changes on server success.
    pub async fn add_to_cart(&mut self, product_id: &str, quantity: u32, options: AddOptions) -> Result<()> {
        let outcome = self
            .mutator
            .add_or_update(&self.session, &self.items, product_id, quantity, options)
            .await;

        match outcome {
            Ok(entries) => {
                self.raw_cart = Some(entries);
                self.refresh_items();
                Ok(())
            }
            Err(e) => {
                let notification = if e.is_local() {
                    Notification::warning(e.to_string())
                } else {
                    Notification::error(e.user_friendly_message())
                };
                self.notifier.notify(notification);
                Err(e)
            }
        }
    }

    fn refresh_items(&mut self) {
        self.items = reconcile(self.raw_cart.as_deref(), self.catalog.as_deref());
    }
}
