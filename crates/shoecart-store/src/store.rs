//! The cart store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use shoecart_cache::{Cache, KeyValueStore};
use shoecart_commerce::{Cart, CommerceError, LineItem, ProductId};
use shoecart_data::CatalogApi;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::config::StoreConfig;
use crate::error::CartError;
use crate::messages;
use crate::notify::{Notifier, Severity};

/// Cart operations, for picking the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Remove,
    Update,
    Submit,
    Clear,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Add => messages::ADD_FAILED,
            Operation::Remove => messages::REMOVE_FAILED,
            Operation::Update => messages::UPDATE_FAILED,
            Operation::Submit => messages::SUBMIT_FAILED,
            Operation::Clear => messages::CLEAR_FAILED,
        }
    }
}

/// Committed cart plus its version.
#[derive(Debug)]
struct Versioned {
    cart: Cart,
    version: u64,
}

/// Owns the shopper's cart.
///
/// All mutations go through the five operations below. Each one reads the
/// current cart, validates against the catalog, and commits: the new cart
/// is written to storage first and only then becomes the in-memory state.
/// If the write fails nothing changes.
///
/// Every operation returns its outcome and also reports it through the
/// injected [`Notifier`]. The notifications alone are enough for a UI that
/// ignores the return values.
///
/// Commits are compare-and-swap on a version counter. An operation that
/// suspended on a lookup while another one committed is rejected with
/// [`CartError::ConcurrentModification`] instead of overwriting it.
///
/// # Example
///
/// ```rust,ignore
/// let store = CartStore::open(catalog, FileStore::open(".shoecart")?, TracingNotifier, StoreConfig::default())?;
///
/// store.add_product(ProductId::new(1)).await?;
/// store.update_product_amount(ProductId::new(1), 3).await?;
///
/// let mut updates = store.subscribe();
/// updates.changed().await?;
/// ```
pub struct CartStore<C, S, N> {
    catalog: C,
    cache: Cache<S>,
    notifier: N,
    config: StoreConfig,
    state: Mutex<Versioned>,
    updates: watch::Sender<Cart>,
}

impl<C, S, N> CartStore<C, S, N>
where
    C: CatalogApi,
    S: KeyValueStore,
    N: Notifier,
{
    /// Open the store, hydrating the cart from the persisted snapshot.
    ///
    /// An absent snapshot yields an empty cart. A snapshot that exists but
    /// does not decode into a valid cart is an error.
    pub fn open(catalog: C, store: S, notifier: N, config: StoreConfig) -> Result<Self, CartError> {
        let cache = Cache::new(store);
        let cart: Cart = cache.get(&config.storage_key)?.unwrap_or_default();
        info!(key = %config.storage_key, items = cart.len(), "cart hydrated");

        let (updates, _) = watch::channel(cart.clone());

        Ok(Self {
            catalog,
            cache,
            notifier,
            config,
            state: Mutex::new(Versioned { cart, version: 0 }),
            updates,
        })
    }

    /// The current cart.
    pub fn cart(&self) -> Cart {
        self.lock().cart.clone()
    }

    /// Number of commits since the store was opened.
    pub fn version(&self) -> u64 {
        self.lock().version
    }

    /// Observe every committed cart.
    ///
    /// The receiver starts at the current cart.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.updates.subscribe()
    }

    /// Settings the store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart is incremented; a new one is looked up
    /// and added with amount 1. Either way the resulting amount must be in
    /// stock.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let result = self.try_add_product(product_id).await;
        self.settle(Operation::Add, result)
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let (cart, version) = self.snapshot();

        let (product, amount, already_in_cart) = match cart.get(product_id) {
            Some(item) => {
                let amount = item.amount.checked_add(1).ok_or(CommerceError::Overflow)?;
                (item.product.clone(), amount, true)
            }
            None => {
                debug!("fetching product details");
                let product = self
                    .catalog
                    .fetch_product(product_id)
                    .await?
                    .ok_or(CartError::ProductNotFound(product_id))?;
                (product, 1, false)
            }
        };

        self.check_stock(product_id, amount).await?;

        let next = cart.with_item(LineItem::new(product, amount)?);
        let committed = self.commit(Some(version), next)?;

        let message = if already_in_cart {
            messages::PRODUCT_UPDATED
        } else {
            messages::PRODUCT_ADDED
        };
        self.notifier.notify(Severity::Success, message);
        Ok(committed)
    }

    /// Remove a product's line. Silent on success.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub fn remove_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let result = self.try_remove_product(product_id);
        self.settle(Operation::Remove, result)
    }

    fn try_remove_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let (cart, version) = self.snapshot();
        let next = cart.without(product_id).map_err(|e| match e {
            CommerceError::ItemNotInCart(id) => CartError::ProductNotInCart(id),
            other => other.into(),
        })?;
        self.commit(Some(version), next)
    }

    /// Set a product's amount. Silent on success.
    ///
    /// The product must already be in the cart and the new amount must be
    /// at least 1 and in stock.
    #[instrument(skip_all, fields(product_id = %product_id, amount = amount))]
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: u32,
    ) -> Result<Cart, CartError> {
        let result = self.try_update_product_amount(product_id, amount).await;
        self.settle(Operation::Update, result)
    }

    async fn try_update_product_amount(
        &self,
        product_id: ProductId,
        amount: u32,
    ) -> Result<Cart, CartError> {
        if amount < 1 {
            return Err(CartError::InvalidAmount(amount));
        }

        let (cart, version) = self.snapshot();
        if !cart.contains(product_id) {
            return Err(CartError::ProductNotFound(product_id));
        }

        self.check_stock(product_id, amount).await?;

        let next = cart.with_amount(product_id, amount)?;
        self.commit(Some(version), next)
    }

    /// Place the order: empty the cart and thank the shopper.
    ///
    /// Stock is not re-checked here; every amount was checked when it was
    /// set.
    #[instrument(skip(self))]
    pub fn submit_order(&self) -> Result<Cart, CartError> {
        let result = self.commit(None, Cart::new());
        if result.is_ok() {
            self.notifier.notify(Severity::Info, messages::ORDER_PLACED);
        }
        self.settle(Operation::Submit, result)
    }

    /// Empty the cart. Silent on success.
    #[instrument(skip(self))]
    pub fn clear_cart(&self) -> Result<Cart, CartError> {
        let result = self.commit(None, Cart::new());
        self.settle(Operation::Clear, result)
    }

    async fn check_stock(&self, product_id: ProductId, requested: u32) -> Result<(), CartError> {
        let stock = self.catalog.fetch_stock(product_id).await?;
        debug!(requested, available = ?stock.map(|s| s.amount), "stock checked");

        match stock {
            Some(record) if record.can_fulfill(requested) => Ok(()),
            other => Err(CartError::StockInsufficient {
                product_id,
                requested,
                available: other.map(|s| s.amount).unwrap_or(0),
            }),
        }
    }

    /// Persist `next` and make it the current cart.
    ///
    /// With `expected`, the commit only happens if no other commit landed
    /// since that version was read.
    fn commit(&self, expected: Option<u64>, next: Cart) -> Result<Cart, CartError> {
        let mut state = self.lock();

        if let Some(expected) = expected {
            if state.version != expected {
                return Err(CartError::ConcurrentModification {
                    expected,
                    found: state.version,
                });
            }
        }

        self.cache.set(&self.config.storage_key, &next)?;

        state.cart = next.clone();
        state.version += 1;
        debug!(version = state.version, items = next.len(), "cart committed");

        self.updates.send_replace(next.clone());
        Ok(next)
    }

    /// Report a failed operation through the notifier.
    fn settle(&self, op: Operation, result: Result<Cart, CartError>) -> Result<Cart, CartError> {
        if let Err(err) = &result {
            match err.severity() {
                Severity::Warning => {
                    warn!(error = %err, "cart operation rejected");
                    self.notifier.notify(Severity::Warning, messages::STOCK_EXCEEDED);
                }
                severity => {
                    warn!(error = %err, ?op, "cart operation failed");
                    self.notifier.notify(severity, op.failure_message());
                }
            }
        }
        result
    }

    fn snapshot(&self) -> (Cart, u64) {
        let state = self.lock();
        (state.cart.clone(), state.version)
    }

    fn lock(&self) -> MutexGuard<'_, Versioned> {
        // The state is only assigned after a successful write, so a
        // poisoned lock still guards a consistent cart.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{MemoryNotifier, Notification};
    use shoecart_cache::MemoryStore;
    use shoecart_commerce::{Currency, Money, Product, StockRecord};
    use shoecart_data::StaticCatalog;

    fn product(id: u64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Shoe {}", id),
            Money::new(10_000 + id as i64, Currency::BRL),
            format!("{}.jpg", id),
        )
    }

    fn catalog(stock: &[(u64, u32)]) -> StaticCatalog {
        stock.iter().fold(StaticCatalog::new(), |c, &(id, amount)| {
            c.with_product(product(id))
                .with_stock(StockRecord::new(ProductId::new(id), amount))
        })
    }

    fn open(
        catalog: StaticCatalog,
        store: MemoryStore,
    ) -> (CartStore<StaticCatalog, MemoryStore, MemoryNotifier>, MemoryNotifier) {
        let notifier = MemoryNotifier::new();
        let cart_store =
            CartStore::open(catalog, store, notifier.clone(), StoreConfig::default()).unwrap();
        (cart_store, notifier)
    }

    fn persisted(store: &MemoryStore) -> Option<Cart> {
        Cache::new(store.clone()).get(DEFAULT_KEY).unwrap()
    }

    const DEFAULT_KEY: &str = crate::config::DEFAULT_STORAGE_KEY;

    #[tokio::test]
    async fn test_add_new_product() {
        let store = MemoryStore::new();
        let (cart_store, notifier) = open(catalog(&[(1, 5)]), store.clone());

        let cart = cart_store.add_product(ProductId::new(1)).await.unwrap();

        assert_eq!(cart.amounts().get(&ProductId::new(1)), Some(&1));
        assert_eq!(persisted(&store), Some(cart));
        assert_eq!(
            notifier.last(),
            Some(Notification::new(Severity::Success, messages::PRODUCT_ADDED))
        );
        assert_eq!(cart_store.version(), 1);
    }

    #[tokio::test]
    async fn test_add_existing_increments_and_keeps_fields() {
        let (cart_store, notifier) = open(catalog(&[(1, 5)]), MemoryStore::new());

        cart_store.add_product(ProductId::new(1)).await.unwrap();
        let cart = cart_store.add_product(ProductId::new(1)).await.unwrap();

        let line = cart.get(ProductId::new(1)).unwrap();
        assert_eq!(line.amount, 2);
        assert_eq!(line.product, product(1));
        assert_eq!(
            notifier.last(),
            Some(Notification::new(Severity::Success, messages::PRODUCT_UPDATED))
        );
    }

    #[tokio::test]
    async fn test_add_unknown_product_fails() {
        let (cart_store, notifier) = open(catalog(&[(1, 5)]), MemoryStore::new());

        let result = cart_store.add_product(ProductId::new(42)).await;

        assert!(matches!(result, Err(CartError::ProductNotFound(id)) if id == ProductId::new(42)));
        assert!(cart_store.cart().is_empty());
        assert_eq!(
            notifier.last(),
            Some(Notification::new(Severity::Error, messages::ADD_FAILED))
        );
    }

    #[tokio::test]
    async fn test_add_without_stock_record_warns() {
        let catalog = StaticCatalog::new().with_product(product(3));
        let (cart_store, notifier) = open(catalog, MemoryStore::new());

        let result = cart_store.add_product(ProductId::new(3)).await;

        assert!(matches!(
            result,
            Err(CartError::StockInsufficient { available: 0, requested: 1, .. })
        ));
        assert_eq!(
            notifier.last(),
            Some(Notification::new(Severity::Warning, messages::STOCK_EXCEEDED))
        );
    }

    #[tokio::test]
    async fn test_update_amount() {
        let (cart_store, notifier) = open(catalog(&[(1, 5)]), MemoryStore::new());
        cart_store.add_product(ProductId::new(1)).await.unwrap();
        notifier.take();

        let cart = cart_store.update_product_amount(ProductId::new(1), 5).await.unwrap();

        assert_eq!(cart.item_count(), 5);
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_update_above_stock_warns() {
        let (cart_store, notifier) = open(catalog(&[(1, 5)]), MemoryStore::new());
        cart_store.add_product(ProductId::new(1)).await.unwrap();

        let result = cart_store.update_product_amount(ProductId::new(1), 6).await;

        assert!(matches!(result, Err(CartError::StockInsufficient { .. })));
        assert_eq!(cart_store.cart().item_count(), 1);
        assert_eq!(notifier.last().unwrap().severity, Severity::Warning);
    }

    #[tokio::test]
    async fn test_update_product_not_in_cart() {
        let (cart_store, notifier) = open(catalog(&[(1, 5)]), MemoryStore::new());

        let result = cart_store.update_product_amount(ProductId::new(1), 2).await;

        assert!(matches!(result, Err(CartError::ProductNotFound(_))));
        assert_eq!(
            notifier.last(),
            Some(Notification::new(Severity::Error, messages::UPDATE_FAILED))
        );
    }

    #[tokio::test]
    async fn test_remove_is_silent() {
        let store = MemoryStore::new();
        let (cart_store, notifier) = open(catalog(&[(1, 5), (2, 5)]), store.clone());
        cart_store.add_product(ProductId::new(1)).await.unwrap();
        cart_store.add_product(ProductId::new(2)).await.unwrap();
        notifier.take();

        let cart = cart_store.remove_product(ProductId::new(1)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(persisted(&store), Some(cart));
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_clear_is_silent() {
        let store = MemoryStore::new();
        let (cart_store, notifier) = open(catalog(&[(1, 5)]), store.clone());
        cart_store.add_product(ProductId::new(1)).await.unwrap();
        notifier.take();

        let cart = cart_store.clear_cart().unwrap();

        assert!(cart.is_empty());
        assert_eq!(persisted(&store), Some(Cart::new()));
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_hydrates_from_snapshot() {
        let store = MemoryStore::new();
        {
            let (cart_store, _) = open(catalog(&[(1, 5)]), store.clone());
            cart_store.add_product(ProductId::new(1)).await.unwrap();
            cart_store.add_product(ProductId::new(1)).await.unwrap();
        }

        let (reopened, _) = open(catalog(&[(1, 5)]), store);
        assert_eq!(reopened.cart().amounts().get(&ProductId::new(1)), Some(&2));
        assert_eq!(reopened.version(), 0);
    }

    #[test]
    fn test_corrupt_snapshot_fails_open() {
        let store = MemoryStore::with_entry(DEFAULT_KEY, "not json");
        let result = CartStore::open(
            StaticCatalog::new(),
            store,
            MemoryNotifier::new(),
            StoreConfig::default(),
        );
        assert!(matches!(result, Err(CartError::Storage(_))));
    }

    #[tokio::test]
    async fn test_subscribe_sees_commits() {
        let (cart_store, _) = open(catalog(&[(1, 5)]), MemoryStore::new());
        let mut updates = cart_store.subscribe();
        assert!(updates.borrow().is_empty());

        cart_store.add_product(ProductId::new(1)).await.unwrap();

        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_operation_does_not_publish() {
        let (cart_store, _) = open(catalog(&[(1, 0)]), MemoryStore::new());
        let updates = cart_store.subscribe();

        let _ = cart_store.add_product(ProductId::new(1)).await;

        assert!(!updates.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_custom_storage_key() {
        let store = MemoryStore::new();
        let notifier = MemoryNotifier::new();
        let config = StoreConfig::default().with_storage_key("cart:test");
        let cart_store = CartStore::open(catalog(&[(1, 5)]), store.clone(), notifier, config).unwrap();

        cart_store.add_product(ProductId::new(1)).await.unwrap();

        assert!(store.get("cart:test").unwrap().is_some());
        assert!(store.get(DEFAULT_KEY).unwrap().is_none());
    }
}
