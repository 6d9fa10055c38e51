//! The storefront's client-side stores.
//!
//! - [`CartStore`] - persisted cart
//! - [`RecentlyViewedStore`] - persisted viewing history
//! - [`UiStore`] - per-session UI flags, never persisted
//!
//! Every operation is synchronous. Persisted stores write through to storage
//! after each mutation that changes their state.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use clearr_core::{
    CartItem, CartItemId, CartState, RecentlyViewedProduct, RecentlyViewedState, UiState,
    ViewedProduct,
};

use crate::persist::Persisted;
use crate::storage::Storage;

/// Source of the current time for view timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The shopping cart.
#[derive(Debug)]
pub struct CartStore {
    inner: Persisted<CartState>,
}

impl CartStore {
    /// Rehydrate the cart from storage.
    #[must_use]
    pub fn load(storage: Rc<dyn Storage>) -> Self {
        Self {
            inner: Persisted::load(storage),
        }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        self.inner.state().items()
    }

    #[must_use]
    pub const fn state(&self) -> &CartState {
        self.inner.state()
    }

    /// Add a line, merging quantities with an existing line of the same id.
    /// Zero-quantity lines are ignored.
    #[instrument(skip(self, item), fields(id = %item.id, quantity = item.quantity))]
    pub fn add_item(&mut self, item: CartItem) {
        if !self.inner.mutate(|cart| cart.add_item(item)) {
            debug!("Ignored zero-quantity cart line");
        }
    }

    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: &CartItemId) {
        self.inner.mutate(|cart| cart.remove_item(id));
    }

    /// Set a line's quantity; zero removes the line.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: &CartItemId, quantity: u32) {
        self.inner.mutate(|cart| cart.update_quantity(id, quantity));
    }

    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.inner.mutate(CartState::clear);
    }

    /// Sum of price times quantity.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.inner.state().total()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.inner.state().item_count()
    }
}

/// The recently viewed product history.
pub struct RecentlyViewedStore {
    inner: Persisted<RecentlyViewedState>,
    clock: Box<dyn Clock>,
}

impl RecentlyViewedStore {
    /// Rehydrate the history from storage, timestamping views with the system
    /// clock.
    #[must_use]
    pub fn load(storage: Rc<dyn Storage>) -> Self {
        Self::with_clock(storage, Box::new(SystemClock))
    }

    /// Rehydrate the history with a custom clock.
    #[must_use]
    pub fn with_clock(storage: Rc<dyn Storage>, clock: Box<dyn Clock>) -> Self {
        Self {
            inner: Persisted::load(storage),
            clock,
        }
    }

    /// All entries, most recent first.
    #[must_use]
    pub fn products(&self) -> &[RecentlyViewedProduct] {
        self.inner.state().products()
    }

    /// Record a product view.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub fn add_product(&mut self, product: ViewedProduct) {
        let now = self.clock.now();
        self.inner.mutate(|history| {
            history.add_product(product, now);
            true
        });
    }

    #[instrument(skip(self))]
    pub fn clear_history(&mut self) {
        self.inner.mutate(RecentlyViewedState::clear);
    }

    /// The `limit` most recent entries.
    #[must_use]
    pub fn recent_products(&self, limit: usize) -> &[RecentlyViewedProduct] {
        self.inner.state().recent(limit)
    }
}

impl std::fmt::Debug for RecentlyViewedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecentlyViewedStore")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Session-only UI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiStore {
    state: UiState,
}

impl UiStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: UiState::new(),
        }
    }

    #[must_use]
    pub const fn is_intro_complete(&self) -> bool {
        self.state.is_intro_complete()
    }

    pub const fn set_intro_complete(&mut self, completed: bool) {
        self.state.set_intro_complete(completed);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use chrono::TimeZone;
    use clearr_core::ProductId;

    use super::*;
    use crate::storage::MemoryStorage;

    /// Clock that advances one second per reading.
    struct StepClock(Cell<i64>);

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Utc> {
            let seconds = self.0.get();
            self.0.set(seconds + 1);
            Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
        }
    }

    fn viewed(id: &str) -> ViewedProduct {
        ViewedProduct {
            id: ProductId::new(id),
            name: format!("Frame {id}"),
            slug: format!("frame-{id}"),
            price: Decimal::from(1100),
            original_price: Some(Decimal::from(1900)),
            image: "/images/products/executive.jpg".to_owned(),
            category: "Reading Glasses".to_owned(),
        }
    }

    fn line(id: &str, price: i64, quantity: u32) -> CartItem {
        let mut item = CartItem::new(ProductId::new("p1"), "Frame", Decimal::from(price), quantity);
        item.id = CartItemId::new(id);
        item
    }

    #[test]
    fn test_cart_store_spec_flow() {
        let storage: Rc<dyn Storage> = Rc::new(MemoryStorage::new());
        let mut cart = CartStore::load(storage);

        cart.add_item(line("p1-blue", 500, 1));
        cart.add_item(line("p1-blue", 500, 2));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 3);

        cart.add_item(line("p2-red", 1200, 1));
        cart.update_quantity(&CartItemId::new("p1-blue"), 2);
        assert_eq!(cart.cart_total(), Decimal::from(2200));

        cart.update_quantity(&CartItemId::new("p1-blue"), 0);
        assert_eq!(cart.item_count(), 1);

        cart.remove_item(&CartItemId::new("p2-red"));
        assert_eq!(cart.cart_total(), Decimal::ZERO);
    }

    #[test]
    fn test_cart_store_survives_reload() {
        let storage: Rc<dyn Storage> = Rc::new(MemoryStorage::new());
        {
            let mut cart = CartStore::load(Rc::clone(&storage));
            cart.add_item(line("a", 350, 2));
        }

        let mut cart = CartStore::load(Rc::clone(&storage));
        assert_eq!(cart.item_count(), 2);

        cart.clear_cart();
        let cart = CartStore::load(storage);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_recently_viewed_store_orders_by_view() {
        let storage: Rc<dyn Storage> = Rc::new(MemoryStorage::new());
        let mut history =
            RecentlyViewedStore::with_clock(Rc::clone(&storage), Box::new(StepClock(Cell::new(0))));

        history.add_product(viewed("a"));
        history.add_product(viewed("b"));
        history.add_product(viewed("a"));

        let ids: Vec<&str> = history.products().iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(history.recent_products(1).len(), 1);
        assert_eq!(history.recent_products(4).len(), 2);

        let reloaded = RecentlyViewedStore::load(storage);
        assert_eq!(reloaded.products(), history.products());
    }

    #[test]
    fn test_clear_history() {
        let storage: Rc<dyn Storage> = Rc::new(MemoryStorage::new());
        let mut history = RecentlyViewedStore::load(Rc::clone(&storage));
        history.add_product(viewed("a"));
        history.clear_history();
        assert!(history.products().is_empty());
        assert!(RecentlyViewedStore::load(storage).products().is_empty());
    }

    #[test]
    fn test_ui_store_resets_per_session() {
        let mut ui = UiStore::new();
        assert!(!ui.is_intro_complete());
        ui.set_intro_complete(true);
        assert!(ui.is_intro_complete());
        assert!(!UiStore::default().is_intro_complete());
    }
}
