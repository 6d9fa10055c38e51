//! Store context shared by every storefront component.

use std::rc::Rc;

use clearr_core::{Locale, RecentlyViewedProduct};
use tracing::info;

use crate::config::StorefrontConfig;
use crate::storage::{FileStorage, Storage};
use crate::stores::{CartStore, RecentlyViewedStore, UiStore};

/// Every client-side store, constructed once at startup and handed to the
/// components that need it.
///
/// All stores share one storage backend. The context is single-threaded:
/// callers take `&mut StoreContext` to mutate.
#[derive(Debug)]
pub struct StoreContext {
    locale: Locale,
    recent_limit: usize,
    cart: CartStore,
    recently_viewed: RecentlyViewedStore,
    ui: UiStore,
}

impl StoreContext {
    /// Build the context over an existing storage backend, rehydrating the
    /// persisted stores.
    #[must_use]
    pub fn new(storage: Rc<dyn Storage>, locale: Locale, recent_limit: usize) -> Self {
        Self {
            locale,
            recent_limit,
            cart: CartStore::load(Rc::clone(&storage)),
            recently_viewed: RecentlyViewedStore::load(storage),
            ui: UiStore::new(),
        }
    }

    /// Build the context from configuration, storing state under the
    /// configured directory.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        let storage = FileStorage::new(&config.storage_dir);
        let context = Self::new(Rc::new(storage), config.locale, config.recent_limit);
        info!(
            dir = %config.storage_dir.display(),
            cart_items = context.cart.item_count(),
            recently_viewed = context.recently_viewed.products().len(),
            "Stores loaded"
        );
        context
    }

    /// Display locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// How many recently viewed products to show.
    #[must_use]
    pub const fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    /// The most recent views, up to the configured page limit.
    #[must_use]
    pub fn recent_products(&self) -> &[RecentlyViewedProduct] {
        self.recently_viewed.recent_products(self.recent_limit)
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn recently_viewed(&self) -> &RecentlyViewedStore {
        &self.recently_viewed
    }

    pub const fn recently_viewed_mut(&mut self) -> &mut RecentlyViewedStore {
        &mut self.recently_viewed
    }

    #[must_use]
    pub const fn ui(&self) -> &UiStore {
        &self.ui
    }

    pub const fn ui_mut(&mut self) -> &mut UiStore {
        &mut self.ui
    }
}
