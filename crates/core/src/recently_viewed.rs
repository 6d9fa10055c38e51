//! Recently viewed product history.
//!
//! A bounded list, most recent first, holding at most one entry per product.
//! The caller supplies the view time so the state stays clock-free.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// Maximum number of products kept in the history.
pub const MAX_RECENT_PRODUCTS: usize = 10;

/// Number of products shown by default.
pub const DEFAULT_RECENT_LIMIT: usize = 4;

/// Product fields captured when a product page is viewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewedProduct {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<Decimal>,
    pub image: String,
    pub category: String,
}

/// A history entry: the viewed product and when it was viewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentlyViewedProduct {
    #[serde(flatten)]
    pub product: ViewedProduct,
    /// Persisted as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub viewed_at: DateTime<Utc>,
}

impl RecentlyViewedProduct {
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }
}

/// The viewing history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecentlyViewedState {
    #[serde(default)]
    products: Vec<RecentlyViewedProduct>,
}

impl RecentlyViewedState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// All entries, most recent first.
    #[must_use]
    pub fn products(&self) -> &[RecentlyViewedProduct] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Record a view: drop any earlier entry for the product, insert it at
    /// the front and truncate to [`MAX_RECENT_PRODUCTS`].
    ///
    /// If `viewed_at` is older than the current front entry (a clock stepped
    /// backwards), the front entry's time is used so timestamps never increase
    /// towards the back.
    pub fn add_product(&mut self, product: ViewedProduct, viewed_at: DateTime<Utc>) {
        self.products.retain(|entry| entry.product.id != product.id);

        let viewed_at = self
            .products
            .first()
            .map_or(viewed_at, |front| viewed_at.max(front.viewed_at));

        self.products.insert(0, RecentlyViewedProduct { product, viewed_at });
        self.products.truncate(MAX_RECENT_PRODUCTS);
    }

    /// Forget every entry. Returns `false` if the history was already empty.
    pub fn clear(&mut self) -> bool {
        let had_entries = !self.products.is_empty();
        self.products.clear();
        had_entries
    }

    /// Restore the history invariants on state read from storage: newest
    /// first, one entry per product, at most [`MAX_RECENT_PRODUCTS`].
    ///
    /// The sort is stable, so entries sharing a timestamp keep their stored
    /// order. Returns `true` if anything changed.
    pub fn normalize(&mut self) -> bool {
        let before = self.products.clone();

        self.products.sort_by(|a, b| b.viewed_at.cmp(&a.viewed_at));
        let mut seen = HashSet::new();
        self.products.retain(|entry| seen.insert(entry.product.id.clone()));
        self.products.truncate(MAX_RECENT_PRODUCTS);

        self.products != before
    }

    /// The first `limit` entries. A limit past the end returns everything.
    #[must_use]
    pub fn recent(&self, limit: usize) -> &[RecentlyViewedProduct] {
        let end = limit.min(self.products.len());
        self.products.get(..end).unwrap_or_default()
    }
}
