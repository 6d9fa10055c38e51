//! Shopping cart state.
//!
//! The cart is an ordered list of line items, at most one per [`CartItemId`].
//! Adding an item that is already present merges quantities instead of adding
//! a second line. Mutators return `true` when the state changed so the
//! persistence layer knows when a write is due.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CartItemId, ProductId};

/// Variant selection for a cart line (lens power and frame color).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartVariant {
    /// Power label, e.g. `+1.50` or `Don't know power`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    /// Frame color label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A line item in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Line identity: product id plus variant.
    pub id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    /// Unit price in taka.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<CartVariant>,
}

impl CartItem {
    /// Create a line for a product with no variant. The line id is the
    /// product id.
    #[must_use]
    pub fn new(product_id: ProductId, name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            id: CartItemId::new(product_id.as_str()),
            product_id,
            name: name.into(),
            price,
            image: None,
            quantity,
            variant: None,
        }
    }

    /// Select a color and power, re-keying the line to
    /// [`CartItem::variant_id`].
    #[must_use]
    pub fn with_variant(mut self, color: impl Into<String>, power: impl Into<String>) -> Self {
        let color = color.into();
        let power = power.into();
        self.id = Self::variant_id(&self.product_id, &color, &power);
        self.variant = Some(CartVariant {
            power: Some(power),
            color: Some(color),
        });
        self
    }

    /// Attach an image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Line id for a product variant: `{product}-{color}-{power}`.
    ///
    /// ```
    /// use clearr_core::{CartItem, ProductId};
    ///
    /// let id = CartItem::variant_id(&ProductId::new("V004"), "Silver", "+1.50");
    /// assert_eq!(id.as_str(), "V004-Silver-+1.50");
    /// ```
    #[must_use]
    pub fn variant_id(product_id: &ProductId, color: &str, power: &str) -> CartItemId {
        CartItemId::new(format!("{product_id}-{color}-{power}"))
    }

    /// Unit price times quantity, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// The cart contents, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartState {
    #[serde(default)]
    items: Vec<CartItem>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up a line by id.
    #[must_use]
    pub fn get(&self, id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a line, merging into an existing line with the same id.
    ///
    /// A zero-quantity item is ignored and returns `false`. Merged quantities
    /// saturate at `u32::MAX`.
    pub fn add_item(&mut self, item: CartItem) -> bool {
        if item.quantity == 0 {
            return false;
        }

        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
        true
    }

    /// Remove the line with the given id. Returns `false` if it was absent.
    pub fn remove_item(&mut self, id: &CartItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    /// Set the quantity of a line. Zero removes it.
    ///
    /// Returns `false` when the id is absent or the quantity is unchanged.
    pub fn update_quantity(&mut self, id: &CartItemId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(id);
        }

        match self.items.iter_mut().find(|item| &item.id == id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove every line. Returns `false` if the cart was already empty.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();
        self.items.clear();
        had_items
    }

    /// Sum of unit price times quantity over all lines, saturating at the
    /// `Decimal` bounds.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |total, item| total.saturating_add(item.line_total()))
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Restore the line invariants on state decoded from storage: drop
    /// zero-quantity lines and fold duplicate ids into the first occurrence.
    ///
    /// Returns `true` if anything was repaired.
    pub fn normalize(&mut self) -> bool {
        let before = self.items.len();
        let mut merged: Vec<CartItem> = Vec::with_capacity(before);
        for item in self.items.drain(..) {
            if item.quantity == 0 {
                continue;
            }
            match merged.iter_mut().find(|line| line.id == item.id) {
                Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
                None => merged.push(item),
            }
        }
        self.items = merged;
        self.items.len() != before
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64, quantity: u32) -> CartItem {
        let mut item = CartItem::new(ProductId::new("p1"), "Rimless V004", Decimal::from(price), quantity);
        item.id = CartItemId::new(id);
        item
    }

    #[test]
    fn test_add_item_merges_quantity() {
        let mut cart = CartState::new();
        assert!(cart.add_item(item("p1-blue", 500, 1)));
        assert!(cart.add_item(item("p1-blue", 500, 2)));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get(&CartItemId::new("p1-blue")).unwrap().quantity, 3);
    }

    #[test]
    fn test_add_item_keeps_insertion_order() {
        let mut cart = CartState::new();
        cart.add_item(item("a", 100, 1));
        cart.add_item(item("b", 100, 1));
        cart.add_item(item("a", 100, 4));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_add_item_zero_quantity_is_ignored() {
        let mut cart = CartState::new();
        assert!(!cart.add_item(item("p1-blue", 500, 0)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_item_saturates() {
        let mut cart = CartState::new();
        cart.add_item(item("a", 1, u32::MAX));
        cart.add_item(item("a", 1, 5));
        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = CartState::new();
        cart.add_item(item("p1-blue", 500, 2));
        cart.add_item(item("p2-red", 100, 1));

        assert!(cart.update_quantity(&CartItemId::new("p1-blue"), 0));
        assert!(cart.get(&CartItemId::new("p1-blue")).is_none());
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_update_quantity_replaces() {
        let mut cart = CartState::new();
        cart.add_item(item("a", 500, 2));

        assert!(cart.update_quantity(&CartItemId::new("a"), 5));
        assert!(!cart.update_quantity(&CartItemId::new("a"), 5));
        assert!(!cart.update_quantity(&CartItemId::new("missing"), 5));

        let line = cart.get(&CartItemId::new("a")).unwrap();
        assert_eq!(line.quantity, 5);
        assert_eq!(line.price, Decimal::from(500));
    }

    #[test]
    fn test_remove_item_absent_is_noop() {
        let mut cart = CartState::new();
        cart.add_item(item("a", 500, 1));
        assert!(!cart.remove_item(&CartItemId::new("b")));
        assert_eq!(cart.items().len(), 1);
        assert!(cart.remove_item(&CartItemId::new("a")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_and_count() {
        let mut cart = CartState::new();
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);

        cart.add_item(item("a", 500, 2));
        cart.add_item(item("b", 1200, 1));
        assert_eq!(cart.total(), Decimal::from(2200));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let mut cart = CartState::new();
        let line = CartItem::new(ProductId::new("p1"), "Frame", Decimal::MAX, 2);
        assert_eq!(line.line_total(), Decimal::MAX);
        cart.add_item(line);
        assert_eq!(cart.total(), Decimal::MAX);

        cart.add_item(item("b", 500, 1));
        assert_eq!(cart.total(), Decimal::MAX);
    }

    #[test]
    fn test_normalize_merges_duplicates_and_drops_empty_lines() {
        let mut cart: CartState = serde_json::from_value(serde_json::json!({
            "items": [
                {"id": "p1-blue", "productId": "p1", "name": "Frame", "price": 500, "quantity": 1},
                {"id": "p2", "productId": "p2", "name": "Frame", "price": 300, "quantity": 0},
                {"id": "p1-blue", "productId": "p1", "name": "Frame", "price": 500, "quantity": 2},
                {"id": "p3", "productId": "p3", "name": "Frame", "price": 100, "quantity": 1}
            ]
        }))
        .unwrap();

        assert!(cart.normalize());
        let lines: Vec<(&str, u32)> = cart
            .items()
            .iter()
            .map(|i| (i.id.as_str(), i.quantity))
            .collect();
        assert_eq!(lines, [("p1-blue", 3), ("p3", 1)]);

        assert!(cart.update_quantity(&CartItemId::new("p1-blue"), 5));
        assert_eq!(cart.item_count(), 6);
        assert!(!cart.normalize());
    }

    #[test]
    fn test_clear() {
        let mut cart = CartState::new();
        assert!(!cart.clear());
        cart.add_item(item("a", 500, 2));
        assert!(cart.clear());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_with_variant_rekeys_line() {
        let line = CartItem::new(ProductId::new("1515"), "Diamond Cut", Decimal::from(350), 2)
            .with_variant("Black", "+1.50")
            .with_image("/images/products/bold-black.jpg");

        assert_eq!(line.id.as_str(), "1515-Black-+1.50");
        let variant = line.variant.unwrap();
        assert_eq!(variant.color.as_deref(), Some("Black"));
        assert_eq!(variant.power.as_deref(), Some("+1.50"));
    }

    #[test]
    fn test_serializes_browser_shape() {
        let line = CartItem::new(ProductId::new("V007"), "Rimless V007", Decimal::from(1100), 1)
            .with_variant("Gold/Black", "+2.00");
        let json = serde_json::to_value(&line).unwrap();

        assert_eq!(json["productId"], "V007");
        assert_eq!(json["price"], 1100.0);
        assert_eq!(json["variant"]["color"], "Gold/Black");
        assert!(json.get("image").is_none());
    }
}
