//! Cart commands.

use std::io::Write;

use clearr_core::format::format_currency;
use clearr_core::{CartItem, CartItemId};
use clearr_storefront::StoreContext;
use tracing::info;

use super::CommandError;

/// Add a line to the cart and print the resulting line.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn add(
    context: &mut StoreContext,
    out: &mut impl Write,
    item: CartItem,
) -> Result<(), CommandError> {
    let id = item.id.clone();
    context.cart_mut().add_item(item);

    match context.cart().state().get(&id) {
        Some(line) => {
            info!(id = %id, quantity = line.quantity, "Cart line updated");
            writeln!(out, "{id}: {} x{}", line.name, line.quantity)?;
        }
        None => writeln!(out, "Nothing added")?,
    }
    Ok(())
}

/// Remove a line from the cart.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn remove(
    context: &mut StoreContext,
    out: &mut impl Write,
    id: &str,
) -> Result<(), CommandError> {
    let id = CartItemId::new(id);
    if context.cart().state().get(&id).is_none() {
        writeln!(out, "No cart line {id}")?;
        return Ok(());
    }
    context.cart_mut().remove_item(&id);
    writeln!(out, "Removed {id}")?;
    Ok(())
}

/// Set a line's quantity. Zero removes the line.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn set_quantity(
    context: &mut StoreContext,
    out: &mut impl Write,
    id: &str,
    quantity: u32,
) -> Result<(), CommandError> {
    let id = CartItemId::new(id);
    if context.cart().state().get(&id).is_none() {
        writeln!(out, "No cart line {id}")?;
        return Ok(());
    }
    context.cart_mut().update_quantity(&id, quantity);
    if quantity == 0 {
        writeln!(out, "Removed {id}")?;
    } else {
        writeln!(out, "{id}: x{quantity}")?;
    }
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn clear(context: &mut StoreContext, out: &mut impl Write) -> Result<(), CommandError> {
    context.cart_mut().clear_cart();
    writeln!(out, "Cart cleared")?;
    Ok(())
}

/// Print every line with its total, then the cart summary.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn show(context: &StoreContext, out: &mut impl Write) -> Result<(), CommandError> {
    let locale = context.locale();
    let cart = context.cart();

    if cart.items().is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    for line in cart.items() {
        writeln!(
            out,
            "{}  {} x{}  {}",
            line.id,
            line.name,
            line.quantity,
            format_currency(line.line_total(), locale)
        )?;
    }
    writeln!(
        out,
        "Items: {}  Total: {}",
        cart.item_count(),
        format_currency(cart.cart_total(), locale)
    )?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clearr_core::{Locale, ProductId};
    use rust_decimal::Decimal;

    use super::*;
    use crate::commands::test_support::{context, output};

    fn frame(quantity: u32) -> CartItem {
        CartItem::new(ProductId::new("V004"), "Executive", Decimal::from(1100), quantity)
            .with_variant("Silver", "+1.50")
    }

    #[test]
    fn test_add_merges_and_show_totals() {
        let mut ctx = context(Locale::En);
        let mut buf = Vec::new();

        add(&mut ctx, &mut buf, frame(1)).unwrap();
        add(&mut ctx, &mut buf, frame(2)).unwrap();
        show(&ctx, &mut buf).unwrap();

        let text = output(buf);
        assert!(text.contains("V004-Silver-+1.50: Executive x3"));
        assert!(text.contains("Items: 3  Total: ৳ 3,300"));
    }

    #[test]
    fn test_add_zero_quantity_reports_nothing() {
        let mut ctx = context(Locale::En);
        let mut buf = Vec::new();
        add(&mut ctx, &mut buf, frame(0)).unwrap();
        assert_eq!(output(buf), "Nothing added\n");
        assert_eq!(ctx.cart().item_count(), 0);
    }

    #[test]
    fn test_set_zero_removes_line() {
        let mut ctx = context(Locale::Bn);
        let mut buf = Vec::new();
        add(&mut ctx, &mut buf, frame(2)).unwrap();
        set_quantity(&mut ctx, &mut buf, "V004-Silver-+1.50", 0).unwrap();
        set_quantity(&mut ctx, &mut buf, "missing", 3).unwrap();
        show(&ctx, &mut buf).unwrap();

        let text = output(buf);
        assert!(text.contains("Removed V004-Silver-+1.50"));
        assert!(text.contains("No cart line missing"));
        assert!(text.ends_with("Cart is empty\n"));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut ctx = context(Locale::En);
        let mut buf = Vec::new();
        add(&mut ctx, &mut buf, frame(1)).unwrap();
        remove(&mut ctx, &mut buf, "V004-Silver-+1.50").unwrap();
        assert_eq!(ctx.cart().item_count(), 0);

        add(&mut ctx, &mut buf, frame(1)).unwrap();
        clear(&mut ctx, &mut buf).unwrap();
        assert!(ctx.cart().items().is_empty());
        assert!(output(buf).ends_with("Cart cleared\n"));
    }
}
