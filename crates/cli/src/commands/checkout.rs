//! Checkout commands: summaries and order payloads for both order flows.

use std::io::Write;

use chrono::{DateTime, Utc};
use clearr_core::CartItem;
use clearr_core::checkout::{
    CartOrder, CheckoutCustomer, DeliveryLocation, DirectCustomer, DirectOrder, OrderSummary,
};
use clearr_core::format::format_currency;
use clearr_storefront::StoreContext;
use serde::Serialize;
use tracing::info;

use super::CommandError;

/// Print the cart subtotal and total. Cart orders carry no delivery charge.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn summary(context: &StoreContext, out: &mut impl Write) -> Result<OrderSummary, CommandError> {
    let summary = OrderSummary::for_cart(context.cart().state());
    let locale = context.locale();

    writeln!(out, "Subtotal: {}", format_currency(summary.subtotal, locale))?;
    writeln!(out, "Total: {}", format_currency(summary.total, locale))?;
    Ok(summary)
}

/// Build an order for the cart and print it as JSON. The cart is left intact.
///
/// # Errors
///
/// Returns [`CommandError::Checkout`] for invalid shipping details or an
/// empty cart.
pub fn draft(
    context: &StoreContext,
    out: &mut impl Write,
    customer: CheckoutCustomer,
    created_at: DateTime<Utc>,
) -> Result<CartOrder, CommandError> {
    let order = CartOrder::new(context.cart().state(), customer, created_at)?;
    info!(items = order.items.len(), total = %order.total, "Order drafted");
    write_order(out, &order)?;
    Ok(order)
}

/// Build an order for a single product bought without the cart and print it
/// as JSON.
///
/// # Errors
///
/// Returns [`CommandError::Checkout`] for a missing color or power, or for
/// invalid customer details.
pub fn draft_direct(
    out: &mut impl Write,
    item: &CartItem,
    customer: DirectCustomer,
    location: DeliveryLocation,
) -> Result<DirectOrder, CommandError> {
    let order = DirectOrder::new(item, customer, location)?;
    info!(product = %item.product_id, total = %order.summary.total, "Direct order drafted");
    write_order(out, &order)?;
    Ok(order)
}

fn write_order(out: &mut impl Write, order: &impl Serialize) -> Result<(), CommandError> {
    serde_json::to_writer_pretty(&mut *out, order)?;
    writeln!(out)?;
    Ok(())
}
