//! Store overview.

use std::io::Write;

use clearr_core::format::format_currency;
use clearr_storefront::StoreContext;

use super::CommandError;

/// Print the cart and history counts. The welcome line prints once per
/// session, tracked by the intro flag.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn show(context: &mut StoreContext, out: &mut impl Write) -> Result<(), CommandError> {
    if !context.ui().is_intro_complete() {
        writeln!(out, "Clearr Vision: reading glasses, delivered")?;
        context.ui_mut().set_intro_complete(true);
    }

    let cart = context.cart();
    writeln!(
        out,
        "Cart: {} item(s), {}",
        cart.item_count(),
        format_currency(cart.cart_total(), context.locale())
    )?;
    writeln!(
        out,
        "Recently viewed: {}",
        context.recently_viewed().products().len()
    )?;
    writeln!(out, "Locale: {}", context.locale())?;
    Ok(())
}
