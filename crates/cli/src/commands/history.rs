//! Recently viewed history commands.

use std::io::Write;

use clearr_core::ViewedProduct;
use clearr_core::format::format_currency;
use clearr_storefront::StoreContext;

use super::CommandError;

/// Record a product view.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn view(
    context: &mut StoreContext,
    out: &mut impl Write,
    product: ViewedProduct,
) -> Result<(), CommandError> {
    let id = product.id.clone();
    context.recently_viewed_mut().add_product(product);
    writeln!(
        out,
        "Viewed {id} ({} in history)",
        context.recently_viewed().products().len()
    )?;
    Ok(())
}

/// Print the most recent views, newest first. Without a limit the
/// configured page limit applies.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn list(
    context: &StoreContext,
    out: &mut impl Write,
    limit: Option<usize>,
) -> Result<(), CommandError> {
    let recent = match limit {
        Some(limit) => context.recently_viewed().recent_products(limit),
        None => context.recent_products(),
    };

    if recent.is_empty() {
        writeln!(out, "No recently viewed products")?;
        return Ok(());
    }

    for entry in recent {
        let product = &entry.product;
        write!(
            out,
            "{}  {}  {}",
            product.id,
            product.name,
            format_currency(product.price, context.locale())
        )?;
        if let Some(original) = product.original_price {
            write!(out, " (was {})", format_currency(original, context.locale()))?;
        }
        writeln!(out, "  viewed {}", entry.viewed_at.to_rfc3339())?;
    }
    Ok(())
}

/// Forget every view.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn clear(context: &mut StoreContext, out: &mut impl Write) -> Result<(), CommandError> {
    context.recently_viewed_mut().clear_history();
    writeln!(out, "History cleared")?;
    Ok(())
}
