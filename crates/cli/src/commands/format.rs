//! Price formatting command.

use std::io::Write;

use clearr_core::Locale;
use clearr_core::format::{Amount, format_currency, format_price};

use super::CommandError;

/// Format an amount as taka. Text that is not numeric prints as `৳ NaN`.
///
/// With `compact` set, the amount prints in the product-card style instead
/// (Bengali digits, symbol trailing, whole taka).
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn amount(
    out: &mut impl Write,
    text: &str,
    locale: Locale,
    compact: bool,
) -> Result<(), CommandError> {
    let amount = Amount::parse_lenient(text);
    let formatted = match (compact, amount.value()) {
        (true, Some(value)) => format_price(value),
        _ => format_currency(amount, locale),
    };
    writeln!(out, "{formatted}")?;
    Ok(())
}
