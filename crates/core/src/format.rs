//! Taka currency formatting.
//!
//! Prices are shown as `৳ 1,500` in English and `৳ ১,৫০০` in Bengali. The
//! Bengali form uses Bengali digits and the Indian grouping (`১২,৩৪,৫৬৭`).
//!
//! Amounts can come from catalog data as text (`"৳1,500"`). Text is reduced to
//! its digits and dots before parsing; anything that still fails to parse
//! renders as `৳ NaN` instead of erroring, so callers that care must validate
//! first.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Locale;

/// The taka glyph.
pub const TAKA: char = '৳';

/// Fraction digits kept by [`format_currency`].
const MAX_FRACTION_DIGITS: u32 = 3;

/// An amount to format: a decimal value, or text that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(Option<Decimal>);

impl Amount {
    /// The parsed value, or `None` when the input was not numeric.
    #[must_use]
    pub const fn value(&self) -> Option<Decimal> {
        self.0
    }

    /// Parse numeric-looking text, keeping only ASCII digits and dots.
    ///
    /// Like a browser's `parseFloat`, parsing stops at a second dot, so
    /// `"1.5.0"` reads as `1.5`. Signs are stripped along with every other
    /// non-digit character.
    #[must_use]
    pub fn parse_lenient(text: &str) -> Self {
        let cleaned: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        let prefix = match cleaned.match_indices('.').nth(1) {
            Some((second_dot, _)) => cleaned.get(..second_dot).unwrap_or_default(),
            None => cleaned.as_str(),
        };

        if !prefix.bytes().any(|b| b.is_ascii_digit()) {
            return Self(None);
        }

        let normalized = prefix.trim_end_matches('.');
        let normalized = if normalized.starts_with('.') {
            format!("0{normalized}")
        } else {
            normalized.to_owned()
        };

        Self(Decimal::from_str(&normalized).ok())
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(Some(value))
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Self(Some(Decimal::from(value)))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(Some(Decimal::from(value)))
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Self(Some(Decimal::from(value)))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self(Decimal::try_from(value).ok())
    }
}

impl From<&str> for Amount {
    fn from(text: &str) -> Self {
        Self::parse_lenient(text)
    }
}

impl From<&String> for Amount {
    fn from(text: &String) -> Self {
        Self::parse_lenient(text)
    }
}

/// Format an amount as taka for display, e.g. `৳ 1,500` or `৳ ১,৫০০`.
///
/// Up to three fraction digits are kept (rounded half away from zero) and
/// trailing zeros are dropped.
///
/// ```
/// use clearr_core::format::format_currency;
/// use clearr_core::Locale;
///
/// assert_eq!(format_currency(1500, Locale::En), "৳ 1,500");
/// assert_eq!(format_currency(1500, Locale::Bn), "৳ ১,৫০০");
/// assert_eq!(format_currency("abc", Locale::En), "৳ NaN");
/// ```
#[must_use]
pub fn format_currency(amount: impl Into<Amount>, locale: Locale) -> String {
    let number = amount.into().value().map_or_else(
        || "NaN".to_owned(),
        |value| {
            let rounded = value
                .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
                .normalize();
            format_number(rounded, locale)
        },
    );
    format!("{TAKA} {number}")
}

/// Format a whole-taka price the way `bn-BD` currency display does: Bengali
/// digits with the glyph trailing, e.g. `১,৫০০৳`.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{TAKA}", format_number(whole, Locale::Bn))
}

/// Group and localize the digits of an already-rounded decimal.
fn format_number(value: Decimal, locale: Locale) -> String {
    let text = value.abs().to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let grouped = match locale {
        Locale::En => group_thousands(integer),
        Locale::Bn => group_indian(integer),
    };

    let mut out = String::with_capacity(text.len() + 4);
    if value.is_sign_negative() && !value.is_zero() {
        out.push('-');
    }
    out.push_str(&grouped);
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }

    match locale {
        Locale::En => out,
        Locale::Bn => out.chars().map(bengali_digit).collect(),
    }
}

/// `1234567` -> `1,234,567`.
fn group_thousands(digits: &str) -> String {
    let mut groups: Vec<&str> = Vec::new();
    let mut end = digits.len();
    while end > 3 {
        groups.push(digits.get(end - 3..end).unwrap_or_default());
        end -= 3;
    }
    groups.push(digits.get(..end).unwrap_or_default());
    groups.reverse();
    groups.join(",")
}

/// `1234567` -> `12,34,567`: the last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }
    let split = digits.len() - 3;
    let (head, tail) = digits.split_at(split);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(head.get(end - 2..end).unwrap_or_default());
        end -= 2;
    }
    groups.push(head.get(..end).unwrap_or_default());
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

fn bengali_digit(c: char) -> char {
    c.to_digit(10)
        .and_then(|d| char::from_u32('০' as u32 + d))
        .unwrap_or(c)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_en_groups_thousands() {
        assert_eq!(format_currency(1500, Locale::En), "৳ 1,500");
        assert_eq!(format_currency(350, Locale::En), "৳ 350");
        assert_eq!(format_currency(1_234_567, Locale::En), "৳ 1,234,567");
    }

    #[test]
    fn test_format_currency_bn_uses_bengali_digits() {
        assert_eq!(format_currency(1500, Locale::Bn), "৳ ১,৫০০");
        assert_eq!(format_currency(350, Locale::Bn), "৳ ৩৫০");
    }

    #[test]
    fn test_format_currency_bn_uses_indian_grouping() {
        assert_eq!(format_currency(1_234_567, Locale::Bn), "৳ ১২,৩৪,৫৬৭");
        assert_eq!(format_currency(100_000, Locale::Bn), "৳ ১,০০,০০০");
        assert_eq!(format_currency(1_234_567, Locale::En), "৳ 1,234,567");
    }

    #[test]
    fn test_format_currency_fraction_digits() {
        assert_eq!(format_currency(1190.5, Locale::En), "৳ 1,190.5");
        assert_eq!(format_currency(0.12345, Locale::En), "৳ 0.123");
        assert_eq!(format_currency(2.0, Locale::En), "৳ 2");
        assert_eq!(format_currency(1190.5, Locale::Bn), "৳ ১,১৯০.৫");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-1500, Locale::En), "৳ -1,500");
    }

    #[test]
    fn test_format_currency_from_text() {
        assert_eq!(format_currency("৳1,500", Locale::En), "৳ 1,500");
        assert_eq!(format_currency("Tk 1,100.50", Locale::Bn), "৳ ১,১০০.৫");
        assert_eq!(format_currency("1.5.9", Locale::En), "৳ 1.5");
        assert_eq!(format_currency(".5", Locale::En), "৳ 0.5");
    }

    #[test]
    fn test_format_currency_non_numeric_is_nan() {
        assert_eq!(format_currency("free", Locale::En), "৳ NaN");
        assert_eq!(format_currency("", Locale::Bn), "৳ NaN");
        assert_eq!(format_currency(".", Locale::En), "৳ NaN");
        assert_eq!(format_currency(f64::NAN, Locale::En), "৳ NaN");
    }

    #[test]
    fn test_format_price_whole_taka() {
        assert_eq!(format_price(Decimal::from(1500)), "১,৫০০৳");
        assert_eq!(format_price(Decimal::new(11905, 1)), "১,১৯১৳");
    }

    #[test]
    fn test_group_helpers() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_indian("1000"), "1,000");
        assert_eq!(group_indian("10000000"), "1,00,00,000");
    }
}
