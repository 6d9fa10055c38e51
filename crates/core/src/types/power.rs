//! Lens power types.
//!
//! A [`LensPower`] is a dioptre value kept in decimal so that quiz values like
//! `1.50` survive persistence and comparison exactly. [`PowerOption`] is the
//! set of powers a customer can actually order.

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A reading-lens power in dioptres.
///
/// Displays with an explicit sign and two fraction digits (`+1.50`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LensPower(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl LensPower {
    /// Zero power (plain blue-cut lenses).
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Smallest stocked reading power.
    pub const MIN_READING: Self = Self::from_hundredths(75);

    /// Largest stocked reading power.
    pub const MAX_READING: Self = Self::from_hundredths(350);

    /// Create a power from a decimal value.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create a power from hundredths of a dioptre (`150` is `+1.50`).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Catalog powers are tiny
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(Decimal::from_parts(
            hundredths.unsigned_abs() as u32,
            0,
            0,
            hundredths < 0,
            2,
        ))
    }

    /// The underlying decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Round to the nearest quarter dioptre, halves away from zero.
    #[must_use]
    pub fn round_to_quarter(self) -> Self {
        let quarters = (self.0 * Decimal::from(4))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Self((quarters / Decimal::from(4)).round_dp(2))
    }
}

impl fmt::Display for LensPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.0.round_dp(2);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            write!(f, "-{:.2}", rounded.abs())
        } else {
            write!(f, "+{:.2}", rounded.abs())
        }
    }
}

impl FromStr for LensPower {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        Decimal::from_str(unsigned).map(Self)
    }
}

impl From<Decimal> for LensPower {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

/// A power a customer can select when ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerOption {
    /// Zero-power blue-cut lenses (rimless frames only).
    BlueCutZero,
    /// A stocked reading power.
    Reading(LensPower),
    /// The customer does not know their power.
    Unknown,
}

impl PowerOption {
    /// Label used for "Blue Cut Zero".
    pub const BLUE_CUT_ZERO_LABEL: &'static str = "Blue Cut Zero";

    /// Label used when the customer does not know their power.
    pub const UNKNOWN_LABEL: &'static str = "Don't know power";

    /// Reading powers stocked across the catalog, `+0.75` to `+3.50` in quarter
    /// steps, followed by "Don't know power".
    #[must_use]
    pub fn common() -> Vec<Self> {
        (3..=14)
            .map(|quarters| Self::Reading(LensPower::from_hundredths(quarters * 25)))
            .chain(std::iter::once(Self::Unknown))
            .collect()
    }

    /// Options offered for rimless frames: "Blue Cut Zero" plus [`Self::common`].
    #[must_use]
    pub fn rimless() -> Vec<Self> {
        std::iter::once(Self::BlueCutZero)
            .chain(Self::common())
            .collect()
    }

    /// Closest orderable option for a recommended power.
    ///
    /// Zero or negative powers map to "Blue Cut Zero"; positive powers are
    /// rounded to a quarter dioptre and clamped to the stocked range.
    #[must_use]
    pub fn nearest(power: LensPower) -> Self {
        if power <= LensPower::ZERO {
            return Self::BlueCutZero;
        }
        let rounded = power
            .round_to_quarter()
            .clamp(LensPower::MIN_READING, LensPower::MAX_READING);
        Self::Reading(rounded)
    }

    /// Display label, as shown in the order form.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::BlueCutZero => Self::BLUE_CUT_ZERO_LABEL.to_owned(),
            Self::Reading(power) => power.to_string(),
            Self::Unknown => Self::UNKNOWN_LABEL.to_owned(),
        }
    }
}

impl fmt::Display for PowerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Error returned when a power label is not an orderable option.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown power option: {0}")]
pub struct PowerOptionError(String);

impl FromStr for PowerOption {
    type Err = PowerOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            Self::BLUE_CUT_ZERO_LABEL => Ok(Self::BlueCutZero),
            Self::UNKNOWN_LABEL => Ok(Self::Unknown),
            other => other
                .parse::<LensPower>()
                .ok()
                .filter(|p| *p >= LensPower::MIN_READING && *p <= LensPower::MAX_READING)
                .map(Self::Reading)
                .ok_or_else(|| PowerOptionError(s.to_owned())),
        }
    }
}

impl Serialize for PowerOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for PowerOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
