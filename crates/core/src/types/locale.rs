//! Storefront locales.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A locale the storefront is served in.
///
/// Bengali is the default, matching the site's routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English, formatted with `en-US` digit grouping.
    En,
    /// Bengali, formatted with `bn-BD` digits and grouping.
    #[default]
    Bn,
}

impl Locale {
    /// All supported locales.
    pub const ALL: [Self; 2] = [Self::En, Self::Bn];

    /// Short locale tag used in URLs (`en`, `bn`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Bn => "bn",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unsupported locale tag.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unsupported locale: {0} (expected en or bn)")]
pub struct LocaleError(String);

impl FromStr for Locale {
    type Err = LocaleError;

    /// Accepts the short tag or a regional tag (`en-US`, `bn-BD`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = s.split(['-', '_']).next().unwrap_or_default();
        match language.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "bn" => Ok(Self::Bn),
            _ => Err(LocaleError(s.to_owned())),
        }
    }
}
