//! Core types for Clearr Vision.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod locale;
pub mod power;

pub use id::*;
pub use locale::{Locale, LocaleError};
pub use power::{LensPower, PowerOption, PowerOptionError};
