//! Clearr Vision Core - storefront state and scoring library.
//!
//! This crate provides the client-side logic shared by every Clearr Vision
//! surface:
//! - [`cart`] - Cart line items with merge-by-id semantics
//! - [`recently_viewed`] - Bounded, most-recent-first product history
//! - [`ui`] - Per-session UI flags
//! - [`quiz`] - Reading-power quiz catalog and scoring
//! - [`checkout`] - Delivery charges, customer validation and order drafts
//! - [`format`] - Taka currency formatting for `en` and `bn`
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O, no
//! storage, no clocks. Persistence and the store context live in
//! `clearr-storefront`, which wraps these states at a load/save boundary.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, lens powers and locales

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod format;
pub mod quiz;
pub mod recently_viewed;
pub mod types;
pub mod ui;

pub use cart::{CartItem, CartState, CartVariant};
pub use recently_viewed::{RecentlyViewedProduct, RecentlyViewedState, ViewedProduct};
pub use types::*;
pub use ui::UiState;
