//! Clearr Vision Storefront library.
//!
//! This crate binds the pure states from `clearr-core` to durable storage and
//! assembles them into a [`StoreContext`](state::StoreContext) built once at
//! startup.
//!
//! # Modules
//!
//! - [`storage`] - Key-value storage backends (memory, files)
//! - [`persist`] - Fail-open load and write-through save of store state
//! - [`stores`] - Cart, recently viewed and UI stores
//! - [`state`] - The store context handed to components
//! - [`config`] - Environment configuration
//! - [`telemetry`] - Tracing subscriber setup

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod persist;
pub mod state;
pub mod storage;
pub mod stores;
pub mod telemetry;

pub use config::{ConfigError, StorefrontConfig};
pub use error::StorageError;
pub use state::StoreContext;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use stores::{CartStore, Clock, RecentlyViewedStore, SystemClock, UiStore};
