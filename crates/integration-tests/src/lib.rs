//! Integration tests for Clearr Vision.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p clearr-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `persistence` - Store state surviving restarts on file storage
//! - `shopping_flow` - Quiz, browsing, cart and checkout end to end
//!
//! Each test opens its stores over a fresh temporary directory through
//! [`TestStorage`], so tests never share state.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clearr_core::{Locale, ProductId, ViewedProduct};
use clearr_storefront::{FileStorage, StoreContext, StorefrontConfig};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// A storage directory that lives as long as the test.
#[derive(Debug)]
pub struct TestStorage {
    dir: TempDir,
}

impl TestStorage {
    /// Create an empty storage directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn file(&self, key: &str) -> PathBuf {
        self.dir.path().join(format!("{key}.json"))
    }

    /// Configuration pointing at this directory.
    #[must_use]
    pub fn config(&self, locale: Locale) -> StorefrontConfig {
        StorefrontConfig {
            storage_dir: self.dir.path().to_path_buf(),
            locale,
            ..StorefrontConfig::default()
        }
    }

    /// Open the stores, as a fresh session would at startup.
    #[must_use]
    pub fn open(&self) -> StoreContext {
        StoreContext::new(
            Rc::new(FileStorage::new(self.dir.path())),
            Locale::En,
            clearr_core::recently_viewed::DEFAULT_RECENT_LIMIT,
        )
    }

    /// Overwrite the raw file backing `key`.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[allow(clippy::expect_used)]
    pub fn write_raw(&self, key: &str, contents: &str) {
        fs::write(self.file(key), contents).expect("Failed to write raw store file");
    }

    /// Read the raw file backing `key`.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be read.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn read_raw(&self, key: &str) -> String {
        fs::read_to_string(self.file(key)).expect("Failed to read raw store file")
    }
}

impl Default for TestStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// A product as captured on its detail page.
#[must_use]
pub fn viewed_product(id: &str, price: i64) -> ViewedProduct {
    ViewedProduct {
        id: ProductId::new(id),
        name: format!("Reading Frame {id}"),
        slug: format!("reading-frame-{}", id.to_lowercase()),
        price: Decimal::from(price),
        original_price: None,
        image: format!("/images/products/{id}.jpg"),
        category: "Reading Glasses".to_owned(),
    }
}
