//! Integration tests for Site Composer.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p site-composer-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `section_registry` - template and field schema editing
//! - `page_store` - page composition, slugs and status
//! - `config_store` - config domains, defaults and listeners
//! - `persistence` - file-backed round trips and failure handling
//!
//! This library holds the fixtures shared by those tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use site_composer_studio::{Category, DocumentStore, MemoryStore, PersistenceError};

/// A [`MemoryStore`] whose writes can be made to fail on demand.
///
/// Reads keep working while writes fail, which is how the stores are
/// checked to leave their in-memory state untouched.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing: AtomicBool,
}

impl FlakyStore {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every following `save` and `delete` fail (or succeed again).
    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The documents written so far.
    #[must_use]
    pub const fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn check(&self) -> Result<(), PersistenceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PersistenceError::Backend("disk full".to_string()));
        }
        Ok(())
    }
}

impl DocumentStore for FlakyStore {
    fn load(&self, category: Category, key: &str) -> Result<Value, PersistenceError> {
        self.inner.load(category, key)
    }

    fn save(&self, category: Category, key: &str, document: &Value) -> Result<(), PersistenceError> {
        self.check()?;
        self.inner.save(category, key, document)
    }

    fn delete(&self, category: Category, key: &str) -> Result<(), PersistenceError> {
        self.check()?;
        self.inner.delete(category, key)
    }

    fn list(&self, category: Category) -> Result<Vec<String>, PersistenceError> {
        self.inner.list(category)
    }
}
