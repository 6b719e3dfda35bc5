//! Document persistence: the only I/O boundary of the studio.
//!
//! Every entity is stored as one JSON document addressed by a
//! `(category, key)` pair:
//!
//! - `pages/<slug>` - [`Page`](site_composer_core::Page)
//! - `sections/<template id>` - [`SectionTemplate`](site_composer_core::SectionTemplate)
//! - `config/<domain>` - one of the five config domain values
//! - `themes/<name>` - theme documents, stored but not interpreted
//!
//! Documents are saved independently; there are no transactions across
//! categories, so a page referencing a since-deleted section is a valid
//! persisted state.
//!
//! # Backends
//!
//! - [`FileStore`] - one `.json` file per document under a root directory
//! - [`MemoryStore`] - in-process map, for tests and embedding

pub mod file;
pub mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Document categories, each a separate namespace of keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Pages,
    Sections,
    Config,
    Themes,
}

impl Category {
    /// All categories.
    pub const ALL: [Self; 4] = [Self::Pages, Self::Sections, Self::Config, Self::Themes];

    /// Directory / namespace name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pages => "pages",
            Self::Sections => "sections",
            Self::Config => "config",
            Self::Themes => "themes",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during persistence operations.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Requested document does not exist.
    #[error("document not found: {category}/{key}")]
    NotFound { category: Category, key: String },

    /// Filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key cannot be used as a document address.
    #[error("invalid document key '{0}'")]
    InvalidKey(String),

    /// Backend is unusable (e.g. a poisoned lock).
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl PersistenceError {
    /// Returns `true` for [`PersistenceError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A store of JSON documents grouped by category.
///
/// Implementations must treat `delete` of a missing document as success and
/// return keys from `list` in ascending order.
pub trait DocumentStore: Send + Sync {
    /// Load one document.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no document exists under
    /// `key`, or another error if it cannot be read.
    fn load(&self, category: Category, key: &str) -> Result<Value, PersistenceError>;

    /// Create or replace one document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save(&self, category: Category, key: &str, document: &Value)
    -> Result<(), PersistenceError>;

    /// Remove one document. Missing documents are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing document cannot be removed.
    fn delete(&self, category: Category, key: &str) -> Result<(), PersistenceError>;

    /// Keys of every document in `category`, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the category cannot be enumerated.
    fn list(&self, category: Category) -> Result<Vec<String>, PersistenceError>;
}

/// Load a document and decode it as `T`.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` for missing documents and
/// `PersistenceError::Serialization` if the document does not match `T`.
pub fn load_as<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    category: Category,
    key: &str,
) -> Result<T, PersistenceError> {
    let document = store.load(category, key)?;
    Ok(serde_json::from_value(document)?)
}

/// Encode `entity` and save it as a document.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn save_as<T: Serialize>(
    store: &dyn DocumentStore,
    category: Category,
    key: &str,
    entity: &T,
) -> Result<(), PersistenceError> {
    let document = serde_json::to_value(entity)?;
    store.save(category, key, &document)
}

/// Check that `key` is usable as a document address.
///
/// Keys must be non-empty, must not contain path separators or NUL, and
/// must not start with a dot.
///
/// # Errors
///
/// Returns `PersistenceError::InvalidKey` otherwise.
pub fn validate_key(key: &str) -> Result<(), PersistenceError> {
    let invalid = key.trim().is_empty()
        || key.starts_with('.')
        || key.contains(['/', '\\', '\0']);
    if invalid {
        return Err(PersistenceError::InvalidKey(key.to_string()));
    }
    Ok(())
}
