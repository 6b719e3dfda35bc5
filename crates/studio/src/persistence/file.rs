//! Filesystem document store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{Category, DocumentStore, PersistenceError, validate_key};

const EXTENSION: &str = "json";

/// Stores each document as `<root>/<category>/<key>.json`.
///
/// Writes go to a hidden temporary file in the same directory which is then
/// renamed over the target, so readers never observe a half-written
/// document.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    pretty: bool,
}

impl FileStore {
    /// Create a store rooted at `root`. Directories are created lazily.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pretty: true,
        }
    }

    /// Choose between indented and compact JSON output.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document `key` in `category`.
    #[must_use]
    pub fn path_for(&self, category: Category, key: &str) -> PathBuf {
        self.category_dir(category)
            .join(format!("{key}.{EXTENSION}"))
    }

    fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.as_str())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.display().to_string(),
        source,
    }
}

impl DocumentStore for FileStore {
    #[instrument(skip(self), fields(category = %category))]
    fn load(&self, category: Category, key: &str) -> Result<Value, PersistenceError> {
        validate_key(key)?;
        let path = self.path_for(category, key);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound {
                    category,
                    key: key.to_string(),
                });
            }
            Err(e) => return Err(io_error(&path, e)),
        };

        let document = serde_json::from_str(&content)?;
        debug!(path = %path.display(), "Loaded document");
        Ok(document)
    }

    #[instrument(skip(self, document), fields(category = %category))]
    fn save(
        &self,
        category: Category,
        key: &str,
        document: &Value,
    ) -> Result<(), PersistenceError> {
        validate_key(key)?;
        let dir = self.category_dir(category);
        std::fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;

        let mut bytes = if self.pretty {
            serde_json::to_vec_pretty(document)?
        } else {
            serde_json::to_vec(document)?
        };
        bytes.push(b'\n');

        let path = self.path_for(category, key);
        let tmp = dir.join(format!(".{key}.{EXTENSION}.tmp"));
        std::fs::write(&tmp, &bytes).map_err(|e| io_error(&tmp, e))?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_error(&path, e));
        }

        debug!(path = %path.display(), bytes = bytes.len(), "Saved document");
        Ok(())
    }

    #[instrument(skip(self), fields(category = %category))]
    fn delete(&self, category: Category, key: &str) -> Result<(), PersistenceError> {
        validate_key(key)?;
        let path = self.path_for(category, key);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "Deleted document");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    #[instrument(skip(self), fields(category = %category))]
    fn list(&self, category: Category) -> Result<Vec<String>, PersistenceError> {
        let dir = self.category_dir(category);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(dir = %dir.display(), "Category directory does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(io_error(&dir, e)),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error(&dir, e))?;
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == EXTENSION) {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) if validate_key(stem).is_ok() => keys.push(stem.to_string()),
                Some(_) => {}
                None => warn!(path = %path.display(), "Skipping document with non UTF-8 name"),
            }
        }

        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, store) = store();
        let doc = json!({"logo": "/logo.svg", "favicon": "/favicon.ico", "isSticky": true});
        store.save(Category::Config, "header", &doc).unwrap();

        assert!(store.path_for(Category::Config, "header").exists());
        assert_eq!(store.load(Category::Config, "header").unwrap(), doc);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let (_dir, store) = store();
        let err = store.load(Category::Pages, "about").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_corrupt_is_serialization_error() {
        let (dir, store) = store();
        std::fs::create_dir_all(dir.path().join("pages")).unwrap();
        std::fs::write(dir.path().join("pages/home.json"), "{not json").unwrap();
        let err = store.load(Category::Pages, "home").unwrap_err();
        assert!(matches!(err, PersistenceError::Serialization(_)));
    }

    #[test]
    fn test_list_sorted_and_filtered() {
        let (dir, store) = store();
        for key in ["contact", "about", "home"] {
            store.save(Category::Pages, key, &json!({})).unwrap();
        }
        std::fs::write(dir.path().join("pages/notes.txt"), "ignored").unwrap();
        std::fs::write(dir.path().join("pages/.draft.json.tmp"), "{}").unwrap();

        assert_eq!(
            store.list(Category::Pages).unwrap(),
            ["about", "contact", "home"]
        );
        assert!(store.list(Category::Sections).unwrap().is_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (_dir, store) = store();
        store.save(Category::Sections, "hero", &json!({"id": "hero"})).unwrap();
        store.delete(Category::Sections, "hero").unwrap();
        store.delete(Category::Sections, "hero").unwrap();
        assert!(store.list(Category::Sections).unwrap().is_empty());
    }

    #[test]
    fn test_overwrite_replaces_document() {
        let (_dir, store) = store();
        store.save(Category::Themes, "dark", &json!({"v": 1})).unwrap();
        store.save(Category::Themes, "dark", &json!({"v": 2})).unwrap();
        assert_eq!(store.load(Category::Themes, "dark").unwrap(), json!({"v": 2}));
    }

    #[test]
    fn test_compact_output() {
        let (_dir, store) = store();
        let store = store.with_pretty(false);
        store.save(Category::Config, "seo", &json!({"a": 1})).unwrap();
        let raw = std::fs::read_to_string(store.path_for(Category::Config, "seo")).unwrap();
        assert_eq!(raw, "{\"a\":1}\n");
    }

    #[test]
    fn test_rejects_traversal_keys() {
        let (_dir, store) = store();
        let err = store
            .save(Category::Pages, "../escape", &json!({}))
            .unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidKey(_)));
    }
}
