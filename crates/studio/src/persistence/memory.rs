//! In-process document store.

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde_json::Value;

use super::{Category, DocumentStore, PersistenceError, validate_key};

type Documents = BTreeMap<(Category, String), Value>;

/// Keeps documents in memory. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Documents>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored documents across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.read().map_or(0, |docs| docs.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> PersistenceError {
    PersistenceError::Backend("memory store lock poisoned".to_string())
}

impl DocumentStore for MemoryStore {
    fn load(&self, category: Category, key: &str) -> Result<Value, PersistenceError> {
        validate_key(key)?;
        let documents = self.documents.read().map_err(poisoned)?;
        documents
            .get(&(category, key.to_string()))
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound {
                category,
                key: key.to_string(),
            })
    }

    fn save(
        &self,
        category: Category,
        key: &str,
        document: &Value,
    ) -> Result<(), PersistenceError> {
        validate_key(key)?;
        let mut documents = self.documents.write().map_err(poisoned)?;
        documents.insert((category, key.to_string()), document.clone());
        Ok(())
    }

    fn delete(&self, category: Category, key: &str) -> Result<(), PersistenceError> {
        validate_key(key)?;
        let mut documents = self.documents.write().map_err(poisoned)?;
        documents.remove(&(category, key.to_string()));
        Ok(())
    }

    fn list(&self, category: Category) -> Result<Vec<String>, PersistenceError> {
        let documents = self.documents.read().map_err(poisoned)?;
        Ok(documents
            .keys()
            .filter(|(c, _)| *c == category)
            .map(|(_, key)| key.clone())
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_categories_are_separate_namespaces() {
        let store = MemoryStore::new();
        store.save(Category::Pages, "home", &json!({"kind": "page"})).unwrap();
        store.save(Category::Sections, "home", &json!({"kind": "section"})).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.load(Category::Pages, "home").unwrap()["kind"], "page");
        assert_eq!(store.list(Category::Sections).unwrap(), ["home"]);
        assert!(store.list(Category::Config).unwrap().is_empty());
    }

    #[test]
    fn test_list_is_sorted() {
        let store = MemoryStore::new();
        for key in ["seo", "footer", "header"] {
            store.save(Category::Config, key, &json!({})).unwrap();
        }
        assert_eq!(
            store.list(Category::Config).unwrap(),
            ["footer", "header", "seo"]
        );
    }

    #[test]
    fn test_delete_missing_is_ok() {
        let store = MemoryStore::new();
        store.delete(Category::Pages, "nothing").unwrap();
        assert!(store.is_empty());
        assert!(store.load(Category::Pages, "nothing").unwrap_err().is_not_found());
    }
}
