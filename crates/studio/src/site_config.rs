//! Config store: the current value of every site-wide config domain.
//!
//! Each domain has a saved value (its stored document, or the compiled
//! default when there is none) and may have an unsaved working value on
//! top of it. [`ConfigStore::edit`] and [`ConfigStore::reset`] only change
//! the working value; nothing is written until [`ConfigStore::set`] or
//! [`ConfigStore::save`]. Values are replaced whole; the core types provide
//! the copy-on-write helpers that build a new value from the current one.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use site_composer_core::{ConfigDomain, ConfigValue, DomainConfig};

use crate::error::StudioResult;
use crate::persistence::{Category, DocumentStore, PersistenceError};

/// Callback run after a domain value has been saved.
pub type SaveListener = Box<dyn FnMut(ConfigDomain, &ConfigValue) + Send>;

/// Owns the saved and working value of each config domain.
pub struct ConfigStore {
    store: Arc<dyn DocumentStore>,
    /// Values with a stored document; absent domains use their default.
    saved: BTreeMap<ConfigDomain, ConfigValue>,
    /// Unsaved working values, shadowing `saved`.
    edits: BTreeMap<ConfigDomain, ConfigValue>,
    listeners: Vec<SaveListener>,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("saved", &self.saved)
            .field("edits", &self.edits)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    /// A store where every domain holds its default.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            saved: BTreeMap::new(),
            edits: BTreeMap::new(),
            listeners: Vec::new(),
        }
    }

    /// Load each domain's document. Missing documents leave the default in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Persistence` if a document exists but cannot be
    /// read or does not match its domain's shape.
    #[instrument(skip(store))]
    pub fn hydrate(store: Arc<dyn DocumentStore>) -> StudioResult<Self> {
        let mut config = Self::new(store);
        for domain in ConfigDomain::ALL {
            match config.store.load(Category::Config, domain.as_str()) {
                Ok(document) => {
                    let value =
                        ConfigValue::from_json(domain, document).map_err(PersistenceError::from)?;
                    config.saved.insert(domain, value);
                }
                Err(e) if e.is_not_found() => {
                    debug!(domain = %domain, "No stored config, using default");
                }
                Err(e) => return Err(e.into()),
            }
        }
        info!(persisted = config.saved.len(), "Loaded site config");
        Ok(config)
    }

    /// Current value of `domain`, including unsaved changes.
    #[must_use]
    pub fn get(&self, domain: ConfigDomain) -> Cow<'_, ConfigValue> {
        self.edits
            .get(&domain)
            .or_else(|| self.saved.get(&domain))
            .map_or_else(|| Cow::Owned(ConfigValue::default_for(domain)), Cow::Borrowed)
    }

    /// Current value of the domain held by `T`.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// use site_composer_core::SeoConfig;
    /// use site_composer_studio::{ConfigStore, MemoryStore};
    ///
    /// let config = ConfigStore::new(Arc::new(MemoryStore::new()));
    /// assert!(config.get_typed::<SeoConfig>().enable_sitemap);
    /// ```
    #[must_use]
    pub fn get_typed<T: DomainConfig>(&self) -> T {
        T::from_value(&self.get(T::DOMAIN))
            .cloned()
            .unwrap_or_default()
    }

    /// Returns `true` if `domain` has a stored document.
    #[must_use]
    pub fn is_persisted(&self, domain: ConfigDomain) -> bool {
        self.saved.contains_key(&domain)
    }

    /// Domains with a stored document, in domain order.
    pub fn persisted_domains(&self) -> impl Iterator<Item = ConfigDomain> + '_ {
        self.saved.keys().copied()
    }

    /// Returns `true` if the current value of `domain` differs from its
    /// saved value.
    #[must_use]
    pub fn has_unsaved_changes(&self, domain: ConfigDomain) -> bool {
        self.edits.get(&domain).is_some_and(|edit| {
            self.saved
                .get(&domain)
                .map_or_else(|| *edit != ConfigValue::default_for(domain), |saved| edit != saved)
        })
    }

    /// Register a callback run after every successful save.
    pub fn on_save(&mut self, listener: impl FnMut(ConfigDomain, &ConfigValue) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Replace a domain's working value without writing it.
    pub fn edit(&mut self, value: impl Into<ConfigValue>) {
        let value = value.into();
        self.edits.insert(value.domain(), value);
    }

    /// Put the compiled default back as the working value of `domain`,
    /// discarding unsaved changes. The stored document is untouched until
    /// the next save.
    ///
    /// Returns the default now in effect.
    pub fn reset(&mut self, domain: ConfigDomain) -> ConfigValue {
        let default = ConfigValue::default_for(domain);
        self.edits.insert(domain, default.clone());
        debug!(domain = %domain, "Reset site config to default, not saved");
        default
    }

    /// Replace a domain's value and write it.
    ///
    /// The document is written first; the in-memory value only changes and
    /// listeners only run once that succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Persistence` if writing fails.
    #[instrument(skip(self, value), fields(domain))]
    pub fn set(&mut self, value: impl Into<ConfigValue>) -> StudioResult<()> {
        let value = value.into();
        let domain = value.domain();
        tracing::Span::current().record("domain", domain.as_str());

        let document = serde_json::to_value(&value).map_err(PersistenceError::from)?;
        self.store.save(Category::Config, domain.as_str(), &document)?;

        self.notify(domain, &value);
        self.edits.remove(&domain);
        self.saved.insert(domain, value);
        info!("Saved site config");
        Ok(())
    }

    /// Write the current value of `domain`, including unsaved changes.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Persistence` if writing fails; the unsaved
    /// changes are kept in that case.
    pub fn save(&mut self, domain: ConfigDomain) -> StudioResult<()> {
        let value = self.get(domain).into_owned();
        self.set(value)
    }

    /// Delete the stored document of `domain` and drop unsaved changes, so
    /// the domain reads as its compiled default. Listeners are not run.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Persistence` if the document cannot be removed;
    /// the store is unchanged in that case.
    #[instrument(skip(self), fields(domain = %domain))]
    pub fn clear(&mut self, domain: ConfigDomain) -> StudioResult<()> {
        self.store.delete(Category::Config, domain.as_str())?;
        self.saved.remove(&domain);
        self.edits.remove(&domain);
        info!("Deleted stored site config");
        Ok(())
    }

    fn notify(&mut self, domain: ConfigDomain, value: &ConfigValue) {
        for listener in &mut self.listeners {
            listener(domain, value);
        }
    }
}
