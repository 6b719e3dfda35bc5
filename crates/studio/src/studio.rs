//! The studio: one of each store over a shared document store.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use site_composer_core::{PageId, SectionId, Slug};

use crate::config::StudioConfig;
use crate::error::{StudioError, StudioResult};
use crate::pages::PageStore;
use crate::persistence::{DocumentStore, FileStore};
use crate::sections::SectionRegistry;
use crate::site_config::ConfigStore;

/// A page referencing a section template that no longer exists.
///
/// This is a warning: rendering skips the reference, saving is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingReference {
    pub page_id: PageId,
    pub page_slug: Slug,
    pub template_id: SectionId,
}

impl std::fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "page '{}' references missing section template '{}'",
            self.page_slug, self.template_id
        )
    }
}

/// Counts shown by `sc-cli status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub pages: usize,
    pub published_pages: usize,
    pub sections: usize,
    pub persisted_config_domains: usize,
}

/// Owns the section registry, page store and config store.
pub struct Studio {
    store: Arc<dyn DocumentStore>,
    sections: SectionRegistry,
    pages: PageStore,
    config: ConfigStore,
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("sections", &self.sections)
            .field("pages", &self.pages)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Studio {
    /// Open the file-backed studio described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if any stored document cannot be loaded.
    pub fn open(config: &StudioConfig) -> StudioResult<Self> {
        let store = FileStore::new(config.data_dir.clone()).with_pretty(config.pretty_json);
        Self::with_store(Arc::new(store))
    }

    /// Hydrate every store from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if any stored document cannot be loaded.
    #[instrument(skip(store))]
    pub fn with_store(store: Arc<dyn DocumentStore>) -> StudioResult<Self> {
        let sections = SectionRegistry::hydrate(store.clone())?;
        let pages = PageStore::hydrate(store.clone())?;
        let config = ConfigStore::hydrate(store.clone())?;

        let studio = Self {
            store,
            sections,
            pages,
            config,
        };
        for dangling in studio.dangling_references() {
            warn!(page = %dangling.page_slug, template = %dangling.template_id, "Dangling section reference");
        }
        info!(
            pages = studio.pages.len(),
            sections = studio.sections.len(),
            "Studio ready"
        );
        Ok(studio)
    }

    /// The shared document store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    #[must_use]
    pub const fn sections(&self) -> &SectionRegistry {
        &self.sections
    }

    pub const fn sections_mut(&mut self) -> &mut SectionRegistry {
        &mut self.sections
    }

    #[must_use]
    pub const fn pages(&self) -> &PageStore {
        &self.pages
    }

    pub const fn pages_mut(&mut self) -> &mut PageStore {
        &mut self.pages
    }

    #[must_use]
    pub const fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub const fn config_mut(&mut self) -> &mut ConfigStore {
        &mut self.config
    }

    /// Page references to templates missing from the registry, in page
    /// order.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        self.pages
            .pages()
            .iter()
            .flat_map(|page| {
                page.sections
                    .iter()
                    .filter(|id| !self.sections.contains(id))
                    .map(move |id| DanglingReference {
                        page_id: page.id.clone(),
                        page_slug: page.slug.clone(),
                        template_id: id.clone(),
                    })
            })
            .collect()
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            pages: self.pages.len(),
            published_pages: self.pages.published_count(),
            sections: self.sections.len(),
            persisted_config_domains: self.config.persisted_domains().count(),
        }
    }

    /// Delete a section template. Pages keep their references, which are
    /// reported by [`dangling_references`](Self::dangling_references).
    ///
    /// # Errors
    ///
    /// `StudioError::NotFound` if the template does not exist, or a
    /// persistence error.
    pub fn delete_section_template(&mut self, template_id: &SectionId) -> StudioResult<()> {
        if !self.sections.contains(template_id) {
            return Err(StudioError::section_not_found(template_id));
        }
        self.sections.delete(template_id)?;
        let referencing = self.pages.referencing(template_id).count();
        if referencing > 0 {
            warn!(template = %template_id, pages = referencing, "Deleted template is still referenced");
        }
        Ok(())
    }

    /// Delete a section template and remove it from every page, saving the
    /// pages that changed.
    ///
    /// Returns the IDs of those pages.
    ///
    /// # Errors
    ///
    /// `StudioError::NotFound` if the template does not exist, or a
    /// persistence error. Pages saved before a failure stay saved.
    pub fn delete_section_template_everywhere(
        &mut self,
        template_id: &SectionId,
    ) -> StudioResult<Vec<PageId>> {
        self.delete_section_template(template_id)?;
        let affected = self.pages.detach_everywhere(template_id);
        for page_id in &affected {
            self.pages.persist(page_id)?;
        }
        Ok(affected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn studio() -> Studio {
        Studio::with_store(Arc::new(MemoryStore::new())).unwrap()
    }

    fn page_with(studio: &mut Studio, title: &str, template: &SectionId) -> PageId {
        let mut page = studio.pages().create();
        page.set_title(title);
        page.attach_section(template.clone());
        studio.pages_mut().save(page).unwrap().id
    }

    #[test]
    fn test_empty_studio() {
        let studio = studio();
        assert_eq!(
            studio.summary(),
            Summary {
                pages: 0,
                published_pages: 0,
                sections: 0,
                persisted_config_domains: 0,
            }
        );
        assert!(studio.dangling_references().is_empty());
    }

    #[test]
    fn test_delete_leaves_dangling_reference() {
        let mut studio = studio();
        let hero = studio.sections_mut().create("Hero Banner", "hero", "").id;
        studio.sections().save(&hero).unwrap();
        let page_id = page_with(&mut studio, "Home", &hero);
        assert!(studio.dangling_references().is_empty());

        studio.delete_section_template(&hero).unwrap();

        let dangling = studio.dangling_references();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].page_id, page_id);
        assert_eq!(
            dangling[0].to_string(),
            "page 'home' references missing section template 'hero'"
        );
        assert!(studio.pages().get(&page_id).unwrap().references(&hero));
    }

    #[test]
    fn test_delete_everywhere_detaches_and_saves() {
        let store = Arc::new(MemoryStore::new());
        let mut studio = Studio::with_store(store.clone()).unwrap();
        let hero = studio.sections_mut().create("Hero Banner", "hero", "").id;
        let page_id = page_with(&mut studio, "Home", &hero);

        let affected = studio.delete_section_template_everywhere(&hero).unwrap();
        assert_eq!(affected, [page_id]);
        assert!(studio.dangling_references().is_empty());

        let reopened = Studio::with_store(store).unwrap();
        assert!(reopened.pages().pages()[0].sections.is_empty());
    }

    #[test]
    fn test_delete_unknown_template() {
        let mut studio = studio();
        assert!(matches!(
            studio.delete_section_template(&SectionId::new("nope")),
            Err(StudioError::NotFound { .. })
        ));
    }
}
