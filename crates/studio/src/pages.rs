//! Page store: owns the pages and their section compositions.
//!
//! Pages are stored under their slug. The store remembers which key each
//! page was last written to, so renaming a slug moves the document instead
//! of leaving a stale copy behind.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use site_composer_core::{MoveDirection, Page, PageId, PageStatus, SectionId, today};

use crate::error::{StudioError, StudioResult};
use crate::persistence::{self, Category, DocumentStore};

/// Owns every [`Page`] of the site.
pub struct PageStore {
    store: Arc<dyn DocumentStore>,
    pages: Vec<Page>,
    /// Document key each persisted page currently lives under, exactly as
    /// listed by the store.
    persisted: BTreeMap<PageId, String>,
}

impl std::fmt::Debug for PageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageStore")
            .field("pages", &self.pages.len())
            .field("persisted", &self.persisted.len())
            .finish_non_exhaustive()
    }
}

impl PageStore {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            pages: Vec::new(),
            persisted: BTreeMap::new(),
        }
    }

    /// Load every page document from the store.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Persistence` if any document cannot be listed,
    /// read or decoded.
    #[instrument(skip(store))]
    pub fn hydrate(store: Arc<dyn DocumentStore>) -> StudioResult<Self> {
        let mut pages = Self::new(store);
        for key in pages.store.list(Category::Pages)? {
            let page: Page = persistence::load_as(pages.store.as_ref(), Category::Pages, &key)?;
            if page.slug.as_str() != key {
                warn!(key = %key, slug = %page.slug, "Page document key differs from slug");
            }
            if pages.persisted.contains_key(&page.id) {
                warn!(key = %key, id = %page.id, "Skipping page with duplicate id");
                continue;
            }
            pages.persisted.insert(page.id.clone(), key);
            pages.pages.push(page);
        }
        info!(count = pages.pages.len(), "Loaded pages");
        Ok(pages)
    }

    /// A fresh draft page titled "New Page". It is not part of the store
    /// until it is saved.
    #[must_use]
    pub fn create(&self) -> Page {
        Page::default()
    }

    /// All pages, in store order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    #[must_use]
    pub fn get(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn get_by_slug(&self, slug: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.slug.as_str() == slug)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Number of published pages.
    #[must_use]
    pub fn published_count(&self) -> usize {
        self.pages.iter().filter(|p| p.status.is_published()).count()
    }

    /// Returns `true` if the page has been written to the store.
    #[must_use]
    pub fn is_persisted(&self, id: &PageId) -> bool {
        self.persisted.contains_key(id)
    }

    /// Pages whose title or slug contains `query`, ignoring case.
    ///
    /// The iterator is lazy and can be cloned to restart the search.
    pub fn find_by_text<'a>(
        &'a self,
        query: &str,
    ) -> impl Iterator<Item = &'a Page> + Clone + 'a {
        let query = query.to_lowercase();
        self.pages.iter().filter(move |p| p.matches(&query))
    }

    /// Pages referencing `template_id`.
    pub fn referencing<'a>(
        &'a self,
        template_id: &'a SectionId,
    ) -> impl Iterator<Item = &'a Page> + 'a {
        self.pages.iter().filter(move |p| p.references(template_id))
    }

    fn get_mut(&mut self, id: &PageId) -> StudioResult<&mut Page> {
        self.pages
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| StudioError::page_not_found(id))
    }

    /// Append a section reference unless the page already has it.
    ///
    /// Returns `true` if the reference was appended.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` if the page does not exist.
    pub fn attach_section(&mut self, page_id: &PageId, template_id: SectionId) -> StudioResult<bool> {
        let page = self.get_mut(page_id)?;
        let attached = page.attach_section(template_id);
        debug!(page = %page_id, attached, "Attach section");
        Ok(attached)
    }

    /// Remove the first reference to `template_id`. A no-op if absent.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` if the page does not exist.
    pub fn detach_section(&mut self, page_id: &PageId, template_id: &SectionId) -> StudioResult<bool> {
        let page = self.get_mut(page_id)?;
        Ok(page.detach_section(template_id))
    }

    /// Swap the section at `index` with the one before it.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` if the page does not exist.
    pub fn move_section_up(&mut self, page_id: &PageId, index: usize) -> StudioResult<bool> {
        Ok(self.get_mut(page_id)?.move_section(index, MoveDirection::Up))
    }

    /// Swap the section at `index` with the one after it.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` if the page does not exist.
    pub fn move_section_down(&mut self, page_id: &PageId, index: usize) -> StudioResult<bool> {
        Ok(self.get_mut(page_id)?.move_section(index, MoveDirection::Down))
    }

    /// Move the section at `from` to `to` (clamped) through adjacent swaps.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` if the page does not exist.
    pub fn reorder_section(&mut self, page_id: &PageId, from: usize, to: usize) -> StudioResult<usize> {
        Ok(self.get_mut(page_id)?.reorder_section(from, to))
    }

    /// Set the publication status and stamp `lastModified`.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` if the page does not exist.
    pub fn set_status(&mut self, page_id: &PageId, status: PageStatus) -> StudioResult<()> {
        self.get_mut(page_id)?.set_status(status);
        Ok(())
    }

    /// Flip between draft and published. Returns the new status.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` if the page does not exist.
    pub fn toggle_status(&mut self, page_id: &PageId) -> StudioResult<PageStatus> {
        let page = self.get_mut(page_id)?;
        let status = page.status.toggled();
        page.set_status(status);
        Ok(status)
    }

    /// Remove `template_id` from every page, in memory only.
    ///
    /// Returns the IDs of the pages that changed; save them to make the
    /// change durable.
    pub fn detach_everywhere(&mut self, template_id: &SectionId) -> Vec<PageId> {
        let mut affected = Vec::new();
        for page in &mut self.pages {
            let before = page.sections.len();
            page.sections.retain(|id| id != template_id);
            if page.sections.len() != before {
                affected.push(page.id.clone());
            }
        }
        if !affected.is_empty() {
            info!(template = %template_id, pages = affected.len(), "Detached section from pages");
        }
        affected
    }

    /// Insert or replace a page and write it to the store.
    ///
    /// `lastModified` is stamped with today's date. When the slug changed
    /// since the last save, the document under the old slug is removed once
    /// the new one is written. The store is only updated after persistence
    /// succeeds.
    ///
    /// # Errors
    ///
    /// - `StudioError::ValidationFailed` if the slug is unusable
    /// - `StudioError::Conflict` if another page already uses the slug
    /// - `StudioError::Persistence` if writing fails
    #[instrument(skip(self, page), fields(page = %page.id, slug = %page.slug))]
    pub fn save(&mut self, mut page: Page) -> StudioResult<Page> {
        page.slug
            .validate()
            .map_err(|e| StudioError::ValidationFailed(format!("invalid slug '{}': {e}", page.slug)))?;

        if let Some(other) = self
            .pages
            .iter()
            .find(|p| p.id != page.id && p.slug == page.slug)
        {
            return Err(StudioError::Conflict(format!(
                "slug '{}' is already used by page '{}'",
                page.slug, other.id
            )));
        }

        page.last_modified = today();
        persistence::save_as(
            self.store.as_ref(),
            Category::Pages,
            page.slug.as_str(),
            &page,
        )?;

        if let Some(old) = self
            .persisted
            .get(&page.id)
            .filter(|old| old.as_str() != page.slug.as_str())
        {
            if let Err(e) = self.store.delete(Category::Pages, old) {
                warn!(old = %old, error = %e, "Failed to remove old page document, rolling back");
                if let Err(cleanup) = self.store.delete(Category::Pages, page.slug.as_str()) {
                    warn!(error = %cleanup, "Failed to remove new page document");
                }
                return Err(e.into());
            }
            debug!(old = %old, "Removed page document under previous slug");
        }

        self.persisted
            .insert(page.id.clone(), page.slug.as_str().to_string());
        match self.pages.iter_mut().find(|p| p.id == page.id) {
            Some(existing) => *existing = page.clone(),
            None => self.pages.push(page.clone()),
        }
        info!(status = %page.status, sections = page.sections.len(), "Saved page");
        Ok(page)
    }

    /// Save the store's current copy of a page, e.g. after section or
    /// status commands.
    ///
    /// # Errors
    ///
    /// `StudioError::NotFound` if the page does not exist, otherwise as
    /// [`save`](Self::save).
    pub fn persist(&mut self, page_id: &PageId) -> StudioResult<Page> {
        let page = self
            .get(page_id)
            .cloned()
            .ok_or_else(|| StudioError::page_not_found(page_id))?;
        self.save(page)
    }

    /// Delete a page from the store and from memory. Section templates are
    /// not affected.
    ///
    /// # Errors
    ///
    /// - `StudioError::NotFound` if the page does not exist
    /// - `StudioError::Persistence` if the document cannot be removed; the
    ///   page stays in memory in that case
    #[instrument(skip(self), fields(page = %page_id))]
    pub fn delete(&mut self, page_id: &PageId) -> StudioResult<Page> {
        let index = self
            .pages
            .iter()
            .position(|p| &p.id == page_id)
            .ok_or_else(|| StudioError::page_not_found(page_id))?;

        if let Some(key) = self.persisted.get(page_id) {
            self.store.delete(Category::Pages, key)?;
        }
        self.persisted.remove(page_id);
        let page = self.pages.remove(index);
        info!(slug = %page.slug, "Deleted page");
        Ok(page)
    }
}
