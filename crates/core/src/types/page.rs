//! Pages: ordered compositions of section templates plus page metadata.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::{PageId, SectionId};
use super::slug::Slug;
use super::status::{MoveDirection, PageStatus, move_by_swaps, swap_adjacent};

/// Per-page search engine metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSeo {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

/// A page composed from section templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Unique page ID.
    pub id: PageId,
    pub title: String,
    /// URL slug, also the document key.
    pub slug: Slug,
    pub status: PageStatus,
    /// Day of the last status change or save.
    pub last_modified: NaiveDate,
    /// Referenced section templates, in render order.
    #[serde(default)]
    pub sections: Vec<SectionId>,
    #[serde(default)]
    pub seo: PageSeo,
}

impl Page {
    /// Title given to freshly created pages.
    pub const DEFAULT_TITLE: &'static str = "New Page";

    /// Create a draft page with the given title and a derived slug.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: PageId::new(format!("page-{}", PageId::generate())),
            slug: Slug::normalize(&title),
            title,
            status: PageStatus::Draft,
            last_modified: today(),
            sections: Vec::new(),
            seo: PageSeo::default(),
        }
    }

    /// Set the title and re-derive the slug from it.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.slug = Slug::normalize(&self.title);
    }

    /// Set the slug from free-form input, normalizing it.
    pub fn set_slug(&mut self, input: &str) {
        self.slug = Slug::normalize(input);
    }

    /// Set the status and stamp `last_modified` with today's date.
    pub fn set_status(&mut self, status: PageStatus) {
        self.status = status;
        self.touch();
    }

    /// Stamp `last_modified` with today's date.
    pub fn touch(&mut self) {
        self.last_modified = today();
    }

    /// Append a section reference unless it is already present.
    ///
    /// Returns `true` if the reference was appended.
    pub fn attach_section(&mut self, template_id: SectionId) -> bool {
        if self.sections.contains(&template_id) {
            return false;
        }
        self.sections.push(template_id);
        true
    }

    /// Remove the first reference to `template_id`.
    ///
    /// Returns `true` if a reference was removed.
    pub fn detach_section(&mut self, template_id: &SectionId) -> bool {
        match self.sections.iter().position(|id| id == template_id) {
            Some(index) => {
                self.sections.remove(index);
                true
            }
            None => false,
        }
    }

    /// Swap the section at `index` with its neighbour.
    pub fn move_section(&mut self, index: usize, direction: MoveDirection) -> bool {
        swap_adjacent(&mut self.sections, index, direction)
    }

    /// Move the section at `from` to `to` through adjacent swaps.
    ///
    /// Returns the number of swaps performed.
    pub fn reorder_section(&mut self, from: usize, to: usize) -> usize {
        move_by_swaps(&mut self.sections, from, to)
    }

    /// Returns `true` if the page references `template_id`.
    #[must_use]
    pub fn references(&self, template_id: &SectionId) -> bool {
        self.sections.contains(template_id)
    }

    /// Case-insensitive match of `query` against title and slug.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.slug.as_str().to_lowercase().contains(&query)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TITLE)
    }
}

/// Today's date in UTC, the granularity of `last_modified`.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
