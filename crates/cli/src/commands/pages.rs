//! Page commands.
//!
//! # Usage
//!
//! ```bash
//! sc-cli pages list
//! sc-cli pages list --query about
//! sc-cli pages publish <page id>
//! sc-cli pages unpublish <page id>
//! ```

use site_composer_core::{PageId, PageStatus};
use site_composer_studio::{EntityKind, Studio, StudioError};

use super::{CommandError, emit};

/// Print one tab-separated line per page: id, slug, status, last modified,
/// section count and title.
pub fn list(studio: &Studio, query: Option<&str>) -> Result<(), CommandError> {
    let pages = studio.pages().find_by_text(query.unwrap_or_default());
    let mut count = 0;
    for page in pages {
        emit(format_args!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            page.id,
            page.slug,
            page.status,
            page.last_modified,
            page.sections.len(),
            page.title
        ))?;
        count += 1;
    }
    tracing::debug!(count, "Listed pages");
    Ok(())
}

/// Publish or unpublish a page and save it.
pub fn publish(studio: &mut Studio, id: &str, published: bool) -> Result<(), CommandError> {
    let id = PageId::new(id);
    let mut page = studio
        .pages()
        .get(&id)
        .cloned()
        .ok_or_else(|| StudioError::NotFound {
            kind: EntityKind::Page,
            id: id.to_string(),
        })?;

    let status = if published {
        PageStatus::Published
    } else {
        PageStatus::Draft
    };
    if page.status == status {
        tracing::info!("Page '{}' is already {status}", page.slug);
        return Ok(());
    }

    page.set_status(status);
    let page = studio.pages_mut().save(page)?;
    tracing::info!("Page '{}' is now {}", page.slug, page.status);
    Ok(())
}
