//! Integration tests for page composition, slugs and publication status.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use site_composer_core::{Page, PageStatus, SectionId, today};
use site_composer_integration_tests::FlakyStore;
use site_composer_studio::{Category, DocumentStore, MemoryStore, PageStore, StudioError};

fn hero() -> SectionId {
    SectionId::new("hero")
}

// =============================================================================
// Composition Tests
// =============================================================================

#[test]
fn test_new_page_with_duplicate_hero_attach() {
    let mut pages = PageStore::new(Arc::new(MemoryStore::new()));
    let page = pages.create();
    assert_eq!(page.title, "New Page");
    assert_eq!(page.slug.as_str(), "new-page");
    assert_eq!(page.status, PageStatus::Draft);

    let page = pages.save(page).unwrap();
    assert!(pages.attach_section(&page.id, hero()).unwrap());
    assert!(!pages.attach_section(&page.id, hero()).unwrap());
    assert_eq!(pages.get(&page.id).unwrap().sections, [hero()]);
}

#[test]
fn test_section_reorder_is_permutation() {
    let mut pages = PageStore::new(Arc::new(MemoryStore::new()));
    let page = pages.save(pages.create()).unwrap();
    let ids = ["hero", "features", "testimonials", "pricing", "cta"];
    for id in ids {
        pages.attach_section(&page.id, SectionId::new(id)).unwrap();
    }

    pages.move_section_down(&page.id, 0).unwrap();
    pages.move_section_up(&page.id, 4).unwrap();
    pages.reorder_section(&page.id, 1, 3).unwrap();
    pages.move_section_up(&page.id, 0).unwrap();
    pages.move_section_down(&page.id, 9).unwrap();

    let mut current: Vec<String> = pages
        .get(&page.id)
        .unwrap()
        .sections
        .iter()
        .map(ToString::to_string)
        .collect();
    current.sort();
    let mut expected = ids.to_vec();
    expected.sort_unstable();
    assert_eq!(current, expected);
}

#[test]
fn test_title_edit_derives_slug() {
    let mut page = Page::default();
    page.set_title("About  Our\tTeam");
    assert_eq!(page.slug.as_str(), "about-our-team");
}

// =============================================================================
// Save Tests
// =============================================================================

#[test]
fn test_slug_conflict_is_rejected() {
    let mut pages = PageStore::new(Arc::new(MemoryStore::new()));
    pages.save(Page::new("Contact")).unwrap();

    let err = pages.save(Page::new("Contact")).unwrap_err();
    assert!(matches!(err, StudioError::Conflict(_)));
    assert_eq!(pages.len(), 1);
}

#[test]
fn test_renamed_slug_removes_old_document() {
    let store = Arc::new(MemoryStore::new());
    let mut pages = PageStore::new(store.clone());
    let mut page = pages.save(Page::new("Services")).unwrap();

    page.set_slug("What We Do");
    pages.save(page).unwrap();

    assert_eq!(store.list(Category::Pages).unwrap(), ["what-we-do"]);
    let hydrated = PageStore::hydrate(store).unwrap();
    assert_eq!(hydrated.len(), 1);
    assert!(hydrated.get_by_slug("what-we-do").is_some());
}

#[test]
fn test_status_toggle_round_trip() {
    let store = Arc::new(MemoryStore::new());
    let mut pages = PageStore::new(store.clone());
    let page = pages.save(Page::new("Launch")).unwrap();

    pages.toggle_status(&page.id).unwrap();
    let saved = pages.persist(&page.id).unwrap();
    assert_eq!(saved.status, PageStatus::Published);
    assert_eq!(saved.last_modified, today());

    let document = store.load(Category::Pages, "launch").unwrap();
    assert_eq!(document["status"], "published");
    assert_eq!(document["lastModified"], today().to_string());
}

#[test]
fn test_failed_save_leaves_store_unchanged() {
    let store = FlakyStore::new();
    let mut pages = PageStore::new(store.clone());
    let original = pages.save(Page::new("Home")).unwrap();

    store.fail_writes(true);
    let mut edited = original.clone();
    edited.set_title("Home Sweet Home");
    let err = pages.save(edited).unwrap_err();
    assert!(matches!(err, StudioError::Persistence(_)));
    assert_eq!(pages.get(&original.id).unwrap(), &original);

    let err = pages.delete(&original.id).unwrap_err();
    assert!(matches!(err, StudioError::Persistence(_)));
    assert_eq!(pages.len(), 1);

    store.fail_writes(false);
    pages.delete(&original.id).unwrap();
    assert!(pages.is_empty());
    assert!(store.inner().is_empty());
}

#[test]
fn test_find_by_text() {
    let mut pages = PageStore::new(Arc::new(MemoryStore::new()));
    pages.save(Page::new("About Us")).unwrap();
    pages.save(Page::new("Contact")).unwrap();
    let mut faq = Page::new("Questions");
    faq.set_slug("faq");
    pages.save(faq).unwrap();

    let titles: Vec<_> = pages.find_by_text("faq").map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Questions"]);
    assert_eq!(pages.find_by_text("US").count(), 1);
}
