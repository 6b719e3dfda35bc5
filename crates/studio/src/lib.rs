//! Site Composer Studio - the composition and configuration engine.
//!
//! Operators build pages out of reusable section templates and manage the
//! site-wide configuration domains. This crate owns that state and its
//! persistence:
//!
//! - [`SectionRegistry`] - section templates and their field schemas
//! - [`PageStore`] - pages, their ordered section references and slugs
//! - [`ConfigStore`] - header, footer, navigation, SEO and scripts settings
//! - [`DocumentStore`] - the JSON document adapter (file or in-memory)
//! - [`Studio`] - one of each store over a shared adapter
//!
//! # Persistence model
//!
//! Commands mutate in-memory state; nothing is written until an explicit
//! save. Saves, deletes and config resets write through first and only
//! update memory once the adapter succeeds, so a failed write leaves the
//! stores as they were.
//!
//! ```
//! # use std::sync::Arc;
//! use site_composer_core::FieldDraft;
//! use site_composer_studio::{MemoryStore, Studio};
//!
//! let mut studio = Studio::with_store(Arc::new(MemoryStore::new()))?;
//! let hero = studio.sections_mut().create("Hero Banner", "hero", "").id;
//! studio
//!     .sections_mut()
//!     .add_field(&hero, FieldDraft::new("heading", "text", "Heading"))?;
//! studio.sections().save(&hero)?;
//!
//! let mut page = studio.pages().create();
//! page.attach_section(hero);
//! let page = studio.pages_mut().save(page)?;
//! assert_eq!(page.slug.as_str(), "new-page");
//! # Ok::<(), site_composer_studio::StudioError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod pages;
pub mod persistence;
pub mod preview;
pub mod sections;
pub mod site_config;
pub mod studio;

pub use config::{ConfigError, StudioConfig};
pub use error::{EntityKind, StudioError, StudioResult};
pub use pages::PageStore;
pub use persistence::{Category, DocumentStore, FileStore, MemoryStore, PersistenceError};
pub use preview::{Control, PreviewDescriptor, render_preview};
pub use sections::{SectionRegistry, TemplateMetadata};
pub use site_config::{ConfigStore, SaveListener};
pub use studio::{DanglingReference, Studio, Summary};
