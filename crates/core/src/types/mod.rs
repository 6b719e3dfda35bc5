//! Core types for Site Composer.
//!
//! This module provides the data model shared by the stores and the
//! persistence layer.

pub mod field;
pub mod id;
pub mod page;
pub mod section;
pub mod site_config;
pub mod slug;
pub mod status;

pub use field::{FieldDraft, FieldOption, FieldSchema, FieldType};
pub use id::*;
pub use page::{Page, PageSeo, today};
pub use section::{SchemaIssue, SectionTemplate, Severity};
pub use site_config::*;
pub use slug::{Slug, SlugError};
pub use status::*;
