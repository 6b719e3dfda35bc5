//! Site Composer Core - Shared content and configuration types.
//!
//! This crate provides the data model used by all Site Composer components:
//! - `studio` - Section registry, page store, config store and persistence
//! - `cli` - Command-line tools for inspecting and seeding a site-data directory
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations on them - no I/O,
//! no persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, slugs, field schemas, section templates, pages
//!   and the five site configuration domains

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
