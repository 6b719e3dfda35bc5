//! URL slug type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when validating a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The slug is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The slug is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The slug contains a path separator.
    #[error("slug cannot contain '/' or '\\'")]
    PathSeparator,
    /// The slug starts with a dot.
    #[error("slug cannot start with '.'")]
    LeadingDot,
    /// The slug contains a NUL character.
    #[error("slug cannot contain NUL characters")]
    Nul,
}

/// A page URL slug.
///
/// Slugs are normalized eagerly: every edit lowercases the input and
/// replaces each run of whitespace with a single `-`. Normalization never
/// fails; [`Slug::validate`] is applied when a page is saved, since the slug
/// doubles as the page's document key.
///
/// ## Examples
///
/// ```
/// use site_composer_core::Slug;
///
/// assert_eq!(Slug::normalize("New Page").as_str(), "new-page");
/// assert_eq!(Slug::normalize("About  Us\tToday").as_str(), "about-us-today");
/// assert!(Slug::normalize("   ").validate().is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 200;

    /// Normalize free-form input (a title or a typed slug) into a slug.
    #[must_use]
    pub fn normalize(input: &str) -> Self {
        let mut slug = String::with_capacity(input.len());
        let mut in_whitespace = false;
        for ch in input.chars() {
            if ch.is_whitespace() {
                if !in_whitespace {
                    slug.push('-');
                }
                in_whitespace = true;
            } else {
                slug.extend(ch.to_lowercase());
                in_whitespace = false;
            }
        }
        Self(slug)
    }

    /// Check that the slug can be used as a page address and document key.
    ///
    /// # Errors
    ///
    /// Returns an error if the slug:
    /// - Is empty or consists only of separators
    /// - Is longer than 200 characters
    /// - Contains a path separator
    /// - Starts with a dot
    /// - Contains a NUL character
    pub fn validate(&self) -> Result<(), SlugError> {
        if self.0.trim_matches('-').is_empty() {
            return Err(SlugError::Empty);
        }
        if self.0.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if self.0.contains(['/', '\\']) {
            return Err(SlugError::PathSeparator);
        }
        if self.0.starts_with('.') {
            return Err(SlugError::LeadingDot);
        }
        if self.0.contains('\0') {
            return Err(SlugError::Nul);
        }
        Ok(())
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Slug {
    fn from(s: &str) -> Self {
        Self::normalize(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
