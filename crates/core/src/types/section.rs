//! Section templates: reusable, schema-defined content blocks.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::{FieldSchema, FieldType};
use super::id::{FieldId, SectionId};

/// A reusable content block definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTemplate {
    /// Unique template ID, also the document key.
    pub id: SectionId,
    /// Display name (e.g. "Hero Banner").
    pub name: String,
    pub description: String,
    /// Free-form category tag (e.g. "hero", "testimonials").
    #[serde(rename = "type")]
    pub section_type: String,
    /// Field schemas in display order.
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SectionTemplate {
    /// Create an empty template stamped with the current time.
    #[must_use]
    pub fn new(
        id: SectionId,
        name: impl Into<String>,
        section_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            description: description.into(),
            section_type: section_type.into(),
            fields: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Look up a field by ID.
    #[must_use]
    pub fn field(&self, id: &FieldId) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| &f.id == id)
    }

    /// Position of a field in the display order.
    #[must_use]
    pub fn field_index(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|f| &f.id == id)
    }

    /// Look up a field by machine name.
    #[must_use]
    pub fn field_named(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Refresh `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Check the schema for problems.
    ///
    /// Errors are hard invariants (blank or duplicate names, blank labels,
    /// blank template name). Warnings are soft constraints such as a select
    /// field without options, or an unrecognized field type.
    #[must_use]
    pub fn validate(&self) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(SchemaIssue::error(None, "template name is empty"));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            let at = Some(field.id.clone());
            if field.name.trim().is_empty() {
                issues.push(SchemaIssue::error(at.clone(), "field name is empty"));
            } else if !seen.insert(field.name.as_str()) {
                issues.push(SchemaIssue::error(
                    at.clone(),
                    format!("duplicate field name '{}'", field.name),
                ));
            }
            if field.label.trim().is_empty() {
                issues.push(SchemaIssue::error(
                    at.clone(),
                    format!("field '{}' has an empty label", field.name),
                ));
            }
            match &field.field_type {
                FieldType::Select if field.options().is_empty() => {
                    issues.push(SchemaIssue::warning(
                        at,
                        format!("select field '{}' has no options", field.name),
                    ));
                }
                FieldType::Other(tag) => {
                    issues.push(SchemaIssue::warning(
                        at,
                        format!("field '{}' has unknown type '{tag}'", field.name),
                    ));
                }
                _ => {}
            }
        }

        issues
    }
}

/// How serious a [`SchemaIssue`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Reported, but the template can still be saved.
    Warning,
    /// Blocks saving the template.
    Error,
}

/// A problem found by [`SectionTemplate::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaIssue {
    /// The offending field, or `None` for template-level issues.
    pub field: Option<FieldId>,
    pub message: String,
    pub severity: Severity,
}

impl SchemaIssue {
    fn error(field: Option<FieldId>, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    fn warning(field: Option<FieldId>, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl std::fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match &self.field {
            Some(field) => write!(f, "{level} [{field}]: {}", self.message),
            None => write!(f, "{level}: {}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::field::{FieldDraft, FieldOption};

    fn hero() -> SectionTemplate {
        SectionTemplate::new(
            SectionId::new("hero"),
            "Hero Banner",
            "hero",
            "A full-width banner with heading, subheading, and call-to-action button",
        )
    }

    #[test]
    fn test_new_template_is_empty() {
        let template = hero();
        assert!(template.fields.is_empty());
        assert_eq!(template.created_at, template.updated_at);
    }

    #[test]
    fn test_json_uses_type_and_camel_case() {
        let json = serde_json::to_value(hero()).expect("serialize");
        assert_eq!(json["type"], "hero");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json["fields"].as_array().is_some_and(Vec::is_empty));
    }

    #[test]
    fn test_validate_clean_template() {
        let mut template = hero();
        template
            .fields
            .push(FieldSchema::from_draft(FieldDraft::new("heading", "text", "Heading")));
        assert!(template.validate().is_empty());
    }

    #[test]
    fn test_validate_select_without_options_is_warning() {
        let mut template = hero();
        template
            .fields
            .push(FieldSchema::from_draft(FieldDraft::new("layout", "select", "Layout")));
        let issues = template.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);

        template.fields[0].options = Some(vec![FieldOption::new("Wide", "wide")]);
        assert!(template.validate().is_empty());
    }

    #[test]
    fn test_validate_duplicate_names_is_error() {
        let mut template = hero();
        for _ in 0..2 {
            template
                .fields
                .push(FieldSchema::from_draft(FieldDraft::new("heading", "text", "Heading")));
        }
        let issues = template.validate();
        assert!(issues.iter().any(SchemaIssue::is_error));
        assert!(issues[0].to_string().contains("duplicate field name 'heading'"));
    }

    #[test]
    fn test_validate_unknown_type_is_warning() {
        let mut template = hero();
        template
            .fields
            .push(FieldSchema::from_draft(FieldDraft::new("clip", "video", "Clip")));
        let issues = template.validate();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }
}
