//! Field schemas: the typed input slots of a section template.

use serde::{Deserialize, Serialize};

use super::id::FieldId;

/// The kind of input a field collects.
///
/// Serialized as the lowercase tag (`"text"`, `"richtext"`, ...). Tags that
/// are not recognized are kept verbatim in [`FieldType::Other`] so documents
/// written by newer editors survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    RichText,
    Image,
    Select,
    Checkbox,
    Repeater,
    Link,
    Color,
    /// A type tag this version does not know about.
    Other(String),
}

impl FieldType {
    /// Every known field type, in editor order.
    pub const KNOWN: [Self; 9] = [
        Self::Text,
        Self::Textarea,
        Self::RichText,
        Self::Image,
        Self::Select,
        Self::Checkbox,
        Self::Repeater,
        Self::Link,
        Self::Color,
    ];

    /// The serialized tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::RichText => "richtext",
            Self::Image => "image",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Repeater => "repeater",
            Self::Link => "link",
            Self::Color => "color",
            Self::Other(tag) => tag,
        }
    }

    /// Human-readable label shown in field type pickers.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Text => "Text",
            Self::Textarea => "Textarea",
            Self::RichText => "Rich Text",
            Self::Image => "Image",
            Self::Select => "Select",
            Self::Checkbox => "Checkbox",
            Self::Repeater => "Repeater",
            Self::Link => "Link",
            Self::Color => "Color",
            Self::Other(tag) => tag,
        }
    }

    /// Returns `true` for [`FieldType::Other`].
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            "richtext" => Self::RichText,
            "image" => Self::Image,
            "select" => Self::Select,
            "checkbox" => Self::Checkbox,
            "repeater" => Self::Repeater,
            "link" => Self::Link,
            "color" => Self::Color,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_owned())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One choice of a `select` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One typed input slot within a section template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    /// Unique field ID.
    pub id: FieldId,
    /// Machine name, unique within the owning template.
    pub name: String,
    /// Input kind.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Label shown to editors.
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Choices for `select` fields, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
}

impl FieldSchema {
    /// Build a field from a draft, assigning it a fresh ID.
    ///
    /// Names and labels are trimmed; no validation happens here.
    #[must_use]
    pub fn from_draft(draft: FieldDraft) -> Self {
        Self {
            id: FieldId::generate(),
            name: draft.name.trim().to_owned(),
            field_type: draft.field_type,
            label: draft.label.trim().to_owned(),
            placeholder: draft.placeholder.filter(|p| !p.is_empty()),
            required: draft.required,
            default_value: draft.default_value,
            options: draft.options,
        }
    }

    /// Returns the defined select options, or an empty slice.
    #[must_use]
    pub fn options(&self) -> &[FieldOption] {
        self.options.as_deref().unwrap_or_default()
    }
}

/// Input for adding a field to a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDraft {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<FieldOption>>,
}

impl FieldDraft {
    /// Start a draft with the three mandatory attributes.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<FieldType>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = Some(options);
        self
    }
}
