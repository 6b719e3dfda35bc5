//! UI-agnostic preview descriptors for field schemas.
//!
//! A presentation layer renders a [`PreviewDescriptor`] however it likes;
//! the studio only decides which control a field maps to and which
//! constraints come with it.

use serde::Serialize;

use site_composer_core::{FieldId, FieldOption, FieldSchema, FieldType};

/// Message shown by select controls without options.
pub const NO_OPTIONS_MESSAGE: &str = "No options defined";

/// Default swatch for color fields without a default value.
const DEFAULT_COLOR: &str = "#000000";

/// The control a field is previewed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    TextInput {
        placeholder: String,
    },
    TextArea {
        placeholder: String,
    },
    RichText {
        placeholder: String,
    },
    ImageUpload {
        prompt: String,
    },
    Select {
        placeholder: String,
        options: Vec<FieldOption>,
        /// Shown instead of the options when none are defined.
        #[serde(skip_serializing_if = "Option::is_none")]
        empty_message: Option<String>,
    },
    Checkbox {
        label: String,
    },
    Repeater {
        heading: String,
    },
    Link {
        placeholder: String,
    },
    Color {
        value: String,
    },
}

/// Everything a presentation layer needs to draw one field preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewDescriptor {
    pub field_id: FieldId,
    pub name: String,
    pub label: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(flatten)]
    pub control: Control,
    /// Set when the field type was not recognized and a generic text input
    /// is used instead.
    pub fallback: bool,
}

/// Describe how `field` should be previewed.
///
/// Unrecognized field types degrade to a plain text input with a
/// `"<type> field"` placeholder instead of failing.
#[must_use]
pub fn render_preview(field: &FieldSchema) -> PreviewDescriptor {
    let placeholder_or = |prefix: &str| {
        field
            .placeholder
            .clone()
            .unwrap_or_else(|| format!("{prefix} {}", field.label))
    };

    let control = match &field.field_type {
        FieldType::Text => Control::TextInput {
            placeholder: placeholder_or("Enter"),
        },
        FieldType::Textarea => Control::TextArea {
            placeholder: placeholder_or("Enter"),
        },
        FieldType::RichText => Control::RichText {
            placeholder: placeholder_or("Enter"),
        },
        FieldType::Image => Control::ImageUpload {
            prompt: format!("Upload {}", field.label),
        },
        FieldType::Select => {
            let options = field.options().to_vec();
            let empty_message = options
                .is_empty()
                .then(|| NO_OPTIONS_MESSAGE.to_string());
            Control::Select {
                placeholder: placeholder_or("Select"),
                options,
                empty_message,
            }
        }
        FieldType::Checkbox => Control::Checkbox {
            label: field.label.clone(),
        },
        FieldType::Repeater => Control::Repeater {
            heading: format!("{} Items", field.label),
        },
        FieldType::Link => Control::Link {
            placeholder: field
                .placeholder
                .clone()
                .unwrap_or_else(|| "https://".to_string()),
        },
        FieldType::Color => Control::Color {
            value: field
                .default_value
                .clone()
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        },
        FieldType::Other(tag) => Control::TextInput {
            placeholder: format!("{tag} field"),
        },
    };

    PreviewDescriptor {
        field_id: field.id.clone(),
        name: field.name.clone(),
        label: field.label.clone(),
        required: field.required,
        default_value: field.default_value.clone(),
        control,
        fallback: field.field_type.is_unknown(),
    }
}

#[cfg(test)]
mod tests {
    use site_composer_core::FieldDraft;

    use super::*;

    fn field(field_type: &str, label: &str) -> FieldSchema {
        FieldSchema::from_draft(FieldDraft::new("f", field_type, label))
    }

    #[test]
    fn test_text_uses_label_placeholder() {
        let preview = render_preview(&field("text", "Heading"));
        assert_eq!(
            preview.control,
            Control::TextInput {
                placeholder: "Enter Heading".to_string()
            }
        );
        assert!(!preview.fallback);
    }

    #[test]
    fn test_explicit_placeholder_wins() {
        let f = FieldSchema::from_draft(
            FieldDraft::new("sub", "textarea", "Subheading").placeholder("Say more"),
        );
        assert_eq!(
            render_preview(&f).control,
            Control::TextArea {
                placeholder: "Say more".to_string()
            }
        );
    }

    #[test]
    fn test_select_without_options() {
        let preview = render_preview(&field("select", "Layout"));
        match preview.control {
            Control::Select {
                placeholder,
                options,
                empty_message,
            } => {
                assert_eq!(placeholder, "Select Layout");
                assert!(options.is_empty());
                assert_eq!(empty_message.as_deref(), Some(NO_OPTIONS_MESSAGE));
            }
            other => panic!("unexpected control {other:?}"),
        }
    }

    #[test]
    fn test_select_with_options() {
        let f = FieldSchema::from_draft(
            FieldDraft::new("layout", "select", "Layout")
                .options(vec![FieldOption::new("Wide", "wide"), FieldOption::new("Boxed", "boxed")]),
        );
        let Control::Select {
            options,
            empty_message,
            ..
        } = render_preview(&f).control
        else {
            panic!("expected select");
        };
        assert_eq!(options.len(), 2);
        assert!(empty_message.is_none());
    }

    #[test]
    fn test_kind_specific_controls() {
        assert_eq!(
            render_preview(&field("image", "Background Image")).control,
            Control::ImageUpload {
                prompt: "Upload Background Image".to_string()
            }
        );
        assert_eq!(
            render_preview(&field("repeater", "Testimonials")).control,
            Control::Repeater {
                heading: "Testimonials Items".to_string()
            }
        );
        assert_eq!(
            render_preview(&field("checkbox", "Show Button")).control,
            Control::Checkbox {
                label: "Show Button".to_string()
            }
        );
        assert_eq!(
            render_preview(&field("color", "Accent")).control,
            Control::Color {
                value: "#000000".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_type_falls_back_to_text_input() {
        let preview = render_preview(&field("video", "Clip"));
        assert!(preview.fallback);
        assert_eq!(
            preview.control,
            Control::TextInput {
                placeholder: "video field".to_string()
            }
        );
    }

    #[test]
    fn test_every_known_type_renders_without_fallback() {
        for field_type in FieldType::KNOWN {
            let f = FieldSchema::from_draft(FieldDraft::new("f", field_type, "Label"));
            assert!(!render_preview(&f).fallback);
        }
    }

    #[test]
    fn test_descriptor_json() {
        let json = serde_json::to_value(render_preview(&field("text", "Heading"))).expect("json");
        assert_eq!(json["control"], "text_input");
        assert_eq!(json["placeholder"], "Enter Heading");
        assert_eq!(json["required"], false);
    }
}
