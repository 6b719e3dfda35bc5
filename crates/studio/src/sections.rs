//! Section registry: owns the reusable section templates.
//!
//! Field edits happen in memory and bump the template's `updatedAt`; nothing
//! is written until [`SectionRegistry::save`] is called. Deletion is written
//! through immediately.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use site_composer_core::{
    FieldDraft, FieldId, FieldSchema, MoveDirection, SchemaIssue, SectionId, SectionTemplate,
    Slug, move_by_swaps, swap_adjacent,
};

use crate::error::{StudioError, StudioResult};
use crate::persistence::{self, Category, DocumentStore};
use crate::preview::{PreviewDescriptor, render_preview};

/// Longest section type used verbatim as a template ID. Longer types get a
/// random ID so the document file name stays within filesystem limits.
const MAX_DERIVED_ID_LEN: usize = 64;

/// Partial metadata update for a template. `None` leaves a value unchanged.
#[derive(Debug, Clone, Default)]
pub struct TemplateMetadata {
    pub name: Option<String>,
    pub section_type: Option<String>,
    pub description: Option<String>,
}

/// Owns every [`SectionTemplate`] of the site.
pub struct SectionRegistry {
    store: Arc<dyn DocumentStore>,
    templates: Vec<SectionTemplate>,
}

impl std::fmt::Debug for SectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionRegistry")
            .field("templates", &self.templates.len())
            .finish_non_exhaustive()
    }
}

impl SectionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_templates(store, Vec::new())
    }

    /// Create a registry holding `templates`, without touching the store.
    #[must_use]
    pub fn with_templates(store: Arc<dyn DocumentStore>, templates: Vec<SectionTemplate>) -> Self {
        Self { store, templates }
    }

    /// Load every template document from the store.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Persistence` if any document cannot be listed,
    /// read or decoded.
    #[instrument(skip(store))]
    pub fn hydrate(store: Arc<dyn DocumentStore>) -> StudioResult<Self> {
        let mut templates = Vec::new();
        for key in store.list(Category::Sections)? {
            let template: SectionTemplate =
                persistence::load_as(store.as_ref(), Category::Sections, &key)?;
            if template.id.as_str() != key {
                warn!(key = %key, id = %template.id, "Section document key differs from template id");
            }
            templates.push(template);
        }
        info!(count = templates.len(), "Loaded section templates");
        Ok(Self::with_templates(store, templates))
    }

    /// All templates, in registry order.
    #[must_use]
    pub fn templates(&self) -> &[SectionTemplate] {
        &self.templates
    }

    #[must_use]
    pub fn get(&self, id: &SectionId) -> Option<&SectionTemplate> {
        self.templates.iter().find(|t| &t.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &SectionId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Templates whose name or description contains `query`, ignoring case.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a SectionTemplate> + 'a {
        let query = query.to_lowercase();
        self.templates.iter().filter(move |t| {
            t.name.to_lowercase().contains(&query) || t.description.to_lowercase().contains(&query)
        })
    }

    fn get_mut(&mut self, id: &SectionId) -> StudioResult<&mut SectionTemplate> {
        self.templates
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| StudioError::section_not_found(id))
    }

    /// Create an empty template and add it to the registry.
    ///
    /// The ID is derived from `section_type` (so a `hero` template is stored
    /// as `sections/hero.json`); a numeric suffix is added when that ID is
    /// taken, and a random ID is used when the type is too long or not a
    /// usable key.
    /// The template is not persisted until [`save`](Self::save) is called.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        section_type: impl Into<String>,
        description: impl Into<String>,
    ) -> SectionTemplate {
        let section_type = section_type.into();
        let id = self.allocate_id(&section_type);
        let template = SectionTemplate::new(id, name, section_type, description);
        info!(id = %template.id, name = %template.name, "Created section template");
        self.templates.push(template.clone());
        template
    }

    fn allocate_id(&self, section_type: &str) -> SectionId {
        let base = Slug::normalize(section_type.trim());
        if base.as_str().len() > MAX_DERIVED_ID_LEN
            || persistence::validate_key(base.as_str()).is_err()
        {
            return SectionId::new(format!("section-{}", SectionId::generate()));
        }
        let base = base.into_inner();
        let mut candidate = SectionId::new(base.clone());
        let mut suffix = 2;
        while self.contains(&candidate) {
            candidate = SectionId::new(format!("{base}-{suffix}"));
            suffix += 1;
        }
        candidate
    }

    /// Append a field to a template.
    ///
    /// # Errors
    ///
    /// - `StudioError::NotFound` if the template does not exist
    /// - `StudioError::ValidationFailed` if the name or label is blank, or
    ///   the name is already used by another field of the template
    pub fn add_field(
        &mut self,
        template_id: &SectionId,
        draft: FieldDraft,
    ) -> StudioResult<FieldSchema> {
        let template = self.get_mut(template_id)?;

        if draft.name.trim().is_empty() {
            return Err(StudioError::ValidationFailed(
                "field name is required".to_string(),
            ));
        }
        if draft.label.trim().is_empty() {
            return Err(StudioError::ValidationFailed(
                "field label is required".to_string(),
            ));
        }
        let field = FieldSchema::from_draft(draft);
        if template.field_named(&field.name).is_some() {
            return Err(StudioError::ValidationFailed(format!(
                "field name '{}' already exists on template '{}'",
                field.name, template.id
            )));
        }

        template.fields.push(field.clone());
        template.touch();
        debug!(template = %template_id, field = %field.name, "Added field");
        Ok(field)
    }

    /// Remove a field. Unknown fields are ignored.
    ///
    /// Returns `true` if a field was removed.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` if the template does not exist.
    pub fn remove_field(&mut self, template_id: &SectionId, field_id: &FieldId) -> StudioResult<bool> {
        let template = self.get_mut(template_id)?;
        let Some(index) = template.field_index(field_id) else {
            return Ok(false);
        };
        template.fields.remove(index);
        template.touch();
        debug!(template = %template_id, field = %field_id, "Removed field");
        Ok(true)
    }

    /// Swap a field with its neighbour. A no-op at either boundary or for
    /// unknown fields.
    ///
    /// Returns `true` if the field moved.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` if the template does not exist.
    pub fn move_field(
        &mut self,
        template_id: &SectionId,
        field_id: &FieldId,
        direction: MoveDirection,
    ) -> StudioResult<bool> {
        let template = self.get_mut(template_id)?;
        let Some(index) = template.field_index(field_id) else {
            return Ok(false);
        };
        let moved = swap_adjacent(&mut template.fields, index, direction);
        if moved {
            template.touch();
        }
        Ok(moved)
    }

    /// Move a field to `index` (clamped) through adjacent swaps.
    ///
    /// Returns the number of swaps performed.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` if the template does not exist.
    pub fn move_field_to(
        &mut self,
        template_id: &SectionId,
        field_id: &FieldId,
        index: usize,
    ) -> StudioResult<usize> {
        let template = self.get_mut(template_id)?;
        let Some(from) = template.field_index(field_id) else {
            return Ok(0);
        };
        let swaps = move_by_swaps(&mut template.fields, from, index);
        if swaps > 0 {
            template.touch();
        }
        Ok(swaps)
    }

    /// Edit a template's name, type tag or description.
    ///
    /// # Errors
    ///
    /// - `StudioError::NotFound` if the template does not exist
    /// - `StudioError::ValidationFailed` if the new name is blank
    pub fn update_metadata(
        &mut self,
        template_id: &SectionId,
        metadata: TemplateMetadata,
    ) -> StudioResult<()> {
        if metadata.name.as_ref().is_some_and(|n| n.trim().is_empty()) {
            return Err(StudioError::ValidationFailed(
                "template name is required".to_string(),
            ));
        }
        let template = self.get_mut(template_id)?;
        if let Some(name) = metadata.name {
            template.name = name;
        }
        if let Some(section_type) = metadata.section_type {
            template.section_type = section_type;
        }
        if let Some(description) = metadata.description {
            template.description = description;
        }
        template.touch();
        Ok(())
    }

    /// Validate and persist a template from the registry.
    ///
    /// Returns the soft-constraint warnings found (e.g. a select field
    /// without options); they are logged but do not block the save.
    ///
    /// # Errors
    ///
    /// - `StudioError::NotFound` if the template does not exist
    /// - `StudioError::ValidationFailed` if the schema has errors
    /// - `StudioError::Persistence` if writing fails
    #[instrument(skip(self), fields(template = %template_id))]
    pub fn save(&self, template_id: &SectionId) -> StudioResult<Vec<SchemaIssue>> {
        let template = self
            .get(template_id)
            .ok_or_else(|| StudioError::section_not_found(template_id))?;
        let warnings = check_schema(template)?;
        persistence::save_as(
            self.store.as_ref(),
            Category::Sections,
            template.id.as_str(),
            template,
        )?;
        info!(fields = template.fields.len(), "Saved section template");
        Ok(warnings)
    }

    /// Validate and persist an externally edited template, then insert or
    /// replace it in the registry.
    ///
    /// The registry is only updated once the document is written.
    ///
    /// # Errors
    ///
    /// - `StudioError::ValidationFailed` if the schema has errors
    /// - `StudioError::Persistence` if writing fails
    #[instrument(skip(self, template), fields(template = %template.id))]
    pub fn save_template(&mut self, template: SectionTemplate) -> StudioResult<Vec<SchemaIssue>> {
        let warnings = check_schema(&template)?;
        persistence::save_as(
            self.store.as_ref(),
            Category::Sections,
            template.id.as_str(),
            &template,
        )?;
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
        info!("Saved section template");
        Ok(warnings)
    }

    /// Delete a template from the store and the registry.
    ///
    /// Pages referencing it are left untouched; their references become
    /// dangling. Returns `true` if the template was in the registry.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Persistence` if the document cannot be removed;
    /// the registry is unchanged in that case.
    #[instrument(skip(self), fields(template = %template_id))]
    pub fn delete(&mut self, template_id: &SectionId) -> StudioResult<bool> {
        persistence::validate_key(template_id.as_str())?;
        self.store.delete(Category::Sections, template_id.as_str())?;
        let before = self.templates.len();
        self.templates.retain(|t| &t.id != template_id);
        let removed = self.templates.len() != before;
        info!(removed, "Deleted section template");
        Ok(removed)
    }

    /// Preview descriptors for every field of a template, in order.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` if the template does not exist.
    pub fn preview(&self, template_id: &SectionId) -> StudioResult<Vec<PreviewDescriptor>> {
        let template = self
            .get(template_id)
            .ok_or_else(|| StudioError::section_not_found(template_id))?;
        Ok(template.fields.iter().map(render_preview).collect())
    }
}

/// Split schema issues into a hard failure or a list of warnings.
fn check_schema(template: &SectionTemplate) -> StudioResult<Vec<SchemaIssue>> {
    let (errors, warnings): (Vec<_>, Vec<_>) = template
        .validate()
        .into_iter()
        .partition(SchemaIssue::is_error);

    if !errors.is_empty() {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(StudioError::ValidationFailed(message));
    }
    for issue in &warnings {
        warn!(template = %template.id, "{issue}");
    }
    Ok(warnings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use site_composer_core::{FieldOption, FieldType};

    use super::*;
    use crate::persistence::MemoryStore;

    fn registry() -> (Arc<MemoryStore>, SectionRegistry) {
        let store = Arc::new(MemoryStore::new());
        let registry = SectionRegistry::new(store.clone());
        (store, registry)
    }

    fn hero(registry: &mut SectionRegistry) -> SectionId {
        registry
            .create("Hero Banner", "hero", "A full-width banner")
            .id
    }

    fn field_names(registry: &SectionRegistry, id: &SectionId) -> Vec<String> {
        registry
            .get(id)
            .unwrap()
            .fields
            .iter()
            .map(|f| f.name.clone())
            .collect()
    }

    #[test]
    fn test_create_derives_id_from_type() {
        let (_store, mut registry) = registry();
        let first = hero(&mut registry);
        let second = hero(&mut registry);
        let custom = registry.create("Odd", "  ", "").id;

        assert_eq!(first.as_str(), "hero");
        assert_eq!(second.as_str(), "hero-2");
        assert!(custom.as_str().starts_with("section-"));
        assert!(registry.get(&first).unwrap().fields.is_empty());
    }

    #[test]
    fn test_create_long_type_gets_random_id() {
        let (store, mut registry) = registry();
        let long_type = "a".repeat(300);
        let id = registry.create("Long", long_type.as_str(), "").id;

        assert!(id.as_str().starts_with("section-"));
        assert!(id.as_str().len() <= MAX_DERIVED_ID_LEN);
        assert_eq!(registry.get(&id).unwrap().section_type, long_type);

        registry.add_field(&id, FieldDraft::new("heading", "text", "Heading")).unwrap();
        registry.save(&id).unwrap();
        assert_eq!(store.list(Category::Sections).unwrap(), [id.as_str()]);

        let exact = "b".repeat(MAX_DERIVED_ID_LEN);
        assert_eq!(registry.create("Exact", exact.as_str(), "").id.as_str(), exact);
    }

    #[test]
    fn test_create_does_not_persist() {
        let (store, mut registry) = registry();
        hero(&mut registry);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_field_and_duplicate_name() {
        let (_store, mut registry) = registry();
        let id = hero(&mut registry);
        let draft = FieldDraft::new("heading", FieldType::Text, "Heading").required(true);

        let field = registry.add_field(&id, draft.clone()).unwrap();
        assert!(field.required);
        assert_eq!(registry.get(&id).unwrap().fields.len(), 1);

        let err = registry.add_field(&id, draft).unwrap_err();
        assert!(matches!(err, StudioError::ValidationFailed(_)));
        assert_eq!(registry.get(&id).unwrap().fields.len(), 1);
    }

    #[test]
    fn test_add_field_requires_name_and_label() {
        let (_store, mut registry) = registry();
        let id = hero(&mut registry);
        let before = registry.get(&id).unwrap().updated_at;

        assert!(registry.add_field(&id, FieldDraft::new("", "text", "Heading")).is_err());
        assert!(registry.add_field(&id, FieldDraft::new("heading", "text", "  ")).is_err());
        let template = registry.get(&id).unwrap();
        assert!(template.fields.is_empty());
        assert_eq!(template.updated_at, before);
    }

    #[test]
    fn test_add_field_unknown_template() {
        let (_store, mut registry) = registry();
        let err = registry
            .add_field(&SectionId::new("nope"), FieldDraft::new("a", "text", "A"))
            .unwrap_err();
        assert!(matches!(err, StudioError::NotFound { .. }));
    }

    #[test]
    fn test_add_field_bumps_updated_at() {
        let (_store, mut registry) = registry();
        let id = hero(&mut registry);
        let created = registry.get(&id).unwrap().created_at;
        registry.add_field(&id, FieldDraft::new("heading", "text", "Heading")).unwrap();
        assert!(registry.get(&id).unwrap().updated_at >= created);
    }

    #[test]
    fn test_remove_field_is_idempotent() {
        let (_store, mut registry) = registry();
        let id = hero(&mut registry);
        let field = registry.add_field(&id, FieldDraft::new("heading", "text", "Heading")).unwrap();

        assert!(registry.remove_field(&id, &field.id).unwrap());
        assert!(!registry.remove_field(&id, &field.id).unwrap());
        assert!(!registry.remove_field(&id, &FieldId::new("ghost")).unwrap());
        assert!(registry.get(&id).unwrap().fields.is_empty());
    }

    #[test]
    fn test_move_field_boundaries() {
        let (_store, mut registry) = registry();
        let id = hero(&mut registry);
        let a = registry.add_field(&id, FieldDraft::new("a", "text", "A")).unwrap();
        registry.add_field(&id, FieldDraft::new("b", "text", "B")).unwrap();
        let c = registry.add_field(&id, FieldDraft::new("c", "text", "C")).unwrap();

        assert!(!registry.move_field(&id, &a.id, MoveDirection::Up).unwrap());
        assert!(!registry.move_field(&id, &c.id, MoveDirection::Down).unwrap());
        assert_eq!(field_names(&registry, &id), ["a", "b", "c"]);

        assert!(registry.move_field(&id, &a.id, MoveDirection::Down).unwrap());
        assert_eq!(field_names(&registry, &id), ["b", "a", "c"]);

        assert_eq!(registry.move_field_to(&id, &c.id, 0).unwrap(), 2);
        assert_eq!(field_names(&registry, &id), ["c", "b", "a"]);
    }

    #[test]
    fn test_update_metadata() {
        let (_store, mut registry) = registry();
        let id = hero(&mut registry);
        registry
            .update_metadata(
                &id,
                TemplateMetadata {
                    description: Some("Big banner".to_string()),
                    ..TemplateMetadata::default()
                },
            )
            .unwrap();
        assert_eq!(registry.get(&id).unwrap().description, "Big banner");

        let err = registry
            .update_metadata(
                &id,
                TemplateMetadata {
                    name: Some(String::new()),
                    ..TemplateMetadata::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_save_and_hydrate() {
        let (store, mut registry) = registry();
        let id = hero(&mut registry);
        registry.add_field(&id, FieldDraft::new("heading", "text", "Heading")).unwrap();
        let warnings = registry.save(&id).unwrap();
        assert!(warnings.is_empty());

        let hydrated = SectionRegistry::hydrate(store).unwrap();
        assert_eq!(hydrated.templates(), registry.templates());
    }

    #[test]
    fn test_save_reports_select_warning() {
        let (store, mut registry) = registry();
        let id = hero(&mut registry);
        registry.add_field(&id, FieldDraft::new("layout", "select", "Layout")).unwrap();
        let warnings = registry.save(&id).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(store.list(Category::Sections).unwrap(), ["hero"]);

        registry
            .add_field(
                &id,
                FieldDraft::new("align", "select", "Align")
                    .options(vec![FieldOption::new("Left", "left")]),
            )
            .unwrap();
        assert_eq!(registry.save(&id).unwrap().len(), 1);
    }

    #[test]
    fn test_save_template_rejects_schema_errors() {
        let (store, mut registry) = registry();
        let mut template = SectionTemplate::new(SectionId::new("bad"), "Bad", "custom", "");
        for _ in 0..2 {
            template
                .fields
                .push(FieldSchema::from_draft(FieldDraft::new("x", "text", "X")));
        }
        assert!(registry.save_template(template).unwrap_err().is_validation());
        assert!(registry.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_removes_document() {
        let (store, mut registry) = registry();
        let id = hero(&mut registry);
        registry.save(&id).unwrap();

        assert!(registry.delete(&id).unwrap());
        assert!(!registry.contains(&id));
        assert!(store.is_empty());
        assert!(!registry.delete(&id).unwrap());
    }

    #[test]
    fn test_search() {
        let (_store, mut registry) = registry();
        hero(&mut registry);
        registry.create("Testimonials", "testimonials", "Customer quotes with images");
        let names: Vec<_> = registry.search("QUOTES").map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Testimonials"]);
        assert_eq!(registry.search("").count(), 2);
    }

    #[test]
    fn test_preview_all_fields() {
        let (_store, mut registry) = registry();
        let id = hero(&mut registry);
        registry.add_field(&id, FieldDraft::new("heading", "text", "Heading")).unwrap();
        registry.add_field(&id, FieldDraft::new("bg", "image", "Background")).unwrap();
        let previews = registry.preview(&id).unwrap();
        assert_eq!(previews.len(), 2);
        assert_eq!(previews[1].name, "bg");
    }
}
