//! Section template commands.

use site_composer_studio::Studio;

use super::{CommandError, emit};

/// Print one tab-separated line per template: id, type, field count and
/// name.
pub fn list(studio: &Studio, query: Option<&str>) -> Result<(), CommandError> {
    for template in studio.sections().search(query.unwrap_or_default()) {
        emit(format_args!(
            "{}\t{}\t{} field(s)\t{}",
            template.id,
            template.section_type,
            template.fields.len(),
            template.name
        ))?;
    }
    Ok(())
}
