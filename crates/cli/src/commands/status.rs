//! Summary counts for a data directory.

use site_composer_studio::Studio;

use super::{CommandError, emit};

pub fn run(studio: &Studio) -> Result<(), CommandError> {
    let summary = studio.summary();
    emit(format_args!(
        "pages:    {} ({} published, {} draft)",
        summary.pages,
        summary.published_pages,
        summary.pages - summary.published_pages
    ))?;
    emit(format_args!("sections: {}", summary.sections))?;
    emit(format_args!(
        "config:   {}/5 domains stored",
        summary.persisted_config_domains
    ))?;

    let dangling = studio.dangling_references().len();
    if dangling > 0 {
        tracing::warn!("{dangling} dangling section reference(s), run `sc-cli check` for details");
    }
    Ok(())
}
