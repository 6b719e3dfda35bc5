//! Consistency check for a data directory.
//!
//! Validates every section template schema and reports page references to
//! templates that no longer exist. Schema errors fail the command; select
//! fields without options and dangling references are only reported.

use site_composer_studio::Studio;

use super::{CommandError, emit};

pub fn run(studio: &Studio) -> Result<(), CommandError> {
    let mut errors = 0;
    let mut warnings = 0;

    for template in studio.sections().templates() {
        for issue in template.validate() {
            if issue.is_error() {
                errors += 1;
            } else {
                warnings += 1;
            }
            emit(format_args!("sections/{}: {issue}", template.id))?;
        }
    }

    for dangling in studio.dangling_references() {
        warnings += 1;
        emit(format_args!("pages/{}: warning: {dangling}", dangling.page_slug))?;
    }

    tracing::info!(errors, warnings, "Check complete");
    if errors > 0 {
        return Err(CommandError::CheckFailed(errors));
    }
    Ok(())
}
