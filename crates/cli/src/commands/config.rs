//! Site configuration commands.
//!
//! # Usage
//!
//! ```bash
//! sc-cli config show navigation
//! sc-cli config reset seo
//! ```

use site_composer_core::ConfigDomain;
use site_composer_studio::Studio;

use super::{CommandError, emit};

/// Print a domain's current value (stored or default) as JSON.
pub fn show(studio: &Studio, domain: ConfigDomain) -> Result<(), CommandError> {
    let value = studio.config().get(domain);
    if !studio.config().is_persisted(domain) {
        tracing::info!("No stored {domain} config, showing default");
    }
    emit(serde_json::to_string_pretty(value.as_ref())?)
}

/// Remove a domain's stored document so it reads as its default again.
pub fn reset(studio: &mut Studio, domain: ConfigDomain) -> Result<(), CommandError> {
    studio.config_mut().clear(domain)?;
    tracing::info!("Deleted stored {domain} config, default now in effect");
    Ok(())
}
