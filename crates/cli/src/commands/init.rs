//! Initialize a data directory.
//!
//! # Usage
//!
//! ```bash
//! sc-cli init
//! sc-cli --data-dir ./my-site init
//! ```
//!
//! Writes the compiled default of every config domain that has no stored
//! document yet. Existing documents are left alone, so running it twice is
//! harmless.

use site_composer_core::{ConfigDomain, ConfigValue};
use site_composer_studio::Studio;

use super::CommandError;

pub fn run(studio: &mut Studio) -> Result<(), CommandError> {
    let missing: Vec<ConfigDomain> = ConfigDomain::ALL
        .into_iter()
        .filter(|domain| !studio.config().is_persisted(*domain))
        .collect();

    if missing.is_empty() {
        tracing::info!("All config domains already initialized");
        return Ok(());
    }

    for domain in missing {
        studio.config_mut().set(ConfigValue::default_for(domain))?;
        tracing::info!("Wrote default {domain} config");
    }

    tracing::info!("Initialization complete!");
    Ok(())
}
