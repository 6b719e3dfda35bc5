//! CLI command implementations.

pub mod check;
pub mod config;
pub mod init;
pub mod pages;
pub mod sections;
pub mod status;

use std::io::Write;

use site_composer_studio::StudioError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A store command failed.
    #[error(transparent)]
    Studio(#[from] StudioError),

    /// Writing to stdout failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// A value could not be encoded for display.
    #[error("Encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// `check` found problems.
    #[error("Check failed with {0} error(s)")]
    CheckFailed(usize),
}

/// Write one line to stdout.
///
/// Results go to stdout so they can be piped; logs go to stderr.
pub fn emit(line: impl std::fmt::Display) -> Result<(), CommandError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}")?;
    Ok(())
}
