//! Site Composer CLI - operator tools for a site-data directory.
//!
//! # Usage
//!
//! ```bash
//! # Write default documents for every config domain
//! sc-cli init
//!
//! # Show page, section and config counts
//! sc-cli status
//!
//! # List pages matching a search term, then publish one
//! sc-cli pages list --query about
//! sc-cli pages publish page-3f2a...
//!
//! # Print or reset a config domain
//! sc-cli config show seo
//! sc-cli config reset footer
//!
//! # Validate templates and report dangling section references
//! sc-cli check
//! ```
//!
//! # Environment Variables
//!
//! - `SITE_DATA_DIR` - Data directory (overridden by `--data-dir`)
//! - `SITE_PRETTY_JSON` - Write indented JSON documents (default: `true`)
//! - `RUST_LOG` - Log filter (default: `info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use site_composer_core::ConfigDomain;
use site_composer_studio::{Studio, StudioConfig};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "sc-cli")]
#[command(author, version, about = "Site Composer CLI tools")]
struct Cli {
    /// Site data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default documents for config domains that have none
    Init,
    /// Show page, section and config counts
    Status,
    /// Manage pages
    Pages {
        #[command(subcommand)]
        action: PagesAction,
    },
    /// Inspect section templates
    Sections {
        #[command(subcommand)]
        action: SectionsAction,
    },
    /// Inspect or reset site-wide configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Validate templates and report dangling section references
    Check,
}

#[derive(Subcommand)]
enum PagesAction {
    /// List pages
    List {
        /// Only pages whose title or slug contains this text
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Publish a page
    Publish {
        /// Page ID
        id: String,
    },
    /// Return a page to draft
    Unpublish {
        /// Page ID
        id: String,
    },
}

#[derive(Subcommand)]
enum SectionsAction {
    /// List section templates
    List {
        /// Only templates whose name or description contains this text
        #[arg(short, long)]
        query: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current value of a domain as JSON
    Show {
        /// Domain (`header`, `footer`, `navigation`, `seo`, `scripts`)
        domain: ConfigDomain,
    },
    /// Delete a domain's stored document so it reads as its default
    Reset {
        /// Domain (`header`, `footer`, `navigation`, `seo`, `scripts`)
        domain: ConfigDomain,
    },
}

fn main() {
    // Load .env before the log filter so RUST_LOG can be set there
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StudioConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }
    tracing::debug!(data_dir = %config.data_dir.display(), "Opening studio");
    let mut studio = Studio::open(&config)?;

    match cli.command {
        Commands::Init => commands::init::run(&mut studio)?,
        Commands::Status => commands::status::run(&studio)?,
        Commands::Pages { action } => match action {
            PagesAction::List { query } => commands::pages::list(&studio, query.as_deref())?,
            PagesAction::Publish { id } => commands::pages::publish(&mut studio, &id, true)?,
            PagesAction::Unpublish { id } => commands::pages::publish(&mut studio, &id, false)?,
        },
        Commands::Sections { action } => match action {
            SectionsAction::List { query } => {
                commands::sections::list(&studio, query.as_deref())?;
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Show { domain } => commands::config::show(&studio, domain)?,
            ConfigAction::Reset { domain } => commands::config::reset(&mut studio, domain)?,
        },
        Commands::Check => commands::check::run(&studio)?,
    }
    Ok(())
}
