//! # pagenav CLI
//!
//! Command-line front end for pagenav - a hash-routed page navigator driving a
//! small game collection shell.
//!
//! ## Usage
//!
//! - `pagenav` - Start the interactive shell
//! - `pagenav open "#games-list-page"` - Render one location and exit
//! - `pagenav routes` - Show registered pages
//! - `pagenav seed` - Fill the record store with sample games

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod commands;
mod config;

use commands::{open_command, routes_command, seed_command, shell_command};
use config::CliConfigLoader;

/// pagenav - A hash-routed page navigator
#[derive(Parser)]
#[command(name = "pagenav")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Drive a hash-routed page navigator from the terminal")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Landing page override
    #[arg(long)]
    landing_page: Option<String>,

    /// Record store file override
    #[arg(long, env = "PAGENAV_STORE")]
    store: Option<PathBuf>,

    /// Template directory or base URL override
    #[arg(long)]
    templates: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show registered pages
    Routes,

    /// Render the page at a URL fragment and exit
    Open {
        /// URL fragment, e.g. "#game-details-page?id=2"
        fragment: Option<String>,
    },

    /// Fill the record store with sample games
    Seed {
        /// Replace an existing collection
        #[arg(long)]
        force: bool,
    },

    /// Start the interactive shell
    Shell {
        /// URL fragment to open first
        fragment: Option<String>,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(landing_page) = &cli.landing_page {
        loader = loader.with_landing_page_override(landing_page.clone());
    }

    if let Some(store) = &cli.store {
        loader = loader.with_store_override(store.clone());
    }

    if let Some(templates) = &cli.templates {
        loader = loader.with_templates_override(templates.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    pagenav_core::init_tracing_with_debug(cli.verbose);

    // Build configuration loader
    let config_loader = build_config_loader(&cli);

    match cli.command {
        Some(Commands::Routes) => routes_command(config_loader).await,
        Some(Commands::Open { fragment }) => open_command(config_loader, fragment).await,
        Some(Commands::Seed { force }) => seed_command(config_loader, force).await,
        Some(Commands::Shell { fragment }) => shell_command(config_loader, fragment).await,
        // Default to the interactive shell
        None => shell_command(config_loader, None).await,
    }
}
