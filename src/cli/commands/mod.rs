//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod helpers;
mod query;
mod serve;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "classify")]
#[command(about = "Keyword and bounding-box queries over redlining map data")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// GeoJSON dataset to load (overrides config and CLASSIFY_DATASET)
    #[arg(short, long, global = true)]
    dataset: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Bind address: PORT, HOST, or HOST:PORT
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Search area descriptions by keyword
    Search {
        /// Keyword to look for (case-insensitive)
        keyword: String,
        /// Match whole tokens instead of substrings
        #[arg(long)]
        token: bool,
        /// Print the JSON response body instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// List features with a position inside a bounding box
    Redlining {
        /// Minimum longitude
        #[arg(allow_negative_numbers = true)]
        min_lon: String,
        /// Maximum longitude
        #[arg(allow_negative_numbers = true)]
        max_lon: String,
        /// Minimum latitude
        #[arg(allow_negative_numbers = true)]
        min_lat: String,
        /// Maximum latitude
        #[arg(allow_negative_numbers = true)]
        max_lat: String,
        /// Print the JSON response body instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Show dataset load report
    Status,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        dataset: cli.dataset,
    };
    let (settings, _config) = load_settings_with_options(options).await;

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&settings, bind.as_deref()).await,
        Commands::Search {
            keyword,
            token,
            json,
        } => query::cmd_search(&settings, &keyword, token, json).await,
        Commands::Redlining {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
            json,
        } => {
            let bounds = crate::services::RawBounds::new(&min_lon, &max_lon, &min_lat, &max_lat);
            query::cmd_redlining(&settings, &bounds, json).await
        }
        Commands::Status => status::cmd_status(&settings).await,
    }
}
