//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Project catalog commands.
#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List every project in the catalog
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },

    /// Show one project as it appears in the details overlay
    Show {
        /// Project id
        id: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Catalog file commands.
#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// Validate a catalog file
    Validate {
        /// Catalog file to validate (defaults to the configured catalog)
        file: Option<PathBuf>,
    },
}

/// Replay command arguments.
#[derive(Debug, Args)]
pub struct ReplayCommand {
    /// JSON script describing the session
    pub script: PathBuf,

    /// Address fragment at page load (overrides the script)
    #[arg(long, value_name = "FRAGMENT")]
    pub hash: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
