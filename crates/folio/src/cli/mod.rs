//! Command-line interface for folio.
//!
//! This module provides the CLI structure for the `folio` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{CatalogCommand, ConfigCommand, OutputFormat, ProjectsCommand, ReplayCommand};

use crate::logging::Verbosity;

/// folio - portfolio site navigation core
///
/// Inspect the project catalog, validate configuration, and replay scripted
/// browsing sessions against an in-memory page.
#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the project catalog
    #[command(subcommand)]
    Projects(ProjectsCommand),

    /// Work with catalog files
    #[command(subcommand)]
    Catalog(CatalogCommand),

    /// Replay a scripted session against an in-memory page
    Replay(ReplayCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "folio");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["folio", "-q", "config", "path"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);

        let cli = Cli::try_parse_from(["folio", "-vv", "config", "path"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_projects_list() {
        let cli = Cli::try_parse_from(["folio", "projects", "list", "-f", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Projects(ProjectsCommand::List {
                format: OutputFormat::Json
            })
        ));
    }

    #[test]
    fn test_parse_projects_show() {
        let cli =
            Cli::try_parse_from(["folio", "projects", "show", "unieuro-forecasting"]).unwrap();
        match cli.command {
            Command::Projects(ProjectsCommand::Show { id, json }) => {
                assert_eq!(id, "unieuro-forecasting");
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_replay() {
        let cli = Cli::try_parse_from(["folio", "replay", "s.json", "--hash", "about", "--json"])
            .unwrap();
        match cli.command {
            Command::Replay(cmd) => {
                assert_eq!(cmd.script, PathBuf::from("s.json"));
                assert_eq!(cmd.hash.as_deref(), Some("about"));
                assert!(cmd.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_catalog_validate() {
        let cli = Cli::try_parse_from(["folio", "catalog", "validate", "p.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Catalog(CatalogCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["folio", "-c", "/custom/config.toml", "config", "show"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
