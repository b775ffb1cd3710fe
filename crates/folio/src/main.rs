//! `folio` - CLI for the portfolio navigation core
//!
//! This binary inspects the project catalog, validates configuration and
//! replays scripted browsing sessions against an in-memory page.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;

use folio::cli::{CatalogCommand, Cli, Command, ConfigCommand, OutputFormat, ProjectsCommand};
use folio::replay::{self, ReplayScript};
use folio::{init_logging, Catalog, Config, ProjectRecord};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Projects(cmd) => handle_projects(&load_catalog(&config)?, cmd),
        Command::Catalog(cmd) => Ok(handle_catalog(&config, cmd)?),
        Command::Replay(cmd) => {
            let mut script = ReplayScript::load(&cmd.script)?;
            if let Some(hash) = cmd.hash {
                script.hash = hash;
            }
            let report = replay::run(&script, load_catalog(&config)?, &config);
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(())
        }
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn load_catalog(config: &Config) -> folio::Result<Catalog> {
    match &config.site.catalog_path {
        Some(path) => Catalog::load(path),
        None => Ok(Catalog::builtin()),
    }
}

fn handle_projects(
    catalog: &Catalog,
    cmd: ProjectsCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ProjectsCommand::List { format } => match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(catalog.records())?);
            }
            OutputFormat::Table => {
                let width = catalog.iter().map(|r| r.id.len()).max().unwrap_or(2).max(2);
                println!("{:<width$}  {:<24}  TITLE", "ID", "PERIOD");
                for record in catalog.iter() {
                    println!(
                        "{:<width$}  {:<24}  {}",
                        record.id, record.period, record.title
                    );
                }
            }
            OutputFormat::Plain => {
                for record in catalog.iter() {
                    println!("{}  {}", record.id, record.title);
                }
            }
        },
        ProjectsCommand::Show { id, json } => match catalog.get(&id) {
            Some(record) if json => println!("{}", serde_json::to_string_pretty(record)?),
            Some(record) => print_record(record),
            None => println!("No project with id '{id}'."),
        },
    }
    Ok(())
}

fn print_record(record: &ProjectRecord) {
    println!("{}", record.title);
    println!("{}", "=".repeat(record.title.chars().count()));
    println!("Period:     {}", record.period);
    println!("Category:   {}", record.category);
    println!("Tech stack: {}", record.tech_stack);
    println!();
    println!("[Overview]");
    println!("{}", record.overview);
    println!();
    println!("[Workflow]");
    for (i, step) in record.workflow.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }
    if let Some(methodology) = &record.methodology {
        println!();
        println!("[Methodology]");
        println!("{methodology}");
    }
    println!();
    println!("[Results]");
    println!("{}", record.results);
}

fn handle_catalog(config: &Config, cmd: CatalogCommand) -> folio::Result<()> {
    match cmd {
        CatalogCommand::Validate { file } => {
            let catalog = match file.or_else(|| config.site.catalog_path.clone()) {
                Some(path) => {
                    println!("Validating catalog: {}", path.display());
                    Catalog::load(path)?
                }
                None => {
                    println!("Validating built-in catalog");
                    Catalog::new(Catalog::builtin().records().to_vec())?
                }
            };
            println!("Catalog is valid ({} projects).", catalog.len());
        }
    }
    Ok(())
}

fn print_report(report: &replay::ReplayReport) {
    println!("start: {:?}", report.start);
    for step in &report.steps {
        println!("{:>3}. {:?} -> {:?}", step.index + 1, step.step, step.outcome);
    }
    println!();
    println!("Final state");
    println!("-----------");
    println!("Mode:           {}", report.state.mode);
    println!(
        "Section:        {}",
        report.state.current_section.as_deref().unwrap_or("(none)")
    );
    println!("Fragment:       #{}", report.fragment);
    println!("History:        {} entries", report.history_length);
    println!(
        "Modal:          {}",
        report
            .state
            .modal
            .active_project
            .as_deref()
            .unwrap_or("closed")
    );
    println!("Scroll locked:  {}", report.body_scroll_locked);
    println!("Revealed:       {}", report.state.revealed);
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Site]");
                println!("  Mode:               {}", config.site.mode);
                println!("  Default section:    {}", config.site.default_section);
                println!("  Sections:           {}", config.site.sections.join(", "));
                match &config.site.catalog_path {
                    Some(path) => println!("  Catalog:            {}", path.display()),
                    None => println!("  Catalog:            (built-in)"),
                }
                println!();
                println!("[Scroll spy]");
                println!("  Band:               {}", config.scroll_spy.band().root_margin());
                println!();
                println!("[Reveal]");
                println!("  Enabled:            {}", config.reveal.enabled);
                println!("  Selectors:          {}", config.reveal.selector_list());
                println!("  Threshold:          {}", config.reveal.options.threshold);
                println!("  Root margin:        {}", config.reveal.options.root_margin());
                println!("  Transition:         {}", config.reveal.options.transition());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
